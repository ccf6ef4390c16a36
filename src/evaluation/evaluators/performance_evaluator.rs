use crate::classifiers::Prediction;
use crate::core::instances::Instance;
use crate::evaluation::Measurement;
use std::collections::HashMap;

/// Accumulates predictions against ground truth and exposes aggregated
/// metrics via [`performance`](PerformanceEvaluator::performance).
pub trait PerformanceEvaluator {
    /// Clears accumulated results.
    fn reset(&mut self);

    /// Feeds one labeled example and the prediction made for it. Examples
    /// without a class value are skipped.
    fn add_result(&mut self, example: &dyn Instance, prediction: Prediction);

    fn performance(&self) -> Vec<Measurement>;
}

pub trait PerformanceEvaluatorExt {
    /// Returns (name, Some(value)|None) for each requested metric, preserving order.
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn metric(&self, name: &str) -> Option<f64> {
        self.metrics([name]).into_iter().next().and_then(|(_, v)| v)
    }
}

impl<T: PerformanceEvaluator + ?Sized> PerformanceEvaluatorExt for T {
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let map: HashMap<_, _> = self
            .performance()
            .into_iter()
            .map(|m| (m.name, m.value))
            .collect();
        names
            .into_iter()
            .map(|n| (n.to_string(), map.get(n).copied()))
            .collect()
    }
}
