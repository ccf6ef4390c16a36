use crate::classifiers::Prediction;
use crate::core::instances::Instance;
use crate::evaluation::{Estimator, MaxEstimator, Measurement, PerformanceEvaluator};

pub const ERROR: &str = "error";
pub const MAX_HEIGHT: &str = "max_height";
pub const AVERAGE_HEIGHT: &str = "average_height";
pub const INSTANCES: &str = "instances";

/// Zero-one loss plus statistics of the traversal height of each prediction.
#[derive(Debug, Default, Clone)]
pub struct HeightAwareEvaluator<E: Estimator + Default> {
    error: E,
    height: E,
    max_height: MaxEstimator,
}

impl<E: Estimator + Default> HeightAwareEvaluator<E> {
    pub fn new() -> Self {
        Self {
            error: E::default(),
            height: E::default(),
            max_height: MaxEstimator::default(),
        }
    }

    pub fn instances(&self) -> usize {
        self.error.count()
    }

    pub fn average_error(&self) -> f64 {
        self.error.estimation()
    }

    pub fn average_height(&self) -> f64 {
        self.height.estimation()
    }

    pub fn max_height(&self) -> usize {
        if self.max_height.count() == 0 {
            return 0;
        }
        self.max_height.estimation() as usize
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for HeightAwareEvaluator<E> {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn add_result(&mut self, example: &dyn Instance, prediction: Prediction) {
        let Some(truth) = example.class_value() else {
            return;
        };
        self.error
            .add(if truth == prediction.class_index { 0.0 } else { 1.0 });
        self.height.add(prediction.height as f64);
        self.max_height.add(prediction.height as f64);
    }

    fn performance(&self) -> Vec<Measurement> {
        vec![
            Measurement::new(ERROR, self.average_error()),
            Measurement::new(MAX_HEIGHT, self.max_height() as f64),
            Measurement::new(AVERAGE_HEIGHT, self.average_height()),
            Measurement::new(INSTANCES, self.instances() as f64),
        ]
    }
}
