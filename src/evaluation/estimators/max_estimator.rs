use crate::evaluation::estimators::Estimator;

/// Running maximum.
#[derive(Debug, Clone, Copy)]
pub struct MaxEstimator {
    count: usize,
    max: f64,
}

impl Default for MaxEstimator {
    fn default() -> Self {
        Self {
            count: 0,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Estimator for MaxEstimator {
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count += 1;
        self.max = self.max.max(v);
    }

    fn estimation(&self) -> f64 {
        if self.count > 0 { self.max } else { f64::NAN }
    }

    fn count(&self) -> usize {
        self.count
    }
}
