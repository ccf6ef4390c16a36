use crate::evaluation::estimators::Estimator;

/// Running mean, `sum / count`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicEstimator {
    count: usize,
    sum: f64,
}

impl Estimator for BasicEstimator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count += 1;
        self.sum += v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            f64::NAN
        }
    }

    fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_observations() {
        let mut e = BasicEstimator::default();
        assert!(e.estimation().is_nan());
        for v in [0.0, 1.0, f64::NAN, 1.0, 0.0] {
            e.add(v);
        }
        assert_eq!(e.count(), 4);
        assert_eq!(e.estimation(), 0.5);
    }
}
