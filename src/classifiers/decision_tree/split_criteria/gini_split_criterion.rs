use crate::classifiers::decision_tree::split_criteria::split_criterion::SplitCriterion;

#[derive(Debug, Default, Clone, Copy)]
pub struct GiniSplitCriterion;

impl GiniSplitCriterion {
    pub fn new() -> Self {
        Self
    }

    /// `1 - (p^2 + (1 - p)^2)`
    pub fn compute_gini(p: f64) -> f64 {
        1.0 - (p.powi(2) + (1.0 - p).powi(2))
    }
}

impl SplitCriterion for GiniSplitCriterion {
    fn impurity(&self, p: f64) -> f64 {
        Self::compute_gini(p)
    }

    fn get_range_of_merit(&self) -> f64 {
        0.5
    }
}
