use crate::classifiers::decision_tree::class_distribution::ClassDistribution;
use crate::classifiers::decision_tree::split_criteria::split_criterion::SplitCriterion;

/// Binary Shannon entropy in bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySplitCriterion;

impl EntropySplitCriterion {
    pub fn new() -> Self {
        Self
    }

    /// `-(p log2 p + (1 - p) log2 (1 - p))`, with `0 log 0 = 0`.
    pub fn compute_entropy(p: f64) -> f64 {
        if p <= 0.0 || p >= 1.0 {
            return 0.0;
        }
        -(p * p.log2() + (1.0 - p) * (1.0 - p).log2())
    }
}

impl SplitCriterion for EntropySplitCriterion {
    fn impurity(&self, p: f64) -> f64 {
        Self::compute_entropy(p)
    }

    fn get_range_of_merit(&self) -> f64 {
        1.0
    }

    // pure children are skipped outright rather than evaluated at log(0)
    fn get_merit_of_split(
        &self,
        pre_split_distribution: &ClassDistribution,
        post_split_dists: &[ClassDistribution],
    ) -> f64 {
        if pre_split_distribution.is_empty() {
            return 0.0;
        }
        let total = pre_split_distribution.total as f64;
        let weighted: f64 = post_split_dists
            .iter()
            .filter(|d| !d.is_empty() && !d.is_pure())
            .map(|d| (d.total as f64 / total) * Self::compute_entropy(d.positive_probability()))
            .sum();
        Self::compute_entropy(pre_split_distribution.positive_probability()) - weighted
    }
}
