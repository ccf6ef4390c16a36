use crate::classifiers::decision_tree::class_distribution::ClassDistribution;

/// Impurity-based merit of partitioning a two-class set.
pub trait SplitCriterion {
    /// Impurity of a set whose positive share is `p`; 0 when pure.
    fn impurity(&self, p: f64) -> f64;

    /// Largest value [`impurity`](SplitCriterion::impurity) can take.
    fn get_range_of_merit(&self) -> f64;

    /// Information gain: parent impurity minus the size-weighted impurity of
    /// the non-empty children.
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
            .filter(|d| !d.is_empty())
            .map(|d| (d.total as f64 / total) * self.impurity(d.positive_probability()))
            .sum();
        self.impurity(pre_split_distribution.positive_probability()) - weighted
    }
}
