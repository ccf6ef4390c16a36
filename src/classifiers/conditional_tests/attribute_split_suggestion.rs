use crate::classifiers::conditional_tests::NominalAttributeMultiwayTest;
use crate::classifiers::decision_tree::class_distribution::ClassDistribution;

/// A candidate split: the test, the class counts of each branch and the
/// information gain they yield.
#[derive(Debug, Clone)]
pub struct AttributeSplitSuggestion {
    split_test: NominalAttributeMultiwayTest,
    resulting_class_distribution: Vec<ClassDistribution>,
    merit: f64,
}

impl AttributeSplitSuggestion {
    pub fn new(
        split_test: NominalAttributeMultiwayTest,
        resulting_class_distribution: Vec<ClassDistribution>,
        merit: f64,
    ) -> Self {
        Self {
            split_test,
            resulting_class_distribution,
            merit,
        }
    }

    pub fn get_split_test(&self) -> &NominalAttributeMultiwayTest {
        &self.split_test
    }

    pub fn get_resulting_class_distribution(&self) -> &[ClassDistribution] {
        &self.resulting_class_distribution
    }

    pub fn get_merit(&self) -> f64 {
        self.merit
    }

    pub fn number_of_splits(&self) -> usize {
        self.resulting_class_distribution.len()
    }

    /// Branches that received at least one instance.
    pub fn number_of_present_values(&self) -> usize {
        self.resulting_class_distribution
            .iter()
            .filter(|d| !d.is_empty())
            .count()
    }

    /// Strictly better merit. Ties keep the earlier candidate.
    pub fn is_better_than(&self, other: &AttributeSplitSuggestion) -> bool {
        self.merit > other.merit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(attribute: usize, merit: f64) -> AttributeSplitSuggestion {
        AttributeSplitSuggestion::new(
            NominalAttributeMultiwayTest::new(attribute, 3),
            vec![
                ClassDistribution::new(1, 2),
                ClassDistribution::default(),
                ClassDistribution::new(0, 1),
            ],
            merit,
        )
    }

    #[test]
    fn counts_present_values() {
        let s = suggestion(0, 0.3);
        assert_eq!(s.number_of_splits(), 3);
        assert_eq!(s.number_of_present_values(), 2);
        assert_eq!(s.get_split_test().attribute_index(), 0);
    }

    #[test]
    fn ties_do_not_replace() {
        assert!(!suggestion(1, 0.3).is_better_than(&suggestion(0, 0.3)));
        assert!(suggestion(1, 0.4).is_better_than(&suggestion(0, 0.3)));
    }
}
