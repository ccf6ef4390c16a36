use crate::classifiers::conditional_tests::{
    AttributeSplitSuggestion, NominalAttributeMultiwayTest,
};
use crate::classifiers::decision_tree::chi_square::ChiSquarePruner;
use crate::classifiers::decision_tree::class_distribution::{ClassDistribution, class_of};
use crate::classifiers::decision_tree::decision_tree::DecisionTree;
use crate::classifiers::decision_tree::nodes::{Node, NodeId};
use crate::classifiers::decision_tree::split_criteria::SplitCriterion;
use crate::classifiers::decision_tree::tree_config::TreeConfig;
use crate::core::dataset::Dataset;
use crate::core::errors::{DataError, TreeError};
use crate::core::instances::Instance;
use log::{debug, trace};
use std::collections::VecDeque;
use std::sync::Arc;

/// Gains within this many ulps of the criterion's range are rounding noise
/// left over from an uninformative split.
const GAIN_TOLERANCE_ULPS: f64 = 64.0;

/// Breadth-first induction of a [`DecisionTree`].
pub struct TreeBuilder {
    config: TreeConfig,
    split_criterion: Box<dyn SplitCriterion>,
    pruner: ChiSquarePruner,
}

impl TreeBuilder {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            split_criterion: config.impurity.criterion(),
            pruner: ChiSquarePruner::new(config.significance),
            config,
        }
    }

    pub fn build(&self, dataset: &Dataset) -> Result<DecisionTree, TreeError> {
        if dataset.is_empty() {
            return Err(DataError::EmptyDataset.into());
        }
        let header = Arc::clone(dataset.header());
        let class_attribute = header.ensure_binary_class()?;
        let positive_class = self.config.resolve_positive_class(class_attribute)?;
        debug!(
            "building tree over {} instances ({}, significance {})",
            dataset.len(),
            self.config.impurity,
            self.pruner.level()
        );

        let rows: Vec<usize> = (0..dataset.len()).collect();
        let root_distribution = ClassDistribution::of_rows(dataset, &rows, positive_class)?;
        let mut nodes = vec![Node::new(
            None,
            root_distribution,
            root_distribution.majority_class(positive_class),
        )];
        let mut queue = VecDeque::from([(NodeId(0), rows)]);

        while let Some((id, rows)) = queue.pop_front() {
            let node = &nodes[id.0];
            if node.observed_class_distribution_is_pure() {
                trace!("node {} is pure ({} instances)", id.index(), node.instance_count());
                continue;
            }
            let distribution = node.class_distribution;

            let Some(best) = self.best_split(dataset, &rows, &distribution, positive_class)? else {
                trace!("node {}: no attribute has positive gain", id.index());
                continue;
            };
            let split_test = *best.get_split_test();
            let attribute = split_test.attribute_index();

            if let Some(test) = self
                .pruner
                .evaluate(&distribution, best.get_resulting_class_distribution())?
            {
                if test.prune {
                    debug!(
                        "node {}: pruned split on attribute {} (chi2 {:.4} < {:.3}, df {})",
                        id.index(),
                        attribute,
                        test.statistic,
                        test.critical_value,
                        test.degrees_of_freedom
                    );
                    continue;
                }
            }

            let partitions = partition(dataset, &rows, attribute, best.number_of_splits())?;
            debug!(
                "node {}: split on attribute {} (gain {:.6}, {} branches)",
                id.index(),
                attribute,
                best.get_merit(),
                best.number_of_present_values()
            );

            nodes[id.0].set_split(split_test);
            for (value, subset) in partitions.into_iter().enumerate() {
                if subset.is_empty() {
                    continue;
                }
                let child_distribution = best.get_resulting_class_distribution()[value];
                let child = NodeId(nodes.len());
                nodes.push(Node::new(
                    Some(id),
                    child_distribution,
                    child_distribution.majority_class(positive_class),
                ));
                nodes[id.0].set_child(value, child);
                queue.push_back((child, subset));
            }
        }

        debug!("built tree with {} nodes", nodes.len());
        Ok(DecisionTree::from_parts(
            self.config.clone(),
            header,
            nodes,
            positive_class,
        ))
    }

    /// Highest-gain predictor over `rows`, scanned in index order and only
    /// replaced on strict improvement. `None` when no gain exceeds zero
    /// beyond floating-point rounding.
    pub fn best_split(
        &self,
        dataset: &Dataset,
        rows: &[usize],
        distribution: &ClassDistribution,
        positive_class: usize,
    ) -> Result<Option<AttributeSplitSuggestion>, TreeError> {
        let mut best: Option<AttributeSplitSuggestion> = None;
        for attribute in dataset.header().predictor_indices() {
            let suggestion = self.suggest(dataset, rows, distribution, attribute, positive_class)?;
            trace!("attribute {attribute}: gain {:.6}", suggestion.get_merit());
            if best.as_ref().is_none_or(|b| suggestion.is_better_than(b)) {
                best = Some(suggestion);
            }
        }
        Ok(best.filter(|b| self.is_informative(b.get_merit())))
    }

    fn is_informative(&self, merit: f64) -> bool {
        merit > GAIN_TOLERANCE_ULPS * f64::EPSILON * self.split_criterion.get_range_of_merit()
    }

    fn suggest(
        &self,
        dataset: &Dataset,
        rows: &[usize],
        distribution: &ClassDistribution,
        attribute: usize,
        positive_class: usize,
    ) -> Result<AttributeSplitSuggestion, TreeError> {
        let branches = dataset.cardinality(attribute)?;
        let mut post = vec![ClassDistribution::default(); branches];
        for &row in rows {
            let value = value_of(dataset, row, attribute)?;
            let slot = post
                .get_mut(value)
                .ok_or_else(|| out_of_domain(dataset, attribute, value))?;
            slot.add(class_of(dataset, row)? == positive_class);
        }
        let merit = self.split_criterion.get_merit_of_split(distribution, &post);
        Ok(AttributeSplitSuggestion::new(
            NominalAttributeMultiwayTest::new(attribute, branches),
            post,
            merit,
        ))
    }
}

fn partition(
    dataset: &Dataset,
    rows: &[usize],
    attribute: usize,
    branches: usize,
) -> Result<Vec<Vec<usize>>, DataError> {
    let mut subsets = vec![Vec::new(); branches];
    for &row in rows {
        let value = value_of(dataset, row, attribute)?;
        subsets
            .get_mut(value)
            .ok_or_else(|| out_of_domain(dataset, attribute, value))?
            .push(row);
    }
    Ok(subsets)
}

fn value_of(dataset: &Dataset, row: usize, attribute: usize) -> Result<usize, DataError> {
    let instance = dataset.instance(row).ok_or(DataError::RowOutOfRange {
        row,
        len: dataset.len(),
    })?;
    instance
        .value_at_index(attribute)
        .ok_or(DataError::AttributeOutOfRange {
            index: attribute,
            count: instance.number_of_attributes(),
        })
}

fn out_of_domain(dataset: &Dataset, attribute: usize, value: usize) -> DataError {
    let header = dataset.header();
    let attr = header.attribute_at_index(attribute);
    DataError::IndexOutOfDomain {
        attribute: attr.map(|a| a.name().to_string()).unwrap_or_default(),
        index: value,
        cardinality: attr.map(|a| a.number_of_values()).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::decision_tree::chi_square::SignificanceLevel;
    use crate::classifiers::decision_tree::split_criteria::ImpurityMeasure;
    use crate::core::instance_header::InstanceHeader;
    use crate::testing::dummies::{
        dataset_from_rows, four_row_dataset, header_from, random_dataset,
    };
    use approx::assert_abs_diff_eq;
    use strum::IntoEnumIterator;

    fn build(
        dataset: &Dataset,
        impurity: ImpurityMeasure,
        level: SignificanceLevel,
    ) -> DecisionTree {
        TreeBuilder::new(TreeConfig::new(impurity, level))
            .build(dataset)
            .unwrap()
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let dataset = Dataset::new(four_row_dataset().header().clone());
        let err = TreeBuilder::new(TreeConfig::default()).build(&dataset).unwrap_err();
        assert!(matches!(err, TreeError::Data(DataError::EmptyDataset)));
    }

    #[test]
    fn single_class_yields_root_leaf() {
        let header = header_from(
            &[("A", &["x", "y"]), ("B", &["u", "v"]), ("class", &["pos", "neg"])],
            2,
        );
        let dataset = dataset_from_rows(header, &[&[0, 1, 1], &[1, 0, 1], &[1, 1, 1]]);
        for impurity in ImpurityMeasure::iter() {
            let tree = build(&dataset, impurity, SignificanceLevel::NoPruning);
            assert_eq!(tree.node_count(), 1);
            assert_eq!(tree.root().unwrap().predicted_class(), 1);
        }
    }

    #[test]
    fn four_row_scenario_splits_on_a() {
        let dataset = four_row_dataset();
        for (impurity, gain) in [(ImpurityMeasure::Entropy, 1.0), (ImpurityMeasure::Gini, 0.5)] {
            let builder = TreeBuilder::new(TreeConfig::new(impurity, SignificanceLevel::NoPruning));
            let best = builder
                .best_split(&dataset, &[0, 1, 2, 3], &ClassDistribution::new(2, 4), 0)
                .unwrap()
                .unwrap();
            assert_eq!(best.get_split_test().attribute_index(), 0);
            assert_abs_diff_eq!(best.get_merit(), gain, epsilon = 1e-9);

            let tree = builder.build(&dataset).unwrap();
            let root = tree.root().unwrap();
            assert_eq!(root.split_attribute(), Some(0));
            // tie on the root goes to the positive class
            assert_eq!(root.predicted_class(), 0);
            let x = tree.node(root.get_child(0).unwrap()).unwrap();
            let y = tree.node(root.get_child(1).unwrap()).unwrap();
            assert!(x.is_leaf() && y.is_leaf());
            assert_eq!(x.predicted_class(), 0);
            assert_eq!(y.predicted_class(), 1);
            assert_eq!(x.parent(), Some(NodeId(0)));
            assert_eq!(x.instance_count(), 2);
        }
    }

    #[test]
    fn uninformative_attribute_gives_majority_leaf() {
        let header = header_from(&[("A", &["x", "y"]), ("class", &["pos", "neg"])], 1);
        // A carries no information; 2 negatives out of 3
        let dataset = dataset_from_rows(header, &[&[0, 1], &[0, 0], &[0, 1]]);
        let tree = build(&dataset, ImpurityMeasure::Entropy, SignificanceLevel::NoPruning);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root().unwrap().predicted_class(), 1);
    }

    #[test]
    fn ties_pick_the_lowest_attribute_index() {
        let header = header_from(
            &[("A", &["x", "y"]), ("B", &["u", "v"]), ("class", &["pos", "neg"])],
            2,
        );
        let dataset = dataset_from_rows(header, &[&[0, 0, 0], &[1, 1, 1]]);
        let tree = build(&dataset, ImpurityMeasure::Gini, SignificanceLevel::NoPruning);
        assert_eq!(tree.root().unwrap().split_attribute(), Some(0));
    }

    #[test]
    fn class_need_not_be_last() {
        let header = header_from(&[("class", &["pos", "neg"]), ("A", &["x", "y"])], 0);
        let dataset = dataset_from_rows(header, &[&[0, 0], &[0, 0], &[1, 1], &[1, 1]]);
        let tree = build(&dataset, ImpurityMeasure::Entropy, SignificanceLevel::NoPruning);
        assert_eq!(tree.root().unwrap().split_attribute(), Some(1));
    }

    #[test]
    fn non_binary_class_is_rejected() {
        let header = header_from(&[("A", &["x", "y"]), ("class", &["a", "b", "c"])], 1);
        let dataset = dataset_from_rows(header, &[&[0, 2]]);
        let err = TreeBuilder::new(TreeConfig::default()).build(&dataset).unwrap_err();
        assert!(matches!(err, TreeError::Data(DataError::NonBinaryClass { values: 3, .. })));
    }

    #[test]
    fn positive_class_flag_changes_tie_breaking() {
        let dataset = four_row_dataset();
        let config = TreeConfig::default().with_positive_class("neg");
        let tree = TreeBuilder::new(config).build(&dataset).unwrap();
        assert_eq!(tree.root().unwrap().predicted_class(), 1);
        assert_eq!(tree.positive_class(), 1);
    }

    #[test]
    fn gain_is_never_negative() {
        for seed in 0..5 {
            let dataset = random_dataset(seed, 4, 3, 60);
            let rows: Vec<usize> = (0..dataset.len()).collect();
            let distribution = ClassDistribution::of_rows(&dataset, &rows, 0).unwrap();
            for impurity in ImpurityMeasure::iter() {
                let config = TreeConfig::new(impurity, SignificanceLevel::NoPruning);
                let builder = TreeBuilder::new(config);
                for attribute in 0..4 {
                    let s = builder.suggest(&dataset, &rows, &distribution, attribute, 0).unwrap();
                    assert!(s.get_merit() >= -1e-12, "negative gain {}", s.get_merit());
                }
            }
        }
    }

    #[test]
    fn rounding_noise_is_not_a_gain() {
        // 14 children with the parent's exact class ratio
        let parent = ClassDistribution::new(14, 42);
        let children = vec![ClassDistribution::new(1, 3); 14];
        // one extra positive in the first half of two million rows
        let big_parent = ClassDistribution::new(1_000_001, 2_000_000);
        let halves = [
            ClassDistribution::new(500_001, 1_000_000),
            ClassDistribution::new(500_000, 1_000_000),
        ];
        for impurity in ImpurityMeasure::iter() {
            let builder = TreeBuilder::new(TreeConfig::new(impurity, SignificanceLevel::NoPruning));
            let criterion = impurity.criterion();

            let noise = criterion.get_merit_of_split(&parent, &children);
            assert!(noise.abs() < 1e-15);
            assert!(!builder.is_informative(noise));
            assert!(!builder.is_informative(0.0));

            let tiny = criterion.get_merit_of_split(&big_parent, &halves);
            assert!(tiny > 1e-13 && tiny < 1e-12, "{impurity}: {tiny}");
            assert!(builder.is_informative(tiny));
        }
    }

    #[test]
    fn no_pruning_expands_every_informative_node() {
        let dataset = random_dataset(7, 4, 3, 120);
        let tree = build(&dataset, ImpurityMeasure::Entropy, SignificanceLevel::NoPruning);
        let builder = TreeBuilder::new(TreeConfig::default());

        let mut rows_at_leaf: std::collections::BTreeMap<NodeId, Vec<usize>> = Default::default();
        for (row, instance) in dataset.iter().enumerate() {
            let (leaf, _) = tree.filter_instance_to_leaf(instance).unwrap();
            rows_at_leaf.entry(leaf).or_default().push(row);
        }
        for (leaf, rows) in rows_at_leaf {
            assert!(tree.node(leaf).unwrap().is_leaf());
            let distribution = ClassDistribution::of_rows(&dataset, &rows, 0).unwrap();
            if !distribution.is_pure() {
                assert!(builder.best_split(&dataset, &rows, &distribution, 0).unwrap().is_none());
            }
        }
    }

    #[test]
    fn strictest_level_grows_the_smallest_tree() {
        for seed in 0..4 {
            let dataset = random_dataset(seed, 5, 3, 150);
            for impurity in ImpurityMeasure::iter() {
                let strict = build(&dataset, impurity, SignificanceLevel::P0005).node_count();
                for level in SignificanceLevel::iter() {
                    let looser = build(&dataset, impurity, level).node_count();
                    assert!(strict <= looser, "{level}: {strict} > {looser}");
                }
            }
        }
    }

    #[test]
    fn too_many_observed_values_for_the_table_is_an_error() {
        let labels: Vec<String> = (0..15).map(|v| format!("v{v}")).collect();
        let domain: Vec<&str> = labels.iter().map(String::as_str).collect();
        let header = header_from(&[("A", domain.as_slice()), ("class", &["pos", "neg"])], 1);
        let rows: Vec<Vec<usize>> = (0..15).map(|v| vec![v, v % 2]).collect();
        let refs: Vec<&[usize]> = rows.iter().map(Vec::as_slice).collect();
        let dataset = dataset_from_rows(header, &refs);

        let config = TreeConfig::new(ImpurityMeasure::Entropy, SignificanceLevel::P005);
        let err = TreeBuilder::new(config).build(&dataset).unwrap_err();
        assert!(matches!(err, TreeError::DegreesOfFreedomOutOfRange(14)));

        // without pruning the table is never consulted
        let tree = build(&dataset, ImpurityMeasure::Entropy, SignificanceLevel::NoPruning);
        assert_eq!(tree.root().unwrap().split_attribute(), Some(0));
    }

    #[test]
    fn separable_training_rows_are_reproduced() {
        let header = header_from(
            &[("A", &["x", "y"]), ("B", &["u", "v", "w"]), ("class", &["pos", "neg"])],
            2,
        );
        let rows: Vec<Vec<usize>> = (0..2)
            .flat_map(|a| (0..3).map(move |b| vec![a, b, (a * b + b) % 2]))
            .collect();
        let refs: Vec<&[usize]> = rows.iter().map(Vec::as_slice).collect();
        let dataset = dataset_from_rows(header, &refs);
        for impurity in ImpurityMeasure::iter() {
            let tree = build(&dataset, impurity, SignificanceLevel::NoPruning);
            for instance in dataset.iter() {
                let prediction = tree.classify(instance).unwrap();
                assert_eq!(Some(prediction.class_index), instance.class_value());
            }
        }
    }

    #[test]
    fn training_rows_with_bad_values_surface_errors() {
        let header: Arc<InstanceHeader> =
            header_from(&[("A", &["x", "y"]), ("class", &["pos", "neg"])], 1);
        let dataset = dataset_from_rows(header, &[&[0, 0], &[1, 1]]);
        let builder = TreeBuilder::new(TreeConfig::default());
        let err = builder
            .best_split(&dataset, &[0, 5], &ClassDistribution::new(1, 2), 0)
            .unwrap_err();
        assert!(matches!(err, TreeError::Data(DataError::RowOutOfRange { row: 5, len: 2 })));
    }
}
