pub mod chi_square;
pub mod class_distribution;
#[allow(clippy::module_inception)]
mod decision_tree;
pub mod nodes;
pub mod split_criteria;
mod tree_builder;
mod tree_config;

pub use chi_square::{ChiSquarePruner, ChiSquareTest, SignificanceLevel};
pub use class_distribution::ClassDistribution;
pub use decision_tree::DecisionTree;
pub use split_criteria::{ImpurityMeasure, SplitCriterion};
pub use tree_builder::TreeBuilder;
pub use tree_config::TreeConfig;
