pub mod height_aware_evaluator;
mod performance_evaluator;

pub use height_aware_evaluator::HeightAwareEvaluator;
pub use performance_evaluator::{PerformanceEvaluator, PerformanceEvaluatorExt};
