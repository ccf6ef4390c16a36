mod estimators;
mod evaluate;
mod evaluators;
mod measurement;

pub use estimators::{BasicEstimator, Estimator, MaxEstimator};
pub use evaluate::{EvaluationReport, evaluate};
pub use evaluators::height_aware_evaluator;
pub use evaluators::{HeightAwareEvaluator, PerformanceEvaluator, PerformanceEvaluatorExt};
pub use measurement::Measurement;
