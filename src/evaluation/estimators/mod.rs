mod basic_estimator;
mod estimator;
mod max_estimator;

pub use basic_estimator::BasicEstimator;
pub use estimator::Estimator;
pub use max_estimator::MaxEstimator;
