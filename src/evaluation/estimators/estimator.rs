/// Online scalar estimator.
///
/// Implementations accept values incrementally via [`add`](Estimator::add)
/// and expose the current estimate via [`estimation`](Estimator::estimation).
pub trait Estimator {
    /// Incorporates a new observation. NaN is ignored.
    fn add(&mut self, v: f64);

    /// Current estimate, NaN before any observation.
    fn estimation(&self) -> f64;

    /// Observations incorporated so far.
    fn count(&self) -> usize;
}
