use crate::estimation::Estimate;

/// Online mean/variance accumulator fed one scalar observation at a time.
///
/// Within a run, `observe` is the only operation that mutates the running
/// state. `merge` also mutates it, but only to fold in a partition that was
/// accumulated separately. Every reported estimate must be reproducible from
/// the state alone.
pub trait Accumulator: Default {
    /// Incorporates a new observation and returns the updated estimate.
    fn observe(&mut self, y: f64) -> Estimate;

    /// Number of observations seen so far.
    fn count(&self) -> u64;

    /// Current estimate, or `None` before the first observation.
    fn estimate(&self) -> Option<Estimate>;

    /// Folds an independently accumulated partition into `self`.
    fn merge(&mut self, other: &Self);
}
