use crate::error::Result;

/// Pull-based source of i.i.d. draws from a declared distribution.
///
/// Implementations may be finite (replaying recorded draws) or unbounded
/// (seeded generators). The estimator is distribution-agnostic and only
/// consumes what `next_sample` yields, in the order it yields it.
pub trait Sampler {
    type Sample;

    /// Indicates whether the sampler *may* produce more draws.
    ///
    /// Unbounded generators return `true` always. If this returns `false`, a
    /// subsequent call to [`next_sample`](Sampler::next_sample) must return `None`.
    fn has_more_samples(&self) -> bool {
        true
    }

    /// Produces the next draw, or `None` once a finite sampler is exhausted.
    fn next_sample(&mut self) -> Option<Self::Sample>;

    /// Resets the sampler to its initial state.
    ///
    /// For seeded generators this re-seeds the RNG, so the draw sequence after
    /// a restart is identical to the one after construction.
    fn restart(&mut self) -> Result<()>;
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    type Sample = S::Sample;

    fn has_more_samples(&self) -> bool {
        (**self).has_more_samples()
    }

    fn next_sample(&mut self) -> Option<Self::Sample> {
        (**self).next_sample()
    }

    fn restart(&mut self) -> Result<()> {
        (**self).restart()
    }
}
