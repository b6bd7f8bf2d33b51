use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ObjectiveError;
use crate::objective::Objective;

/// Error raised by [`SpyObjective`] once its failure point is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubFailure {
    pub at: usize,
}

impl fmt::Display for StubFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stub objective failed on evaluation {}", self.at)
    }
}

impl std::error::Error for StubFailure {}

/// Identity objective that counts its evaluations and can fail on demand.
pub struct SpyObjective {
    calls: Arc<AtomicUsize>,
    fail_on: Option<usize>,
}

#[derive(Clone)]
pub struct SpyHandle(Arc<AtomicUsize>);

impl SpyHandle {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl SpyObjective {
    pub fn new() -> (Self, SpyHandle) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                fail_on: None,
            },
            SpyHandle(calls),
        )
    }

    /// Fails on the `call`-th evaluation (1-based) and every one after it.
    pub fn failing_on(call: usize) -> (Self, SpyHandle) {
        let (mut spy, handle) = Self::new();
        spy.fail_on = Some(call);
        (spy, handle)
    }
}

impl Objective<f64> for SpyObjective {
    type Output = f64;

    fn evaluate(&self, input: &f64) -> Result<f64, ObjectiveError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.fail_on {
            Some(at) if call >= at => Err(Box::new(StubFailure { at: call })),
            _ => Ok(*input),
        }
    }
}
