use std::fmt::{Display, Formatter, Result};

/// Progress report emitted while a sequential run is in flight.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Snapshot {
    pub samples_seen: u64,
    pub mean: f64,
    pub variance: f64,
    pub half_width: f64,
    pub seconds: f64,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "seen={}, mean={:.6}, var={:.6}, ±{:.6}, t={:.3}s",
            self.samples_seen, self.mean, self.variance, self.half_width, self.seconds
        )
    }
}
