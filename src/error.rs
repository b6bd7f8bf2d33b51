use thiserror::Error;

/// Boxed failure raised by an objective or an external model.
pub type ObjectiveError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum McError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The objective failed; the original error is kept as the source.
    #[error("objective evaluation failed: {0}")]
    Objective(#[source] ObjectiveError),

    #[error("run cancelled after {completed} samples")]
    Cancelled { completed: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl McError {
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        McError::InvalidParameter(msg.into())
    }

    pub fn insufficient<S: Into<String>>(msg: S) -> Self {
        McError::InsufficientData(msg.into())
    }

    /// Downcasts the objective's own error, if this is an objective failure.
    pub fn objective_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            McError::Objective(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, McError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct Diverged(u32);

    impl fmt::Display for Diverged {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "solver diverged after {} iterations", self.0)
        }
    }

    impl std::error::Error for Diverged {}

    #[test]
    fn objective_error_is_recoverable_unchanged() {
        let err = McError::Objective(Box::new(Diverged(17)));
        assert_eq!(err.objective_source::<Diverged>(), Some(&Diverged(17)));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "objective evaluation failed: solver diverged after 17 iterations"
        );
    }

    #[test]
    fn non_objective_errors_have_no_objective_source() {
        let err = McError::invalid("sigma must be > 0");
        assert!(err.objective_source::<Diverged>().is_none());
        assert_eq!(err.to_string(), "invalid parameter: sigma must be > 0");
    }

    #[test]
    fn dimension_mismatch_message() {
        let err = McError::DimensionMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, found 2");
    }
}
