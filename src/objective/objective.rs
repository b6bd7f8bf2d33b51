use crate::error::ObjectiveError;

/// Maps one realization of the random input to an output.
///
/// For a fixed input the output must be deterministic; randomness enters only
/// through the input. Evaluation is synchronous and may be arbitrarily
/// expensive. Failures are returned unchanged to the caller of the run.
pub trait Objective<I: ?Sized> {
    type Output;

    fn evaluate(&self, input: &I) -> Result<Self::Output, ObjectiveError>;
}

/// Plain closures are infallible objectives.
impl<I: ?Sized, O, F> Objective<I> for F
where
    F: Fn(&I) -> O,
{
    type Output = O;

    #[inline]
    fn evaluate(&self, input: &I) -> Result<O, ObjectiveError> {
        Ok(self(input))
    }
}

/// Wraps a closure returning `Result` so its error reaches the caller.
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<I: ?Sized, O, E, F> Objective<I> for Fallible<F>
where
    F: Fn(&I) -> Result<O, E>,
    E: Into<ObjectiveError>,
{
    type Output = O;

    fn evaluate(&self, input: &I) -> Result<O, ObjectiveError> {
        (self.0)(input).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_evaluate_directly() {
        let square = |x: &f64| x * x;
        assert_eq!(square.evaluate(&3.0).unwrap(), 9.0);

        let norm = |v: &[f64]| v.iter().map(|c| c * c).sum::<f64>().sqrt();
        assert_eq!(norm.evaluate(&[3.0, 4.0][..]).unwrap(), 5.0);
    }

    #[test]
    fn fallible_passes_errors_through() {
        let f = Fallible(|x: &f64| {
            if *x < 0.0 {
                Err("negative input")
            } else {
                Ok(x.sqrt())
            }
        });
        assert_eq!(f.evaluate(&4.0).unwrap(), 2.0);
        let err = f.evaluate(&-1.0).unwrap_err();
        assert_eq!(err.to_string(), "negative input");
    }
}
