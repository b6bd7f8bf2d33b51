use crate::error::{McError, ObjectiveError};
use crate::objective::Objective;

/// Spatial output of an external model, sampled on its coordinate grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub grid: Vec<f64>,
    pub values: Vec<f64>,
}

impl Profile {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Capability of an expensive deterministic model driven by a coefficient vector.
///
/// Configuration (grid resolution, boundary values, the random field itself)
/// happens once when the model is built; [`solve`](ProfileModel::solve) only
/// evaluates. Identical coefficients must produce identical profiles, and the
/// grid must stay fixed for the life of the model.
pub trait ProfileModel {
    /// Coordinates at which every profile is reported.
    fn grid(&self) -> &[f64];

    /// Truncation dimension the model expects for `ξ`.
    fn dimension(&self) -> usize;

    fn solve(&self, coefficients: &[f64]) -> Result<Profile, ObjectiveError>;
}

impl<M: ProfileModel + ?Sized> ProfileModel for &M {
    fn grid(&self) -> &[f64] {
        (**self).grid()
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn solve(&self, coefficients: &[f64]) -> Result<Profile, ObjectiveError> {
        (**self).solve(coefficients)
    }
}

/// Whole-profile objective: `ξ ↦ u(·; ξ)` on the model grid.
#[derive(Debug, Clone)]
pub struct ProfileObjective<M> {
    model: M,
}

impl<M: ProfileModel> ProfileObjective<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M, I> Objective<I> for ProfileObjective<M>
where
    M: ProfileModel,
    I: AsRef<[f64]> + ?Sized,
{
    type Output = Vec<f64>;

    fn evaluate(&self, input: &I) -> Result<Vec<f64>, ObjectiveError> {
        let xi = input.as_ref();
        check_dimension(&self.model, xi)?;
        let profile = self.model.solve(xi)?;
        check_length(&self.model, &profile)?;
        Ok(profile.values)
    }
}

/// Scalar quantity of interest: the profile value at one grid position.
#[derive(Debug, Clone)]
pub struct ProfilePoint<M> {
    model: M,
    position: usize,
}

impl<M: ProfileModel> ProfilePoint<M> {
    pub fn new(model: M, position: usize) -> Result<Self, McError> {
        let len = model.grid().len();
        if position >= len {
            return Err(McError::invalid(format!(
                "position {position} outside grid of {len} points"
            )));
        }
        Ok(Self { model, position })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn coordinate(&self) -> f64 {
        self.model.grid()[self.position]
    }
}

impl<M, I> Objective<I> for ProfilePoint<M>
where
    M: ProfileModel,
    I: AsRef<[f64]> + ?Sized,
{
    type Output = f64;

    fn evaluate(&self, input: &I) -> Result<f64, ObjectiveError> {
        let xi = input.as_ref();
        check_dimension(&self.model, xi)?;
        let profile = self.model.solve(xi)?;
        check_length(&self.model, &profile)?;
        Ok(profile.values[self.position])
    }
}

fn check_dimension<M: ProfileModel>(model: &M, xi: &[f64]) -> Result<(), McError> {
    if xi.len() != model.dimension() {
        return Err(McError::DimensionMismatch {
            expected: model.dimension(),
            found: xi.len(),
        });
    }
    Ok(())
}

fn check_length<M: ProfileModel>(model: &M, profile: &Profile) -> Result<(), McError> {
    let expected = model.grid().len();
    if profile.len() != expected {
        return Err(McError::DimensionMismatch {
            expected,
            found: profile.len(),
        });
    }
    Ok(())
}
