use crate::error::{McError, ObjectiveError, Result};
use crate::fields::{KarhunenLoeveField, uniform_grid};
use crate::objective::{Profile, ProfileModel};

/// Finite-difference solver for `−(a(x) u'(x))' = f` on `[0, 1]`.
///
/// The diffusivity is the log-normal field `a(x) = exp(g(x; ξ))`, evaluated at
/// cell midpoints. Dirichlet values are imposed at both ends. Built once via
/// [`DiffusionSolver::builder`]; each [`solve`](ProfileModel::solve) only
/// assembles the tridiagonal system for the given `ξ` and runs the Thomas
/// algorithm.
#[derive(Debug, Clone)]
pub struct DiffusionSolver {
    field: KarhunenLoeveField,
    grid: Vec<f64>,
    midpoints: Vec<f64>,
    left: f64,
    right: f64,
    forcing: f64,
}

#[derive(Debug, Clone)]
pub struct DiffusionSolverBuilder {
    field: Option<KarhunenLoeveField>,
    nodes: usize,
    left: f64,
    right: f64,
    forcing: f64,
}

impl Default for DiffusionSolverBuilder {
    fn default() -> Self {
        Self {
            field: None,
            nodes: 101,
            left: 0.0,
            right: 0.0,
            forcing: 1.0,
        }
    }
}

impl DiffusionSolverBuilder {
    pub fn field(mut self, field: KarhunenLoeveField) -> Self {
        self.field = Some(field);
        self
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn boundary(mut self, left: f64, right: f64) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    pub fn forcing(mut self, forcing: f64) -> Self {
        self.forcing = forcing;
        self
    }

    pub fn build(self) -> Result<DiffusionSolver> {
        let field = self
            .field
            .ok_or_else(|| McError::invalid("diffusion solver needs a random field"))?;
        if self.nodes < 3 {
            return Err(McError::invalid(format!(
                "diffusion solver needs at least 3 nodes, got {}",
                self.nodes
            )));
        }
        if ![self.left, self.right, self.forcing]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(McError::invalid(
                "boundary values and forcing must be finite",
            ));
        }
        let grid = uniform_grid(self.nodes)?;
        let midpoints = grid.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
        Ok(DiffusionSolver {
            field,
            grid,
            midpoints,
            left: self.left,
            right: self.right,
            forcing: self.forcing,
        })
    }
}

impl DiffusionSolver {
    pub fn builder() -> DiffusionSolverBuilder {
        DiffusionSolverBuilder::default()
    }

    pub fn field(&self) -> &KarhunenLoeveField {
        &self.field
    }
}

impl ProfileModel for DiffusionSolver {
    fn grid(&self) -> &[f64] {
        &self.grid
    }

    fn dimension(&self) -> usize {
        self.field.dimension()
    }

    fn solve(&self, coefficients: &[f64]) -> std::result::Result<Profile, ObjectiveError> {
        let a: Vec<f64> = self
            .field
            .evaluate(&self.midpoints, coefficients)?
            .into_iter()
            .map(f64::exp)
            .collect();

        let m = self.grid.len();
        let h = 1.0 / (m - 1) as f64;
        let interior = m - 2;

        // Row i couples u_{i-1}, u_i, u_{i+1} for interior node i = 1..m-2.
        let mut diag = vec![0.0; interior];
        let mut upper = vec![0.0; interior];
        let mut lower = vec![0.0; interior];
        let mut rhs = vec![self.forcing * h * h; interior];
        for r in 0..interior {
            let (aw, ae) = (a[r], a[r + 1]);
            diag[r] = aw + ae;
            lower[r] = -aw;
            upper[r] = -ae;
        }
        rhs[0] += a[0] * self.left;
        rhs[interior - 1] += a[interior] * self.right;

        // Thomas algorithm; the system is symmetric and diagonally dominant.
        for r in 1..interior {
            let w = lower[r] / diag[r - 1];
            diag[r] -= w * upper[r - 1];
            rhs[r] -= w * rhs[r - 1];
        }
        let mut u = vec![0.0; m];
        u[0] = self.left;
        u[m - 1] = self.right;
        u[interior] = rhs[interior - 1] / diag[interior - 1];
        for r in (0..interior - 1).rev() {
            u[r + 1] = (rhs[r] - upper[r] * u[r + 2]) / diag[r];
        }

        if u.iter().any(|v| !v.is_finite()) {
            return Err(Box::new(McError::invalid(
                "diffusion solve produced a non-finite profile",
            )));
        }
        Ok(Profile {
            grid: self.grid.clone(),
            values: u,
        })
    }
}
