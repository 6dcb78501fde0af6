//! OdeSystem trait for the integrators.

use nalgebra::DVector;

use crate::error::ReactorResult;

/// First-order system `dy/dt = f(t, y)`.
///
/// `rhs` takes `&self`: evaluating the right-hand side must not change the
/// system, so an integrator may call it any number of times per step.
pub trait OdeSystem {
    /// Number of state variables.
    fn dim(&self) -> usize;

    /// Compute `dy/dt` at `(t, y)`.
    fn rhs(&self, t: f64, y: &DVector<f64>) -> ReactorResult<DVector<f64>>;
}

/// Adapter turning a closure into an [`OdeSystem`].
pub struct FnSystem<F> {
    dim: usize,
    f: F,
}

impl<F> FnSystem<F>
where
    F: Fn(f64, &DVector<f64>) -> ReactorResult<DVector<f64>>,
{
    pub fn new(dim: usize, f: F) -> Self {
        Self { dim, f }
    }
}

impl<F> OdeSystem for FnSystem<F>
where
    F: Fn(f64, &DVector<f64>) -> ReactorResult<DVector<f64>>,
{
    fn dim(&self) -> usize {
        self.dim
    }

    fn rhs(&self, t: f64, y: &DVector<f64>) -> ReactorResult<DVector<f64>> {
        (self.f)(t, y)
    }
}
