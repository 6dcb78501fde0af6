//! Adaptive time integrators backed by `differential-equations`.
//!
//! The solvers work on fixed-size `SVector` states. A system is padded up to
//! the next supported capacity; padded entries carry zero derivatives.

use std::sync::Mutex;

use differential_equations::methods::{ExplicitRungeKutta, ImplicitRungeKutta};
use differential_equations::ode::{ODE, ODEProblem};
use kf_core::Tolerances;
use nalgebra::{DVector, SVector};

use crate::error::{ReactorError, ReactorResult};
use crate::system::OdeSystem;

/// Largest state dimension the integrators accept.
pub const MAX_DIM: usize = 128;

/// State reached by one `integrate` call.
#[derive(Clone, Debug)]
pub struct IntegrationOutcome {
    /// State at `t`.
    pub y: DVector<f64>,
    /// Time reached; the end of the requested span.
    pub t: f64,
    /// `t` plus the last accepted step.
    pub t_horizon: f64,
    /// Accepted steps.
    pub steps: usize,
}

/// Trait for adaptive time integrators.
pub trait Integrator {
    /// Integrate `system` from `y0` over `span = (t0, tf)`.
    fn integrate<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        y0: &DVector<f64>,
        span: (f64, f64),
        tol: Tolerances,
    ) -> ReactorResult<IntegrationOutcome>;
}

/// Integrator selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntegratorType {
    /// Implicit Radau IIA of order 5 for stiff kinetics (default).
    #[default]
    Radau5,
    /// Explicit Dormand-Prince 5(4) for non-stiff problems.
    Dopri5,
}

impl IntegratorType {
    pub fn integrate<S: OdeSystem + ?Sized>(
        self,
        system: &S,
        y0: &DVector<f64>,
        span: (f64, f64),
        tol: Tolerances,
    ) -> ReactorResult<IntegrationOutcome> {
        check_span(system, y0, span)?;
        match y0.len() {
            0..=8 => solve_padded::<S, 8>(self, system, y0, span, tol),
            9..=32 => solve_padded::<S, 32>(self, system, y0, span, tol),
            33..=MAX_DIM => solve_padded::<S, MAX_DIM>(self, system, y0, span, tol),
            _ => Err(ReactorError::InvalidArg {
                what: "state dimension exceeds integrator capacity",
            }),
        }
    }
}

/// Radau IIA order 5, stiffly accurate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Radau5;

impl Integrator for Radau5 {
    fn integrate<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        y0: &DVector<f64>,
        span: (f64, f64),
        tol: Tolerances,
    ) -> ReactorResult<IntegrationOutcome> {
        IntegratorType::Radau5.integrate(system, y0, span, tol)
    }
}

/// Dormand-Prince 5(4).
#[derive(Clone, Copy, Debug, Default)]
pub struct Dopri5;

impl Integrator for Dopri5 {
    fn integrate<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        y0: &DVector<f64>,
        span: (f64, f64),
        tol: Tolerances,
    ) -> ReactorResult<IntegrationOutcome> {
        IntegratorType::Dopri5.integrate(system, y0, span, tol)
    }
}

/// ODE wrapper handing a padded state to an [`OdeSystem`].
///
/// `diff` cannot return an error, so the first failure is parked here and
/// the derivative is poisoned with NaN.
struct SystemOde<'a, S: ?Sized> {
    system: &'a S,
    dim: usize,
    failure: Mutex<Option<ReactorError>>,
}

impl<S: OdeSystem + ?Sized> SystemOde<'_, S> {
    fn record(&self, err: ReactorError) {
        if let Ok(mut slot) = self.failure.lock() {
            slot.get_or_insert(err);
        }
    }

    fn take_failure(&self) -> Option<ReactorError> {
        self.failure.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl<const N: usize, S: OdeSystem + ?Sized> ODE<f64, SVector<f64, N>> for SystemOde<'_, S> {
    fn diff(&self, t: f64, y: &SVector<f64, N>, dydt: &mut SVector<f64, N>) {
        dydt.fill(0.0);
        let state = DVector::from_iterator(self.dim, y.iter().take(self.dim).copied());
        match self.system.rhs(t, &state) {
            Ok(dy) => {
                for (dst, src) in dydt.iter_mut().zip(dy.iter()) {
                    *dst = *src;
                }
            }
            Err(err) => {
                self.record(err);
                dydt.fill(f64::NAN);
            }
        }
    }
}

fn solve_padded<S: OdeSystem + ?Sized, const N: usize>(
    method: IntegratorType,
    system: &S,
    y0: &DVector<f64>,
    span: (f64, f64),
    tol: Tolerances,
) -> ReactorResult<IntegrationOutcome> {
    let (t0, tf) = span;
    let n = y0.len();
    let ode = SystemOde {
        system,
        dim: n,
        failure: Mutex::new(None),
    };

    let mut y_start = SVector::<f64, N>::zeros();
    for (dst, src) in y_start.iter_mut().zip(y0.iter()) {
        *dst = *src;
    }
    let problem = ODEProblem::new(ode, t0, tf, y_start);

    let solution = match method {
        IntegratorType::Radau5 => {
            let mut solver = ImplicitRungeKutta::radau5().rtol(tol.rel).atol(tol.abs);
            problem.solve(&mut solver)
        }
        IntegratorType::Dopri5 => {
            let mut solver = ExplicitRungeKutta::dopri5().rtol(tol.rel).atol(tol.abs);
            problem.solve(&mut solver)
        }
    };

    if let Some(err) = problem.ode.take_failure() {
        return Err(err);
    }
    let solution = solution.map_err(|e| ReactorError::IntegrationFailure {
        message: e.to_string(),
        time: t0,
    })?;

    let points = solution.t.len();
    if points == 0 {
        return Err(ReactorError::IntegrationFailure {
            message: "solver returned no points".to_string(),
            time: t0,
        });
    }
    let t = solution.t[points - 1];
    let y = DVector::from_iterator(n, solution.y[points - 1].iter().take(n).copied());
    if y.iter().any(|v| !v.is_finite()) {
        return Err(ReactorError::IntegrationFailure {
            message: "non-finite state".to_string(),
            time: t,
        });
    }
    let last_step = if points >= 2 {
        t - solution.t[points - 2]
    } else {
        tf - t0
    };

    Ok(IntegrationOutcome {
        y,
        t,
        t_horizon: t + last_step,
        steps: points - 1,
    })
}

fn check_span<S: OdeSystem + ?Sized>(
    system: &S,
    y0: &DVector<f64>,
    (t0, tf): (f64, f64),
) -> ReactorResult<()> {
    if !(t0.is_finite() && tf.is_finite() && tf > t0) {
        return Err(ReactorError::InvalidArg {
            what: "integration span must be finite and increasing",
        });
    }
    if y0.is_empty() || y0.len() != system.dim() {
        return Err(ReactorError::InvalidArg {
            what: "initial state length does not match system dimension",
        });
    }
    if y0.iter().any(|v| !v.is_finite()) {
        return Err(ReactorError::IntegrationFailure {
            message: "non-finite initial state".to_string(),
            time: t0,
        });
    }
    Ok(())
}
