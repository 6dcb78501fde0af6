//! Equations of state.
//!
//! All relations take SI values: P [Pa], V [m³], T [K], N [mol].

use kf_core::units::constants::R_J_PER_MOL_K;

use crate::error::{ThermoError, ThermoResult};
use crate::moles::MoleAmounts;

/// Relations among pressure, volume, temperature and mole amounts.
///
/// Partial derivatives are analytic. Unsubscripted partials hold all mole
/// amounts fixed; the `*_dni` partials hold the other two of {P, V, T} and
/// every other species fixed.
pub trait EquationOfState: Send + Sync {
    /// Model name (for logging).
    fn name(&self) -> &str;

    fn temperature<N: MoleAmounts + ?Sized>(&self, p: f64, v: f64, n: &N) -> ThermoResult<f64>;

    fn pressure<N: MoleAmounts + ?Sized>(&self, t: f64, v: f64, n: &N) -> ThermoResult<f64>;

    fn volume<N: MoleAmounts + ?Sized>(&self, t: f64, p: f64, n: &N) -> ThermoResult<f64>;

    /// dP/dV at constant T, N.
    fn dp_dv<N: MoleAmounts + ?Sized>(&self, p: f64, v: f64, t: f64, n: &N) -> ThermoResult<f64>;

    /// dP/dT at constant V, N.
    fn dp_dt<N: MoleAmounts + ?Sized>(&self, p: f64, v: f64, t: f64, n: &N) -> ThermoResult<f64>;

    /// dV/dT at constant P, N.
    fn dv_dt<N: MoleAmounts + ?Sized>(&self, p: f64, v: f64, t: f64, n: &N) -> ThermoResult<f64>;

    /// dV/dP at constant T, N.
    fn dv_dp<N: MoleAmounts + ?Sized>(&self, p: f64, v: f64, t: f64, n: &N) -> ThermoResult<f64> {
        reciprocal(self.dp_dv(p, v, t, n)?, "dP/dV")
    }

    /// dT/dP at constant V, N.
    fn dt_dp<N: MoleAmounts + ?Sized>(&self, p: f64, v: f64, t: f64, n: &N) -> ThermoResult<f64> {
        reciprocal(self.dp_dt(p, v, t, n)?, "dP/dT")
    }

    /// dT/dV at constant P, N.
    fn dt_dv<N: MoleAmounts + ?Sized>(&self, p: f64, v: f64, t: f64, n: &N) -> ThermoResult<f64> {
        reciprocal(self.dv_dt(p, v, t, n)?, "dV/dT")
    }

    /// dP/dN_i at constant T, V.
    fn dp_dni<N: MoleAmounts + ?Sized>(
        &self,
        p: f64,
        v: f64,
        t: f64,
        n: &N,
        i: &N::Key,
    ) -> ThermoResult<f64>;

    /// dV/dN_i at constant T, P.
    fn dv_dni<N: MoleAmounts + ?Sized>(
        &self,
        p: f64,
        v: f64,
        t: f64,
        n: &N,
        i: &N::Key,
    ) -> ThermoResult<f64>;

    /// dT/dN_i at constant P, V.
    fn dt_dni<N: MoleAmounts + ?Sized>(
        &self,
        p: f64,
        v: f64,
        t: f64,
        n: &N,
        i: &N::Key,
    ) -> ThermoResult<f64>;
}

fn reciprocal(value: f64, what: &'static str) -> ThermoResult<f64> {
    if value == 0.0 || !value.is_finite() {
        return Err(ThermoError::NonPhysical { what });
    }
    Ok(1.0 / value)
}

fn positive(value: f64, what: &'static str) -> ThermoResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ThermoError::NonPhysical { what })
    }
}

/// Total moles of `n`, which must contain species `i`.
fn total_with<N: MoleAmounts + ?Sized>(n: &N, i: &N::Key) -> ThermoResult<f64> {
    if !n.has_species(i) {
        return Err(ThermoError::MissingSpecies {
            what: format!("{i:?}"),
        });
    }
    positive(n.total(), "total moles")
}

/// Ideal gas: f(P, V, T, N) = N R T - P V, with N the total moles.
///
/// Valid for gases at low pressure and moderate temperature; no phase change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdealGas;

impl EquationOfState for IdealGas {
    fn name(&self) -> &str {
        "ideal gas"
    }

    fn temperature<N: MoleAmounts + ?Sized>(&self, p: f64, v: f64, n: &N) -> ThermoResult<f64> {
        let total = positive(n.total(), "total moles")?;
        Ok(p * v / (total * R_J_PER_MOL_K))
    }

    fn pressure<N: MoleAmounts + ?Sized>(&self, t: f64, v: f64, n: &N) -> ThermoResult<f64> {
        let v = positive(v, "volume")?;
        Ok(n.total() * R_J_PER_MOL_K * t / v)
    }

    fn volume<N: MoleAmounts + ?Sized>(&self, t: f64, p: f64, n: &N) -> ThermoResult<f64> {
        let p = positive(p, "pressure")?;
        Ok(n.total() * R_J_PER_MOL_K * t / p)
    }

    fn dp_dv<N: MoleAmounts + ?Sized>(&self, p: f64, v: f64, _t: f64, _n: &N) -> ThermoResult<f64> {
        Ok(-p / positive(v, "volume")?)
    }

    fn dp_dt<N: MoleAmounts + ?Sized>(&self, p: f64, _v: f64, t: f64, _n: &N) -> ThermoResult<f64> {
        Ok(p / positive(t, "temperature")?)
    }

    fn dv_dt<N: MoleAmounts + ?Sized>(&self, _p: f64, v: f64, t: f64, _n: &N) -> ThermoResult<f64> {
        Ok(v / positive(t, "temperature")?)
    }

    fn dp_dni<N: MoleAmounts + ?Sized>(
        &self,
        p: f64,
        _v: f64,
        _t: f64,
        n: &N,
        i: &N::Key,
    ) -> ThermoResult<f64> {
        Ok(p / total_with(n, i)?)
    }

    fn dv_dni<N: MoleAmounts + ?Sized>(
        &self,
        _p: f64,
        v: f64,
        _t: f64,
        n: &N,
        i: &N::Key,
    ) -> ThermoResult<f64> {
        Ok(v / total_with(n, i)?)
    }

    fn dt_dni<N: MoleAmounts + ?Sized>(
        &self,
        _p: f64,
        _v: f64,
        t: f64,
        n: &N,
        i: &N::Key,
    ) -> ThermoResult<f64> {
        Ok(-t / total_with(n, i)?)
    }
}
