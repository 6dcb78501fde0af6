//! Temperature, pressure and volume profiles as functions of simulated time.

use std::fmt;

use kf_core::units::{Pressure, Temperature, Time, Volume, k, m3, pa};

use crate::error::{ThermoError, ThermoResult};

/// Shape of a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProfileKind {
    /// No profile configured; every query returns `None`.
    #[default]
    Unset,
    /// Constant value (isothermal, isobaric, isochoric).
    Constant,
}

/// Scalar profile in SI units, stored as `(time [s], value)` breakpoints.
///
/// A constant profile has exactly one breakpoint at `t = 0`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileModel {
    kind: ProfileKind,
    breakpoints: Vec<(f64, f64)>,
}

impl ProfileModel {
    pub fn unset() -> Self {
        Self::default()
    }

    /// Constant profile; the value must be finite and positive.
    pub fn constant(value: f64, what: &'static str) -> ThermoResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ThermoError::NonPhysical { what });
        }
        Ok(Self {
            kind: ProfileKind::Constant,
            breakpoints: vec![(0.0, value)],
        })
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    pub fn breakpoints(&self) -> &[(f64, f64)] {
        &self.breakpoints
    }

    pub fn is_constant(&self) -> bool {
        self.kind == ProfileKind::Constant
    }

    /// Value at `time_s`, or `None` when unset.
    pub fn value_at(&self, _time_s: f64) -> Option<f64> {
        match self.kind {
            ProfileKind::Constant => self.breakpoints.first().map(|&(_, v)| v),
            ProfileKind::Unset => None,
        }
    }
}

/// Reactor temperature profile. Only isothermal is implemented.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureModel {
    profile: ProfileModel,
}

impl TemperatureModel {
    pub fn isothermal(t: Temperature) -> ThermoResult<Self> {
        Ok(Self {
            profile: ProfileModel::constant(t.value, "isothermal temperature")?,
        })
    }

    pub fn is_isothermal(&self) -> bool {
        self.profile.is_constant()
    }

    pub fn temperature(&self, time: Time) -> Option<Temperature> {
        self.temperature_k(time.value).map(k)
    }

    /// Temperature [K] at `time_s` [s].
    pub fn temperature_k(&self, time_s: f64) -> Option<f64> {
        self.profile.value_at(time_s)
    }

    pub fn profile(&self) -> &ProfileModel {
        &self.profile
    }
}

impl fmt::Display for TemperatureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.temperature_k(0.0) {
            Some(t) if self.is_isothermal() => write!(f, "Temperature model: isothermal {t} K"),
            _ => write!(f, "Temperature model: unset"),
        }
    }
}

/// Reactor pressure profile. Only isobaric is implemented.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureModel {
    profile: ProfileModel,
}

impl PressureModel {
    pub fn isobaric(p: Pressure) -> ThermoResult<Self> {
        Ok(Self {
            profile: ProfileModel::constant(p.value, "isobaric pressure")?,
        })
    }

    pub fn is_isobaric(&self) -> bool {
        self.profile.is_constant()
    }

    pub fn pressure(&self, time: Time) -> Option<Pressure> {
        self.pressure_pa(time.value).map(pa)
    }

    /// Pressure [Pa] at `time_s` [s].
    pub fn pressure_pa(&self, time_s: f64) -> Option<f64> {
        self.profile.value_at(time_s)
    }

    pub fn profile(&self) -> &ProfileModel {
        &self.profile
    }
}

impl fmt::Display for PressureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pressure_pa(0.0) {
            Some(p) if self.is_isobaric() => write!(f, "Pressure model: isobaric {p} Pa"),
            _ => write!(f, "Pressure model: unset"),
        }
    }
}

/// Reactor volume profile. Only isochoric is implemented.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeModel {
    profile: ProfileModel,
}

impl VolumeModel {
    pub fn isochoric(v: Volume) -> ThermoResult<Self> {
        Ok(Self {
            profile: ProfileModel::constant(v.value, "isochoric volume")?,
        })
    }

    pub fn is_isochoric(&self) -> bool {
        self.profile.is_constant()
    }

    pub fn volume(&self, time: Time) -> Option<Volume> {
        self.volume_m3(time.value).map(m3)
    }

    /// Volume [m³] at `time_s` [s].
    pub fn volume_m3(&self, time_s: f64) -> Option<f64> {
        self.profile.value_at(time_s)
    }

    pub fn profile(&self) -> &ProfileModel {
        &self.profile
    }
}

impl fmt::Display for VolumeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.volume_m3(0.0) {
            Some(v) if self.is_isochoric() => write!(f, "Volume model: isochoric {v} m³"),
            _ => write!(f, "Volume model: unset"),
        }
    }
}
