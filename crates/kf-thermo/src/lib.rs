//! kf-thermo: thermodynamic closures for kinflux reactors.
//!
//! Provides:
//! - `EquationOfState` trait relating P, V, T and mole amounts, with analytic partials
//! - `IdealGas` implementation
//! - `MoleAmounts` abstraction over ordered and species-keyed mole amounts
//! - Temperature, pressure and volume profile models
//!
//! # Example
//!
//! ```
//! use kf_thermo::{EquationOfState, IdealGas};
//!
//! let eos = IdealGas;
//! let n = [1.0, 1.0];
//! let v = eos.volume(300.0, 101_325.0, &n[..]).unwrap();
//! let dv_dn = eos.dv_dni(101_325.0, v, 300.0, &n[..], &0).unwrap();
//! assert!((dv_dn - v / 2.0).abs() < 1e-12);
//! ```

pub mod eos;
pub mod error;
pub mod moles;
pub mod profile;

pub use eos::{EquationOfState, IdealGas};
pub use error::{ThermoError, ThermoResult};
pub use moles::MoleAmounts;
pub use profile::{PressureModel, ProfileKind, ProfileModel, TemperatureModel, VolumeModel};
