//! kf-core: stable foundation for kinflux.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact handles for species and reactions)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{KfError, KfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
