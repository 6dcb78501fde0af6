//! Thermodynamic closure errors.

use kf_core::KfError;
use thiserror::Error;

/// Result type for thermodynamic operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors that can occur evaluating equations of state or profiles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Non-physical values (zero total moles, negative temperature, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// The designated species is not part of the mole amounts.
    #[error("Species {what} not present in mole amounts")]
    MissingSpecies { what: String },
}

impl From<ThermoError> for KfError {
    fn from(err: ThermoError) -> Self {
        KfError::Layer {
            layer: "thermo",
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ThermoError::NonPhysical {
            what: "total moles",
        };
        assert!(err.to_string().contains("total moles"));
        assert!(matches!(KfError::from(err), KfError::Layer { layer: "thermo", .. }));
    }
}
