//! Error types for reactor simulation.

use kf_core::KfError;
use kf_network::NetworkError;
use kf_thermo::ThermoError;
use thiserror::Error;

/// Errors encountered while configuring or simulating a reactor.
#[derive(Error, Debug)]
pub enum ReactorError {
    /// Thermodynamic closure is over- or under-specified.
    #[error("Invalid reaction system: {what}")]
    InvalidReactionSystem { what: &'static str },

    /// The integrator could not meet its tolerances.
    #[error("Integration failure at t = {time:e}: {message}")]
    IntegrationFailure { message: String, time: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Thermo(#[from] ThermoError),
}

pub type ReactorResult<T> = Result<T, ReactorError>;

impl From<ReactorError> for KfError {
    fn from(err: ReactorError) -> Self {
        match err {
            ReactorError::Network(e) => e.into(),
            ReactorError::Thermo(e) => e.into(),
            other => KfError::Layer {
                layer: "reactor",
                message: other.to_string(),
            },
        }
    }
}
