//! Simulation options.

use crate::integrator::IntegratorType;

/// Options for `BatchReactor::simulate`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationOptions {
    /// Start of the first span (seconds)
    pub initial_time: f64,
    /// Span growth factor applied to the integrator's time horizon
    pub growth_factor: f64,
    /// Stop once a span starts at or beyond this time (seconds)
    pub time_ceiling: f64,
    /// Lead species fraction below which the run is complete
    pub completion_fraction: f64,
    /// Reactor volume used to convert concentrations to moles (m³)
    pub reference_volume: f64,
    /// Integrator type (default: Radau5)
    pub integrator: IntegratorType,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            initial_time: 1e-20,
            growth_factor: 1.1,
            time_ceiling: 1.0,
            completion_fraction: 0.1,
            reference_volume: 1.0,
            integrator: IntegratorType::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = SimulationOptions::default();
        assert_eq!(opts.initial_time, 1e-20);
        assert_eq!(opts.growth_factor, 1.1);
        assert_eq!(opts.time_ceiling, 1.0);
        assert_eq!(opts.completion_fraction, 0.1);
        assert_eq!(opts.reference_volume, 1.0);
        assert_eq!(opts.integrator, IntegratorType::Radau5);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let opts = SimulationOptions {
            integrator: IntegratorType::Dopri5,
            ..SimulationOptions::default()
        };
        let json = serde_json::to_string(&opts).unwrap();
        let back: SimulationOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
    }
}
