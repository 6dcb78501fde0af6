//! Batch reactor: residual function and the screening simulation loop.
//!
//! State vector layout: `y = [P, V, T, N_0 .. N_k]` with one mole amount per
//! core species, in core order.

use kf_core::SpeciesId;
use kf_network::{Concentrations, CoreEdgeReactionModel};
use kf_thermo::{EquationOfState, IdealGas, PressureModel, TemperatureModel, VolumeModel};
use nalgebra::DVector;
use tracing::{debug, info};

use crate::error::{ReactorError, ReactorResult};
use crate::options::SimulationOptions;
use crate::stoichiometry::StoichiometryMatrix;
use crate::system::OdeSystem;

pub const P_INDEX: usize = 0;
pub const V_INDEX: usize = 1;
pub const T_INDEX: usize = 2;
/// Index of the first mole amount.
pub const N_OFFSET: usize = 3;

/// How a simulation ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimulationOutcome {
    /// The lead core species fell below the completion fraction.
    Completed { time: f64 },
    /// An edge species exceeded the characteristic flux; promote it.
    Invalid { species: SpeciesId, time: f64 },
    /// The time ceiling was reached without completion. Inconclusive.
    TimeCeiling { time: f64 },
}

impl SimulationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SimulationOutcome::Completed { .. })
    }

    pub fn failing_species(&self) -> Option<SpeciesId> {
        match self {
            SimulationOutcome::Invalid { species, .. } => Some(*species),
            _ => None,
        }
    }

    pub fn time(&self) -> f64 {
        match *self {
            SimulationOutcome::Completed { time }
            | SimulationOutcome::Invalid { time, .. }
            | SimulationOutcome::TimeCeiling { time } => time,
        }
    }
}

/// Closed batch reactor.
///
/// At most two of the temperature, pressure and volume models may be given.
/// Simulation currently needs temperature and pressure, and holds both
/// constant.
#[derive(Clone, Debug)]
pub struct BatchReactor<E = IdealGas> {
    temperature: Option<TemperatureModel>,
    pressure: Option<PressureModel>,
    volume: Option<VolumeModel>,
    initial_concentrations: Concentrations,
    eos: E,
    options: SimulationOptions,
}

impl BatchReactor<IdealGas> {
    /// Ideal-gas reactor.
    pub fn new(
        temperature: Option<TemperatureModel>,
        pressure: Option<PressureModel>,
        volume: Option<VolumeModel>,
        initial_concentrations: Concentrations,
    ) -> ReactorResult<Self> {
        Self::with_equation_of_state(
            IdealGas,
            temperature,
            pressure,
            volume,
            initial_concentrations,
        )
    }
}

impl<E: EquationOfState> BatchReactor<E> {
    pub fn with_equation_of_state(
        eos: E,
        temperature: Option<TemperatureModel>,
        pressure: Option<PressureModel>,
        volume: Option<VolumeModel>,
        initial_concentrations: Concentrations,
    ) -> ReactorResult<Self> {
        if temperature.is_some() && pressure.is_some() && volume.is_some() {
            return Err(ReactorError::InvalidReactionSystem {
                what: "temperature, pressure and volume models cannot all be specified",
            });
        }
        Ok(Self {
            temperature,
            pressure,
            volume,
            initial_concentrations,
            eos,
            options: SimulationOptions::default(),
        })
    }

    pub fn with_options(mut self, options: SimulationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn temperature_model(&self) -> Option<&TemperatureModel> {
        self.temperature.as_ref()
    }

    pub fn pressure_model(&self) -> Option<&PressureModel> {
        self.pressure.as_ref()
    }

    pub fn volume_model(&self) -> Option<&VolumeModel> {
        self.volume.as_ref()
    }

    pub fn initial_concentrations(&self) -> &Concentrations {
        &self.initial_concentrations
    }

    pub fn equation_of_state(&self) -> &E {
        &self.eos
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Residual system over `model` with the ordering captured in `stoich`.
    pub fn system<'a>(
        &'a self,
        model: &'a CoreEdgeReactionModel,
        stoich: &'a StoichiometryMatrix,
    ) -> ReactorSystem<'a, E> {
        ReactorSystem {
            eos: &self.eos,
            model,
            stoich,
        }
    }

    /// State at time zero: P and T from the profiles, the reference volume,
    /// and `N_i = C_i V` for every core species.
    pub fn initial_state(&self, stoich: &StoichiometryMatrix) -> ReactorResult<DVector<f64>> {
        let t = self
            .temperature
            .as_ref()
            .and_then(|m| m.temperature_k(0.0))
            .ok_or(ReactorError::InvalidReactionSystem {
                what: "a temperature profile is required",
            })?;
        let p = self
            .pressure
            .as_ref()
            .and_then(|m| m.pressure_pa(0.0))
            .ok_or(ReactorError::InvalidReactionSystem {
                what: "a pressure profile is required",
            })?;
        let core = stoich.core_species();
        if core.is_empty() {
            return Err(ReactorError::InvalidArg {
                what: "reaction model has no core species",
            });
        }

        let v = self.options.reference_volume;
        let mut y = DVector::zeros(N_OFFSET + core.len());
        y[P_INDEX] = p;
        y[V_INDEX] = v;
        y[T_INDEX] = t;
        for (i, &species) in core.iter().enumerate() {
            y[N_OFFSET + i] = self.initial_concentrations.get(species) * v;
        }
        Ok(y)
    }

    /// Screen `model` at state `y`. Returns the edge species to promote, or
    /// `None` when the model is valid.
    pub fn check_validity(
        &self,
        model: &CoreEdgeReactionModel,
        y: &DVector<f64>,
        time: f64,
    ) -> ReactorResult<Option<SpeciesId>> {
        let core: Vec<SpeciesId> = model.core().species().iter().copied().collect();
        let conc = core_concentrations(model, &core, y);
        let report = model.screen(y[T_INDEX], y[P_INDEX], &conc)?;
        match report.max_edge_flux {
            Some((species, flux)) if !report.is_valid() => {
                info!(
                    time,
                    species = model.catalog().label(species),
                    characteristic_flux = report.characteristic_flux,
                    species_flux = flux,
                    "reaction model invalid"
                );
                Ok(Some(species))
            }
            _ => Ok(None),
        }
    }

    /// Integrate `model` until the lead core species is depleted, the model
    /// turns invalid, or the time ceiling is reached.
    ///
    /// The model must not change while this runs; the borrow enforces it.
    pub fn simulate(&self, model: &CoreEdgeReactionModel) -> ReactorResult<SimulationOutcome> {
        let opts = &self.options;
        validate_options(opts)?;

        let stoich = StoichiometryMatrix::build(model)?;
        let mut y = self.initial_state(&stoich)?;
        let lead_initial = y[N_OFFSET];

        if let Some(species) = self.check_validity(model, &y, 0.0)? {
            return Ok(SimulationOutcome::Invalid { species, time: 0.0 });
        }

        let system = self.system(model, &stoich);
        let tol = model.tolerances().integration();

        let mut t0 = opts.initial_time;
        let mut tf = opts.growth_factor * t0;
        while t0 < opts.time_ceiling {
            let out = opts
                .integrator
                .integrate(&system, &y, (t0, tf), tol)?;
            y = out.y;
            debug!(
                t = out.t,
                p = y[P_INDEX],
                v = y[V_INDEX],
                temperature = y[T_INDEX],
                lead = y[N_OFFSET],
                steps = out.steps,
                "span accepted"
            );

            if let Some(species) = self.check_validity(model, &y, out.t)? {
                return Ok(SimulationOutcome::Invalid {
                    species,
                    time: out.t,
                });
            }

            if y[N_OFFSET] < opts.completion_fraction * lead_initial {
                info!(
                    time = out.t,
                    species = model.catalog().label(stoich.core_species()[0]),
                    "lead species depleted, simulation complete"
                );
                return Ok(SimulationOutcome::Completed { time: out.t });
            }

            t0 = out.t;
            tf = out.t_horizon * opts.growth_factor;
        }

        info!(
            time = t0,
            ceiling = opts.time_ceiling,
            "time ceiling reached before completion"
        );
        Ok(SimulationOutcome::TimeCeiling { time: t0 })
    }
}

/// Right-hand side of the batch reactor equations.
///
/// Holds only shared references; evaluation never mutates the model.
pub struct ReactorSystem<'a, E> {
    eos: &'a E,
    model: &'a CoreEdgeReactionModel,
    stoich: &'a StoichiometryMatrix,
}

impl<E: EquationOfState> OdeSystem for ReactorSystem<'_, E> {
    fn dim(&self) -> usize {
        N_OFFSET + self.stoich.core_species().len()
    }

    fn rhs(&self, _t: f64, y: &DVector<f64>) -> ReactorResult<DVector<f64>> {
        let (p, v, t) = (y[P_INDEX], y[V_INDEX], y[T_INDEX]);
        let n = &y.as_slice()[N_OFFSET..];

        let conc = core_concentrations(self.model, self.stoich.core_species(), y);
        let rates = self.model.reaction_rates(t, p, &conc)?;
        let dn_dt = self.stoich.core_production(&rates);

        // Isothermal and isobaric.
        let dp_dt = 0.0;
        let dt_dt = 0.0;

        let mut dv_dt = self.eos.dv_dp(p, v, t, n)? * dp_dt + self.eos.dv_dt(p, v, t, n)? * dt_dt;
        // dV/dN_i needs a nonzero total; with no net production the sum is zero.
        if dn_dt.iter().any(|&dni| dni != 0.0) {
            for (i, dni) in dn_dt.iter().enumerate() {
                dv_dt += self.eos.dv_dni(p, v, t, n, &i)? * dni;
            }
        }

        let mut dy = DVector::zeros(y.len());
        dy[P_INDEX] = dp_dt;
        dy[V_INDEX] = dv_dt;
        dy[T_INDEX] = dt_dt;
        dy.rows_mut(N_OFFSET, dn_dt.len()).copy_from(&dn_dt);
        Ok(dy)
    }
}

/// `C_i = N_i / V` for the core species; every other species reads zero.
fn core_concentrations(
    model: &CoreEdgeReactionModel,
    core: &[SpeciesId],
    y: &DVector<f64>,
) -> Concentrations {
    let v = y[V_INDEX];
    let mut conc = Concentrations::with_capacity(model.catalog().species_count());
    for (i, &species) in core.iter().enumerate() {
        conc.set(species, y[N_OFFSET + i] / v);
    }
    conc
}

fn validate_options(opts: &SimulationOptions) -> ReactorResult<()> {
    if opts.initial_time <= 0.0 {
        return Err(ReactorError::InvalidArg {
            what: "initial_time must be positive",
        });
    }
    if opts.growth_factor <= 1.0 {
        return Err(ReactorError::InvalidArg {
            what: "growth_factor must exceed one",
        });
    }
    if opts.reference_volume <= 0.0 {
        return Err(ReactorError::InvalidArg {
            what: "reference_volume must be positive",
        });
    }
    if opts.completion_fraction <= 0.0 || opts.completion_fraction >= 1.0 {
        return Err(ReactorError::InvalidArg {
            what: "completion_fraction must lie in (0, 1)",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use kf_core::units::{bar, k, m3};
    use kf_network::{Catalog, ElementaryReaction, LabeledSpecies, ReactantIndex};

    fn isothermal_isobaric() -> (Option<TemperatureModel>, Option<PressureModel>) {
        (
            Some(TemperatureModel::isothermal(k(1000.0)).unwrap()),
            Some(PressureModel::isobaric(bar(1.0)).unwrap()),
        )
    }

    fn a_to_b(k_rate: f64) -> (CoreEdgeReactionModel, SpeciesId, SpeciesId) {
        let mut catalog = Catalog::new();
        let a = catalog.add_species(LabeledSpecies::new("A"));
        let b = catalog.add_species(LabeledSpecies::new("B"));
        catalog
            .add_reaction(ElementaryReaction::new(vec![a], vec![b], k_rate))
            .unwrap();
        let mut provider = ReactantIndex::from_catalog(&catalog);
        let mut model = CoreEdgeReactionModel::with_catalog(catalog);
        model.initialize(&mut provider, &[a, b]).unwrap();
        (model, a, b)
    }

    #[test]
    fn three_models_are_rejected() {
        let (t, p) = isothermal_isobaric();
        let v = Some(VolumeModel::isochoric(m3(1.0)).unwrap());
        let err = BatchReactor::new(t, p, v, Concentrations::new()).unwrap_err();
        assert!(matches!(err, ReactorError::InvalidReactionSystem { .. }));
    }

    #[test]
    fn missing_pressure_is_reported_at_simulation() {
        let (t, _) = isothermal_isobaric();
        let v = Some(VolumeModel::isochoric(m3(1.0)).unwrap());
        let (model, a, _) = a_to_b(1.0);
        let reactor =
            BatchReactor::new(t, None, v, Concentrations::from_pairs([(a, 1.0)])).unwrap();
        let err = reactor.simulate(&model).unwrap_err();
        assert!(matches!(
            err,
            ReactorError::InvalidReactionSystem {
                what: "a pressure profile is required"
            }
        ));
    }

    #[test]
    fn initial_state_layout() {
        let (t, p) = isothermal_isobaric();
        let (model, a, _) = a_to_b(1.0);
        let reactor = BatchReactor::new(t, p, None, Concentrations::from_pairs([(a, 12.0)]))
            .unwrap()
            .with_options(SimulationOptions {
                reference_volume: 2.0,
                ..SimulationOptions::default()
            });
        let stoich = StoichiometryMatrix::build(&model).unwrap();
        let y = reactor.initial_state(&stoich).unwrap();
        assert_eq!(y.as_slice(), &[1e5, 2.0, 1000.0, 24.0, 0.0]);
    }

    #[test]
    fn residual_conserves_volume_for_isomerization() {
        let (t, p) = isothermal_isobaric();
        let (model, a, _) = a_to_b(3.0);
        let reactor =
            BatchReactor::new(t, p, None, Concentrations::from_pairs([(a, 2.0)])).unwrap();
        let stoich = StoichiometryMatrix::build(&model).unwrap();
        let y = reactor.initial_state(&stoich).unwrap();
        let system = reactor.system(&model, &stoich);

        let dy = system.rhs(0.0, &y).unwrap();
        assert_eq!(dy[P_INDEX], 0.0);
        assert_eq!(dy[T_INDEX], 0.0);
        assert_abs_diff_eq!(dy[N_OFFSET], -6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dy[N_OFFSET + 1], 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dy[V_INDEX], 0.0, epsilon = 1e-12);

        // Pure: same input, same output.
        assert_eq!(system.rhs(0.0, &y).unwrap(), dy);
    }

    #[test]
    fn residual_is_zero_for_empty_reactor() {
        let (t, p) = isothermal_isobaric();
        let (model, _, _) = a_to_b(3.0);
        let reactor = BatchReactor::new(t, p, None, Concentrations::new()).unwrap();
        let stoich = StoichiometryMatrix::build(&model).unwrap();
        let y = reactor.initial_state(&stoich).unwrap();
        let dy = reactor.system(&model, &stoich).rhs(0.0, &y).unwrap();
        assert!(dy.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn outcome_accessors() {
        let s = SpeciesId::from_index(2);
        let invalid = SimulationOutcome::Invalid {
            species: s,
            time: 0.5,
        };
        assert!(!invalid.is_success());
        assert_eq!(invalid.failing_species(), Some(s));
        assert_eq!(invalid.time(), 0.5);

        let done = SimulationOutcome::Completed { time: 0.1 };
        assert!(done.is_success());
        assert_eq!(done.failing_species(), None);

        let ceiling = SimulationOutcome::TimeCeiling { time: 1.0 };
        assert!(!ceiling.is_success());
        assert_eq!(ceiling.failing_species(), None);
    }

    #[test]
    fn bad_options_are_rejected() {
        let (t, p) = isothermal_isobaric();
        let (model, a, _) = a_to_b(1.0);
        let reactor = BatchReactor::new(t, p, None, Concentrations::from_pairs([(a, 1.0)]))
            .unwrap()
            .with_options(SimulationOptions {
                growth_factor: 1.0,
                ..SimulationOptions::default()
            });
        assert!(matches!(
            reactor.simulate(&model),
            Err(ReactorError::InvalidArg { .. })
        ));
    }
}
