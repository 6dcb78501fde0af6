//! kf-reactor: batch reactor simulation for kinflux.
//!
//! Provides:
//! - `OdeSystem` trait and adaptive integrators (Radau5, Dormand-Prince 5(4)) from
//!   `differential-equations`
//! - Stoichiometry matrix over a core/edge reaction model
//! - `BatchReactor`: residual function and the screening `simulate` loop
//!
//! # Example
//!
//! ```
//! use kf_core::units::{bar, k};
//! use kf_network::{
//!     Catalog, Concentrations, CoreEdgeReactionModel, ElementaryReaction, LabeledSpecies,
//!     ReactantIndex,
//! };
//! use kf_reactor::BatchReactor;
//! use kf_thermo::{PressureModel, TemperatureModel};
//!
//! let mut catalog = Catalog::new();
//! let a = catalog.add_species(LabeledSpecies::new("A"));
//! let b = catalog.add_species(LabeledSpecies::new("B"));
//! catalog
//!     .add_reaction(ElementaryReaction::new(vec![a], vec![b], 50.0))
//!     .unwrap();
//! let mut provider = ReactantIndex::from_catalog(&catalog);
//! let mut model = CoreEdgeReactionModel::with_catalog(catalog);
//! model.initialize(&mut provider, &[a, b]).unwrap();
//!
//! let reactor = BatchReactor::new(
//!     Some(TemperatureModel::isothermal(k(1000.0)).unwrap()),
//!     Some(PressureModel::isobaric(bar(1.0)).unwrap()),
//!     None,
//!     Concentrations::from_pairs([(a, 12.0)]),
//! )
//! .unwrap();
//!
//! let outcome = reactor.simulate(&model).unwrap();
//! assert!(outcome.is_success());
//! ```

pub mod error;
pub mod integrator;
pub mod options;
pub mod reactor;
pub mod stoichiometry;
pub mod system;

pub use error::{ReactorError, ReactorResult};
pub use integrator::{Dopri5, IntegrationOutcome, Integrator, IntegratorType, Radau5};
pub use options::SimulationOptions;
pub use reactor::{BatchReactor, ReactorSystem, SimulationOutcome};
pub use stoichiometry::StoichiometryMatrix;
pub use system::{FnSystem, OdeSystem};
