//! kf-network: reaction network layer for kinflux.
//!
//! Provides:
//! - Species and reaction capabilities (trait objects supplied by the kinetics layer)
//! - A catalog arena issuing stable `SpeciesId`/`ReactionId` handles
//! - The plain `ReactionModel` container
//! - `CoreEdgeReactionModel`: core/edge partitioning, enlargement and flux screening
//! - The `RateProvider` seam used to discover candidate reactions
//!
//! # Example
//!
//! ```
//! use kf_network::{
//!     Catalog, CoreEdgeReactionModel, ElementaryReaction, LabeledSpecies, ReactantIndex,
//! };
//!
//! let mut catalog = Catalog::new();
//! let a = catalog.add_species(LabeledSpecies::new("A"));
//! let b = catalog.add_species(LabeledSpecies::new("B"));
//! catalog
//!     .add_reaction(ElementaryReaction::new(vec![a], vec![b], 1.0))
//!     .unwrap();
//!
//! let mut provider = ReactantIndex::from_catalog(&catalog);
//! let mut model = CoreEdgeReactionModel::with_catalog(catalog);
//! model.initialize(&mut provider, &[a]).unwrap();
//!
//! assert!(model.is_in_core(a));
//! assert!(model.is_in_edge(b));
//! assert_eq!(model.edge().reaction_count(), 1);
//! ```

pub mod catalog;
pub mod core_edge;
pub mod error;
pub mod model;
pub mod provider;
pub mod reaction;
pub mod species;
pub(crate) mod validate;

pub use catalog::Catalog;
pub use core_edge::{CoreEdgeReactionModel, ScreeningTolerances, ValidityReport};
pub use error::{NetworkError, NetworkResult};
pub use model::ReactionModel;
pub use provider::{RateProvider, ReactantIndex};
pub use reaction::{Concentrations, ElementaryReaction, Reaction};
pub use species::{LabeledSpecies, Species};
