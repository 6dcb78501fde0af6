//! Network-specific error types.

use kf_core::{KfError, ReactionId, SpeciesId};
use thiserror::Error;

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors raised while building or screening a reaction network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A species handle that the catalog never issued.
    #[error("Unknown species handle {id:?}")]
    UnknownSpecies { id: SpeciesId },

    /// A reaction handle that the catalog never issued.
    #[error("Unknown reaction handle {id:?}")]
    UnknownReaction { id: ReactionId },

    /// A reaction with no reactants and no products.
    #[error("Reaction has no participants")]
    EmptyReaction,

    /// A reaction reported a NaN or infinite rate.
    #[error("Non-finite rate {value} for {reaction:?}")]
    NonFiniteRate { reaction: ReactionId, value: f64 },

    #[error("{species:?} is in both the core and the edge")]
    SpeciesInCoreAndEdge { species: SpeciesId },

    #[error("{reaction:?} is in both the core and the edge")]
    ReactionInCoreAndEdge { reaction: ReactionId },

    #[error("Core {reaction:?} references {species:?}, which is not a core species")]
    CoreReactionLeavesCore {
        reaction: ReactionId,
        species: SpeciesId,
    },

    #[error("Edge {reaction:?} has all participants in the core")]
    EdgeReactionBelongsInCore { reaction: ReactionId },

    #[error("{reaction:?} references {species:?}, which is in neither core nor edge")]
    DanglingSpecies {
        reaction: ReactionId,
        species: SpeciesId,
    },

    /// Failure reported by a rate provider.
    #[error("Rate provider failed: {message}")]
    Provider { message: String },
}

impl NetworkError {
    /// True for errors that describe a broken core/edge partition.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            NetworkError::SpeciesInCoreAndEdge { .. }
                | NetworkError::ReactionInCoreAndEdge { .. }
                | NetworkError::CoreReactionLeavesCore { .. }
                | NetworkError::EdgeReactionBelongsInCore { .. }
                | NetworkError::DanglingSpecies { .. }
        )
    }
}

impl From<NetworkError> for KfError {
    fn from(err: NetworkError) -> Self {
        if err.is_invariant_violation() {
            KfError::Invariant {
                what: err.to_string(),
            }
        } else {
            KfError::Layer {
                layer: "network",
                message: err.to_string(),
            }
        }
    }
}
