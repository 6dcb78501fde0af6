//! Core/edge partition validation.

use kf_core::SpeciesId;

use crate::catalog::Catalog;
use crate::error::{NetworkError, NetworkResult};
use crate::model::ReactionModel;
use crate::reaction::participants;

/// Check the partition invariants, returning the first violation found.
///
/// 1. no species in both core and edge
/// 2. no reaction in both core and edge
/// 3. core reactions reference only core species; edge reactions reference
///    at least one species outside the core
/// 4. every referenced species is in core or edge
pub(crate) fn validate_partition(
    catalog: &Catalog,
    core: &ReactionModel,
    edge: &ReactionModel,
) -> NetworkResult<()> {
    for &species in core.species().iter().chain(edge.species()) {
        catalog.species(species)?;
    }

    for &species in core.species() {
        if edge.contains_species(species) {
            return Err(NetworkError::SpeciesInCoreAndEdge { species });
        }
    }

    for &reaction in core.reactions() {
        if edge.contains_reaction(reaction) {
            return Err(NetworkError::ReactionInCoreAndEdge { reaction });
        }
    }

    let known = |s: SpeciesId| core.contains_species(s) || edge.contains_species(s);

    for &reaction in core.reactions() {
        let rxn = catalog.reaction(reaction)?;
        for species in participants(rxn) {
            if !core.contains_species(species) {
                return Err(NetworkError::CoreReactionLeavesCore { reaction, species });
            }
        }
    }

    for &reaction in edge.reactions() {
        let rxn = catalog.reaction(reaction)?;
        if participants(rxn).all(|s| core.contains_species(s)) {
            return Err(NetworkError::EdgeReactionBelongsInCore { reaction });
        }
        if let Some(species) = participants(rxn).find(|&s| !known(s)) {
            return Err(NetworkError::DanglingSpecies { reaction, species });
        }
    }

    Ok(())
}
