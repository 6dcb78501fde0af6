//! Arena of species and reactions.

use std::sync::Arc;

use kf_core::{ReactionId, SpeciesId};

use crate::error::{NetworkError, NetworkResult};
use crate::reaction::{Reaction, participants};
use crate::species::Species;

/// Append-only store of every species and reaction the network has seen.
///
/// Handles are positions in the arena, so lookups are O(1) and never
/// invalidated: nothing is removed once admitted.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    species: Vec<Arc<dyn Species>>,
    reactions: Vec<Arc<dyn Reaction>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a species and return its handle.
    pub fn add_species(&mut self, species: impl Species + 'static) -> SpeciesId {
        self.add_species_arc(Arc::new(species))
    }

    pub fn add_species_arc(&mut self, species: Arc<dyn Species>) -> SpeciesId {
        let id = SpeciesId::from_usize(self.species.len());
        self.species.push(species);
        id
    }

    /// Register a reaction. Every referenced species must already be registered.
    pub fn add_reaction(&mut self, reaction: impl Reaction + 'static) -> NetworkResult<ReactionId> {
        self.add_reaction_arc(Arc::new(reaction))
    }

    pub fn add_reaction_arc(&mut self, reaction: Arc<dyn Reaction>) -> NetworkResult<ReactionId> {
        if reaction.reactants().is_empty() && reaction.products().is_empty() {
            return Err(NetworkError::EmptyReaction);
        }
        for species in participants(reaction.as_ref()) {
            self.species(species)?;
        }
        let id = ReactionId::from_usize(self.reactions.len());
        self.reactions.push(reaction);
        Ok(id)
    }

    pub fn species(&self, id: SpeciesId) -> NetworkResult<&dyn Species> {
        self.species
            .get(id.as_usize())
            .map(Arc::as_ref)
            .ok_or(NetworkError::UnknownSpecies { id })
    }

    pub fn reaction(&self, id: ReactionId) -> NetworkResult<&dyn Reaction> {
        self.reactions
            .get(id.as_usize())
            .map(Arc::as_ref)
            .ok_or(NetworkError::UnknownReaction { id })
    }

    /// Label of a species, or `"?"` for a foreign handle (logging only).
    pub fn label(&self, id: SpeciesId) -> &str {
        self.species(id).map(|s| s.label()).unwrap_or("?")
    }

    /// First species registered under `label`.
    pub fn find_species(&self, label: &str) -> Option<SpeciesId> {
        self.species
            .iter()
            .position(|s| s.label() == label)
            .map(SpeciesId::from_usize)
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    pub fn reaction_ids(&self) -> impl Iterator<Item = ReactionId> + '_ {
        (0..self.reactions.len()).map(ReactionId::from_usize)
    }
}
