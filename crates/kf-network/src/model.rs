//! Generic reaction model container.

use indexmap::IndexSet;
use kf_core::{ReactionId, SpeciesId};

/// A set of species and a set of reactions, with no partitioning semantics.
///
/// Both sets keep insertion order (for reproducible matrix layouts) and give
/// O(1) membership tests. Inserting an existing entry is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionModel {
    species: IndexSet<SpeciesId>,
    reactions: IndexSet<ReactionId>,
}

impl ReactionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing lists, dropping duplicates.
    pub fn from_parts(
        species: impl IntoIterator<Item = SpeciesId>,
        reactions: impl IntoIterator<Item = ReactionId>,
    ) -> Self {
        Self {
            species: species.into_iter().collect(),
            reactions: reactions.into_iter().collect(),
        }
    }

    pub fn species(&self) -> &IndexSet<SpeciesId> {
        &self.species
    }

    pub fn reactions(&self) -> &IndexSet<ReactionId> {
        &self.reactions
    }

    pub fn contains_species(&self, id: SpeciesId) -> bool {
        self.species.contains(&id)
    }

    pub fn contains_reaction(&self, id: ReactionId) -> bool {
        self.reactions.contains(&id)
    }

    /// Position of a species in insertion order.
    pub fn species_position(&self, id: SpeciesId) -> Option<usize> {
        self.species.get_index_of(&id)
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty() && self.reactions.is_empty()
    }

    /// Append a species; returns false if it was already present.
    pub fn add_species(&mut self, id: SpeciesId) -> bool {
        self.species.insert(id)
    }

    /// Append a reaction; returns false if it was already present.
    pub fn add_reaction(&mut self, id: ReactionId) -> bool {
        self.reactions.insert(id)
    }

    /// Remove a species, keeping the order of the others.
    pub fn remove_species(&mut self, id: SpeciesId) -> bool {
        self.species.shift_remove(&id)
    }

    /// Remove a reaction, keeping the order of the others.
    pub fn remove_reaction(&mut self, id: ReactionId) -> bool {
        self.reactions.shift_remove(&id)
    }
}
