//! Rate provider seam.

use std::collections::HashMap;

use kf_core::{ReactionId, SpeciesId};

use crate::catalog::Catalog;
use crate::error::NetworkResult;

/// Source of candidate reactions for one species or a pair of species.
///
/// Implementations may register new product species and reactions in the
/// catalog. Answers must be deterministic for a given species tuple so that
/// enlargement is reproducible.
pub trait RateProvider {
    /// Reactions whose reactants are exactly `species` (one or two handles).
    fn reactions(
        &mut self,
        catalog: &mut Catalog,
        species: &[SpeciesId],
    ) -> NetworkResult<Vec<ReactionId>>;
}

impl<F> RateProvider for F
where
    F: FnMut(&mut Catalog, &[SpeciesId]) -> NetworkResult<Vec<ReactionId>>,
{
    fn reactions(
        &mut self,
        catalog: &mut Catalog,
        species: &[SpeciesId],
    ) -> NetworkResult<Vec<ReactionId>> {
        self(catalog, species)
    }
}

/// Provider answering from reactions already registered in a catalog,
/// keyed by their sorted reactant tuple.
#[derive(Debug, Clone, Default)]
pub struct ReactantIndex {
    by_reactants: HashMap<Vec<SpeciesId>, Vec<ReactionId>>,
}

impl ReactantIndex {
    /// Index every reaction currently in `catalog`.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut index = Self::default();
        for id in catalog.reaction_ids() {
            if let Ok(rxn) = catalog.reaction(id) {
                index.insert(rxn.reactants(), id);
            }
        }
        index
    }

    /// Index one reaction under `reactants`.
    pub fn insert(&mut self, reactants: &[SpeciesId], reaction: ReactionId) {
        self.by_reactants
            .entry(Self::key(reactants))
            .or_default()
            .push(reaction);
    }

    /// Reactions registered for this reactant tuple, in registration order.
    pub fn lookup(&self, reactants: &[SpeciesId]) -> &[ReactionId] {
        self.by_reactants
            .get(&Self::key(reactants))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn key(reactants: &[SpeciesId]) -> Vec<SpeciesId> {
        let mut key = reactants.to_vec();
        key.sort_unstable();
        key
    }
}

impl RateProvider for ReactantIndex {
    fn reactions(
        &mut self,
        _catalog: &mut Catalog,
        species: &[SpeciesId],
    ) -> NetworkResult<Vec<ReactionId>> {
        Ok(self.lookup(species).to_vec())
    }
}
