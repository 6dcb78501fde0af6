//! Reaction capability and concentration mapping.

use std::fmt;

use kf_core::SpeciesId;

/// Species-keyed concentration mapping [mol/m³].
///
/// Stored densely by species handle; species that were never set read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Concentrations {
    values: Vec<f64>,
}

impl Concentrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for a catalog of `species_count` species.
    pub fn with_capacity(species_count: usize) -> Self {
        Self {
            values: vec![0.0; species_count],
        }
    }

    /// Build from `(species, concentration)` pairs; later pairs win.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (SpeciesId, f64)>) -> Self {
        let mut conc = Self::new();
        for (species, value) in pairs {
            conc.set(species, value);
        }
        conc
    }

    pub fn set(&mut self, species: SpeciesId, value: f64) {
        let idx = species.as_usize();
        if idx >= self.values.len() {
            self.values.resize(idx + 1, 0.0);
        }
        self.values[idx] = value;
    }

    pub fn get(&self, species: SpeciesId) -> f64 {
        self.values.get(species.as_usize()).copied().unwrap_or(0.0)
    }

    /// Iterate over non-zero entries in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (SpeciesId::from_usize(i), *v))
    }
}

/// A reaction as seen by the network layer.
///
/// Reactions are immutable once registered. Species may repeat in either
/// list (`2 A -> B` lists `A` twice).
pub trait Reaction: fmt::Debug + Send + Sync {
    fn reactants(&self) -> &[SpeciesId];

    fn products(&self) -> &[SpeciesId];

    /// Net forward rate [mol/(m³·s)] at temperature `t` [K], pressure `p` [Pa]
    /// and the given concentrations.
    fn rate(&self, t: f64, p: f64, conc: &Concentrations) -> f64;

    /// Net stoichiometric coefficient of `species`: positive when produced,
    /// negative when consumed, zero when absent.
    fn stoichiometric_coefficient(&self, species: SpeciesId) -> i32 {
        let produced = self.products().iter().filter(|&&s| s == species).count() as i32;
        let consumed = self.reactants().iter().filter(|&&s| s == species).count() as i32;
        produced - consumed
    }
}

/// Every species the reaction references, reactants first, duplicates kept.
pub fn participants(rxn: &dyn Reaction) -> impl Iterator<Item = SpeciesId> + '_ {
    rxn.reactants().iter().chain(rxn.products()).copied()
}

/// Irreversible mass-action reaction with a fixed rate coefficient.
///
/// rate = k · ∏ C(reactant)
#[derive(Debug, Clone, PartialEq)]
pub struct ElementaryReaction {
    pub reactants: Vec<SpeciesId>,
    pub products: Vec<SpeciesId>,
    /// Rate coefficient (units follow the reaction order).
    pub k: f64,
}

impl ElementaryReaction {
    pub fn new(reactants: Vec<SpeciesId>, products: Vec<SpeciesId>, k: f64) -> Self {
        Self {
            reactants,
            products,
            k,
        }
    }
}

impl Reaction for ElementaryReaction {
    fn reactants(&self) -> &[SpeciesId] {
        &self.reactants
    }

    fn products(&self) -> &[SpeciesId] {
        &self.products
    }

    fn rate(&self, _t: f64, _p: f64, conc: &Concentrations) -> f64 {
        self.reactants
            .iter()
            .fold(self.k, |acc, &s| acc * conc.get(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ids() -> (SpeciesId, SpeciesId, SpeciesId) {
        (
            SpeciesId::from_index(0),
            SpeciesId::from_index(1),
            SpeciesId::from_index(2),
        )
    }

    #[test]
    fn concentrations_default_to_zero() {
        let (a, b, c) = ids();
        let conc = Concentrations::from_pairs([(a, 2.0), (c, 0.5)]);
        assert_eq!(conc.get(a), 2.0);
        assert_eq!(conc.get(b), 0.0);
        assert_eq!(conc.get(SpeciesId::from_index(99)), 0.0);
        assert_eq!(conc.iter().count(), 2);
    }

    #[test]
    fn mass_action_rate() {
        let (a, b, c) = ids();
        let rxn = ElementaryReaction::new(vec![a, b], vec![c], 3.0);
        let conc = Concentrations::from_pairs([(a, 2.0), (b, 0.5)]);
        assert_relative_eq!(rxn.rate(1000.0, 1e5, &conc), 3.0);
    }

    #[test]
    fn stoichiometry_counts_repeats() {
        let (a, b, c) = ids();
        let rxn = ElementaryReaction::new(vec![a, a], vec![b], 1.0);
        assert_eq!(rxn.stoichiometric_coefficient(a), -2);
        assert_eq!(rxn.stoichiometric_coefficient(b), 1);
        assert_eq!(rxn.stoichiometric_coefficient(c), 0);

        // Catalysts cancel out.
        let cat = ElementaryReaction::new(vec![a, c], vec![b, c], 1.0);
        assert_eq!(cat.stoichiometric_coefficient(c), 0);
        assert_eq!(participants(&cat).count(), 4);
    }
}
