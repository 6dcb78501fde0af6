//! Stoichiometry matrix over the core/edge model.

use kf_core::{ReactionId, SpeciesId};
use kf_network::CoreEdgeReactionModel;
use nalgebra::{DMatrix, DVector};

use crate::error::ReactorResult;

/// Net stoichiometric coefficients, species by reaction.
///
/// Rows are core species then edge species; columns are core reactions then
/// edge reactions. The ordering is captured at construction and does not
/// follow later changes to the model.
#[derive(Clone, Debug)]
pub struct StoichiometryMatrix {
    species: Vec<SpeciesId>,
    reactions: Vec<ReactionId>,
    core_species: usize,
    core_reactions: usize,
    matrix: DMatrix<f64>,
}

impl StoichiometryMatrix {
    pub fn build(model: &CoreEdgeReactionModel) -> ReactorResult<Self> {
        let (species, reactions) = model.get_lists();
        let mut matrix = DMatrix::zeros(species.len(), reactions.len());
        for (j, &reaction) in reactions.iter().enumerate() {
            let rxn = model.catalog().reaction(reaction)?;
            for (i, &s) in species.iter().enumerate() {
                matrix[(i, j)] = f64::from(rxn.stoichiometric_coefficient(s));
            }
        }
        Ok(Self {
            species,
            reactions,
            core_species: model.core().species_count(),
            core_reactions: model.core().reaction_count(),
            matrix,
        })
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Row order: core species then edge species.
    pub fn species(&self) -> &[SpeciesId] {
        &self.species
    }

    /// Column order: core reactions then edge reactions.
    pub fn reactions(&self) -> &[ReactionId] {
        &self.reactions
    }

    pub fn core_species(&self) -> &[SpeciesId] {
        &self.species[..self.core_species]
    }

    pub fn core_reaction_count(&self) -> usize {
        self.core_reactions
    }

    pub fn coefficient(&self, species: SpeciesId, reaction: ReactionId) -> Option<f64> {
        let i = self.species.iter().position(|&s| s == species)?;
        let j = self.reactions.iter().position(|&r| r == reaction)?;
        Some(self.matrix[(i, j)])
    }

    /// Core-species production rates from rates ordered like the columns.
    /// Only the core block contributes.
    pub fn core_production(&self, rates: &[f64]) -> DVector<f64> {
        let (ns, nr) = (self.core_species, self.core_reactions);
        if nr == 0 {
            return DVector::zeros(ns);
        }
        let r = DVector::from_column_slice(&rates[..nr]);
        self.matrix.view((0, 0), (ns, nr)) * r
    }

    /// Production rates of every row species from every column's rate.
    pub fn production(&self, rates: &[f64]) -> DVector<f64> {
        &self.matrix * DVector::from_column_slice(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kf_network::{Catalog, ElementaryReaction, LabeledSpecies, ReactantIndex};

    fn model() -> (CoreEdgeReactionModel, [SpeciesId; 3]) {
        let mut catalog = Catalog::new();
        let a = catalog.add_species(LabeledSpecies::new("A"));
        let b = catalog.add_species(LabeledSpecies::new("B"));
        let c = catalog.add_species(LabeledSpecies::new("C"));
        catalog
            .add_reaction(ElementaryReaction::new(vec![a], vec![b], 2.0))
            .unwrap();
        catalog
            .add_reaction(ElementaryReaction::new(vec![a], vec![c, c], 1.0))
            .unwrap();
        let mut provider = ReactantIndex::from_catalog(&catalog);
        let mut model = CoreEdgeReactionModel::with_catalog(catalog);
        model.initialize(&mut provider, &[a]).unwrap();
        model.enlarge(&mut provider, b).unwrap();
        (model, [a, b, c])
    }

    #[test]
    fn rows_and_columns_follow_core_then_edge() {
        let (model, [a, b, c]) = model();
        let stoich = StoichiometryMatrix::build(&model).unwrap();
        assert_eq!(stoich.species(), &[a, b, c]);
        assert_eq!(stoich.core_species(), &[a, b]);
        assert_eq!(stoich.core_reaction_count(), 1);
        assert_eq!(stoich.matrix().shape(), (3, 2));

        let split = stoich.reactions()[1];
        assert_eq!(stoich.coefficient(a, split), Some(-1.0));
        assert_eq!(stoich.coefficient(c, split), Some(2.0));
        assert_eq!(stoich.coefficient(b, split), Some(0.0));
    }

    #[test]
    fn column_sums_match_net_coefficients() {
        let (model, _) = model();
        let stoich = StoichiometryMatrix::build(&model).unwrap();
        for (j, &reaction) in stoich.reactions().iter().enumerate() {
            let rxn = model.catalog().reaction(reaction).unwrap();
            let expected = rxn.products().len() as f64 - rxn.reactants().len() as f64;
            assert_eq!(stoich.matrix().column(j).sum(), expected);
        }
    }

    #[test]
    fn core_production_ignores_edge_columns() {
        let (model, _) = model();
        let stoich = StoichiometryMatrix::build(&model).unwrap();
        let dn = stoich.core_production(&[3.0, 100.0]);
        assert_eq!(dn.as_slice(), &[-3.0, 3.0]);

        let all = stoich.production(&[3.0, 100.0]);
        assert_eq!(all.as_slice(), &[-103.0, 3.0, 200.0]);
    }
}
