//! Core/edge reaction model: rate-based network growth and flux screening.
//!
//! The `core` holds the species and reactions that are integrated; the `edge`
//! holds candidates discovered next to the core. Species move edge -> core
//! through [`CoreEdgeReactionModel::enlarge`]; reactions follow their species.

use indexmap::IndexMap;
use kf_core::{ReactionId, SpeciesId, ensure_finite, ordered_sum};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{NetworkError, NetworkResult};
use crate::model::ReactionModel;
use crate::provider::RateProvider;
use crate::reaction::{Concentrations, participants};
use crate::validate;

/// Screening and integration tolerances carried by the model.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreeningTolerances {
    /// Scale applied to the RMS core rate to get the characteristic flux.
    pub flux: f64,
    /// Absolute tolerance handed to the integrator.
    pub absolute: f64,
    /// Relative tolerance handed to the integrator.
    pub relative: f64,
}

impl Default for ScreeningTolerances {
    fn default() -> Self {
        Self {
            flux: 1.0,
            absolute: 1e-8,
            relative: 1e-4,
        }
    }
}

impl ScreeningTolerances {
    /// Integration tolerances as the shared `kf_core` pair.
    pub fn integration(&self) -> kf_core::Tolerances {
        kf_core::Tolerances {
            abs: self.absolute,
            rel: self.relative,
        }
    }
}

/// Result of one flux screening pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidityReport {
    /// `flux tolerance * sqrt(sum of squared core rates)`.
    pub characteristic_flux: f64,
    /// Edge species with the largest signed net flux, if any edge species
    /// received flux at all.
    pub max_edge_flux: Option<(SpeciesId, f64)>,
}

impl ValidityReport {
    /// Valid unless the largest edge flux strictly exceeds the characteristic flux.
    pub fn is_valid(&self) -> bool {
        match self.max_edge_flux {
            Some((_, flux)) => flux <= self.characteristic_flux,
            None => true,
        }
    }

    /// The species to promote when the model is invalid.
    pub fn failing_species(&self) -> Option<SpeciesId> {
        match self.max_edge_flux {
            Some((species, flux)) if flux > self.characteristic_flux => Some(species),
            _ => None,
        }
    }
}

/// Reaction model built by rate-based screening.
///
/// Invariants after every public mutation:
/// - no species or reaction is in both core and edge
/// - a reaction is core iff all its reactants and products are core species
/// - every species referenced by a core or edge reaction is in core or edge
#[derive(Debug, Clone, Default)]
pub struct CoreEdgeReactionModel {
    catalog: Catalog,
    core: ReactionModel,
    edge: ReactionModel,
    tolerances: ScreeningTolerances,
}

impl CoreEdgeReactionModel {
    /// Empty model with an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty model over an existing catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutable catalog access, for registering seed species.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn core(&self) -> &ReactionModel {
        &self.core
    }

    pub fn edge(&self) -> &ReactionModel {
        &self.edge
    }

    pub fn tolerances(&self) -> &ScreeningTolerances {
        &self.tolerances
    }

    pub fn set_tolerances(&mut self, tolerances: ScreeningTolerances) {
        self.tolerances = tolerances;
    }

    pub fn is_in_core(&self, species: SpeciesId) -> bool {
        self.core.contains_species(species)
    }

    pub fn is_in_edge(&self, species: SpeciesId) -> bool {
        self.edge.contains_species(species)
    }

    /// Seed the core with `seeds`, processed in the given order.
    ///
    /// Each reactive seed is queried alone and paired with every species
    /// already in the core. Discovered reactions enter the edge; any of them
    /// completed by the seeds are then promoted by the usual core cascade.
    pub fn initialize<P>(&mut self, provider: &mut P, seeds: &[SpeciesId]) -> NetworkResult<()>
    where
        P: RateProvider + ?Sized,
    {
        for &seed in seeds {
            let reactive = self.catalog.species(seed)?.is_reactive();

            let mut discovered = Vec::new();
            if reactive {
                discovered.extend(provider.reactions(&mut self.catalog, &[seed])?);
                let partners: Vec<SpeciesId> = self.core.species().iter().copied().collect();
                for partner in partners {
                    discovered.extend(provider.reactions(&mut self.catalog, &[seed, partner])?);
                }
            }

            self.add_species_to_core(seed)?;

            for reaction in discovered {
                if self.core.contains_reaction(reaction) || self.edge.contains_reaction(reaction) {
                    continue;
                }
                self.admit_participants(reaction)?;
                self.add_reaction_to_edge(reaction)?;
            }
            self.promote_completed_edge_reactions()?;
        }

        info!(
            core_species = self.core.species_count(),
            core_reactions = self.core.reaction_count(),
            edge_species = self.edge.species_count(),
            edge_reactions = self.edge.reaction_count(),
            "core-edge reaction model initialized"
        );
        Ok(())
    }

    /// Move `new_species` (edge or brand new) into the core and pull in the
    /// reactions it opens up.
    ///
    /// Enlarging a species that is already core is a caller error.
    pub fn enlarge<P>(&mut self, provider: &mut P, new_species: SpeciesId) -> NetworkResult<()>
    where
        P: RateProvider + ?Sized,
    {
        debug_assert!(
            !self.core.contains_species(new_species),
            "enlarging {new_species:?}, which is already in the core"
        );
        self.catalog.species(new_species)?;

        let mut discovered = provider.reactions(&mut self.catalog, &[new_species])?;
        let partners: Vec<SpeciesId> = self.core.species().iter().copied().collect();
        for partner in partners {
            if self.catalog.species(partner)?.is_reactive() {
                discovered.extend(provider.reactions(&mut self.catalog, &[new_species, partner])?);
            }
        }

        self.add_species_to_core(new_species)?;

        for reaction in discovered {
            self.admit_participants(reaction)?;
            if self.core.contains_reaction(reaction) {
                continue;
            }
            if self.all_in_core(reaction)? {
                self.add_reaction_to_core(reaction)?;
            } else if !self.edge.contains_reaction(reaction) {
                self.add_reaction_to_edge(reaction)?;
            }
        }

        info!(
            species = self.catalog.label(new_species),
            core_species = self.core.species_count(),
            core_reactions = self.core.reaction_count(),
            edge_species = self.edge.species_count(),
            edge_reactions = self.edge.reaction_count(),
            "reaction model enlarged"
        );
        Ok(())
    }

    /// Append `species` to the core, removing it from the edge if needed and
    /// promoting every edge reaction it completes.
    pub fn add_species_to_core(&mut self, species: SpeciesId) -> NetworkResult<()> {
        self.catalog.species(species)?;
        self.core.add_species(species);
        if self.edge.remove_species(species) {
            self.promote_completed_edge_reactions()?;
        }
        Ok(())
    }

    /// Append `species` to the edge. Cannot complete any reaction.
    pub fn add_species_to_edge(&mut self, species: SpeciesId) -> NetworkResult<()> {
        self.catalog.species(species)?;
        debug_assert!(
            !self.core.contains_species(species),
            "{species:?} is already in the core"
        );
        self.edge.add_species(species);
        Ok(())
    }

    /// Append `reaction` to the core, expunging it from the edge.
    ///
    /// The caller guarantees every participant is already a core species.
    pub fn add_reaction_to_core(&mut self, reaction: ReactionId) -> NetworkResult<()> {
        let complete = self.all_in_core(reaction)?;
        debug_assert!(complete, "{reaction:?} has participants outside the core");
        self.core.add_reaction(reaction);
        self.edge.remove_reaction(reaction);
        Ok(())
    }

    /// Append `reaction` to the edge.
    ///
    /// The caller guarantees the reaction is not complete in the core and
    /// that its participants are in core or edge.
    pub fn add_reaction_to_edge(&mut self, reaction: ReactionId) -> NetworkResult<()> {
        self.catalog.reaction(reaction)?;
        debug_assert!(
            !self.core.contains_reaction(reaction),
            "{reaction:?} is already in the core"
        );
        self.edge.add_reaction(reaction);
        Ok(())
    }

    /// Flux screening. Returns `(true, None)` when the model is valid and
    /// `(false, Some(species))` naming the edge species to promote otherwise.
    pub fn is_valid(
        &self,
        t: f64,
        p: f64,
        conc: &Concentrations,
    ) -> NetworkResult<(bool, Option<SpeciesId>)> {
        let report = self.screen(t, p, conc)?;
        Ok((report.is_valid(), report.failing_species()))
    }

    /// Flux screening with diagnostics.
    ///
    /// The characteristic flux is the scaled RMS of core rates. Edge species
    /// accumulate signed net flux (products add the rate, reactants subtract
    /// it) from every core and edge reaction that touches them; edge species
    /// no reaction touches get no entry. Only the largest *signed* flux is
    /// compared, so net consumption never triggers enlargement.
    pub fn screen(&self, t: f64, p: f64, conc: &Concentrations) -> NetworkResult<ValidityReport> {
        let core_reactions: Vec<ReactionId> = self.core.reactions().iter().copied().collect();
        let edge_reactions: Vec<ReactionId> = self.edge.reactions().iter().copied().collect();
        let core_rates = self.rates_for(&core_reactions, t, p, conc)?;
        let edge_rates = self.rates_for(&edge_reactions, t, p, conc)?;

        let characteristic_flux =
            self.tolerances.flux * ordered_sum(core_rates.iter().map(|r| r * r)).sqrt();

        let mut species_flux: IndexMap<SpeciesId, f64> = IndexMap::new();
        let reactions = core_reactions.iter().chain(&edge_reactions);
        let rates = core_rates.iter().chain(&edge_rates);
        for (&reaction, &rate) in reactions.zip(rates) {
            let rxn = self.catalog.reaction(reaction)?;
            for &reactant in rxn.reactants() {
                if self.edge.contains_species(reactant) {
                    *species_flux.entry(reactant).or_insert(0.0) -= rate;
                }
            }
            for &product in rxn.products() {
                if self.edge.contains_species(product) {
                    *species_flux.entry(product).or_insert(0.0) += rate;
                }
            }
        }

        let mut max_edge_flux: Option<(SpeciesId, f64)> = None;
        for (&species, &flux) in &species_flux {
            if max_edge_flux.is_none_or(|(_, best)| flux > best) {
                max_edge_flux = Some((species, flux));
            }
        }

        Ok(ValidityReport {
            characteristic_flux,
            max_edge_flux,
        })
    }

    /// All species (core then edge) and all reactions (core then edge).
    pub fn get_lists(&self) -> (Vec<SpeciesId>, Vec<ReactionId>) {
        let species = self
            .core
            .species()
            .iter()
            .chain(self.edge.species())
            .copied()
            .collect();
        let reactions = self
            .core
            .reactions()
            .iter()
            .chain(self.edge.reactions())
            .copied()
            .collect();
        (species, reactions)
    }

    /// Rates of every core reaction followed by every edge reaction.
    pub fn reaction_rates(&self, t: f64, p: f64, conc: &Concentrations) -> NetworkResult<Vec<f64>> {
        let (_, reactions) = self.get_lists();
        self.rates_for(&reactions, t, p, conc)
    }

    /// Check the partition invariants.
    pub fn check_invariants(&self) -> NetworkResult<()> {
        validate::validate_partition(&self.catalog, &self.core, &self.edge)
    }

    /// Rates in slice order; evaluation may run in parallel.
    fn rates_for(
        &self,
        reactions: &[ReactionId],
        t: f64,
        p: f64,
        conc: &Concentrations,
    ) -> NetworkResult<Vec<f64>> {
        reactions
            .par_iter()
            .map(|&reaction| {
                let rate = self.catalog.reaction(reaction)?.rate(t, p, conc);
                ensure_finite(rate, "reaction rate")
                    .map_err(|_| NetworkError::NonFiniteRate {
                        reaction,
                        value: rate,
                    })
            })
            .collect()
    }

    /// Put every participant of `reaction` that is in neither set into the edge.
    fn admit_participants(&mut self, reaction: ReactionId) -> NetworkResult<()> {
        let newcomers: Vec<SpeciesId> = participants(self.catalog.reaction(reaction)?)
            .filter(|&s| !self.core.contains_species(s) && !self.edge.contains_species(s))
            .collect();
        for species in newcomers {
            self.add_species_to_edge(species)?;
        }
        Ok(())
    }

    fn all_in_core(&self, reaction: ReactionId) -> NetworkResult<bool> {
        let rxn = self.catalog.reaction(reaction)?;
        Ok(participants(rxn).all(|s| self.core.contains_species(s)))
    }

    /// One pass suffices: completion depends only on species membership.
    fn promote_completed_edge_reactions(&mut self) -> NetworkResult<()> {
        let mut completed = Vec::new();
        for &reaction in self.edge.reactions() {
            if self.all_in_core(reaction)? {
                completed.push(reaction);
            }
        }
        if !completed.is_empty() {
            debug!(count = completed.len(), "promoting edge reactions to core");
        }
        for reaction in completed {
            self.add_reaction_to_core(reaction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ReactantIndex;
    use crate::reaction::ElementaryReaction;
    use crate::species::LabeledSpecies;
    use approx::assert_relative_eq;

    fn species(catalog: &mut Catalog, labels: &[&str]) -> Vec<SpeciesId> {
        labels
            .iter()
            .map(|l| catalog.add_species(LabeledSpecies::new(*l)))
            .collect()
    }

    #[test]
    fn default_tolerances() {
        let tol = ScreeningTolerances::default();
        assert_eq!(tol.flux, 1.0);
        assert_eq!(tol.absolute, 1e-8);
        assert_eq!(tol.relative, 1e-4);
        assert_eq!(tol.integration().rel, 1e-4);
    }

    #[test]
    fn species_promotion_cascades_reactions() {
        let mut catalog = Catalog::new();
        let s = species(&mut catalog, &["A", "B", "C"]);
        let r_ab = catalog
            .add_reaction(ElementaryReaction::new(vec![s[0]], vec![s[1]], 1.0))
            .unwrap();
        let r_ac = catalog
            .add_reaction(ElementaryReaction::new(vec![s[0]], vec![s[2]], 1.0))
            .unwrap();

        let mut model = CoreEdgeReactionModel::with_catalog(catalog);
        model.add_species_to_core(s[0]).unwrap();
        model.add_species_to_edge(s[1]).unwrap();
        model.add_species_to_edge(s[2]).unwrap();
        model.add_reaction_to_edge(r_ab).unwrap();
        model.add_reaction_to_edge(r_ac).unwrap();
        model.check_invariants().unwrap();

        model.add_species_to_core(s[1]).unwrap();
        assert!(model.core().contains_reaction(r_ab));
        assert!(!model.edge().contains_reaction(r_ab));
        assert!(model.edge().contains_reaction(r_ac));
        assert!(!model.is_in_edge(s[1]));
        model.check_invariants().unwrap();
    }

    #[test]
    fn get_lists_orders_core_before_edge() {
        let mut catalog = Catalog::new();
        let s = species(&mut catalog, &["A", "B"]);
        let r = catalog
            .add_reaction(ElementaryReaction::new(vec![s[0]], vec![s[1]], 2.0))
            .unwrap();
        let mut provider = ReactantIndex::from_catalog(&catalog);
        let mut model = CoreEdgeReactionModel::with_catalog(catalog);
        model.initialize(&mut provider, &[s[0]]).unwrap();

        let (all_species, all_reactions) = model.get_lists();
        assert_eq!(all_species, vec![s[0], s[1]]);
        assert_eq!(all_reactions, vec![r]);

        let conc = Concentrations::from_pairs([(s[0], 3.0)]);
        let rates = model.reaction_rates(1000.0, 1e5, &conc).unwrap();
        assert_relative_eq!(rates[0], 6.0);
    }

    #[test]
    fn non_finite_rate_is_reported() {
        let mut catalog = Catalog::new();
        let s = species(&mut catalog, &["A", "B"]);
        let r = catalog
            .add_reaction(ElementaryReaction::new(vec![s[0]], vec![s[1]], f64::NAN))
            .unwrap();
        let mut provider = ReactantIndex::from_catalog(&catalog);
        let mut model = CoreEdgeReactionModel::with_catalog(catalog);
        model.initialize(&mut provider, &[s[0]]).unwrap();

        let conc = Concentrations::from_pairs([(s[0], 1.0)]);
        let err = model.screen(300.0, 1e5, &conc).unwrap_err();
        assert!(matches!(err, NetworkError::NonFiniteRate { reaction, .. } if reaction == r));
    }

    #[test]
    fn empty_model_is_trivially_valid() {
        let model = CoreEdgeReactionModel::new();
        let (valid, species) = model.is_valid(300.0, 1e5, &Concentrations::new()).unwrap();
        assert!(valid);
        assert_eq!(species, None);
    }
}
