//! Property tests: partition invariants over random reaction graphs.

use kf_core::{ReactionId, SpeciesId};
use kf_network::{
    Catalog, Concentrations, CoreEdgeReactionModel, ElementaryReaction, LabeledSpecies,
    ReactantIndex,
};
use proptest::prelude::*;

const N_SPECIES: usize = 8;

/// (reactant, optional second reactant, product, optional second product, k)
type RxnShape = (usize, Option<usize>, usize, Option<usize>, f64);

fn rxn_strategy() -> impl Strategy<Value = RxnShape> {
    (
        0..N_SPECIES,
        prop::option::of(0..N_SPECIES),
        0..N_SPECIES,
        prop::option::of(0..N_SPECIES),
        0.1_f64..10.0,
    )
}

fn build(reactive: &[bool], rxns: &[RxnShape]) -> (Catalog, Vec<SpeciesId>) {
    let mut catalog = Catalog::new();
    let ids: Vec<SpeciesId> = reactive
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            let label = format!("S{i}");
            if r {
                catalog.add_species(LabeledSpecies::new(label))
            } else {
                catalog.add_species(LabeledSpecies::inert(label))
            }
        })
        .collect();
    for &(r1, r2, p1, p2, k) in rxns {
        let reactants: Vec<_> = std::iter::once(r1).chain(r2).map(|i| ids[i]).collect();
        let products: Vec<_> = std::iter::once(p1).chain(p2).map(|i| ids[i]).collect();
        catalog
            .add_reaction(ElementaryReaction::new(reactants, products, k))
            .unwrap();
    }
    (catalog, ids)
}

proptest! {
    #[test]
    fn invariants_hold_through_growth(
        reactive in prop::collection::vec(prop::bool::weighted(0.8), N_SPECIES),
        rxns in prop::collection::vec(rxn_strategy(), 0..20),
        seeds in prop::collection::btree_set(0..N_SPECIES, 1..4),
        picks in prop::collection::vec(0usize..100, 0..6),
    ) {
        let (catalog, ids) = build(&reactive, &rxns);
        let mut provider = ReactantIndex::from_catalog(&catalog);
        let mut model = CoreEdgeReactionModel::with_catalog(catalog);

        let seeds: Vec<SpeciesId> = seeds.into_iter().map(|i| ids[i]).collect();
        model.initialize(&mut provider, &seeds).unwrap();
        prop_assert!(model.check_invariants().is_ok(), "{:?}", model.check_invariants());
        prop_assert_eq!(model.core().species_count(), seeds.len());

        for pick in picks {
            let edge: Vec<SpeciesId> = model.edge().species().iter().copied().collect();
            if edge.is_empty() {
                break;
            }
            let before_core = model.core().species_count();
            let before_total = before_core + model.edge().species_count();

            model.enlarge(&mut provider, edge[pick % edge.len()]).unwrap();

            prop_assert!(model.check_invariants().is_ok(), "{:?}", model.check_invariants());
            prop_assert!(model.core().species_count() > before_core);
            prop_assert!(model.core().species_count() + model.edge().species_count() >= before_total);

            // Every edge reaction completed by the core has been promoted.
            for &rxn in model.edge().reactions() {
                let r = model.catalog().reaction(rxn).unwrap();
                let complete = r
                    .reactants()
                    .iter()
                    .chain(r.products())
                    .all(|&s| model.is_in_core(s));
                prop_assert!(!complete);
            }
        }
    }

    #[test]
    fn invariants_hold_through_direct_additions(
        rxns in prop::collection::vec(rxn_strategy(), 1..16),
        ops in prop::collection::vec((0u8..4, 0usize..100), 1..40),
    ) {
        let (catalog, ids) = build(&[true; N_SPECIES], &rxns);
        let reactions: Vec<ReactionId> = catalog.reaction_ids().collect();
        let mut model = CoreEdgeReactionModel::with_catalog(catalog);

        for (op, pick) in ops {
            match op {
                0 => {
                    let s = ids[pick % ids.len()];
                    if !model.is_in_core(s) {
                        model.add_species_to_core(s).unwrap();
                        prop_assert!(model.is_in_core(s));
                        prop_assert!(!model.is_in_edge(s));
                    }
                }
                1 => {
                    let s = ids[pick % ids.len()];
                    if !model.is_in_core(s) && !model.is_in_edge(s) {
                        model.add_species_to_edge(s).unwrap();
                        prop_assert!(model.is_in_edge(s));
                    }
                }
                2 => {
                    let r = reactions[pick % reactions.len()];
                    let rxn = model.catalog().reaction(r).unwrap();
                    let complete = rxn
                        .reactants()
                        .iter()
                        .chain(rxn.products())
                        .all(|&s| model.is_in_core(s));
                    if complete && !model.core().contains_reaction(r) {
                        model.add_reaction_to_core(r).unwrap();
                        prop_assert!(model.core().contains_reaction(r));
                        prop_assert!(!model.edge().contains_reaction(r));
                    }
                }
                _ => {
                    let r = reactions[pick % reactions.len()];
                    let rxn = model.catalog().reaction(r).unwrap();
                    let participants: Vec<SpeciesId> = rxn
                        .reactants()
                        .iter()
                        .chain(rxn.products())
                        .copied()
                        .collect();
                    let complete = participants.iter().all(|&s| model.is_in_core(s));
                    let known = model.core().contains_reaction(r)
                        || model.edge().contains_reaction(r);
                    if !complete && !known {
                        for s in participants {
                            if !model.is_in_core(s) && !model.is_in_edge(s) {
                                model.add_species_to_edge(s).unwrap();
                            }
                        }
                        model.add_reaction_to_edge(r).unwrap();
                        prop_assert!(model.edge().contains_reaction(r));
                    }
                }
            }
            prop_assert!(model.check_invariants().is_ok(), "{:?}", model.check_invariants());
        }
    }

    #[test]
    fn screening_is_pure(
        rxns in prop::collection::vec(rxn_strategy(), 1..12),
        conc in prop::collection::vec(0.0_f64..5.0, N_SPECIES),
        t in 300.0_f64..2000.0,
    ) {
        let (catalog, ids) = build(&[true; N_SPECIES], &rxns);
        let mut provider = ReactantIndex::from_catalog(&catalog);
        let mut model = CoreEdgeReactionModel::with_catalog(catalog);
        model.initialize(&mut provider, &ids[..2]).unwrap();

        let conc = Concentrations::from_pairs(ids.iter().copied().zip(conc));
        let first = model.is_valid(t, 1e5, &conc).unwrap();
        let second = model.is_valid(t, 1e5, &conc).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!(model.check_invariants().is_ok());
    }
}
