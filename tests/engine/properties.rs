//! Property tests for decomposition invariants
//!
//! Random queries are built from six variable names, of which only a prefix
//! is declared, mixed with quoted occurrences, constants, and opaque
//! equality links.

use std::collections::{BTreeSet, HashMap};

use clausal_engine::{
    ClauseClassifier, DecomposeConfig, Decomposer, Decomposition, SeedChoice,
    components_are_separated,
};
use clausal_foundation::{Handle, Variables, free_variables};
use proptest::prelude::*;

const NAMES: [&str; 6] = ["$a", "$b", "$c", "$d", "$e", "$f"];

fn arb_term() -> impl Strategy<Value = Handle> {
    prop_oneof![
        4 => (0..NAMES.len()).prop_map(|i| Handle::variable(NAMES[i])),
        1 => (0..NAMES.len()).prop_map(|i| Handle::quote(Handle::variable(NAMES[i]))),
        2 => "[k-m]".prop_map(|n| Handle::concept(&n)),
    ]
}

fn arb_clause() -> impl Strategy<Value = Handle> {
    let args = prop::collection::vec(arb_term(), 0..4);
    prop_oneof![
        4 => ("[P-R]", args).prop_map(|(p, args)| Handle::evaluation(Handle::predicate(&p), args)),
        1 => (arb_term(), arb_term()).prop_map(|(l, r)| Handle::equal(l, r)),
    ]
}

fn arb_query() -> impl Strategy<Value = (Variables, Vec<Handle>)> {
    (0..=NAMES.len(), prop::collection::vec(arb_clause(), 0..12)).prop_map(|(declared, clauses)| {
        let vars = Variables::from_handles(NAMES[..declared].iter().map(|n| Handle::variable(n)))
            .unwrap();
        (vars, clauses)
    })
}

fn counts<'a>(clauses: impl Iterator<Item = &'a Handle>) -> HashMap<Handle, usize> {
    let mut counts = HashMap::new();
    for clause in clauses {
        *counts.entry(clause.clone()).or_insert(0) += 1;
    }
    counts
}

fn grouping(result: &Decomposition) -> BTreeSet<Vec<String>> {
    result
        .components()
        .iter()
        .map(|c| {
            let mut clauses: Vec<String> = c.clauses().iter().map(ToString::to_string).collect();
            clauses.sort();
            clauses
        })
        .collect()
}

proptest! {
    #[test]
    fn classification_splits_input_in_order((vars, clauses) in arb_query()) {
        let classifier = ClauseClassifier::new(&vars);
        let result = classifier.classify(&clauses);

        let expected_constants: Vec<_> =
            clauses.iter().filter(|c| classifier.is_constant(c)).cloned().collect();
        let expected_remaining: Vec<_> =
            clauses.iter().filter(|c| !classifier.is_constant(c)).cloned().collect();

        prop_assert_eq!(&result.constants, &expected_constants);
        prop_assert_eq!(&result.remaining, &expected_remaining);
        prop_assert_eq!(result.modified, !expected_constants.is_empty());
    }

    #[test]
    fn every_clause_lands_exactly_once((vars, clauses) in arb_query()) {
        let result = Decomposer::default().decompose(&vars, &clauses).unwrap();

        let placed = result
            .constants()
            .iter()
            .chain(result.components().iter().flat_map(|c| c.clauses().iter()));
        prop_assert_eq!(counts(placed), counts(clauses.iter()));
        prop_assert_eq!(result.clause_count(), clauses.len());
    }

    #[test]
    fn components_are_ordered_and_separated((vars, clauses) in arb_query()) {
        let result = Decomposer::default().decompose(&vars, &clauses).unwrap();

        prop_assert!(components_are_separated(result.components()));
        for component in result.components() {
            prop_assert!(!component.is_empty());
            prop_assert!(component.is_connectivity_ordered(&vars));
        }
    }

    #[test]
    fn clauses_sharing_a_variable_share_a_component((vars, clauses) in arb_query()) {
        let result = Decomposer::default().decompose(&vars, &clauses).unwrap();
        let retained: Vec<_> = result
            .components()
            .iter()
            .flat_map(|c| c.clauses().iter().cloned())
            .collect();

        for (i, a) in retained.iter().enumerate() {
            let a_free = free_variables(a, &vars);
            for b in &retained[i + 1..] {
                if a_free.intersects(&free_variables(b, &vars)) {
                    prop_assert_eq!(result.component_of(a), result.component_of(b));
                }
            }
        }
    }

    #[test]
    fn seed_choice_only_changes_order((vars, clauses) in arb_query()) {
        let last = Decomposer::new(DecomposeConfig::new().with_seed(SeedChoice::Last))
            .decompose(&vars, &clauses)
            .unwrap();
        let first = Decomposer::new(DecomposeConfig::new().with_seed(SeedChoice::First))
            .decompose(&vars, &clauses)
            .unwrap();

        prop_assert_eq!(last.constants(), first.constants());
        prop_assert_eq!(grouping(&last), grouping(&first));
    }
}
