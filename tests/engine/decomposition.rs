//! Integration tests for the full decomposition pipeline
//!
//! Includes the reference examples: a two-component query, an undeclared
//! variable, and opaque equality clauses.

use std::collections::BTreeSet;

use clausal_engine::{DecomposeConfig, Decomposer, Decomposition, SeedChoice};
use clausal_foundation::{AtomTable, Handle, Variables, parse_atoms};

fn setup(names: &[&str], source: &str) -> (Variables, Vec<Handle>) {
    let mut table = AtomTable::new();
    let vars = Variables::from_handles(names.iter().map(|n| table.variable(n))).unwrap();
    let clauses = parse_atoms(&mut table, source).unwrap();
    (vars, clauses)
}

/// Components as (clause set, variable names), independent of order.
fn grouping(vars: &Variables, result: &Decomposition) -> BTreeSet<(BTreeSet<String>, Vec<String>)> {
    result
        .components()
        .iter()
        .map(|c| {
            let clauses = c.clauses().iter().map(ToString::to_string).collect();
            let names = vars
                .resolve(c.variables())
                .filter_map(|h| h.name().map(str::to_string))
                .collect();
            (clauses, names)
        })
        .collect()
}

const ABC: &str = r"
    (Evaluation (Predicate A) (List (Variable $x)))
    (Evaluation (Predicate B) (List (Variable $x) (Variable $y)))
    (Evaluation (Predicate C) (List (Variable $z)))
";

// =============================================================================
// Reference Examples
// =============================================================================

#[test]
fn two_components_with_first_seed() {
    let (vars, clauses) = setup(&["$x", "$y", "$z"], ABC);
    let result = Decomposer::new(DecomposeConfig::new().with_seed(SeedChoice::First))
        .decompose(&vars, &clauses)
        .unwrap();

    let components = result.components();
    assert_eq!(components.len(), 2);
    assert_eq!(
        components[0].clauses().iter().cloned().collect::<Vec<_>>(),
        [clauses[0].clone(), clauses[1].clone()]
    );
    assert_eq!(
        components[1].clauses().iter().cloned().collect::<Vec<_>>(),
        [clauses[2].clone()]
    );
    assert!(result.constants().is_empty());
    assert!(!result.modified());
}

#[test]
fn two_components_with_default_seed() {
    let (vars, clauses) = setup(&["$x", "$y", "$z"], ABC);
    let result = Decomposer::default().decompose(&vars, &clauses).unwrap();

    // The default seed starts from the last unmatched clause.
    let components = result.components();
    assert_eq!(
        components[0].clauses().iter().cloned().collect::<Vec<_>>(),
        [clauses[2].clone()]
    );
    assert_eq!(
        components[1].clauses().iter().cloned().collect::<Vec<_>>(),
        [clauses[1].clone(), clauses[0].clone()]
    );

    let first = Decomposer::new(DecomposeConfig::new().with_seed(SeedChoice::First))
        .decompose(&vars, &clauses)
        .unwrap();
    assert_eq!(grouping(&vars, &result), grouping(&vars, &first));
}

#[test]
fn undeclared_variable_clause_is_constant() {
    let (vars, clauses) = setup(&[], "(Evaluation (Predicate P) (List (Variable $k)))");
    let result = Decomposer::default().decompose(&vars, &clauses).unwrap();

    assert_eq!(result.constants(), clauses.as_slice());
    assert!(result.components().is_empty());
    assert!(result.modified());
    assert!(!result.is_connected());
}

#[test]
fn equality_clauses_survive_with_or_without_variables() {
    let (vars, clauses) = setup(
        &["$x"],
        "(Equal (Variable $x) (Number 5)) (Equal (Number 1) (Number 2))",
    );
    let result = Decomposer::default().decompose(&vars, &clauses).unwrap();

    assert!(result.constants().is_empty());
    assert!(!result.modified());
    assert_eq!(result.components().len(), 2);
    let free: Vec<usize> = result.variable_free_components().collect();
    assert_eq!(free, [result.component_of(&clauses[1]).unwrap()]);
}

// =============================================================================
// Pipeline Behavior
// =============================================================================

#[test]
fn every_clause_lands_exactly_once() {
    let (vars, clauses) = setup(
        &["$x", "$y"],
        r"
        (Concept lonely)
        (List (Variable $x))
        (Identical (Concept a) (Concept b))
        (List (Variable $y) (Quote (Variable $x)))
        (List (Variable $x) (Variable $y))
        ",
    );
    let result = Decomposer::default().decompose(&vars, &clauses).unwrap();
    assert_eq!(result.clause_count(), clauses.len());

    for clause in &clauses {
        let in_constants = result.constants().iter().filter(|c| *c == clause).count();
        let in_components: usize = result
            .components()
            .iter()
            .map(|c| c.clauses().iter().filter(|k| *k == clause).count())
            .sum();
        assert_eq!(in_constants + in_components, 1, "{clause}");
    }
}

#[test]
fn into_parts_returns_owned_results() {
    let (vars, clauses) = setup(&["$x", "$y", "$z"], ABC);
    let (constants, components) = Decomposer::default()
        .decompose(&vars, &clauses)
        .unwrap()
        .into_parts();
    assert!(constants.is_empty());

    let (list, set) = components[1].clone().into_parts();
    assert_eq!(list.len(), 2);
    assert_eq!(set.len(), 2);
}

#[test]
fn decomposer_exposes_its_config() {
    let decomposer = Decomposer::new(DecomposeConfig::keep_constants().with_max_clauses(10));
    assert!(!decomposer.config().strip_constants);
    assert_eq!(decomposer.config().max_clauses, Some(10));
    assert_eq!(decomposer.config().seed, SeedChoice::Last);
}
