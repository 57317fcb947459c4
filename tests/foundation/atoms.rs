//! Integration tests for atoms and structure queries

use clausal_foundation::{
    Atom, AtomTable, AtomType, ErrorKind, Handle, Variables, any_unquoted_in_tree,
    contains_atomtype, contains_opaque, first_opaque, free_variables,
};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn structural_equality_ignores_allocation() {
    let a = Handle::evaluation(Handle::predicate("P"), vec![Handle::variable("$x")]);
    let b = Handle::evaluation(Handle::predicate("P"), vec![Handle::variable("$x")]);
    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));
}

#[test]
fn evaluation_wraps_arguments_in_a_list() {
    let clause = Handle::evaluation(
        Handle::predicate("likes"),
        vec![Handle::variable("$x"), Handle::concept("pizza")],
    );
    assert_eq!(clause.atom_type(), AtomType::Evaluation);
    assert_eq!(clause.children().len(), 2);
    assert_eq!(clause.children()[1].atom_type(), AtomType::List);
    assert_eq!(clause.children()[1].children().len(), 2);
}

#[test]
fn quote_exposes_its_single_child() {
    let q = Handle::quote(Handle::variable("$x"));
    assert!(matches!(q.atom(), Atom::Quote(_)));
    assert_eq!(q.children(), [Handle::variable("$x")]);
}

#[test]
fn node_and_link_constructors_check_category() {
    assert!(matches!(
        Handle::node(AtomType::And, "x").unwrap_err().kind,
        ErrorKind::NotANode(AtomType::And)
    ));
    assert!(matches!(
        Handle::link(AtomType::Concept, vec![]).unwrap_err().kind,
        ErrorKind::NotALink(AtomType::Concept)
    ));
}

#[test]
fn type_names_round_trip() {
    for ty in AtomType::ALL {
        assert_eq!(AtomType::from_name(ty.name()), Some(ty));
    }
    assert_eq!(AtomType::from_name("Equal"), Some(AtomType::Equal));
    assert_eq!(AtomType::from_name("Bogus"), None);
}

#[test]
fn opaque_set_is_exactly_the_runtime_markers() {
    let opaque: Vec<_> = AtomType::ALL.into_iter().filter(|t| t.is_opaque()).collect();
    assert_eq!(opaque.len(), AtomType::OPAQUE.len());
    for ty in [
        AtomType::DefinedPredicate,
        AtomType::DefinedSchema,
        AtomType::GroundedPredicate,
        AtomType::GroundedSchema,
        AtomType::Identical,
        AtomType::Equal,
    ] {
        assert!(ty.is_opaque(), "{ty} should be opaque");
    }
    assert!(!AtomType::Evaluation.is_opaque());
    assert!(!AtomType::Quote.is_opaque());
}

// =============================================================================
// Structure Queries
// =============================================================================

#[test]
fn deep_unquoted_variable_is_found() {
    let x = Handle::variable("$x");
    let vars = Variables::from_handles([x.clone()]).unwrap();
    let clause = Handle::and(vec![Handle::list(vec![Handle::list(vec![x])])]);
    assert!(any_unquoted_in_tree(&clause, &vars, &vars.all()));
}

#[test]
fn nested_quote_hides_every_variable_below_it() {
    let x = Handle::variable("$x");
    let y = Handle::variable("$y");
    let vars = Variables::from_handles([x.clone(), y.clone()]).unwrap();
    let clause = Handle::list(vec![Handle::quote(Handle::list(vec![
        x,
        Handle::quote(y),
    ]))]);
    assert!(!any_unquoted_in_tree(&clause, &vars, &vars.all()));
    assert!(free_variables(&clause, &vars).is_empty());
}

#[test]
fn opacity_is_found_anywhere_in_the_tree() {
    let grounded = Handle::node(AtomType::GroundedSchema, "scm:run").unwrap();
    let clause = Handle::list(vec![
        Handle::concept("a"),
        Handle::list(vec![Handle::identical(grounded, Handle::concept("b"))]),
    ]);
    assert!(contains_opaque(&clause));
    assert!(contains_atomtype(&clause, AtomType::GroundedSchema));
    assert_eq!(first_opaque(&clause), Some(AtomType::Identical));
}

#[test]
fn interned_clauses_share_variables() {
    let mut table = AtomTable::new();
    let x = table.variable("$x");
    let a = table
        .link(AtomType::List, vec![x.clone(), Handle::concept("a")])
        .unwrap();
    let b = table
        .link(AtomType::List, vec![Handle::variable("$x")])
        .unwrap();
    assert!(a.children()[0].ptr_eq(&b.children()[0]));
    assert!(b.children()[0].ptr_eq(&x));
}
