//! Integration tests for declared variables and variable sets

use clausal_foundation::{ErrorKind, Handle, VarSet, Variables, free_variables};

#[test]
fn declaration_order_is_index_order() {
    let vars = Variables::from_handles(["$c", "$a", "$b"].map(Handle::variable)).unwrap();
    let names: Vec<_> = vars.iter().filter_map(Handle::name).collect();
    assert_eq!(names, ["$c", "$a", "$b"]);

    let b = vars.index_of(&Handle::variable("$b")).unwrap();
    assert_eq!(b.index(), 2);
    assert_eq!(vars.get(b), Some(&Handle::variable("$b")));
}

#[test]
fn redeclaring_is_idempotent() {
    let mut vars = Variables::new();
    let first = vars.declare(Handle::variable("$x")).unwrap();
    let again = vars.declare(Handle::variable("$x")).unwrap();
    assert_eq!(first, again);
    assert_eq!(vars.len(), 1);
}

#[test]
fn only_variables_can_be_declared() {
    let err = Variables::from_handles([Handle::concept("x")]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotAVariable(_)));
}

#[test]
fn free_variable_sets_union_and_intersect() {
    let vars = Variables::from_handles(["$x", "$y", "$z"].map(Handle::variable)).unwrap();
    let xy = free_variables(
        &Handle::list(vec![Handle::variable("$x"), Handle::variable("$y")]),
        &vars,
    );
    let z = free_variables(&Handle::list(vec![Handle::variable("$z")]), &vars);

    assert!(xy.is_disjoint(&z));

    let mut all = VarSet::new();
    all.union_with(&xy);
    all.union_with(&z);
    assert_eq!(all, vars.all());
    assert!(xy.is_subset(&all));
    assert!(all.intersects(&z));
}

#[test]
fn resolve_lists_handles_in_declaration_order() {
    let vars = Variables::from_handles(["$x", "$y", "$z"].map(Handle::variable)).unwrap();
    let set: VarSet = [Handle::variable("$z"), Handle::variable("$x")]
        .iter()
        .filter_map(|h| vars.index_of(h))
        .collect();
    let names: Vec<_> = vars.resolve(&set).filter_map(Handle::name).collect();
    assert_eq!(names, ["$x", "$z"]);
}
