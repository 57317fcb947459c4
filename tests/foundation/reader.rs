//! Integration tests for the atom reader and printer

use clausal_foundation::{
    AtomTable, AtomType, ErrorKind, Handle, PrettyConfig, parse_atom, parse_atoms, print_all,
};

// =============================================================================
// Reading
// =============================================================================

#[test]
fn reads_a_query_body() {
    let mut table = AtomTable::new();
    let source = r#"
        ; who likes what
        (Evaluation (Predicate likes) (List (Variable $x) (Variable $y)))
        (Inheritance (Variable $y) (Concept food))
        (Equal (Number 1) (Number 2))
    "#;
    let clauses = parse_atoms(&mut table, source).unwrap();

    assert_eq!(clauses.len(), 3);
    assert_eq!(clauses[0].atom_type(), AtomType::Evaluation);
    assert_eq!(clauses[1].atom_type(), AtomType::Inheritance);
    assert_eq!(clauses[2], Handle::equal(Handle::number(1), Handle::number(2)));
}

#[test]
fn repeated_subtrees_are_shared() {
    let mut table = AtomTable::new();
    let clauses = parse_atoms(
        &mut table,
        "(List (Variable $x) (Concept a)) (List (Variable $x) (Concept a))",
    )
    .unwrap();
    assert!(clauses[0].ptr_eq(&clauses[1]));
}

#[test]
fn empty_source_reads_no_atoms() {
    let mut table = AtomTable::new();
    assert!(parse_atoms(&mut table, "  ; nothing here\n").unwrap().is_empty());
}

#[test]
fn unterminated_string_is_an_error() {
    let mut table = AtomTable::new();
    let err = parse_atom(&mut table, "(Concept \"open").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ParseError { .. }));
}

#[test]
fn stray_close_paren_is_an_error() {
    let mut table = AtomTable::new();
    let err = parse_atoms(&mut table, ")").unwrap_err();
    match err.kind {
        ErrorKind::ParseError { line, column, .. } => assert_eq!((line, column), (1, 1)),
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Printing
// =============================================================================

#[test]
fn printed_clauses_read_back() {
    let mut table = AtomTable::new();
    let clauses = vec![
        Handle::evaluation(Handle::predicate("P"), vec![Handle::variable("$x")]),
        Handle::quote(Handle::list(vec![Handle::variable("$y")])),
        Handle::and(vec![]),
    ];
    let text = print_all(&clauses);
    assert_eq!(parse_atoms(&mut table, &text).unwrap(), clauses);
}

#[test]
fn pretty_output_reads_back() {
    let mut table = AtomTable::new();
    let clause = Handle::and(vec![
        Handle::evaluation(
            Handle::predicate("likes"),
            vec![Handle::variable("$someone"), Handle::concept("pizza")],
        ),
        Handle::identical(Handle::variable("$someone"), Handle::concept("alice")),
    ]);
    let config = PrettyConfig {
        indent_width: 4,
        max_width: 20,
    };
    let text = clause.pretty_with_config(&config);
    assert!(text.lines().count() > 1);
    assert_eq!(parse_atom(&mut table, &text).unwrap(), clause);
}
