//! Integration tests for the decomposition tracer

use clausal_debug::{TraceEvent, Tracer, TracerConfig};
use clausal_engine::{DecomposeConfig, Decomposer, SeedChoice};
use clausal_foundation::{AtomTable, Handle, Variables, parse_atoms};

fn setup(source: &str) -> (Variables, Vec<Handle>) {
    let mut table = AtomTable::new();
    let vars = Variables::from_handles(["$x", "$y", "$z"].map(|n| table.variable(n))).unwrap();
    let clauses = parse_atoms(&mut table, source).unwrap();
    (vars, clauses)
}

const QUERY: &str = r"
    (Evaluation (Predicate A) (List (Variable $x)))
    (Concept constant)
    (Evaluation (Predicate B) (List (Variable $x) (Variable $y)))
    (Evaluation (Predicate C) (List (Variable $z)))
";

#[test]
fn tracer_records_a_full_decomposition() {
    let (vars, clauses) = setup(QUERY);
    let mut tracer = Tracer::new(TracerConfig::new().enabled());

    Decomposer::new(DecomposeConfig::new().with_seed(SeedChoice::First))
        .decompose_observed(&vars, &clauses, &mut tracer)
        .unwrap();

    let types: Vec<_> = tracer.buffer().iter().map(|r| r.event_type()).collect();
    assert_eq!(
        types,
        [
            "decomposition-start",
            "clause-retained",
            "constant-removed",
            "clause-retained",
            "clause-retained",
            "pass-start",
            "component-seeded",
            "pass-start",
            "clause-attached",
            "pass-start",
            "component-seeded",
            "decomposition-end",
        ]
    );

    let removed = tracer.buffer().by_event_type("constant-removed");
    assert_eq!(removed[0].event.clause(), Some(&clauses[1]));

    let end = tracer.buffer().last().unwrap();
    assert_eq!(
        end.event,
        TraceEvent::DecompositionEnd {
            constants: 1,
            components: 2,
        }
    );
}

#[test]
fn each_decomposition_is_a_new_query() {
    let (vars, clauses) = setup(QUERY);
    let mut tracer = Tracer::new(TracerConfig::new().enabled());
    let decomposer = Decomposer::default();

    decomposer.decompose_observed(&vars, &clauses, &mut tracer).unwrap();
    decomposer.decompose_observed(&vars, &clauses[..1], &mut tracer).unwrap();

    assert_eq!(tracer.current_query(), 2);
    assert_eq!(tracer.buffer().queries(), [1, 2]);
    // start, retain, pass, seed, end
    assert_eq!(tracer.buffer().records_for_query(2).len(), 5);
}

#[test]
fn filtered_tracer_keeps_only_partition_decisions() {
    let (vars, clauses) = setup(QUERY);
    let config = TracerConfig::new().enabled().filter_events(vec![
        "clause-attached".to_string(),
        "component-seeded".to_string(),
    ]);
    let mut tracer = Tracer::new(config);

    Decomposer::default()
        .decompose_observed(&vars, &clauses, &mut tracer)
        .unwrap();

    assert!(tracer.buffer().iter().all(|r| r.event.is_partition_event()));
    // Three retained clauses are each seeded or attached once.
    assert_eq!(tracer.buffer().len(), 3);
}

#[test]
fn failed_decomposition_leaves_an_open_query() {
    let (vars, clauses) = setup("(Or (List (Variable $x)))");
    let mut tracer = Tracer::new(TracerConfig::new().enabled());

    assert!(
        Decomposer::default()
            .decompose_observed(&vars, &clauses, &mut tracer)
            .is_err()
    );
    assert!(tracer.buffer().by_event_type("decomposition-end").is_empty());
    assert_eq!(tracer.buffer().by_event_type("clause-retained").len(), 1);
}

#[test]
fn json_output_for_a_query() {
    let (vars, clauses) = setup(QUERY);
    let mut tracer = Tracer::new(TracerConfig::new().enabled().json());

    Decomposer::default()
        .decompose_observed(&vars, &clauses, &mut tracer)
        .unwrap();

    let records = tracer.buffer().records_for_query(1);
    let json = tracer.format_records(&records);
    assert!(json.starts_with('['));
    assert!(json.contains(r#""type":"constant-removed","clause":"(ConceptNode \"constant\")""#));
}

#[test]
fn disabled_tracer_stays_empty() {
    let (vars, clauses) = setup(QUERY);
    let mut tracer = Tracer::new(TracerConfig::new().echo_to_stderr());

    Decomposer::default()
        .decompose_observed(&vars, &clauses, &mut tracer)
        .unwrap();

    assert!(tracer.buffer().is_empty());
    assert_eq!(tracer.current_query(), 1);
}

#[test]
fn replayed_components_match_the_decomposition() {
    let (vars, clauses) = setup(QUERY);
    let mut tracer = Tracer::new(TracerConfig::new().enabled());

    let decomposition = Decomposer::default()
        .decompose_observed(&vars, &clauses, &mut tracer)
        .unwrap();

    let buffer = tracer.buffer();
    assert!(buffer.is_finished(1));
    assert_eq!(
        buffer.removed_constants(1),
        decomposition.constants().iter().collect::<Vec<_>>()
    );
    assert_eq!(buffer.component_count(1), decomposition.components().len());
    for (index, component) in decomposition.components().iter().enumerate() {
        let replayed = tracer.current_component(index);
        assert_eq!(replayed, component.clauses().iter().collect::<Vec<_>>());
    }
}
