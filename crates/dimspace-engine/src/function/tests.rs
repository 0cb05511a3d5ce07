use super::*;
use crate::condition::Condition;
use crate::progress::{CountingProgress, NoProgress};
use dimspace_test::functions::{dim1_is_odd, double_dim1, label};
use dimspace_test::spaces::{ints, two_by_two};

fn constant(name: &str, value: i64) -> FunctionSpec {
    FunctionSpec::new(name).compute(move |_| Value::from(value))
}

fn names(registry: &FunctionRegistry) -> Vec<String> {
    registry.names().iter().map(|n| n.to_string()).collect()
}

#[test]
fn add_keeps_insertion_order() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(constant("a", 1), &space).unwrap();
    registry.add(constant("b", 2), &space).unwrap();
    registry.add(constant("c", 3), &space).unwrap();

    assert_eq!(names(&registry), ["a", "b", "c"]);
}

#[test]
fn first_and_last_pins_hold() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(constant("tail", 0).position(Position::Last), &space).unwrap();
    registry.add(constant("head", 0).position(Position::First), &space).unwrap();
    registry.add(constant("mid1", 0), &space).unwrap();
    registry.add(constant("mid2", 0), &space).unwrap();

    assert_eq!(names(&registry), ["head", "mid1", "mid2", "tail"]);
    assert_eq!(registry.position_of("head"), Position::First);
    assert_eq!(registry.position_of("tail"), Position::Last);
    assert_eq!(registry.position_of("mid1"), Position::None);
}

#[test]
fn repinning_moves_the_pin() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(constant("old", 0).position(Position::Last), &space).unwrap();
    registry.add(constant("new", 0).position(Position::Last), &space).unwrap();
    registry.add(constant("plain", 0), &space).unwrap();

    assert_eq!(names(&registry), ["old", "plain", "new"]);
    assert_eq!(registry.position_of("old"), Position::None);
    assert_eq!(registry.position_of("new"), Position::Last);
}

#[test]
fn removing_pinned_function_clears_pin() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(constant("tail", 0).position(Position::Last), &space).unwrap();
    assert!(registry.remove("tail"));
    assert!(!registry.remove("tail"));

    registry.add(constant("a", 0), &space).unwrap();
    registry.add(constant("b", 0), &space).unwrap();
    assert_eq!(names(&registry), ["a", "b"]);
}

#[test]
fn name_conflicts_are_rejected() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(constant("f", 0), &space).unwrap();

    for name in ["", "dim1", "f", "values"] {
        let err = registry.add(constant(name, 0), &space).unwrap_err();
        assert!(matches!(err, DimspaceError::NameConflict(_)), "{:?}", name);
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn missing_compute_is_rejected() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    let err = registry.add(FunctionSpec::new("f"), &space).unwrap_err();
    assert!(matches!(err, DimspaceError::MissingCompute(_)));
    assert!(registry.is_empty());
}

#[test]
fn describe_reports_body_and_flags() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry
        .add(
            FunctionSpec::new("double")
                .body("dim1 * 2")
                .position(Position::First)
                .compute(double_dim1),
            &space,
        )
        .unwrap();
    registry.add(constant("secret", 7).hidden(true), &space).unwrap();

    let described = registry.describe();
    assert_eq!(described.len(), 2);
    assert_eq!(described[0].name.as_ref(), "double");
    assert_eq!(described[0].body, "dim1 * 2");
    assert_eq!(described[0].position, Position::First);
    assert!(described[1].hidden);
    assert_eq!(described[1].body, "<closure>");

    let visible: Vec<String> = registry.visible_names().iter().map(|n| n.to_string()).collect();
    assert_eq!(visible, ["double"]);
}

#[test]
fn run_caches_surviving_rows() {
    let space = two_by_two();
    let mut conditions = ConditionSet::new();
    conditions.set(Condition::from_fn("odd", dim1_is_odd)).unwrap();

    let mut registry = FunctionRegistry::new();
    registry.add(FunctionSpec::new("double").compute(double_dim1), &space).unwrap();

    let mut progress = CountingProgress::default();
    let cache = registry.run(&space, &conditions, &mut progress).unwrap();

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(0, "double"), Some(&Value::from(2)));
    assert_eq!(cache.get(1, "double"), Some(&Value::from(2)));
    assert_eq!(cache.rows()[1].get("dim2"), Some(&Value::from("y")));

    assert_eq!(progress.title.as_deref(), Some("Running functions"));
    assert_eq!(progress.total, 2);
    assert_eq!(progress.steps, 2);
    assert!(progress.finished);
}

#[test]
fn later_functions_see_earlier_results() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(FunctionSpec::new("double").compute(double_dim1), &space).unwrap();
    registry
        .add(
            FunctionSpec::new("quad").compute(|c| {
                Value::from(c.get("double").and_then(Value::as_i64).unwrap_or(0) * 2)
            }),
            &space,
        )
        .unwrap();

    let cache = registry.run(&space, &ConditionSet::new(), &mut NoProgress).unwrap();
    assert_eq!(cache.get(3, "quad"), Some(&Value::from(8)));
}

#[test]
fn hidden_functions_are_still_cached() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry
        .add(FunctionSpec::new("tag").hidden(true).compute(label), &space)
        .unwrap();

    let cache = registry.run(&space, &ConditionSet::new(), &mut NoProgress).unwrap();
    assert_eq!(cache.get(0, "tag"), Some(&Value::from("1-x")));
    assert_eq!(cache.function_names().len(), 1);
    assert!(registry.visible_names().is_empty());
}

#[test]
fn run_replaces_previous_cache() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(constant("one", 1), &space).unwrap();
    registry.run(&space, &ConditionSet::new(), &mut NoProgress).unwrap();
    assert_eq!(registry.cache().len(), 4);

    let mut conditions = ConditionSet::new();
    conditions.set(Condition::from_fn("none", |_| false)).unwrap();
    registry.run(&space, &conditions, &mut NoProgress).unwrap();
    assert!(registry.cache().is_empty());
}

#[test]
fn failed_run_still_finishes_progress() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(constant("x", 1), &space).unwrap();
    registry.run(&space, &ConditionSet::new(), &mut NoProgress).unwrap();

    let clashing = DimensionSpace::from_dimensions([("x", ints(&[1, 2]))]).unwrap();
    let mut progress = CountingProgress::default();
    let err = registry
        .run(&clashing, &ConditionSet::new(), &mut progress)
        .unwrap_err();

    assert!(matches!(err, DimspaceError::NameConflict(_)));
    assert_eq!(progress.total, 2);
    assert_eq!(progress.steps, 0);
    assert!(progress.finished);
    assert_eq!(registry.cache().len(), 4);
}

#[test]
fn evaluate_attaches_in_registry_order() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(constant("b", 2), &space).unwrap();
    registry.add(constant("a", 1).position(Position::First), &space).unwrap();

    let mut row = crate::enumerate::Enumerator::new(&space).eager().remove(0);
    registry.evaluate(&mut row).unwrap();

    let derived: Vec<&str> = row.derived_fields().keys().map(|k| k.as_ref()).collect();
    assert_eq!(derived, ["a", "b"]);
}

#[test]
fn clear_cache_drops_results() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(constant("one", 1), &space).unwrap();
    registry.run(&space, &ConditionSet::new(), &mut NoProgress).unwrap();
    registry.clear_cache();
    assert!(registry.cache().is_empty());
    assert!(registry.cache().dimension_names().is_none());
}

#[test]
fn get_describes_one_function() {
    let space = two_by_two();
    let mut registry = FunctionRegistry::new();
    registry.add(constant("one", 1).body("1"), &space).unwrap();

    let described = registry.get("one").unwrap();
    assert_eq!(described.body, "1");
    assert!(!described.hidden);
    assert!(registry.get("two").is_none());
}
