use super::*;
use dimspace_config::TableFormat;
use dimspace_core::Value;
use dimspace_test::functions::{dim1_is_odd, dim2_is_x, double_dim1, label};
use dimspace_test::spaces::{ints, shirts, strs, two_by_two};
use indexmap::IndexMap;

use crate::function::Position;
use crate::progress::CountingProgress;

fn double() -> FunctionSpec {
    FunctionSpec::new("double").body("dim1 * 2").compute(double_dim1)
}

fn markdown() -> RenderConfig {
    RenderConfig::new().with_format(TableFormat::Markdown)
}

fn csv() -> RenderConfig {
    RenderConfig::new().with_format(TableFormat::Csv)
}

#[test]
fn markdown_table_with_function_column() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.add_function(double()).unwrap();
    matrix.run_functions(None).unwrap();

    let table = matrix.render(&markdown()).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "| dim1 | dim2 | double |");
    assert_eq!(
        &lines[2..],
        [
            "| 1    | \"x\"  | 2      |",
            "| 1    | \"y\"  | 2      |",
            "| 2    | \"x\"  | 4      |",
            "| 2    | \"y\"  | 4      |",
        ]
    );
}

#[test]
fn odd_condition_halves_the_size() {
    let mut matrix = Matrix::new(two_by_two());
    assert_eq!(matrix.size(), 4);

    matrix.set_condition(Condition::from_fn("dim1 is odd", dim1_is_odd)).unwrap();
    assert_eq!(matrix.size(), 2);
    assert!(matrix
        .enumerate(true)
        .all(|c| c.get("dim1") == Some(&Value::from(1))));
}

#[test]
fn stale_condition_index_is_out_of_range() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.set_condition(Condition::from_fn("odd", dim1_is_odd)).unwrap();
    matrix.unset_condition(0).unwrap();

    let err = matrix.unset_condition(0).unwrap_err();
    assert_eq!(err, DimspaceError::IndexOutOfRange { index: 0, len: 0 });
}

#[test]
fn hidden_function_is_cached_but_not_rendered() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.add_function(double()).unwrap();
    matrix
        .add_function(FunctionSpec::new("tag").hidden(true).compute(label))
        .unwrap();

    let cache = matrix.run_functions(None).unwrap();
    assert_eq!(cache.get(0, "tag"), Some(&Value::from("1-x")));

    let table = matrix.render(&csv()).unwrap();
    assert!(table.starts_with("dim1,dim2,double\n"));
    assert!(!table.contains("1-x"));
}

#[test]
fn eager_and_lazy_agree() {
    let mut matrix = Matrix::new(shirts());
    matrix.set_condition(Condition::from_fn("long", |c| {
        c.get("long_sleeve").and_then(Value::as_bool) == Some(true)
    }))
    .unwrap();

    let eager: Vec<Combination> = matrix.enumerate(false).collect();
    let lazy: Vec<Combination> = matrix.enumerate(true).collect();
    assert_eq!(eager, lazy);
    assert_eq!(eager.len(), 6);
    assert!(!matrix.enumerate(false).is_lazy());
}

#[test]
fn render_without_cache_computes_on_the_fly() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.add_function(double()).unwrap();

    let table = matrix.render(&csv().with_limit(2)).unwrap();
    assert_eq!(table, "dim1,dim2,double\n1,\"x\",2\n1,\"y\",2\n");
    assert!(matrix.functions().cache().is_empty());
}

#[test]
fn cache_is_authoritative_until_next_run() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.add_function(double()).unwrap();
    matrix.run_functions(None).unwrap();

    matrix.set_condition(Condition::from_fn("x only", dim2_is_x)).unwrap();
    let stale = matrix.render(&csv()).unwrap();
    assert_eq!(stale.lines().count(), 5);

    matrix.run_functions(None).unwrap();
    let fresh = matrix.render(&csv()).unwrap();
    assert_eq!(fresh, "dim1,dim2,double\n1,\"x\",2\n2,\"x\",4\n");
}

#[test]
fn cached_render_respects_limit() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.add_function(double()).unwrap();
    matrix.run_functions(None).unwrap();

    let table = matrix.render(&csv().with_limit(1)).unwrap();
    assert_eq!(table, "dim1,dim2,double\n1,\"x\",2\n");
}

#[test]
fn cached_render_uses_cached_dimension_names() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.add_function(double()).unwrap();
    matrix.run_functions(None).unwrap();

    let space = DimensionSpace::from_dimensions([("other", ints(&[9]))]).unwrap();
    matrix.set_dimensions(space).unwrap();

    let table = matrix.render(&csv()).unwrap();
    assert!(table.starts_with("dim1,dim2,double\n"));
}

#[test]
fn function_added_after_run_renders_empty() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.add_function(double()).unwrap();
    matrix.run_functions(None).unwrap();
    matrix
        .add_function(FunctionSpec::new("late").position(Position::First).compute(label))
        .unwrap();

    let table = matrix.render(&csv().with_limit(1)).unwrap();
    assert_eq!(table, "dim1,dim2,late,double\n1,\"x\",,2\n");
}

#[test]
fn dimension_function_collisions_are_rejected() {
    let mut matrix = Matrix::new(two_by_two());
    let err = matrix
        .add_function(FunctionSpec::new("dim1").compute(double_dim1))
        .unwrap_err();
    assert!(matches!(err, DimspaceError::NameConflict(_)));

    matrix.add_function(double()).unwrap();
    let space = DimensionSpace::from_dimensions([("double", ints(&[1]))]).unwrap();
    let err = matrix.set_dimensions(space).unwrap_err();
    assert!(matches!(err, DimspaceError::NameConflict(_)));
    assert_eq!(matrix.dimensions(), &two_by_two());
}

#[test]
fn remove_function_drops_column() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.add_function(double()).unwrap();
    assert!(matrix.remove_function("double"));
    assert!(!matrix.remove_function("double"));

    let table = matrix.render(&csv().with_limit(1)).unwrap();
    assert_eq!(table, "dim1,dim2\n1,\"x\"\n");
}

#[test]
fn run_reports_progress_for_survivors() {
    let mut matrix = Matrix::new(shirts());
    matrix
        .set_condition(Condition::from_fn("small", |c| {
            c.get("size").and_then(Value::as_str) == Some("s")
        }))
        .unwrap();
    matrix
        .add_function(FunctionSpec::new("one").compute(|_| Value::from(1)))
        .unwrap();

    let mut progress = CountingProgress::default();
    matrix.run_functions(Some(&mut progress)).unwrap();
    assert_eq!(progress.total, 4);
    assert_eq!(progress.steps, 4);
    assert!(progress.finished);
}

#[test]
fn enumerate_with_ad_hoc_dimensions() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.set_condition(Condition::from_fn("x only", dim2_is_x)).unwrap();

    let mut map = IndexMap::new();
    map.insert("dim2".to_string(), Value::List(strs(&["x", "y", "x"])));
    let rows: Vec<Combination> = matrix
        .enumerate_with(Some(Value::Map(map)), true)
        .unwrap()
        .collect();
    assert_eq!(rows.len(), 2);

    assert_eq!(matrix.enumerate_with(None, false).unwrap().count(), 2);
    assert!(matrix.enumerate_with(Some(Value::from(3)), true).is_err());
}

#[test]
fn from_value_requires_a_map_of_lists() {
    let mut map = IndexMap::new();
    map.insert("a".to_string(), Value::List(ints(&[1, 2, 3])));
    let matrix = Matrix::from_value(Value::Map(map)).unwrap();
    assert_eq!(matrix.size(), 3);

    let err = Matrix::from_value(Value::List(Vec::new())).unwrap_err();
    assert!(matches!(err, DimspaceError::InvalidDimensions(_)));
}

#[test]
fn empty_dimensions_render_header_only() {
    let matrix = Matrix::default();
    assert_eq!(matrix.size(), 0);
    assert_eq!(matrix.render(&csv()).unwrap(), "\n");
}

#[test]
fn clear_conditions_restores_raw_size() {
    let mut matrix = Matrix::new(two_by_two());
    matrix.set_condition(Condition::from_fn("odd", dim1_is_odd)).unwrap();
    matrix.set_condition(Condition::from_fn("x", dim2_is_x)).unwrap();
    assert_eq!(matrix.size(), 1);
    assert_eq!(matrix.conditions().len(), 2);

    matrix.clear_conditions();
    assert_eq!(matrix.size(), 4);
}
