//! Sample dimension spaces.

use dimspace_core::{DimensionSpace, Value};

/// Integer values.
pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::from).collect()
}

/// String values.
pub fn strs(values: &[&str]) -> Vec<Value> {
    values.iter().copied().map(Value::from).collect()
}

/// `{dim1: [1, 2], dim2: ["x", "y"]}`.
pub fn two_by_two() -> DimensionSpace {
    DimensionSpace::from_dimensions([("dim1", ints(&[1, 2])), ("dim2", strs(&["x", "y"]))])
        .expect("fixture dimensions are valid")
}

/// Three dimensions of cardinality 3, 2 and 2.
pub fn shirts() -> DimensionSpace {
    DimensionSpace::from_dimensions([
        ("size", strs(&["s", "m", "l"])),
        ("color", strs(&["red", "blue"])),
        ("long_sleeve", vec![Value::from(false), Value::from(true)]),
    ])
    .expect("fixture dimensions are valid")
}

/// `{dim1: [1, 2], empty: []}`; its product is empty.
pub fn with_empty_dimension() -> DimensionSpace {
    DimensionSpace::from_dimensions([("dim1", ints(&[1, 2])), ("empty", Vec::new())])
        .expect("fixture dimensions are valid")
}

/// `n` dimensions, each holding `0..width`.
pub fn cube(n: usize, width: i64) -> DimensionSpace {
    let values: Vec<i64> = (0..width).collect();
    DimensionSpace::from_dimensions((0..n).map(|i| (format!("d{}", i), ints(&values))))
        .expect("fixture dimensions are valid")
}
