//! Pure compute and predicate functions over combinations.
//!
//! Every function here expects the fields of [`two_by_two`](crate::spaces::two_by_two).

use dimspace_core::{Combination, Value};

/// `dim1 * 2`.
pub fn double_dim1(c: &Combination) -> Value {
    c.get("dim1")
        .and_then(Value::as_i64)
        .map(|v| Value::from(v * 2))
        .unwrap_or(Value::Null)
}

/// `dim1` is odd.
pub fn dim1_is_odd(c: &Combination) -> bool {
    c.get("dim1").and_then(Value::as_i64).is_some_and(|v| v % 2 != 0)
}

/// `dim2` equals `"x"`.
pub fn dim2_is_x(c: &Combination) -> bool {
    c.get("dim2").and_then(Value::as_str) == Some("x")
}

/// `"<dim1>-<dim2>"` as a raw string.
pub fn label(c: &Combination) -> Value {
    let dim1 = c.get("dim1").map(|v| v.display().into_owned()).unwrap_or_default();
    let dim2 = c.get("dim2").map(|v| v.display().into_owned()).unwrap_or_default();
    Value::from(format!("{}-{}", dim1, dim2))
}
