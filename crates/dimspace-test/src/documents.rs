//! Serialized forms of [`two_by_two`](crate::spaces::two_by_two).

pub const TWO_BY_TWO_JSON: &str = r#"{
  "dim1": [1, 2],
  "dim2": ["x", "y"]
}"#;

pub const TWO_BY_TWO_YAML: &str = "dim1:\n- 1\n- 2\ndim2:\n- x\n- y\n";

/// A document mixing every scalar type, in non-alphabetical key order.
pub const MIXED_YAML: &str = r#"
zeta: [true, false]
alpha: [1, 2.5, "three", null]
mid: [[1, 2], {k: v}]
"#;
