//! Opaque values carried by dimensions and derived functions.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

/// A single value in a dimension or a derived-function result.
///
/// Values are opaque to the enumerator; only the table formatter and
/// user-supplied closures look inside them.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    Str(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Ordered mapping of names to values.
    Map(IndexMap<String, Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Returns true if this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Attempts to extract an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract a float. Integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Attempts to extract a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract a map.
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Everything except `Null` and `false` is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    /// Canonical literal representation.
    ///
    /// Strings are quoted and escaped and collections render their elements
    /// as literals. Finite floats are written in positional notation and
    /// always carry a fractional part; non-finite floats are `NaN`, `inf`
    /// or `-inf`.
    ///
    /// ```
    /// use dimspace_core::Value;
    ///
    /// assert_eq!(Value::from("x").literal(), "\"x\"");
    /// assert_eq!(Value::from(2.0).literal(), "2.0");
    /// assert_eq!(Value::from(vec![Value::from(1), Value::from(true)]).literal(), "[1, true]");
    /// ```
    pub fn literal(&self) -> String {
        let mut out = String::new();
        self.write_literal(&mut out);
        out
    }

    /// Display text: raw strings render unquoted, everything else as its literal.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Value::Str(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.literal()),
        }
    }

    fn write_literal(&self, out: &mut String) {
        use std::fmt::Write;

        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            Value::Int(v) => {
                let _ = write!(out, "{}", v);
            }
            Value::Float(v) if v.is_nan() => out.push_str("NaN"),
            Value::Float(v) if v.is_infinite() => {
                out.push_str(if *v > 0.0 { "inf" } else { "-inf" })
            }
            Value::Float(v) => {
                let start = out.len();
                let _ = write!(out, "{}", v);
                if !out[start..].contains(['.', 'e', 'E']) {
                    out.push_str(".0");
                }
            }
            Value::Str(s) => {
                let _ = write!(out, "{:?}", s);
            }
            Value::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_literal(out);
                }
                out.push(']');
            }
            Value::Map(entries) => {
                out.push('{');
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{:?}: ", key);
                    item.write_literal(out);
                }
                out.push('}');
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

/// Counts beyond `i64::MAX` become floats rather than wrapping.
impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v)
            .map(Value::Int)
            .unwrap_or(Value::Float(v as f64))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn json_scalars_map_onto_variants() {
        let value: Value = serde_json::from_str(r#"[null, true, 3, 2.5, "s", [1], {"k": 1}]"#).unwrap();
        let items = value.as_list().unwrap();
        assert_eq!(items[0], Value::Null);
        assert_eq!(items[1], Value::Bool(true));
        assert_eq!(items[2], Value::Int(3));
        assert_eq!(items[3], Value::Float(2.5));
        assert_eq!(items[4], Value::from("s"));
        assert_eq!(items[5], Value::from(vec![Value::from(1)]));
        assert_eq!(items[6].as_map().unwrap().get("k"), Some(&Value::Int(1)));
    }

    #[test]
    fn serializes_untagged() {
        let value = Value::from(vec![Value::from(1), Value::from("a"), Value::from(2.0)]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1,"a",2.0]"#);
    }
}
