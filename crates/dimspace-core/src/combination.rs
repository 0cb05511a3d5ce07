//! One point of the Cartesian product, plus its derived fields.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{DimspaceError, Result};
use crate::value::Value;

/// Identifiers no dimension or derived field may use.
///
/// These are the accessor names of [`Combination`]; fields share the
/// lookup namespace with them in every consumer that addresses a row by name.
pub const RESERVED_NAMES: &[&str] = &[
    "attach",
    "derived",
    "derived_fields",
    "fields",
    "get",
    "is_empty",
    "len",
    "names",
    "to_map",
    "value",
    "values",
    "without_derived",
];

/// Returns true if `name` is a reserved identifier.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// An ordered selection of one value per dimension.
///
/// The base part mirrors the dimension space it came from; derived fields
/// are appended afterwards by name. A combination never holds two fields
/// with the same name.
///
/// ```
/// use std::sync::Arc;
/// use dimspace_core::{Combination, Value};
///
/// let names: Arc<[Arc<str>]> = vec![Arc::from("a"), Arc::from("b")].into();
/// let mut combination = Combination::new(names, vec![Value::from(1), Value::from("x")]);
/// combination.attach("double", Value::from(2)).unwrap();
///
/// assert_eq!(combination.get("a"), Some(&Value::from(1)));
/// assert_eq!(combination.get("double"), Some(&Value::from(2)));
/// assert!(combination.attach("a", Value::Null).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    names: Arc<[Arc<str>]>,
    values: Vec<Value>,
    derived: IndexMap<Arc<str>, Value>,
}

impl Combination {
    /// Creates a combination from parallel name and value sequences.
    pub fn new(names: Arc<[Arc<str>]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self {
            names,
            values,
            derived: IndexMap::new(),
        }
    }

    /// Looks a field up by name: base dimensions first, then derived fields.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.value(name).or_else(|| self.derived(name))
    }

    /// Value of a base dimension.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.names
            .iter()
            .position(|n| n.as_ref() == name)
            .map(|i| &self.values[i])
    }

    /// Value of a derived field.
    pub fn derived(&self, name: &str) -> Option<&Value> {
        self.derived.get(name)
    }

    /// Base dimension names, in declaration order.
    pub fn names(&self) -> &Arc<[Arc<str>]> {
        &self.names
    }

    /// Base dimension values, parallel to [`names`](Self::names).
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Derived fields in attachment order.
    pub fn derived_fields(&self) -> &IndexMap<Arc<str>, Value> {
        &self.derived
    }

    /// All fields, base first, then derived.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.names
            .iter()
            .map(|n| n.as_ref())
            .zip(self.values.iter())
            .chain(self.derived.iter().map(|(n, v)| (n.as_ref(), v)))
    }

    /// Number of fields, base and derived.
    pub fn len(&self) -> usize {
        self.values.len() + self.derived.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attaches a derived field.
    ///
    /// # Errors
    ///
    /// `NameConflict` if the name is reserved or already a field.
    pub fn attach(&mut self, name: impl Into<Arc<str>>, value: Value) -> Result<()> {
        let name = name.into();
        if is_reserved(&name) {
            return Err(DimspaceError::NameConflict(format!(
                "`{}` is a reserved identifier",
                name
            )));
        }
        if self.value(&name).is_some() || self.derived.contains_key(&name) {
            return Err(DimspaceError::NameConflict(format!(
                "combination already has a field named `{}`",
                name
            )));
        }
        self.derived.insert(name, value);
        Ok(())
    }

    /// A copy holding only the base dimensions.
    pub fn without_derived(&self) -> Self {
        Self::new(Arc::clone(&self.names), self.values.clone())
    }

    /// All fields as an owned ordered map.
    pub fn to_map(&self) -> IndexMap<String, Value> {
        self.fields()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }
}
