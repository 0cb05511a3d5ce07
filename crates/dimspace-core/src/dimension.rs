//! Named, ordered dimensions and the space they span.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::combination::is_reserved;
use crate::error::{DimspaceError, Result};
use crate::value::Value;

/// A named, ordered sequence of candidate values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    name: Arc<str>,
    values: Vec<Value>,
}

impl Dimension {
    /// Creates a dimension. Emptiness is allowed and makes the whole product empty.
    pub fn new(name: impl Into<Arc<str>>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of candidate values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The set of dimensions whose Cartesian product is enumerated.
///
/// Insertion order defines enumeration order: the first dimension varies
/// slowest, the last fastest. The space is only ever replaced wholesale.
///
/// # Examples
///
/// ```
/// use dimspace_core::{DimensionSpace, Value};
///
/// let space = DimensionSpace::from_dimensions([
///     ("a", vec![Value::from(1), Value::from(2)]),
///     ("b", vec![Value::from("x"), Value::from("y"), Value::from("z")]),
/// ])
/// .unwrap();
///
/// assert_eq!(space.raw_size(), 6);
/// assert_eq!(space.names().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DimensionSpace {
    dimensions: IndexMap<Arc<str>, Dimension>,
    // Shared with every combination produced from this space.
    names: Arc<[Arc<str>]>,
}

impl Default for DimensionSpace {
    fn default() -> Self {
        Self {
            dimensions: IndexMap::new(),
            names: Arc::from(Vec::new()),
        }
    }
}

impl DimensionSpace {
    /// Creates an empty space. Its size is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a space from `(name, values)` pairs in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` on an empty, duplicate, or reserved name.
    pub fn from_dimensions<I, N>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Vec<Value>)>,
        N: Into<String>,
    {
        let mut dimensions: IndexMap<Arc<str>, Dimension> = IndexMap::new();
        for (name, values) in entries {
            let name: String = name.into();
            validate_name(&name)?;
            let name: Arc<str> = Arc::from(name);
            if dimensions.contains_key(&name) {
                return Err(DimspaceError::InvalidDimensions(format!(
                    "duplicate dimension name `{}`",
                    name
                )));
            }
            dimensions.insert(Arc::clone(&name), Dimension::new(name, values));
        }
        let names = dimensions.keys().cloned().collect();
        Ok(Self { dimensions, names })
    }

    /// Replaces the whole space with `entries`.
    ///
    /// Validation happens before the swap, so a failure leaves `self` intact.
    pub fn set<I, N>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, Vec<Value>)>,
        N: Into<String>,
    {
        *self = Self::from_dimensions(entries)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.get(name)
    }

    /// Dimension at a declaration position.
    pub fn get_index(&self, index: usize) -> Option<&Dimension> {
        self.dimensions.get_index(index).map(|(_, dim)| dim)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dimensions.contains_key(name)
    }

    /// Dimension names in declaration order.
    pub fn names(&self) -> &Arc<[Arc<str>]> {
        &self.names
    }

    /// Number of dimensions (not combinations).
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dimension> + '_ {
        self.dimensions.values()
    }

    /// Cardinality of each dimension, in declaration order.
    pub fn cardinalities(&self) -> Vec<usize> {
        self.dimensions.values().map(Dimension::len).collect()
    }

    /// Size of the unfiltered product.
    ///
    /// Computed from the cardinalities alone, never by enumerating. An empty
    /// space, or any empty dimension, gives 0. Saturates at `usize::MAX`.
    pub fn raw_size(&self) -> usize {
        if self.dimensions.is_empty() {
            return 0;
        }
        self.dimensions
            .values()
            .map(Dimension::len)
            .fold(1usize, |acc, n| acc.saturating_mul(n))
    }

    /// Exports the flat name-to-values mapping.
    pub fn to_map(&self) -> IndexMap<String, Vec<Value>> {
        self.dimensions
            .iter()
            .map(|(name, dim)| (name.to_string(), dim.values.clone()))
            .collect()
    }
}

impl TryFrom<Value> for DimensionSpace {
    type Error = DimspaceError;

    /// Accepts a `Map` whose every entry is a `List`.
    fn try_from(value: Value) -> Result<Self> {
        let entries = match value {
            Value::Map(entries) => entries,
            other => {
                return Err(DimspaceError::InvalidDimensions(format!(
                    "expected a mapping of dimension names to sequences, got {}",
                    other.literal()
                )))
            }
        };
        let mut pairs = Vec::with_capacity(entries.len());
        for (name, values) in entries {
            match values {
                Value::List(values) => pairs.push((name, values)),
                other => {
                    return Err(DimspaceError::InvalidDimensions(format!(
                        "dimension `{}` is not a sequence: {}",
                        name,
                        other.literal()
                    )))
                }
            }
        }
        Self::from_dimensions(pairs)
    }
}

impl PartialEq for DimensionSpace {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions.len() == other.dimensions.len()
            && self
                .dimensions
                .values()
                .zip(other.dimensions.values())
                .all(|(a, b)| a == b)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DimspaceError::InvalidDimensions(
            "dimension name must not be empty".to_string(),
        ));
    }
    if is_reserved(name) {
        return Err(DimspaceError::InvalidDimensions(format!(
            "dimension name `{}` is reserved",
            name
        )));
    }
    Ok(())
}
