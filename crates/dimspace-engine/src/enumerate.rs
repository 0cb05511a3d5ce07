//! Cartesian product enumeration.
//!
//! Combinations are produced in one deterministic order: dimensions are
//! visited in declaration order, the last dimension varies fastest and the
//! first slowest. Eager and lazy traversal yield identical sequences.

use std::borrow::Cow;
use std::iter::FusedIterator;
use std::sync::Arc;

use dimspace_core::{Combination, DimensionSpace, Value};

use crate::condition::ConditionSet;

/// Entry point for enumerating a dimension space under optional conditions.
///
/// ```
/// use dimspace_core::{DimensionSpace, Value};
/// use dimspace_engine::Enumerator;
///
/// let space = DimensionSpace::from_dimensions([
///     ("a", vec![Value::from(1), Value::from(2)]),
///     ("b", vec![Value::from("x"), Value::from("y")]),
/// ])
/// .unwrap();
///
/// let rows: Vec<String> = Enumerator::new(&space)
///     .lazy()
///     .map(|c| format!("{}{}", c.values()[0], c.values()[1]))
///     .collect();
/// assert_eq!(rows, vec!["1\"x\"", "1\"y\"", "2\"x\"", "2\"y\""]);
/// ```
#[derive(Debug, Clone)]
pub struct Enumerator<'a> {
    space: Cow<'a, DimensionSpace>,
    conditions: Option<&'a ConditionSet>,
}

impl<'a> Enumerator<'a> {
    /// Enumerates a borrowed space.
    pub fn new(space: &'a DimensionSpace) -> Self {
        Self {
            space: Cow::Borrowed(space),
            conditions: None,
        }
    }

    /// Enumerates a space the enumerator owns.
    pub fn from_owned(space: DimensionSpace) -> Self {
        Self {
            space: Cow::Owned(space),
            conditions: None,
        }
    }

    /// Filters every combination through `conditions` before it is yielded.
    pub fn with_conditions(mut self, conditions: &'a ConditionSet) -> Self {
        self.conditions = Some(conditions);
        self
    }

    pub fn space(&self) -> &DimensionSpace {
        &self.space
    }

    /// Pull-based traversal.
    ///
    /// Nothing is generated until the consumer asks for it; dropping the
    /// iterator early skips the remainder entirely. The iterator is `Clone`,
    /// and calling `lazy` again restarts from the first combination.
    pub fn lazy(&self) -> Combinations<'a> {
        Combinations::new(self.space.clone(), self.conditions)
    }

    /// Fully materialized traversal.
    pub fn eager(&self) -> Vec<Combination> {
        self.lazy().collect()
    }

    /// Eager or lazy traversal behind one iterator type.
    pub fn enumerate(&self, lazy: bool) -> Enumeration<'a> {
        if lazy {
            Enumeration::Lazy(self.lazy())
        } else {
            Enumeration::Eager(self.eager().into_iter())
        }
    }

    /// Number of combinations that survive the conditions.
    ///
    /// O(1) from the cardinalities when no condition is active, otherwise a
    /// full lazy pass.
    pub fn size(&self) -> usize {
        match self.conditions {
            Some(conditions) if !conditions.is_empty() => self.lazy().count(),
            _ => self.space.raw_size(),
        }
    }

    /// The combination at position `index` of the unfiltered product.
    ///
    /// Decodes `index` as a mixed-radix number whose least significant digit
    /// is the last dimension. Conditions are not consulted.
    pub fn nth_raw(&self, index: usize) -> Option<Combination> {
        if index >= self.space.raw_size() {
            return None;
        }
        let cardinalities = self.space.cardinalities();
        let mut indices = vec![0; cardinalities.len()];
        let mut rest = index;
        for (slot, &n) in indices.iter_mut().zip(cardinalities.iter()).rev() {
            *slot = rest % n;
            rest /= n;
        }
        Some(build(&self.space, &indices))
    }
}

/// Lazy iterator over the combinations of a dimension space.
///
/// Holds one odometer of per-dimension indices; each step reads the
/// current position and then advances the last dimension, carrying into
/// earlier dimensions on wrap-around.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    space: Cow<'a, DimensionSpace>,
    conditions: Option<&'a ConditionSet>,
    cardinalities: Vec<usize>,
    indices: Vec<usize>,
    // Unfiltered combinations not yet visited.
    remaining: usize,
}

impl<'a> Combinations<'a> {
    fn new(space: Cow<'a, DimensionSpace>, conditions: Option<&'a ConditionSet>) -> Self {
        let cardinalities = space.cardinalities();
        let remaining = space.raw_size();
        Self {
            indices: vec![0; cardinalities.len()],
            cardinalities,
            remaining,
            space,
            conditions,
        }
    }

    fn advance(&mut self) {
        for (slot, &n) in self.indices.iter_mut().zip(self.cardinalities.iter()).rev() {
            *slot += 1;
            if *slot < n {
                return;
            }
            *slot = 0;
        }
    }

    fn is_filtered(&self) -> bool {
        self.conditions.is_some_and(|c| !c.is_empty())
    }
}

impl Iterator for Combinations<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        while self.remaining > 0 {
            let combination = build(&self.space, &self.indices);
            self.advance();
            self.remaining -= 1;
            match self.conditions {
                Some(conditions) if !conditions.matches(&combination) => continue,
                _ => return Some(combination),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_filtered() {
            (0, Some(self.remaining))
        } else {
            (self.remaining, Some(self.remaining))
        }
    }
}

impl FusedIterator for Combinations<'_> {}

/// Result of [`Enumerator::enumerate`].
#[derive(Debug)]
pub enum Enumeration<'a> {
    /// Materialized before the first element was handed out.
    Eager(std::vec::IntoIter<Combination>),
    /// Generated on demand.
    Lazy(Combinations<'a>),
}

impl Enumeration<'_> {
    pub fn is_lazy(&self) -> bool {
        matches!(self, Enumeration::Lazy(_))
    }
}

impl Iterator for Enumeration<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        match self {
            Enumeration::Eager(iter) => iter.next(),
            Enumeration::Lazy(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Enumeration::Eager(iter) => iter.size_hint(),
            Enumeration::Lazy(iter) => iter.size_hint(),
        }
    }
}

impl FusedIterator for Enumeration<'_> {}

fn build(space: &DimensionSpace, indices: &[usize]) -> Combination {
    let values: Vec<Value> = indices
        .iter()
        .enumerate()
        .filter_map(|(d, &i)| space.get_index(d).and_then(|dim| dim.values().get(i)))
        .cloned()
        .collect();
    Combination::new(Arc::clone(space.names()), values)
}
