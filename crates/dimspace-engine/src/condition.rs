//! Ordered boolean filters over combinations.

use std::fmt::{self, Debug};
use std::sync::Arc;

use dimspace_core::{Combination, DimspaceError, Result};
use tracing::debug;

/// A boolean predicate over a combination.
pub type Predicate = Arc<dyn Fn(&Combination) -> bool + Send + Sync>;

/// A condition under construction: its display text and its predicate.
///
/// ```
/// use dimspace_engine::{Condition, ConditionSet};
///
/// let mut conditions = ConditionSet::new();
/// conditions
///     .set(Condition::new("dim1 is odd").predicate(|c| {
///         c.get("dim1").and_then(|v| v.as_i64()).is_some_and(|v| v % 2 == 1)
///     }))
///     .unwrap();
///
/// assert!(Condition::new("no predicate").build().is_err());
/// ```
#[derive(Clone, Default)]
pub struct Condition {
    text: String,
    predicate: Option<Predicate>,
}

impl Condition {
    /// Starts a condition with the text shown by [`ConditionSet::describe`].
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            predicate: None,
        }
    }

    /// Shorthand for `Condition::new(text).predicate(f)`.
    pub fn from_fn<F>(text: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Combination) -> bool + Send + Sync + 'static,
    {
        Self::new(text).predicate(f)
    }

    pub fn predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Combination) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(f));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Splits into text and predicate.
    ///
    /// # Errors
    ///
    /// `MissingCompute` when no predicate was supplied.
    pub fn build(self) -> Result<(String, Predicate)> {
        match self.predicate {
            Some(predicate) => Ok((self.text, predicate)),
            None => Err(DimspaceError::MissingCompute(format!(
                "condition `{}` has no predicate",
                self.text
            ))),
        }
    }
}

impl Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("text", &self.text)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Ordered list of predicates combined with logical AND.
///
/// Conditions are addressed by their *current* position. Removing one
/// shifts every later position down by one, so callers re-query
/// [`describe`](Self::describe) after each removal.
#[derive(Clone, Default)]
pub struct ConditionSet {
    conditions: Vec<(String, Predicate)>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a condition and returns its position.
    pub fn set(&mut self, condition: Condition) -> Result<usize> {
        let (text, predicate) = condition.build()?;
        debug!(event = "condition_set", position = self.conditions.len(), text = %text);
        self.conditions.push((text, predicate));
        Ok(self.conditions.len() - 1)
    }

    /// Removes the condition at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when no condition sits at `index`.
    pub fn unset(&mut self, index: usize) -> Result<()> {
        if index >= self.conditions.len() {
            return Err(DimspaceError::IndexOutOfRange {
                index,
                len: self.conditions.len(),
            });
        }
        let (text, _) = self.conditions.remove(index);
        debug!(event = "condition_unset", position = index, text = %text);
        Ok(())
    }

    pub fn clear(&mut self) {
        debug!(event = "conditions_cleared", count = self.conditions.len());
        self.conditions.clear();
    }

    /// `(position, text)` pairs in evaluation order.
    pub fn describe(&self) -> Vec<(usize, &str)> {
        self.conditions
            .iter()
            .enumerate()
            .map(|(i, (text, _))| (i, text.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// True iff every predicate holds. An empty set keeps everything.
    pub fn matches(&self, combination: &Combination) -> bool {
        self.conditions
            .iter()
            .all(|(_, predicate)| predicate(combination))
    }
}

impl Debug for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.conditions.iter().map(|(text, _)| text))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimspace_test::functions::{dim1_is_odd, dim2_is_x};
    use dimspace_test::spaces::{ints, strs};

    fn combination(dim1: i64, dim2: &str) -> Combination {
        let names: Arc<[Arc<str>]> = vec![Arc::from("dim1"), Arc::from("dim2")].into();
        let mut values = ints(&[dim1]);
        values.extend(strs(&[dim2]));
        Combination::new(names, values)
    }

    #[test]
    fn empty_set_keeps_everything() {
        let conditions = ConditionSet::new();
        assert!(conditions.matches(&combination(2, "y")));
    }

    #[test]
    fn all_predicates_must_hold() {
        let mut conditions = ConditionSet::new();
        conditions.set(Condition::from_fn("odd", dim1_is_odd)).unwrap();
        conditions.set(Condition::from_fn("x", dim2_is_x)).unwrap();

        assert!(conditions.matches(&combination(1, "x")));
        assert!(!conditions.matches(&combination(1, "y")));
        assert!(!conditions.matches(&combination(2, "x")));
    }

    #[test]
    fn set_returns_positions() {
        let mut conditions = ConditionSet::new();
        assert_eq!(conditions.set(Condition::from_fn("a", |_| true)).unwrap(), 0);
        assert_eq!(conditions.set(Condition::from_fn("b", |_| true)).unwrap(), 1);
        assert_eq!(conditions.describe(), vec![(0, "a"), (1, "b")]);
    }

    #[test]
    fn missing_predicate_is_rejected() {
        let mut conditions = ConditionSet::new();
        let err = conditions.set(Condition::new("dangling")).unwrap_err();
        assert!(matches!(err, DimspaceError::MissingCompute(_)));
        assert!(conditions.is_empty());
    }

    #[test]
    fn unset_shifts_later_positions() {
        let mut conditions = ConditionSet::new();
        for text in ["a", "b", "c"] {
            conditions.set(Condition::from_fn(text, |_| true)).unwrap();
        }
        conditions.unset(0).unwrap();
        assert_eq!(conditions.describe(), vec![(0, "b"), (1, "c")]);
    }

    #[test]
    fn unset_stale_position_is_out_of_range() {
        let mut conditions = ConditionSet::new();
        conditions.set(Condition::from_fn("a", |_| true)).unwrap();
        conditions.set(Condition::from_fn("b", |_| true)).unwrap();

        conditions.unset(1).unwrap();
        let err = conditions.unset(1).unwrap_err();
        assert_eq!(err, DimspaceError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(conditions.len(), 1);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut conditions = ConditionSet::new();
        conditions.set(Condition::from_fn("never", |_| false)).unwrap();
        conditions.clear();
        assert!(conditions.is_empty());
        assert!(conditions.matches(&combination(2, "y")));
    }
}
