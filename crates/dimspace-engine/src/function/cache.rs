//! Results of one function run.

use std::sync::Arc;

use dimspace_core::{Combination, Value};
use indexmap::IndexMap;

/// Function values for every combination that survived one run.
///
/// Rows are kept in enumeration order; a row's position is its identity.
/// Each row carries its function results as derived fields. The cache is
/// replaced wholesale by every run and never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionResultCache {
    rows: Vec<Combination>,
    functions: Vec<Arc<str>>,
}

impl FunctionResultCache {
    pub(crate) fn new(rows: Vec<Combination>, functions: Vec<Arc<str>>) -> Self {
        Self { rows, functions }
    }

    /// Number of cached combinations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cached combinations, each with its function results attached.
    pub fn rows(&self) -> &[Combination] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Combination, &IndexMap<Arc<str>, Value>)> + '_ {
        self.rows.iter().map(|row| (row, row.derived_fields()))
    }

    /// Function results of the row at `index`.
    pub fn results(&self, index: usize) -> Option<&IndexMap<Arc<str>, Value>> {
        self.rows.get(index).map(Combination::derived_fields)
    }

    /// One function result.
    pub fn get(&self, index: usize, function: &str) -> Option<&Value> {
        self.rows.get(index).and_then(|row| row.derived(function))
    }

    /// Functions evaluated by the run, in evaluation order.
    pub fn function_names(&self) -> &[Arc<str>] {
        &self.functions
    }

    /// Dimension names of the run's rows, `None` when the cache is empty.
    pub fn dimension_names(&self) -> Option<&Arc<[Arc<str>]>> {
        self.rows.first().map(Combination::names)
    }
}
