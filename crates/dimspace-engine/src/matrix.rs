//! The combination matrix: dimensions, conditions and functions together.

use dimspace_config::RenderConfig;
use dimspace_core::{Combination, DimensionSpace, DimspaceError, Result, Value};
use tracing::debug;

use crate::condition::{Condition, ConditionSet};
use crate::enumerate::{Enumeration, Enumerator};
use crate::function::{FunctionRegistry, FunctionResultCache, FunctionSpec};
use crate::progress::{NoProgress, ProgressReporter};
use crate::table::TableFormatter;

#[cfg(test)]
mod tests;

/// A dimension space with its conditions and derived functions.
///
/// ```
/// use dimspace_config::{RenderConfig, TableFormat};
/// use dimspace_core::{DimensionSpace, Value};
/// use dimspace_engine::{Condition, FunctionSpec, Matrix};
///
/// let space = DimensionSpace::from_dimensions([
///     ("dim1", vec![Value::from(1), Value::from(2)]),
///     ("dim2", vec![Value::from("x"), Value::from("y")]),
/// ])
/// .unwrap();
/// let mut matrix = Matrix::new(space);
/// assert_eq!(matrix.size(), 4);
///
/// matrix
///     .set_condition(Condition::from_fn("dim1 is odd", |c| {
///         c.get("dim1").and_then(Value::as_i64) == Some(1)
///     }))
///     .unwrap();
/// assert_eq!(matrix.size(), 2);
///
/// matrix
///     .add_function(FunctionSpec::new("double").compute(|c| {
///         Value::from(c.get("dim1").and_then(Value::as_i64).unwrap_or(0) * 2)
///     }))
///     .unwrap();
/// let table = matrix
///     .render(&RenderConfig::new().with_format(TableFormat::Csv))
///     .unwrap();
/// assert_eq!(table, "dim1,dim2,double\n1,\"x\",2\n1,\"y\",2\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matrix {
    space: DimensionSpace,
    conditions: ConditionSet,
    functions: FunctionRegistry,
}

impl Matrix {
    pub fn new(space: DimensionSpace) -> Self {
        Self {
            space,
            ..Self::default()
        }
    }

    /// Builds a matrix from a `Map` of `List`s.
    pub fn from_value(value: Value) -> Result<Self> {
        DimensionSpace::try_from(value).map(Self::new)
    }

    /// Replaces the dimensions wholesale.
    ///
    /// Conditions, functions and the cache are kept; the cache still
    /// describes the previous dimensions until the next run.
    ///
    /// # Errors
    ///
    /// `NameConflict` if a new dimension shares its name with a function.
    pub fn set_dimensions(&mut self, space: DimensionSpace) -> Result<()> {
        if let Some(name) = space.names().iter().find(|n| self.functions.contains(n)) {
            return Err(DimspaceError::NameConflict(format!(
                "dimension `{}` collides with a function",
                name
            )));
        }
        debug!(
            event = "dimensions_set",
            dimensions = space.len(),
            raw_size = space.raw_size() as u64,
        );
        self.space = space;
        Ok(())
    }

    pub fn dimensions(&self) -> &DimensionSpace {
        &self.space
    }

    /// Combinations of the stored dimensions that pass every condition.
    pub fn enumerate(&self, lazy: bool) -> Enumeration<'_> {
        self.enumerator().enumerate(lazy)
    }

    /// Like [`enumerate`](Self::enumerate), but over `dimensions` when given.
    ///
    /// The ad-hoc dimensions are not stored.
    pub fn enumerate_with(&self, dimensions: Option<Value>, lazy: bool) -> Result<Enumeration<'_>> {
        let enumerator = match dimensions {
            Some(value) => Enumerator::from_owned(DimensionSpace::try_from(value)?),
            None => Enumerator::new(&self.space),
        };
        Ok(enumerator.with_conditions(&self.conditions).enumerate(lazy))
    }

    /// Number of combinations that pass every condition.
    pub fn size(&self) -> usize {
        self.enumerator().size()
    }

    pub fn add_function(&mut self, spec: FunctionSpec) -> Result<()> {
        self.functions.add(spec, &self.space)
    }

    pub fn remove_function(&mut self, name: &str) -> bool {
        self.functions.remove(name)
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Evaluates every function over the surviving combinations and caches
    /// the results.
    pub fn run_functions(
        &mut self,
        progress: Option<&mut dyn ProgressReporter>,
    ) -> Result<&FunctionResultCache> {
        match progress {
            Some(progress) => self.functions.run(&self.space, &self.conditions, progress),
            None => self
                .functions
                .run(&self.space, &self.conditions, &mut NoProgress),
        }
    }

    /// Appends a condition and returns its position.
    pub fn set_condition(&mut self, condition: Condition) -> Result<usize> {
        self.conditions.set(condition)
    }

    pub fn unset_condition(&mut self, index: usize) -> Result<()> {
        self.conditions.unset(index)
    }

    pub fn clear_conditions(&mut self) {
        self.conditions.clear();
    }

    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    /// Renders the matrix as a table.
    ///
    /// With a non-empty cache the rows and their dimension header come from
    /// the last run, even if dimensions or conditions changed since.
    /// Otherwise the stored dimensions are enumerated afresh and functions
    /// are computed per row without touching the cache.
    pub fn render(&self, config: &RenderConfig) -> Result<String> {
        let formatter = TableFormatter::from_config(config);
        let visible = self.functions.visible_names();
        let limit = config.limit.unwrap_or(usize::MAX);

        let cache = self.functions.cache();
        if let Some(dimensions) = cache.dimension_names() {
            let rows = &cache.rows()[..cache.len().min(limit)];
            return Ok(formatter.render(dimensions, &visible, rows));
        }

        let rows = self
            .enumerator()
            .lazy()
            .take(limit)
            .map(|mut row| {
                self.functions.evaluate(&mut row)?;
                Ok(row)
            })
            .collect::<Result<Vec<Combination>>>()?;
        Ok(formatter.render(self.space.names(), &visible, &rows))
    }

    fn enumerator(&self) -> Enumerator<'_> {
        Enumerator::new(&self.space).with_conditions(&self.conditions)
    }
}
