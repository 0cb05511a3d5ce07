//! Named derived computations over combinations.
//!
//! Functions are displayed as virtual columns. They are evaluated in
//! registry order, and each one sees the results of the functions evaluated
//! before it in the same row.

mod cache;

#[cfg(test)]
mod tests;

use std::fmt::{self, Debug};
use std::sync::Arc;
use std::time::Instant;

use dimspace_core::{is_reserved, Combination, DimensionSpace, DimspaceError, Result, Value};
use tracing::{debug, info, trace};

use crate::condition::ConditionSet;
use crate::enumerate::Enumerator;
use crate::progress::ProgressReporter;

pub use cache::FunctionResultCache;

/// A derived computation over a combination.
pub type Compute = Arc<dyn Fn(&Combination) -> Value + Send + Sync>;

/// Where a function is pinned in the registry order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    /// Inserted before the `Last` function, or at the tail.
    #[default]
    None,
    /// Always the first column.
    First,
    /// Always the final column.
    Last,
}

/// Declaration of a derived function.
///
/// ```
/// use dimspace_core::Value;
/// use dimspace_engine::{FunctionSpec, Position};
///
/// let spec = FunctionSpec::new("double")
///     .body("dim1 * 2")
///     .position(Position::Last)
///     .compute(|c| Value::from(c.get("dim1").and_then(Value::as_i64).unwrap_or(0) * 2));
///
/// assert_eq!(spec.name(), "double");
/// ```
#[derive(Clone)]
pub struct FunctionSpec {
    name: Arc<str>,
    body: Option<String>,
    compute: Option<Compute>,
    hidden: bool,
    position: Position,
}

impl FunctionSpec {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            body: None,
            compute: None,
            hidden: false,
            position: Position::None,
        }
    }

    pub fn compute<F>(mut self, f: F) -> Self
    where
        F: Fn(&Combination) -> Value + Send + Sync + 'static,
    {
        self.compute = Some(Arc::new(f));
        self
    }

    /// Human-readable body shown by [`FunctionRegistry::describe`].
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Hidden functions are computed and cached but never rendered.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Debug for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSpec")
            .field("name", &self.name)
            .field("body", &self.body)
            .field("has_compute", &self.compute.is_some())
            .field("hidden", &self.hidden)
            .field("position", &self.position)
            .finish()
    }
}

/// Read-only view of one registered function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescription {
    pub name: Arc<str>,
    pub body: String,
    pub hidden: bool,
    pub position: Position,
}

#[derive(Clone)]
struct RegisteredFunction {
    name: Arc<str>,
    body: String,
    compute: Compute,
    hidden: bool,
}

/// Ordered set of derived functions plus the cache of the latest run.
///
/// At most one function is pinned `First` and at most one `Last`. Pinning
/// a new function moves the pin; the previous holder keeps its slot.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: Vec<RegisteredFunction>,
    first: Option<Arc<str>>,
    last: Option<Arc<str>>,
    cache: FunctionResultCache,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function.
    ///
    /// # Errors
    ///
    /// - `NameConflict` if the name is empty, reserved, a dimension of
    ///   `dimensions`, or already registered
    /// - `MissingCompute` if no compute closure was supplied
    pub fn add(&mut self, spec: FunctionSpec, dimensions: &DimensionSpace) -> Result<()> {
        let name = spec.name;
        if name.is_empty() {
            return Err(DimspaceError::NameConflict(
                "function name must not be empty".to_string(),
            ));
        }
        if is_reserved(&name) {
            return Err(DimspaceError::NameConflict(format!(
                "`{}` is a reserved identifier",
                name
            )));
        }
        if dimensions.contains(&name) {
            return Err(DimspaceError::NameConflict(format!(
                "`{}` is already a dimension",
                name
            )));
        }
        if self.contains(&name) {
            return Err(DimspaceError::NameConflict(format!(
                "function `{}` is already registered",
                name
            )));
        }
        let compute = spec.compute.ok_or_else(|| {
            DimspaceError::MissingCompute(format!("function `{}` has no compute", name))
        })?;

        let function = RegisteredFunction {
            name: Arc::clone(&name),
            body: spec.body.unwrap_or_else(|| "<closure>".to_string()),
            compute,
            hidden: spec.hidden,
        };

        match spec.position {
            Position::First => {
                self.functions.insert(0, function);
                self.first = Some(Arc::clone(&name));
            }
            Position::Last => {
                self.functions.push(function);
                self.last = Some(Arc::clone(&name));
            }
            Position::None => {
                let at = self
                    .last
                    .as_deref()
                    .and_then(|last| self.index_of(last))
                    .unwrap_or(self.functions.len());
                self.functions.insert(at, function);
            }
        }

        debug!(
            event = "function_added",
            name = %name,
            hidden = spec.hidden,
            position = ?spec.position,
        );
        Ok(())
    }

    /// Removes a function, clearing any pin it held. Returns false if absent.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(index) = self.index_of(name) else {
            return false;
        };
        self.functions.remove(index);
        if self.first.as_deref() == Some(name) {
            self.first = None;
        }
        if self.last.as_deref() == Some(name) {
            self.last = None;
        }
        debug!(event = "function_removed", name = %name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Description of one function.
    pub fn get(&self, name: &str) -> Option<FunctionDescription> {
        self.index_of(name).map(|i| self.description(&self.functions[i]))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Function names in registry order.
    pub fn names(&self) -> Vec<Arc<str>> {
        self.functions.iter().map(|f| Arc::clone(&f.name)).collect()
    }

    /// Names of functions that appear as table columns.
    pub fn visible_names(&self) -> Vec<Arc<str>> {
        self.functions
            .iter()
            .filter(|f| !f.hidden)
            .map(|f| Arc::clone(&f.name))
            .collect()
    }

    /// Current pin of `name`.
    pub fn position_of(&self, name: &str) -> Position {
        if self.first.as_deref() == Some(name) {
            Position::First
        } else if self.last.as_deref() == Some(name) {
            Position::Last
        } else {
            Position::None
        }
    }

    /// `(name, body, hidden, position)` for every function, in registry order.
    pub fn describe(&self) -> Vec<FunctionDescription> {
        self.functions.iter().map(|f| self.description(f)).collect()
    }

    /// Computes every function for `combination` and attaches the results.
    ///
    /// On error the combination may hold the results computed so far.
    pub fn evaluate(&self, combination: &mut Combination) -> Result<()> {
        for function in &self.functions {
            let value = (function.compute)(combination);
            combination.attach(Arc::clone(&function.name), value)?;
        }
        Ok(())
    }

    /// Evaluates every function over one eager pass of `space` under
    /// `conditions` and replaces the cache with the results.
    ///
    /// The previous cache survives if the run fails. `progress` is finished
    /// either way.
    pub fn run(
        &mut self,
        space: &DimensionSpace,
        conditions: &ConditionSet,
        progress: &mut dyn ProgressReporter,
    ) -> Result<&FunctionResultCache> {
        let started = Instant::now();
        let mut rows = Enumerator::new(space).with_conditions(conditions).eager();

        info!(
            event = "run_start",
            rows = rows.len() as u64,
            functions = self.functions.len() as u64,
            dimensions = space.len() as u64,
        );
        progress.start("Running functions", rows.len());

        let outcome: Result<()> = rows.iter_mut().enumerate().try_for_each(|(index, row)| {
            self.evaluate(row)?;
            trace!(event = "row", index = index as u64);
            progress.increment();
            Ok(())
        });
        progress.finish();
        outcome?;

        self.cache = FunctionResultCache::new(rows, self.names());
        info!(
            event = "run_end",
            rows = self.cache.len() as u64,
            duration_ms = started.elapsed().as_millis() as u64,
        );
        Ok(&self.cache)
    }

    /// Results of the latest run.
    pub fn cache(&self) -> &FunctionResultCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache = FunctionResultCache::default();
    }

    fn description(&self, function: &RegisteredFunction) -> FunctionDescription {
        FunctionDescription {
            name: Arc::clone(&function.name),
            body: function.body.clone(),
            hidden: function.hidden,
            position: self.position_of(&function.name),
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.functions.iter().position(|f| f.name.as_ref() == name)
    }
}

impl Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .field("first", &self.first)
            .field("last", &self.last)
            .field("cached_rows", &self.cache.len())
            .finish()
    }
}
