//! Enumeration, conditions, derived functions and table rendering.
//!
//! The pieces compose left to right: a [`DimensionSpace`] feeds an
//! [`Enumerator`], which filters through a [`ConditionSet`]; surviving
//! combinations get [`FunctionRegistry`] values attached and cached; the
//! [`TableFormatter`] renders the rows. [`Matrix`] bundles all of it.
//!
//! # Logging
//!
//! Events are emitted through `tracing` with an `event` field:
//!
//! - **INFO**: `run_start`, `run_end`
//! - **DEBUG**: `function_added`, `function_removed`, `condition_set`,
//!   `condition_unset`, `conditions_cleared`, `dimensions_set`
//! - **TRACE**: `row`, once per computed row
//!
//! [`DimensionSpace`]: dimspace_core::DimensionSpace

pub mod condition;
pub mod enumerate;
pub mod function;
pub mod matrix;
pub mod progress;
pub mod table;

pub use condition::{Condition, ConditionSet, Predicate};
pub use enumerate::{Combinations, Enumeration, Enumerator};
pub use function::{
    Compute, FunctionDescription, FunctionRegistry, FunctionResultCache, FunctionSpec, Position,
};
pub use matrix::Matrix;
pub use progress::{CountingProgress, NoProgress, ProgressReporter};
pub use table::TableFormatter;
