//! dimspace - Cartesian products of named dimensions
//!
//! Declare dimensions, filter them with conditions, attach derived function
//! columns and render the result as a table.
//!
//! # Example
//!
//! ```rust
//! use dimspace::prelude::*;
//!
//! let doc = "dim1: [1, 2]\ndim2: [x, y]\n";
//! let space = load_dimensions(doc.as_bytes(), DataFormat::Yaml).unwrap();
//!
//! let mut matrix = Matrix::new(space);
//! matrix
//!     .add_function(FunctionSpec::new("double").compute(|c| {
//!         Value::from(c.get("dim1").and_then(Value::as_i64).unwrap_or(0) * 2)
//!     }))
//!     .unwrap();
//! matrix.run_functions(None).unwrap();
//!
//! let table = matrix
//!     .render(&RenderConfig::new().with_format(TableFormat::Markdown))
//!     .unwrap();
//! assert!(table.starts_with("| dim1 | dim2 | double |\n"));
//! ```

// Data model
pub use dimspace_core::{
    is_reserved, Combination, Dimension, DimensionSpace, DimspaceError, Result, Value,
    RESERVED_NAMES,
};

// Loading, dumping and render settings
pub use dimspace_config::{
    dump_dimensions, dump_dimensions_file, load_dimensions, load_dimensions_file, ConfigError,
    DataFormat, RenderConfig, TableFormat,
};

// Enumeration, conditions, functions and rendering
pub use dimspace_engine::{
    Combinations, Condition, ConditionSet, CountingProgress, Enumeration, Enumerator,
    FunctionDescription, FunctionRegistry, FunctionResultCache, FunctionSpec, Matrix,
    NoProgress, Position, ProgressReporter, TableFormatter,
};

/// Console logging. Enabled by the `console` feature.
#[cfg(feature = "console")]
pub mod console {
    pub use dimspace_console::{init, ConsoleProgress, DimspaceConsoleLayer};
}

pub mod prelude {
    pub use super::{Combination, DimensionSpace, DimspaceError, Value};
    pub use super::{load_dimensions, DataFormat, RenderConfig, TableFormat};
    pub use super::{Condition, FunctionSpec, Matrix, Position, ProgressReporter};
}
