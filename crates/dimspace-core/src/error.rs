//! Error types for dimspace

use thiserror::Error;

/// Main error type for dimspace operations.
///
/// Every variant is raised synchronously at the offending call; the
/// operation that fails leaves all previously held state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimspaceError {
    /// Input is not a name-to-sequence mapping, or a dimension is not a sequence
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Name collides with a dimension, a function, or a reserved identifier
    #[error("Name conflict: {0}")]
    NameConflict(String),

    /// A function or condition was declared without its callable
    #[error("Missing compute: {0}")]
    MissingCompute(String),

    /// Condition removal by a position that does not exist
    #[error("Index {index} out of range for {len} condition(s)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Unknown serialization or render format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for dimspace operations
pub type Result<T> = std::result::Result<T, DimspaceError>;
