//! dimspace Core - Core types for Cartesian product enumeration
//!
//! This crate provides the fundamental abstractions for dimspace:
//! - [`Value`] for the opaque scalars carried by dimensions and functions
//! - [`Dimension`] and [`DimensionSpace`] for the named, ordered axes
//! - [`Combination`] for a single point of the product with derived fields
//! - [`DimspaceError`] for the error taxonomy shared by every crate

pub mod combination;
pub mod dimension;
pub mod error;
pub mod value;

pub use combination::{is_reserved, Combination, RESERVED_NAMES};
pub use dimension::{Dimension, DimensionSpace};
pub use error::{DimspaceError, Result};
pub use value::Value;
