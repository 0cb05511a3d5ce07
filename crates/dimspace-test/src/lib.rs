//! Shared test fixtures for dimspace crates.
//!
//! This crate provides sample dimension spaces and pure functions for testing.
//! It does NOT depend on `dimspace-engine` to avoid circular dependencies.
//!
//! - [`spaces`] - Dimension spaces and value helpers
//! - [`functions`] - Compute and predicate functions over combinations
//! - [`documents`] - Serialized dimension documents
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! dimspace-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use dimspace_test::spaces::two_by_two;
//! use dimspace_test::functions::{double_dim1, dim1_is_odd};
//! ```

pub mod documents;
pub mod functions;
pub mod spaces;

// Re-export commonly used fixtures at crate root for convenience
pub use functions::{dim1_is_odd, double_dim1};
pub use spaces::{ints, strs, two_by_two};
