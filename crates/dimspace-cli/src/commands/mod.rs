//! Subcommands. Each returns the text destined for stdout.

pub mod convert;
pub mod render;
pub mod size;

use std::path::PathBuf;

use dimspace::{DataFormat, TableFormat};

/// Arguments of `dimspace render`.
#[derive(Debug, Default)]
pub struct RenderArgs {
    pub file: PathBuf,
    pub format: Option<DataFormat>,
    pub table: Option<TableFormat>,
    pub align: bool,
    pub color: bool,
    pub separator: Option<String>,
    pub limit: Option<usize>,
    pub config: Option<PathBuf>,
}
