use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use dimspace::{DataFormat, TableFormat};

#[derive(Parser)]
#[command(
    name = "dimspace",
    about = "Enumerate, render and convert Cartesian products of named dimensions",
    version
)]
pub struct Cli {
    /// Log engine events to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the number of combinations
    Size {
        /// Dimension file (JSON or YAML)
        file: PathBuf,

        /// Input format: json or yaml (default: from the extension)
        #[arg(long, value_parser = DataFormat::from_str)]
        format: Option<DataFormat>,
    },

    /// Render every combination as a table
    Render {
        /// Dimension file (JSON or YAML)
        file: PathBuf,

        /// Input format: json or yaml (default: from the extension)
        #[arg(long, value_parser = DataFormat::from_str)]
        format: Option<DataFormat>,

        /// Table layout: plain, markdown or csv
        #[arg(long, value_parser = TableFormat::from_str)]
        table: Option<TableFormat>,

        /// Pad cells to their column width
        #[arg(long)]
        align: bool,

        /// Color cells by value type (plain layout only)
        #[arg(long)]
        color: bool,

        /// Cell separator for the plain layout
        #[arg(long)]
        separator: Option<String>,

        /// Maximum number of data rows
        #[arg(long)]
        limit: Option<usize>,

        /// Render settings file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Convert a dimension file between JSON and YAML
    Convert {
        /// Dimension file (JSON or YAML)
        file: PathBuf,

        /// Input format: json or yaml (default: from the extension)
        #[arg(long, value_parser = DataFormat::from_str)]
        format: Option<DataFormat>,

        /// Output format: json or yaml
        #[arg(long, value_parser = DataFormat::from_str)]
        to: DataFormat,

        /// Write to this path instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
