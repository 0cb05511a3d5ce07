//! dimspace CLI: the `dimspace` command.

mod cli;
mod commands;

use std::io::{self, Write};
use std::process;

use clap::Parser;
use cli::{Cli, Commands};
use commands::RenderArgs;
use owo_colors::OwoColorize;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        dimspace::console::init();
    }

    let result = match cli.command {
        Commands::Size { file, format } => commands::size::run(&file, format),

        Commands::Render {
            file,
            format,
            table,
            align,
            color,
            separator,
            limit,
            config,
        } => commands::render::run(RenderArgs {
            file,
            format,
            table,
            align,
            color,
            separator,
            limit,
            config,
        }),

        Commands::Convert {
            file,
            format,
            to,
            output,
        } => commands::convert::run(&file, format, to, output.as_deref()),
    };

    match result {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(output.as_bytes());
            let _ = stdout.flush();
        }
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            process::exit(1);
        }
    }
}
