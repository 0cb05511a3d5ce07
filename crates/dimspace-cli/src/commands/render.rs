use dimspace::{load_dimensions_file, ConfigError, Matrix, RenderConfig};

use super::RenderArgs;

/// Flags override the config file, which overrides the defaults.
pub fn run(args: RenderArgs) -> Result<String, ConfigError> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(table) = args.table {
        config = config.with_format(table);
    }
    if args.align {
        config = config.with_align(true);
    }
    if args.color {
        config = config.with_color(true);
    }
    if let Some(separator) = args.separator {
        config = config.with_separator(separator);
    }
    if let Some(limit) = args.limit {
        config = config.with_limit(limit);
    }

    let space = load_dimensions_file(&args.file, args.format)?;
    Ok(Matrix::new(space).render(&config)?)
}
