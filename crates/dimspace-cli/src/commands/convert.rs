use std::path::Path;

use dimspace::{
    dump_dimensions, dump_dimensions_file, load_dimensions_file, ConfigError, DataFormat,
};

/// Returns the converted document, or nothing when it went to `output`.
pub fn run(
    file: &Path,
    format: Option<DataFormat>,
    to: DataFormat,
    output: Option<&Path>,
) -> Result<String, ConfigError> {
    let space = load_dimensions_file(file, format)?;
    match output {
        Some(path) => {
            dump_dimensions_file(&space, path, Some(to))?;
            Ok(String::new())
        }
        None => {
            let bytes = dump_dimensions(&space, to)?;
            String::from_utf8(bytes)
                .map_err(|e| ConfigError::Shape(format!("output is not UTF-8: {}", e)))
        }
    }
}
