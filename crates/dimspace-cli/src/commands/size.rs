use std::path::Path;

use dimspace::{load_dimensions_file, ConfigError, DataFormat, Matrix};

pub fn run(file: &Path, format: Option<DataFormat>) -> Result<String, ConfigError> {
    let space = load_dimensions_file(file, format)?;
    let matrix = Matrix::new(space);
    Ok(format!("{}\n", matrix.size()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimspace_test::documents::{MIXED_YAML, TWO_BY_TWO_JSON};

    #[test]
    fn prints_the_product_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dims.json");
        std::fs::write(&path, TWO_BY_TWO_JSON).unwrap();

        assert_eq!(run(&path, None).unwrap(), "4\n");
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dims.txt");
        std::fs::write(&path, MIXED_YAML).unwrap();

        assert!(run(&path, None).is_err());
        assert_eq!(run(&path, Some(DataFormat::Yaml)).unwrap(), "16\n");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = run(Path::new("/nonexistent/dims.yaml"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
