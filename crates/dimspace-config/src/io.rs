//! Dimension map loading and dumping.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use dimspace_core::{DimensionSpace, DimspaceError, Value};
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use crate::{ConfigError, DataFormat};

/// Parses a dimension map from `bytes`.
///
/// Document key order becomes enumeration order.
///
/// # Errors
///
/// - `Json`/`Yaml` for malformed text
/// - `Shape` if the root is not a mapping
/// - `Dimspace(InvalidDimensions)` if an entry is not a sequence or a
///   name appears twice
pub fn load_dimensions(bytes: &[u8], format: DataFormat) -> Result<DimensionSpace, ConfigError> {
    let root: Value = match format {
        DataFormat::Json => serde_json::from_slice(bytes)?,
        DataFormat::Yaml => serde_yaml::from_slice(bytes)?,
    };
    if !matches!(root, Value::Map(_)) {
        return Err(ConfigError::Shape(format!(
            "{} root must be a mapping of dimension names to sequences",
            format
        )));
    }
    // The mapping keeps only the last of repeated keys, so look for
    // repeats in a second pass over the raw document.
    let keys: RootKeys = match format {
        DataFormat::Json => serde_json::from_slice(bytes)?,
        DataFormat::Yaml => serde_yaml::from_slice(bytes)?,
    };
    if let Some(name) = keys.first_repeat() {
        return Err(DimspaceError::InvalidDimensions(format!(
            "dimension `{}` appears more than once",
            name
        ))
        .into());
    }
    Ok(DimensionSpace::try_from(root)?)
}

/// Top-level keys of a mapping document in order, repeats included.
struct RootKeys(Vec<String>);

impl RootKeys {
    fn first_repeat(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.0
            .iter()
            .find(|key| !seen.insert(key.as_str()))
            .map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for RootKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeysVisitor;

        impl<'de> Visitor<'de> for KeysVisitor {
            type Value = RootKeys;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RootKeys, A::Error> {
                let mut keys = Vec::new();
                while let Some((key, IgnoredAny)) = map.next_entry::<String, IgnoredAny>()? {
                    keys.push(key);
                }
                Ok(RootKeys(keys))
            }
        }

        deserializer.deserialize_map(KeysVisitor)
    }
}

/// Reads and parses a dimension file.
///
/// The format is inferred from the extension unless given explicitly.
pub fn load_dimensions_file(
    path: impl AsRef<Path>,
    format: Option<DataFormat>,
) -> Result<DimensionSpace, ConfigError> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => DataFormat::from_path(path)?,
    };
    let bytes = std::fs::read(path)?;
    load_dimensions(&bytes, format)
}

/// Serializes the flat name-to-values mapping.
pub fn dump_dimensions(space: &DimensionSpace, format: DataFormat) -> Result<Vec<u8>, ConfigError> {
    let map = space.to_map();
    let bytes = match format {
        DataFormat::Json => {
            let mut bytes = serde_json::to_vec_pretty(&map)?;
            bytes.push(b'\n');
            bytes
        }
        DataFormat::Yaml => serde_yaml::to_string(&map)?.into_bytes(),
    };
    Ok(bytes)
}

/// Serializes a dimension space into a file.
pub fn dump_dimensions_file(
    space: &DimensionSpace,
    path: impl AsRef<Path>,
    format: Option<DataFormat>,
) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => DataFormat::from_path(path)?,
    };
    std::fs::write(path, dump_dimensions(space, format)?)?;
    Ok(())
}
