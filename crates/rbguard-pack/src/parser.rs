//! Shared YAML loading.
//!
//! Manifest scanning and configuration loading both go through these
//! functions so file-not-found and parse failures are reported the same way,
//! with the offending path attached.

use std::path::Path;

use crate::error::{PackError, PackResult};

fn read_file(path: &Path) -> PackResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PackError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PackError::Io(e)
        }
    })
}

/// Load a YAML file as an untyped `serde_yaml::Value`.
///
/// An empty document loads as `Value::Null`.
pub fn load_yaml_value(path: &Path) -> PackResult<serde_yaml::Value> {
    let content = read_file(path)?;
    serde_yaml::from_str(&content).map_err(|e| PackError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a YAML file into a strongly-typed struct.
pub fn load_yaml_typed<T: serde::de::DeserializeOwned>(path: &Path) -> PackResult<T> {
    let content = read_file(path)?;
    serde_yaml::from_str(&content).map_err(|e| PackError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}
