//! YAML file loading with source-annotated errors

pub mod diagnostics;

use serde::de::DeserializeOwned;
use std::path::Path;

pub use diagnostics::{YamlError, YamlSyntaxError};

/// Read and deserialize a YAML file
///
/// Parse failures come back as [`YamlSyntaxError`] carrying the file text,
/// so miette can render the failing line.
pub fn parse_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T, YamlError> {
    let source = std::fs::read_to_string(path)?;
    serde_yml::from_str(&source).map_err(|e| {
        YamlSyntaxError::from_serde_error(&e, &source, &path.display().to_string()).into()
    })
}
