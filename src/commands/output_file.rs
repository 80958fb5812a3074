use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputFileError {
    #[error("failed to serialize yaml output: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize json output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output file: {0}")]
    Write(#[from] std::io::Error),
}

/// Writes `value` as JSON when the path ends in `.json`, as YAML otherwise.
pub fn write_output_file<T: Serialize>(path: &str, value: &T) -> Result<(), OutputFileError> {
    let is_json = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let contents = if is_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_yaml::to_string(value)?
    };
    std::fs::write(path, contents)?;
    Ok(())
}
