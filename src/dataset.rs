//! Dataset loading
//!
//! The whole file is read into memory and parsed as one JSON array. Every
//! failure here is fatal and happens before any record is processed.

use crate::domain::{json_type_name, DatasetError};
use crate::utils::read_text_file;
use serde_json::Value;
use std::path::Path;

/// Load the top-level JSON array from `path`.
pub fn load_records(path: &Path) -> Result<Vec<Value>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let (content, encoding) = read_text_file(path)
        .map_err(|source| DatasetError::Io { path: path.to_path_buf(), source })?
        .ok_or_else(|| DatasetError::InvalidEncoding { path: path.to_path_buf() })?;
    tracing::debug!("Read {} ({}, {} bytes)", path.display(), encoding, content.len());

    parse_records(&content, path)
}

/// Parse already-decoded text as a JSON array of records.
///
/// `origin` is only used in error messages.
pub fn parse_records(content: &str, origin: &Path) -> Result<Vec<Value>, DatasetError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|source| DatasetError::InvalidJson { path: origin.to_path_buf(), source })?;

    match value {
        Value::Array(records) => {
            tracing::debug!("Loaded {} records from {}", records.len(), origin.display());
            Ok(records)
        }
        other => Err(DatasetError::NotAnArray {
            path: origin.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}
