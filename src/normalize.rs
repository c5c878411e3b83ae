//! Record normalization for training output

use crate::domain::{json_type_name, IssueKind, RawRecord};
use serde::Serialize;
use serde_json::Value;

/// One line of the JSONL training file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub text: String,
}

/// Reduce an array element to `{text}`.
///
/// A missing or `null` text becomes the empty string. Non-objects and
/// non-string text are skipped with the reason returned.
pub fn normalize_value(value: Value) -> Result<NormalizedRecord, IssueKind> {
    let record = RawRecord::from_value(value)
        .map_err(|other| IssueKind::NotAnObject(json_type_name(&other)))?;
    normalize_record(record)
}

pub fn normalize_record(record: RawRecord) -> Result<NormalizedRecord, IssueKind> {
    match record.text {
        None | Some(Value::Null) => Ok(NormalizedRecord { text: String::new() }),
        Some(Value::String(text)) => Ok(NormalizedRecord { text }),
        Some(other) => Err(IssueKind::TextNotString(json_type_name(&other))),
    }
}
