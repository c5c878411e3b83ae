//! Assistant verdict extraction

use crate::domain::{FlaggedPolicy, IssueKind, VerdictKey};
use serde_json::Value;

/// Parse the assistant turn and read its `flagged` field.
///
/// Returns the issue that kept the record out of flagged statistics when no
/// verdict can be produced.
pub fn extract_verdict(assistant: &str, policy: FlaggedPolicy) -> Result<VerdictKey, IssueKind> {
    if assistant.is_empty() {
        return Err(IssueKind::EmptyAssistantSegment);
    }

    let parsed: Value = serde_json::from_str(assistant)
        .map_err(|e| IssueKind::InvalidVerdictJson(e.to_string()))?;
    let Value::Object(fields) = parsed else {
        return Err(IssueKind::VerdictNotObject);
    };

    match fields.get("flagged") {
        None | Some(Value::Null) => Err(IssueKind::MissingFlagged),
        Some(Value::Bool(flagged)) => Ok(VerdictKey::Bool(*flagged)),
        Some(other) => match policy {
            FlaggedPolicy::Boolean => Err(IssueKind::NonBooleanFlagged),
            FlaggedPolicy::Any => Ok(VerdictKey::Other(other.to_string())),
        },
    }
}
