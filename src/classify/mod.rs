//! Conversation classification
//!
//! Turns one raw record into an optional flagged verdict and an optional
//! language tag. Classification is pure: problems are returned as
//! [`RecordIssue`]s and the caller decides how to log them.

use crate::domain::{
    json_type_name, FlaggedPolicy, IssueKind, Language, RawRecord, RecordIssue, VerdictKey,
    DEFAULT_SNIPPET_CHARS,
};
use crate::utils::snippet;
use serde_json::Value;

pub mod conversation;
pub mod language;
pub mod verdict;

pub use conversation::{split_conversation, Conversation};
pub use language::detect_language;
pub use verdict::extract_verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyOptions {
    pub flagged_policy: FlaggedPolicy,
    pub snippet_chars: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self { flagged_policy: FlaggedPolicy::Boolean, snippet_chars: DEFAULT_SNIPPET_CHARS }
    }
}

/// Outcome of classifying one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Option<VerdictKey>,
    pub language: Option<Language>,
    pub issues: Vec<RecordIssue>,
}

/// Classify the record at 1-based position `index`.
pub fn classify_record(
    index: usize,
    record: &RawRecord,
    options: &ClassifyOptions,
) -> Classification {
    let mut result = Classification::default();
    let issue = |kind: IssueKind, snippet: String| RecordIssue { index, kind, snippet };

    let text = match &record.text {
        Some(Value::String(text)) if !text.is_empty() => text.as_str(),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            result.issues.push(issue(IssueKind::MissingText, String::new()));
            return result;
        }
        Some(other) => {
            result.issues.push(issue(
                IssueKind::TextNotString(json_type_name(other)),
                snippet(&other.to_string(), options.snippet_chars),
            ));
            return result;
        }
    };

    let conversation = split_conversation(text);
    match conversation.assistant {
        None => {
            result
                .issues
                .push(issue(IssueKind::UnexpectedFormat, snippet(text, options.snippet_chars)));
        }
        Some(assistant) => match extract_verdict(assistant, options.flagged_policy) {
            Ok(verdict) => result.verdict = Some(verdict),
            Err(kind) => {
                let shown = if assistant.is_empty() {
                    String::new()
                } else {
                    snippet(assistant, options.snippet_chars)
                };
                result.issues.push(issue(kind, shown));
            }
        },
    }

    result.language = Some(detect_language(conversation.user));
    result
}
