//! Core domain types shared by the loader, classifier, normalizer and reports.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Version of the JSON analysis report layout.
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Separator between the user turn and the assistant turn.
pub const ASSISTANT_DELIMITER: &str = "\n\nAssistant: ";

/// Optional marker at the start of the user turn.
pub const USER_PREFIX: &str = "User: ";

pub const DEFAULT_INPUT: &str = "dataset.json";
pub const DEFAULT_OUTPUT: &str = "fine_tuning.jsonl";
pub const DEFAULT_SNIPPET_CHARS: usize = 50;

/// Fatal errors raised while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    InvalidEncoding { path: PathBuf },

    #[error("could not parse JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} must contain a JSON array of objects, found {found}")]
    NotAnArray { path: PathBuf, found: &'static str },
}

/// Typed view over one element of the input array.
///
/// `text` keeps whatever JSON value was present so callers can tell an
/// absent field from one of the wrong type. Every other key lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawRecord {
    /// Build a record from an array element; non-objects are handed back.
    pub fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(mut map) => {
                let text = map.remove("text");
                Ok(Self { text, extra: map })
            }
            other => Err(other),
        }
    }

    /// The `text` field when it is a JSON string.
    pub fn text_str(&self) -> Option<&str> {
        self.text.as_ref().and_then(Value::as_str)
    }
}

/// Short name of a JSON value's type, used in warnings.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Heuristic language of the user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Language {
    Korean,
    Japanese,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Korean => "Korean",
            Self::Japanese => "Japanese",
            Self::English => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinct value of the assistant's `flagged` field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VerdictKey {
    Bool(bool),
    /// Canonical JSON of a non-boolean value, only under [`FlaggedPolicy::Any`].
    Other(String),
}

impl VerdictKey {
    /// Key used in the JSON report.
    pub fn report_key(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for VerdictKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("Flagged (True)"),
            Self::Bool(false) => f.write_str("Not Flagged (False)"),
            Self::Other(raw) => write!(f, "Flagged ({raw})"),
        }
    }
}

/// Which `flagged` values count as a verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlaggedPolicy {
    /// Only JSON booleans; anything else excludes the record.
    #[default]
    Boolean,
    /// Any non-null value becomes its own category.
    Any,
}

/// Kind of a recoverable per-record problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    NotAnObject(&'static str),
    MissingText,
    TextNotString(&'static str),
    UnexpectedFormat,
    EmptyAssistantSegment,
    InvalidVerdictJson(String),
    VerdictNotObject,
    MissingFlagged,
    NonBooleanFlagged,
}

impl IssueKind {
    /// Stable identifier used in the JSON report.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAnObject(_) => "not_an_object",
            Self::MissingText => "missing_text",
            Self::TextNotString(_) => "text_not_string",
            Self::UnexpectedFormat => "unexpected_format",
            Self::EmptyAssistantSegment => "empty_assistant_segment",
            Self::InvalidVerdictJson(_) => "invalid_verdict_json",
            Self::VerdictNotObject => "verdict_not_object",
            Self::MissingFlagged => "missing_flagged",
            Self::NonBooleanFlagged => "non_boolean_flagged",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject(found) => write!(f, "expected an object, got {found}"),
            Self::MissingText => f.write_str("is missing the 'text' field"),
            Self::TextNotString(found) => write!(f, "'text' field is a {found}, not a string"),
            Self::UnexpectedFormat => {
                f.write_str("'text' field format is unexpected, skipping Assistant JSON parsing")
            }
            Self::EmptyAssistantSegment => f.write_str("Assistant segment is empty"),
            Self::InvalidVerdictJson(err) => {
                write!(f, "could not parse Assistant JSON string ({err})")
            }
            Self::VerdictNotObject => f.write_str("Assistant JSON is not an object"),
            Self::MissingFlagged => f.write_str("Assistant JSON is missing the 'flagged' field"),
            Self::NonBooleanFlagged => f.write_str("Assistant JSON 'flagged' field is not a boolean"),
        }
    }
}

/// A per-record problem with its 1-based position in the input array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    pub index: usize,
    pub kind: IssueKind,
    pub snippet: String,
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.snippet.is_empty() {
            write!(f, "Entry {} {}", self.index, self.kind)
        } else {
            write!(f, "Entry {} {}: {}", self.index, self.kind, self.snippet)
        }
    }
}

/// Settings shared by both subcommands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub snippet_chars: usize,
    pub flagged_policy: FlaggedPolicy,
    pub include_timestamp: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            report: None,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
            flagged_policy: FlaggedPolicy::Boolean,
            include_timestamp: true,
        }
    }
}
