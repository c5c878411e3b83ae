//! JSONL rendering for training

use crate::domain::RecordIssue;
use crate::normalize::{normalize_value, NormalizedRecord};
use crate::utils::snippet;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::Value;
use std::io::{self, Write};

/// Outcome of a conversion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub written: usize,
    pub skipped: Vec<RecordIssue>,
}

/// Compact JSON with a space after `:` and `,`, e.g. `{"text": "hi"}`.
///
/// Non-ASCII characters are written as UTF-8, never `\u` escaped.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

/// Write one record followed by `\n`.
pub fn write_jsonl_line<W: Write>(writer: &mut W, record: &NormalizedRecord) -> io::Result<()> {
    let mut ser = Serializer::with_formatter(&mut *writer, SpacedFormatter);
    record.serialize(&mut ser).map_err(io::Error::from)?;
    writer.write_all(b"\n")
}

/// Normalize every record and write the valid ones as JSONL.
///
/// Skipped elements are logged at WARN with their 1-based index.
pub fn convert_records<I, W>(
    records: I,
    writer: &mut W,
    snippet_chars: usize,
) -> io::Result<ConversionSummary>
where
    I: IntoIterator<Item = Value>,
    W: Write,
{
    let mut summary = ConversionSummary::default();

    for (i, value) in records.into_iter().enumerate() {
        let index = i + 1;
        let shown = match &value {
            Value::Object(map) => map
                .get("text")
                .filter(|text| !text.is_string() && !text.is_null())
                .map(|text| snippet(&text.to_string(), snippet_chars))
                .unwrap_or_default(),
            other => snippet(&other.to_string(), snippet_chars),
        };

        match normalize_value(value) {
            Ok(record) => {
                write_jsonl_line(writer, &record)?;
                summary.written += 1;
            }
            Err(kind) => {
                let issue = RecordIssue { index, kind, snippet: shown };
                tracing::warn!("Skipping {}", issue);
                summary.skipped.push(issue);
            }
        }
    }

    writer.flush()?;
    tracing::debug!("Wrote {} JSONL lines, skipped {}", summary.written, summary.skipped.len());
    Ok(summary)
}
