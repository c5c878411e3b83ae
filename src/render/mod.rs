//! Output rendering (JSONL, text report, JSON report)

pub mod jsonl;
pub mod report;

pub use jsonl::{convert_records, write_jsonl_line, ConversionSummary};
pub use report::{write_json_report, write_text_report};
