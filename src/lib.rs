//! moderation-dataset: wrangle moderation fine-tuning datasets
//!
//! Converts a JSON array of conversation records into JSONL training data
//! and reports how the records split by moderation verdict and by the
//! language of the user turn.

pub mod classify;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod normalize;
pub mod render;
pub mod stats;
pub mod utils;

pub use classify::{classify_record, ClassifyOptions};
pub use dataset::load_records;
pub use domain::{Config, DatasetError, Language, RawRecord, VerdictKey};
pub use render::convert_records;
pub use stats::{analyze_records, DatasetStats};
