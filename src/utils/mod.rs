//! Utility functions

pub mod encoding;
pub mod text;

pub use encoding::read_text_file;
pub use text::snippet;
