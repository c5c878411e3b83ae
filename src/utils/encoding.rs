//! BOM-aware decoding of dataset files.
//!
//! Datasets exported from spreadsheet tools or Windows editors often carry a
//! byte order mark. This module handles:
//! - UTF-8 with and without BOM
//! - UTF-16 LE/BE when a BOM is present
//! - Strict rejection of anything that is not valid UTF-8 otherwise

use encoding_rs::{Encoding, UTF_8};
use std::path::Path;

/// Decode raw bytes into text.
///
/// Strategy:
/// 1. Sniff a BOM and decode with the encoding it names (BOM removed)
/// 2. Without a BOM, require strict UTF-8
///
/// # Returns
/// `Some((content, encoding_name))`, or `None` when the bytes are not text
/// in a supported encoding.
pub fn decode_text(bytes: &[u8]) -> Option<(String, &'static str)> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, had_errors) =
            encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            return None;
        }
        return Some((decoded.into_owned(), encoding.name()));
    }

    let (decoded, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if had_errors {
        return None;
    }
    Some((decoded.into_owned(), UTF_8.name()))
}

/// Read a file and decode it with [`decode_text`].
///
/// # Returns
/// `Ok(None)` when the file exists but is not decodable text.
pub fn read_text_file(path: &Path) -> std::io::Result<Option<(String, &'static str)>> {
    let bytes = std::fs::read(path)?;
    Ok(decode_text(&bytes))
}
