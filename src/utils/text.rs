//! Text helpers for log output

/// Truncate `text` to at most `max_chars` characters and append `...`.
///
/// Counts Unicode code points, not bytes, so multi-byte Hangul or Kana never
/// split mid-character. The ellipsis is always appended, even for short
/// input, so log lines keep a uniform shape.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let prefix: String = text.chars().take(max_chars).collect();
    format!("{prefix}...")
}
