//! Script-range language heuristic for the user turn.

use crate::domain::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// Hangul syllables
static KOREAN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x{AC00}-\x{D7A3}]").unwrap());

/// Hiragana, Katakana, common CJK ideographs
static JAPANESE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{4E00}-\x{9FAF}]").unwrap()
});

/// Classify `text` by the first script range it contains.
///
/// A single matching character anywhere is enough. Korean is tested before
/// Japanese; text with neither falls back to English, whatever script it is
/// actually written in.
pub fn detect_language(text: &str) -> Language {
    if KOREAN_PATTERN.is_match(text) {
        Language::Korean
    } else if JAPANESE_PATTERN.is_match(text) {
        Language::Japanese
    } else {
        Language::English
    }
}
