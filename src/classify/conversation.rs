//! Splitting a conversation string into its user and assistant turns.

use crate::domain::{ASSISTANT_DELIMITER, USER_PREFIX};

/// The two halves of a conversation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation<'a> {
    /// User turn with the `User: ` marker removed and whitespace trimmed.
    pub user: &'a str,
    /// Assistant turn, trimmed. `None` when the delimiter is absent.
    pub assistant: Option<&'a str>,
}

/// Split `text` on the first assistant delimiter.
pub fn split_conversation(text: &str) -> Conversation<'_> {
    match text.split_once(ASSISTANT_DELIMITER) {
        Some((user, assistant)) => Conversation {
            user: user_segment(user),
            assistant: Some(assistant.trim()),
        },
        None => Conversation { user: user_segment(text), assistant: None },
    }
}

fn user_segment(raw: &str) -> &str {
    let raw = raw.trim_start();
    raw.strip_prefix(USER_PREFIX).unwrap_or(raw).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_well_formed() {
        let conv = split_conversation("User: hello\n\nAssistant: {\"flagged\": false}");
        assert_eq!(conv.user, "hello");
        assert_eq!(conv.assistant, Some("{\"flagged\": false}"));
    }

    #[test]
    fn test_split_uses_first_delimiter() {
        let conv = split_conversation("User: a\n\nAssistant: b\n\nAssistant: c");
        assert_eq!(conv.user, "a");
        assert_eq!(conv.assistant, Some("b\n\nAssistant: c"));
    }

    #[test]
    fn test_split_without_delimiter() {
        let conv = split_conversation("  User: just a question  ");
        assert_eq!(conv.user, "just a question");
        assert_eq!(conv.assistant, None);
    }

    #[test]
    fn test_user_prefix_is_optional() {
        let conv = split_conversation("hola\n\nAssistant:   {}  ");
        assert_eq!(conv.user, "hola");
        assert_eq!(conv.assistant, Some("{}"));
    }

    #[test]
    fn test_delimiter_requires_trailing_space() {
        let conv = split_conversation("User: x\n\nAssistant:{}");
        assert_eq!(conv.assistant, None);
        assert_eq!(conv.user, "x\n\nAssistant:{}");
    }
}
