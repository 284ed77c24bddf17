use crate::models::reading::{Message, MessageRole};

/// Substrings that mark a user message as a genuine realization rather
/// than a clarifying question.
const REVELATION_MARKERS: [&str; 6] = [
    "realize",
    "pattern",
    "always",
    "never",
    "just like",
    "every time",
];

/// Openers that mark a message as a shallow lookup question.
const SHALLOW_OPENERS: [&str; 3] = ["what does", "can you explain", "what about the"];

const HIGHLIGHT_LIMIT: usize = 100;
const FULL_HISTORY_HIGHLIGHT_LIMIT: usize = 300;
const MIN_SENTENCE_BOUNDARY: usize = 30;

/// Pulls the most revealing user-authored lines out of a reading's
/// conversation. Best-effort heuristics, not semantics: marker substrings
/// or sheer length qualify a message; short or lookup-style messages are
/// dropped. Each highlight is truncated at a sentence boundary when one
/// exists past the minimum, otherwise hard-truncated with an ellipsis.
pub fn extract_conversation_highlights(
    messages: &[Message],
    max_highlights: usize,
    full_history: bool,
) -> Vec<String> {
    let limit = if full_history {
        FULL_HISTORY_HIGHLIGHT_LIMIT
    } else {
        HIGHLIGHT_LIMIT
    };

    messages
        .iter()
        .filter(|m| m.role == MessageRole::User)
        .map(|m| m.content.trim())
        .filter(|content| is_revealing(content))
        .take(max_highlights)
        .map(|content| truncate_at_sentence(content, limit))
        .collect()
}

fn is_revealing(content: &str) -> bool {
    let lower = content.to_lowercase();
    let chars = content.chars().count();

    if chars < 15 || SHALLOW_OPENERS.iter().any(|o| lower.starts_with(o)) {
        return false;
    }

    REVELATION_MARKERS.iter().any(|m| lower.contains(m)) || chars > 50
}

/// Truncates to `limit` characters, cutting at the last `.`/`?`/`!` that
/// lies past character `MIN_SENTENCE_BOUNDARY` when there is one.
fn truncate_at_sentence(content: &str, limit: usize) -> String {
    if content.chars().count() <= limit {
        return content.to_string();
    }

    let window: String = content.chars().take(limit).collect();
    let boundary = window
        .char_indices()
        .enumerate()
        .filter(|&(char_pos, (_, c))| {
            matches!(c, '.' | '?' | '!') && char_pos > MIN_SENTENCE_BOUNDARY
        })
        .map(|(_, (byte_pos, c))| byte_pos + c.len_utf8())
        .last();

    match boundary {
        Some(end) => window[..end].to_string(),
        None => format!("{}...", window.trim_end()),
    }
}
