//! Discord length limits and truncation helpers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

/// Maximum length of a message's content
pub const MESSAGE_LIMIT: usize = 2000;
/// Maximum length of an embed field value
pub const FIELD_LIMIT: usize = 1024;

/// Truncate text to `limit` bytes on a UTF-8 boundary, adding an ellipsis if cut
pub fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit.saturating_sub(3); // Room for "..."
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit message content
pub fn truncate_for_message(text: &str) -> String {
    truncate(text, MESSAGE_LIMIT)
}
