//! HTML escaping for note text rendered by the presentation layer.
//!
//! # Responsibility
//! - Provide the sanitization boundary for user-authored titles, bodies and
//!   checklist item text before HTML insertion.
//!
//! # Invariants
//! - Escapes exactly `& < > " '`; everything else passes through unchanged.

/// Escapes HTML-significant characters in user text.
///
/// Must be applied to every note-derived string the presentation layer
/// injects into markup; note content is arbitrary user input.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}
