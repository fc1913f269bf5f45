//! Built-in dynamic token resolution.
//!
//! After placeholder substitution, a final pass replaces `{{date}}`-style
//! tokens with values computed from a single clock snapshot, so every
//! occurrence of a token within one expansion is identical even if the call
//! straddles a clock tick. Unknown `{{...}}` tokens are left untouched.

use chrono::{DateTime, Local};

/// Replace every dynamic token in `text` using the current local time.
pub fn resolve_dynamic_tokens(text: &str) -> String {
    resolve_dynamic_tokens_at(text, Local::now())
}

/// Replace every dynamic token in `text` against an explicit clock snapshot.
///
/// Separated from [`resolve_dynamic_tokens`] so tests can pin the clock.
pub fn resolve_dynamic_tokens_at(text: &str, now: DateTime<Local>) -> String {
    let replacements = [
        ("{{date}}", now.format("%Y-%m-%d").to_string()),
        ("{{time}}", now.format("%H:%M:%S").to_string()),
        ("{{datetime}}", now.to_rfc3339()),
        ("{{year}}", now.format("%Y").to_string()),
        ("{{month}}", now.format("%m").to_string()),
        ("{{day}}", now.format("%d").to_string()),
        ("{{timestamp}}", now.timestamp_millis().to_string()),
    ];

    let mut result = text.to_string();
    for (token, value) in &replacements {
        if result.contains(token) {
            result = result.replace(token, value);
        }
    }
    result
}
