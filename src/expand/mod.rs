//! Template expansion.
//!
//! Turns a [`Snippet`] body into insertable text: numbered placeholders are
//! resolved to their defaults with tab-stop offsets recorded
//! ([`placeholder`]), then built-in dynamic tokens are replaced with clock
//! values ([`dynvars`]). Expansion is a pure function of the snippet and the
//! clock; it performs no I/O and never fails.

pub mod dynvars;
pub mod placeholder;

use std::collections::HashMap;

use chrono::{DateTime, Local};
use regex::Regex;

use crate::snippet::Snippet;

pub use placeholder::PlaceholderVariable;

/// The result of expanding a snippet. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    /// Canonical prefix of the snippet that produced this expansion.
    pub trigger: String,

    /// Body with all placeholders and dynamic tokens resolved.
    pub expanded_text: String,

    /// Ascending byte offsets into `expanded_text`, one per placeholder
    /// occurrence, in tab-stop order.
    pub stops: Vec<usize>,

    /// Descriptor per distinct placeholder index, keyed by the index as a
    /// string.
    pub variables: HashMap<String, PlaceholderVariable>,
}

/// Expand a snippet against the current local time.
pub fn expand(snippet: &Snippet) -> Expansion {
    expand_at(snippet, Local::now())
}

/// Expand a snippet against an explicit clock snapshot.
pub fn expand_at(snippet: &Snippet, now: DateTime<Local>) -> Expansion {
    let body = snippet.body_text();
    let substituted = placeholder::substitute_placeholders(&body);
    let expanded_text = dynvars::resolve_dynamic_tokens_at(&substituted.text, now);

    Expansion {
        trigger: snippet.trigger().to_string(),
        expanded_text,
        stops: substituted.stops,
        variables: substituted.variables,
    }
}

/// Replace still-present placeholder tokens with user-supplied values.
///
/// Best-effort secondary pass for callers that did not eagerly resolve
/// placeholders to defaults: any `${N}` or `${N:default}` token whose index
/// appears in `values` is replaced literally. Stop offsets of the original
/// expansion are unaffected.
pub fn apply_values(expansion: &Expansion, values: &HashMap<String, String>) -> String {
    let mut result = expansion.expanded_text.clone();

    for (index, value) in values {
        let pattern = format!(r"\$\{{{}(?::[^}}]*)?\}}", regex::escape(index));
        // The pattern is built from a fixed template, so compilation only
        // fails on a pathological index; skip that entry rather than panic.
        if let Ok(re) = Regex::new(&pattern) {
            result = re.replace_all(&result, value.as_str()).into_owned();
        }
    }

    result
}

/// The smallest stop strictly greater than `current`, if any.
pub fn next_stop(expansion: &Expansion, current: usize) -> Option<usize> {
    expansion.stops.iter().copied().find(|&s| s > current)
}

/// The largest stop strictly smaller than `current`, if any.
pub fn previous_stop(expansion: &Expansion, current: usize) -> Option<usize> {
    expansion
        .stops
        .iter()
        .copied()
        .filter(|&s| s < current)
        .next_back()
}
