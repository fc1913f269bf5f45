//! Numbered placeholder parsing and substitution.
//!
//! A template body may contain placeholders of the form `${1}` or
//! `${2:default text}`. Expansion replaces each occurrence with its default
//! value (empty when the colon form is absent) and records, per occurrence, a
//! cursor stop offset into the final expanded text.
//!
//! Replacement walks the matches right-to-left so that splicing a span never
//! invalidates the offsets of the not-yet-processed matches to its left. Stop
//! offsets are reported against the final expanded text: a span's stop is its
//! original start shifted by the length delta of every replacement to its
//! left. The collected stops are sorted ascending at the end, and that sorted
//! order is the tab-stop sequence.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Matches `${N}` and `${N:default}`; the default may not contain `}`.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\d+)(?::([^}]*))?\}").unwrap());

/// Descriptor for a distinct placeholder index, registered on first sight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderVariable {
    /// Synthetic name, `var<N>`.
    pub name: String,
    /// Default value of the first occurrence of this index.
    pub default_value: String,
    /// Synthetic description, `Variable <N>`.
    pub description: String,
}

/// One placeholder occurrence found in the original template.
#[derive(Debug, Clone)]
struct PlaceholderMatch {
    start: usize,
    end: usize,
    default_value: String,
}

/// Result of substituting every placeholder in a template.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionResult {
    /// Template with every placeholder span replaced by its default value.
    pub text: String,
    /// Ascending byte offsets, one per placeholder occurrence.
    pub stops: Vec<usize>,
    /// One descriptor per distinct index, keyed by the index as a string.
    pub variables: HashMap<String, PlaceholderVariable>,
}

/// Replace every placeholder in `template` and compute tab-stop offsets.
///
/// A template with no placeholders yields the input unchanged and an empty
/// stop list.
pub fn substitute_placeholders(template: &str) -> SubstitutionResult {
    let mut matches = Vec::new();
    let mut variables = HashMap::new();

    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let full = caps.get(0).unwrap();
        let index = caps.get(1).unwrap().as_str();
        let default_value = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();

        // First occurrence of an index defines its descriptor.
        variables
            .entry(index.to_string())
            .or_insert_with(|| PlaceholderVariable {
                name: format!("var{index}"),
                default_value: default_value.clone(),
                description: format!("Variable {index}"),
            });

        matches.push(PlaceholderMatch {
            start: full.start(),
            end: full.end(),
            default_value,
        });
    }

    // Rightmost span first, so earlier offsets stay valid while splicing.
    matches.sort_by(|a, b| b.start.cmp(&a.start));

    let mut text = template.to_string();
    for m in &matches {
        text.replace_range(m.start..m.end, &m.default_value);
    }

    // Stops are offsets into the final text: walk the spans left-to-right,
    // shifting each start by the accumulated length delta of the
    // replacements before it.
    let mut stops = Vec::with_capacity(matches.len());
    let mut delta: isize = 0;
    for m in matches.iter().rev() {
        stops.push((m.start as isize + delta) as usize);
        delta += m.default_value.len() as isize - (m.end - m.start) as isize;
    }

    stops.sort_unstable();

    SubstitutionResult {
        text,
        stops,
        variables,
    }
}
