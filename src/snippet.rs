//! The persistent snippet data model.
//!
//! [`Snippet`] is the unit the repository stores and persists. Field names in
//! the serialized form are camelCase to stay compatible with data files
//! written by earlier versions, and `prefix`/`body`/`scope` accept either a
//! single string or an array on the way in (the legacy shape allowed both).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A named, triggerable text template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Opaque unique identifier. Never changes after creation.
    pub id: String,

    /// Human-readable label.
    pub name: String,

    /// Trigger prefixes. Non-empty; the first is canonical for display.
    #[serde(rename = "prefix", deserialize_with = "string_or_seq")]
    pub prefixes: Vec<String>,

    /// Template lines, joined with `\n` at expansion time.
    #[serde(deserialize_with = "string_or_seq")]
    pub body: Vec<String>,

    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Context tags restricting when the snippet is offered.
    /// Empty means the snippet applies everywhere.
    #[serde(default, deserialize_with = "string_or_seq")]
    pub scope: Vec<String>,

    /// Set once at creation. Never changes afterwards.
    pub created_at: DateTime<Utc>,

    /// Bumped on every mutation, including usage tracking.
    pub updated_at: DateTime<Utc>,

    /// Number of successful expansion-driven insertions.
    #[serde(default)]
    pub usage_count: u64,
}

impl Snippet {
    /// The canonical trigger prefix (the first one).
    pub fn trigger(&self) -> &str {
        self.prefixes.first().map(String::as_str).unwrap_or("")
    }

    /// The body as a single string with `\n` line separators.
    pub fn body_text(&self) -> String {
        self.body.join("\n")
    }

    /// Whether this snippet is offered in the given scope.
    ///
    /// A snippet with an empty scope set is universal.
    pub fn applies_to(&self, scope: &str) -> bool {
        self.scope.is_empty() || self.scope.iter().any(|s| s == scope)
    }
}

/// Caller-supplied fields for a snippet about to be created.
///
/// The repository assigns `id`, timestamps, and the usage counter.
#[derive(Debug, Clone, Default)]
pub struct NewSnippet {
    pub name: String,
    pub prefixes: Vec<String>,
    pub body: Vec<String>,
    pub description: Option<String>,
    pub scope: Vec<String>,
}

/// Partial update applied over an existing snippet.
///
/// `None` fields are left untouched. `id` and `created_at` cannot be patched.
#[derive(Debug, Clone, Default)]
pub struct SnippetPatch {
    pub name: Option<String>,
    pub prefixes: Option<Vec<String>>,
    pub body: Option<Vec<String>>,
    pub description: Option<Option<String>>,
    pub scope: Option<Vec<String>>,
}

/// Accepts `"foo"` or `["foo", "bar"]`.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrSeq {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrSeq::deserialize(deserializer)? {
        StringOrSeq::One(s) => vec![s],
        StringOrSeq::Many(v) => v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snippet {
        Snippet {
            id: "test-id".into(),
            name: "Test".into(),
            prefixes: vec!["fn".into(), "func".into()],
            body: vec!["line one".into(), "line two".into()],
            description: None,
            scope: vec!["rust".into()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
            usage_count: 0,
        }
    }

    #[test]
    fn trigger_is_first_prefix() {
        assert_eq!(sample().trigger(), "fn");
    }

    #[test]
    fn body_text_joins_lines_with_newline() {
        assert_eq!(sample().body_text(), "line one\nline two");
    }

    #[test]
    fn applies_to_matches_declared_scope() {
        let snippet = sample();
        assert!(snippet.applies_to("rust"));
        assert!(!snippet.applies_to("python"));
    }

    #[test]
    fn empty_scope_is_universal() {
        let mut snippet = sample();
        snippet.scope.clear();
        assert!(snippet.applies_to("anything"));
    }

    #[test]
    fn deserializes_string_prefix_and_body() {
        let json = r#"{
            "id": "legacy",
            "name": "Legacy",
            "prefix": "one",
            "body": "single line",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        }"#;
        let snippet: Snippet = serde_json::from_str(json).unwrap();
        assert_eq!(snippet.prefixes, vec!["one"]);
        assert_eq!(snippet.body, vec!["single line"]);
        assert!(snippet.scope.is_empty());
        assert_eq!(snippet.usage_count, 0);
    }

    #[test]
    fn deserializes_array_prefix_and_scope() {
        let json = r#"{
            "id": "modern",
            "name": "Modern",
            "prefix": ["a", "b"],
            "body": ["x", "y"],
            "scope": ["markdown"],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z",
            "usageCount": 3
        }"#;
        let snippet: Snippet = serde_json::from_str(json).unwrap();
        assert_eq!(snippet.prefixes, vec!["a", "b"]);
        assert_eq!(snippet.scope, vec!["markdown"]);
        assert_eq!(snippet.usage_count, 3);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("usageCount").is_some());
        assert!(value.get("prefix").is_some());
        assert!(value.get("prefixes").is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let snippet = sample();
        let json = serde_json::to_string(&snippet).unwrap();
        let back: Snippet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snippet);
    }
}
