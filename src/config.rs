//! Snippet engine configuration.
//!
//! The repository consumes a small settings surface: whether expansion is
//! enabled at all, whether search uses fuzzy (subsequence) matching or literal
//! prefix matching, and how many suggestions a search may return.

use serde::{Deserialize, Serialize};

/// Lower bound for `max_suggestions`.
pub const MIN_SUGGESTIONS: usize = 1;

/// Upper bound for `max_suggestions`.
pub const MAX_SUGGESTIONS: usize = 20;

/// Settings consumed by the snippet repository.
///
/// All fields have defaults, so a partial config merges over
/// [`SnippetConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetConfig {
    /// Whether snippet expansion is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Fuzzy (subsequence) matching vs. literal prefix matching.
    #[serde(default = "default_fuzzy_match")]
    pub fuzzy_match: bool,

    /// Maximum number of suggestions returned by a search.
    ///
    /// Treated as a hard truncation bound, clamped to 1..=20.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_fuzzy_match() -> bool {
    true
}

fn default_max_suggestions() -> usize {
    10
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            fuzzy_match: default_fuzzy_match(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl SnippetConfig {
    /// The effective suggestion bound, clamped to the supported range.
    pub fn suggestion_limit(&self) -> usize {
        self.max_suggestions.clamp(MIN_SUGGESTIONS, MAX_SUGGESTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SnippetConfig::default();
        assert!(config.enabled);
        assert!(config.fuzzy_match);
        assert_eq!(config.max_suggestions, 10);
    }

    #[test]
    fn suggestion_limit_clamps_low() {
        let config = SnippetConfig {
            max_suggestions: 0,
            ..Default::default()
        };
        assert_eq!(config.suggestion_limit(), 1);
    }

    #[test]
    fn suggestion_limit_clamps_high() {
        let config = SnippetConfig {
            max_suggestions: 500,
            ..Default::default()
        };
        assert_eq!(config.suggestion_limit(), 20);
    }

    #[test]
    fn suggestion_limit_passes_through_in_range() {
        let config = SnippetConfig {
            max_suggestions: 15,
            ..Default::default()
        };
        assert_eq!(config.suggestion_limit(), 15);
    }

    #[test]
    fn partial_config_merges_over_defaults() {
        let config: SnippetConfig = serde_json::from_str(r#"{"fuzzyMatch": false}"#).unwrap();
        assert!(config.enabled);
        assert!(!config.fuzzy_match);
        assert_eq!(config.max_suggestions, 10);
    }
}
