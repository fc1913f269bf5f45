//! Snippet repository: collection ownership, search, and persistence.
//!
//! The repository owns an insertion-ordered map `id -> Snippet` and a
//! [`SnippetStore`] collaborator. Built-in snippets are re-synthesized on
//! every [`SnippetRepository::initialize`]; only the custom partition (ids
//! outside [`builtin::BUILTIN_IDS`]) round-trips through the store, under the
//! `customSnippets` key of the stored value.
//!
//! Mutations auto-save best-effort: a failed save is logged and never
//! propagated, so the in-memory edit stays visible in-session. If rapid
//! mutations overlap, the last completed save wins; that is accepted
//! behavior, there is exactly one logical owner of the map.

pub mod builtin;
pub mod fuzzy;
pub mod store;

use chrono::Utc;
use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use crate::config::SnippetConfig;
use crate::error::Result;
use crate::snippet::{NewSnippet, Snippet, SnippetPatch};

pub use store::{JsonFileStore, MemoryStore, SnippetStore};

/// The key under which the custom partition lives in the stored value.
const CUSTOM_SNIPPETS_KEY: &str = "customSnippets";

/// Owns the in-memory snippet collection.
pub struct SnippetRepository {
    snippets: IndexMap<String, Snippet>,
    config: SnippetConfig,
    store: Box<dyn SnippetStore>,
}

impl SnippetRepository {
    /// Create an empty repository. Call [`initialize`](Self::initialize)
    /// before use.
    pub fn new(config: SnippetConfig, store: Box<dyn SnippetStore>) -> Self {
        Self {
            snippets: IndexMap::new(),
            config,
            store,
        }
    }

    /// Populate the map: built-ins first, then persisted custom snippets
    /// upserted by id.
    ///
    /// Absent or malformed persisted data is logged and ignored; the
    /// repository always comes up with at least the built-in set.
    pub fn initialize(&mut self) {
        self.snippets.clear();

        let now = Utc::now();
        for snippet in builtin::builtins(now) {
            self.snippets.insert(snippet.id.clone(), snippet);
        }

        match self.store.load() {
            Ok(Some(value)) => match parse_custom_snippets(&value) {
                Ok(custom) => {
                    tracing::debug!("Loaded {} custom snippets", custom.len());
                    for snippet in custom {
                        self.snippets.insert(snippet.id.clone(), snippet);
                    }
                }
                Err(message) => {
                    tracing::warn!("Ignoring malformed custom snippet data: {message}");
                }
            },
            Ok(None) => {
                tracing::debug!("No custom snippet data found, using built-ins only");
            }
            Err(e) => {
                tracing::warn!("Failed to load custom snippets: {e}");
            }
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &SnippetConfig {
        &self.config
    }

    /// Search snippets by trigger prefix, ranked by usage.
    ///
    /// A snippet declaring a non-empty scope set is excluded when `scope` is
    /// given and not contained in it. The query is tested against every
    /// prefix of a snippet, fuzzily ([`fuzzy::is_subsequence_match`]) or as a
    /// case-insensitive literal prefix depending on configuration; any
    /// matching prefix includes the snippet. Results are sorted by usage
    /// count descending with ties keeping map insertion order, then
    /// truncated to the configured suggestion limit. With `enabled = false`
    /// nothing is offered and the result is always empty.
    pub fn search(&self, query: &str, scope: Option<&str>) -> Vec<&Snippet> {
        if !self.config.enabled {
            return Vec::new();
        }

        let query_lower = query.to_lowercase();

        let mut results: Vec<&Snippet> = self
            .snippets
            .values()
            .filter(|snippet| match scope {
                Some(scope) => snippet.applies_to(scope),
                None => true,
            })
            .filter(|snippet| {
                snippet.prefixes.iter().any(|prefix| {
                    if self.config.fuzzy_match {
                        fuzzy::is_subsequence_match(query, prefix)
                    } else {
                        prefix.to_lowercase().starts_with(&query_lower)
                    }
                })
            })
            .collect();

        // Stable sort keeps insertion order for equal usage counts.
        results.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        results.truncate(self.config.suggestion_limit());
        results
    }

    /// Insert a new custom snippet and return its fresh id.
    ///
    /// Persistence is best-effort; a failed save is logged, not returned.
    pub fn add(&mut self, new: NewSnippet) -> String {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let snippet = Snippet {
            id: id.clone(),
            name: new.name,
            prefixes: new.prefixes,
            body: new.body,
            description: new.description,
            scope: new.scope,
            created_at: now,
            updated_at: now,
            usage_count: 0,
        };

        self.snippets.insert(id.clone(), snippet);
        self.persist();
        id
    }

    /// Merge a patch over an existing snippet.
    ///
    /// Returns `false` (and changes nothing) for an unknown id. `id` and
    /// `created_at` are preserved; `updated_at` is bumped.
    pub fn update(&mut self, id: &str, patch: SnippetPatch) -> bool {
        let Some(snippet) = self.snippets.get_mut(id) else {
            return false;
        };

        if let Some(name) = patch.name {
            snippet.name = name;
        }
        if let Some(prefixes) = patch.prefixes {
            snippet.prefixes = prefixes;
        }
        if let Some(body) = patch.body {
            snippet.body = body;
        }
        if let Some(description) = patch.description {
            snippet.description = description;
        }
        if let Some(scope) = patch.scope {
            snippet.scope = scope;
        }
        snippet.updated_at = Utc::now();

        self.persist();
        true
    }

    /// Delete a snippet. Returns whether a deletion occurred.
    pub fn remove(&mut self, id: &str) -> bool {
        // shift_remove keeps the insertion order of the remaining entries.
        let removed = self.snippets.shift_remove(id).is_some();
        if removed {
            self.persist();
        }
        removed
    }

    /// Look up a snippet by id.
    pub fn get(&self, id: &str) -> Option<&Snippet> {
        self.snippets.get(id)
    }

    /// All snippets in map (insertion) order.
    pub fn get_all(&self) -> Vec<&Snippet> {
        self.snippets.values().collect()
    }

    /// Count one successful expansion-driven insertion.
    ///
    /// Returns `false` for an unknown id.
    pub fn record_usage(&mut self, id: &str) -> bool {
        let Some(snippet) = self.snippets.get_mut(id) else {
            return false;
        };

        snippet.usage_count += 1;
        snippet.updated_at = Utc::now();
        self.persist();
        true
    }

    /// Write the custom partition to the store.
    ///
    /// The custom partition is recomputed as every snippet whose id is not
    /// built-in, and merged into whatever other keys the stored value
    /// already carries. Built-ins are never written.
    pub fn save(&self) -> Result<()> {
        let custom: Vec<&Snippet> = self
            .snippets
            .values()
            .filter(|s| !builtin::is_builtin(&s.id))
            .collect();

        // Unreadable existing data is replaced rather than merged.
        let mut data = match self.store.load() {
            Ok(Some(Value::Object(map))) => Value::Object(map),
            _ => Value::Object(serde_json::Map::new()),
        };

        data[CUSTOM_SNIPPETS_KEY] = serde_json::to_value(&custom)?;
        self.store.save(&data)?;

        tracing::debug!("Saved {} custom snippets", custom.len());
        Ok(())
    }

    /// Best-effort auto-save after a mutation.
    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to save custom snippets: {e}");
        }
    }
}

/// Pull the custom snippet list out of a stored value.
fn parse_custom_snippets(value: &Value) -> std::result::Result<Vec<Snippet>, String> {
    match value.get(CUSTOM_SNIPPETS_KEY) {
        Some(list) => {
            serde_json::from_value(list.clone()).map_err(|e| e.to_string())
        }
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo() -> SnippetRepository {
        let mut repo =
            SnippetRepository::new(SnippetConfig::default(), Box::new(MemoryStore::new()));
        repo.initialize();
        repo
    }

    fn new_snippet(name: &str, prefix: &str) -> NewSnippet {
        NewSnippet {
            name: name.into(),
            prefixes: vec![prefix.into()],
            body: vec!["body of ${1:x}".into()],
            description: None,
            scope: Vec::new(),
        }
    }

    #[test]
    fn initialize_registers_builtins() {
        let repo = repo();
        for id in builtin::BUILTIN_IDS {
            assert!(repo.get(id).is_some(), "missing built-in {id}");
        }
        assert_eq!(repo.get_all().len(), builtin::BUILTIN_IDS.len());
    }

    #[test]
    fn initialize_merges_stored_custom_snippets() {
        let stored = json!({
            "customSnippets": [{
                "id": "custom-1",
                "name": "Custom",
                "prefix": "cst",
                "body": ["hello"],
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z",
                "usageCount": 2
            }]
        });
        let mut repo = SnippetRepository::new(
            SnippetConfig::default(),
            Box::new(MemoryStore::with_value(stored)),
        );
        repo.initialize();

        let custom = repo.get("custom-1").unwrap();
        assert_eq!(custom.name, "Custom");
        assert_eq!(custom.usage_count, 2);
    }

    #[test]
    fn initialize_survives_malformed_data() {
        let mut repo = SnippetRepository::new(
            SnippetConfig::default(),
            Box::new(MemoryStore::with_value(json!({"customSnippets": "oops"}))),
        );
        repo.initialize();
        // Built-ins only, no panic, no failure.
        assert_eq!(repo.get_all().len(), builtin::BUILTIN_IDS.len());
    }

    #[test]
    fn stored_snippet_overrides_builtin_with_same_id() {
        let stored = json!({
            "customSnippets": [{
                "id": "js-function",
                "name": "Shadowed",
                "prefix": "func",
                "body": ["x"],
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }]
        });
        let mut repo = SnippetRepository::new(
            SnippetConfig::default(),
            Box::new(MemoryStore::with_value(stored)),
        );
        repo.initialize();
        assert_eq!(repo.get("js-function").unwrap().name, "Shadowed");
    }

    #[test]
    fn add_assigns_id_and_timestamps() {
        let mut repo = repo();
        let id = repo.add(new_snippet("Mine", "mn"));

        let snippet = repo.get(&id).unwrap();
        assert_eq!(snippet.id, id);
        assert_eq!(snippet.usage_count, 0);
        assert_eq!(snippet.created_at, snippet.updated_at);
        assert!(!builtin::is_builtin(&id));
    }

    #[test]
    fn update_merges_patch_and_preserves_identity() {
        let mut repo = repo();
        let id = repo.add(new_snippet("Before", "bf"));
        let created_at = repo.get(&id).unwrap().created_at;

        let updated = repo.update(
            &id,
            SnippetPatch {
                name: Some("After".into()),
                ..Default::default()
            },
        );
        assert!(updated);

        let snippet = repo.get(&id).unwrap();
        assert_eq!(snippet.name, "After");
        assert_eq!(snippet.prefixes, vec!["bf"]);
        assert_eq!(snippet.created_at, created_at);
        assert!(snippet.updated_at >= created_at);
    }

    #[test]
    fn update_unknown_id_returns_false_and_changes_nothing() {
        let mut repo = repo();
        let before: Vec<Snippet> = repo.get_all().into_iter().cloned().collect();

        assert!(!repo.update("nope", SnippetPatch::default()));

        let after: Vec<Snippet> = repo.get_all().into_iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn remove_reports_whether_deletion_occurred() {
        let mut repo = repo();
        let id = repo.add(new_snippet("Gone", "gn"));

        assert!(repo.remove(&id));
        assert!(repo.get(&id).is_none());
        assert!(!repo.remove(&id));
    }

    #[test]
    fn record_usage_increments_and_bumps_updated_at() {
        let mut repo = repo();
        let id = repo.add(new_snippet("Used", "us"));

        assert!(repo.record_usage(&id));
        assert!(repo.record_usage(&id));
        assert_eq!(repo.get(&id).unwrap().usage_count, 2);
        assert!(!repo.record_usage("unknown"));
    }

    #[test]
    fn search_matches_fuzzy_subsequence() {
        let repo = repo();
        let results = repo.search("fnc", None);
        assert!(results.iter().any(|s| s.id == "js-function"));
    }

    #[test]
    fn search_literal_prefix_mode() {
        let mut repo = SnippetRepository::new(
            SnippetConfig {
                fuzzy_match: false,
                ..Default::default()
            },
            Box::new(MemoryStore::new()),
        );
        repo.initialize();

        assert!(repo.search("fu", None).iter().any(|s| s.id == "js-function"));
        // Subsequence but not a literal prefix.
        assert!(repo.search("fnc", None).is_empty());
    }

    #[test]
    fn search_scope_excludes_foreign_snippets() {
        let repo = repo();
        let results = repo.search("code", Some("python"));
        assert!(!results.iter().any(|s| s.id == "md-code-block"));
    }

    #[test]
    fn search_universal_snippets_match_any_scope() {
        let repo = repo();
        let results = repo.search("note", Some("python"));
        assert!(results.iter().any(|s| s.id == "note-template"));
    }

    #[test]
    fn search_any_prefix_alias_matches() {
        let mut repo = repo();
        let id = repo.add(NewSnippet {
            name: "Aliased".into(),
            prefixes: vec!["alpha".into(), "beta".into()],
            body: vec!["x".into()],
            description: None,
            scope: Vec::new(),
        });

        assert!(repo.search("beta", None).iter().any(|s| s.id == id));
    }

    #[test]
    fn search_ranks_by_usage_and_truncates() {
        let mut repo = SnippetRepository::new(
            SnippetConfig {
                max_suggestions: 10,
                ..Default::default()
            },
            Box::new(MemoryStore::new()),
        );
        repo.initialize();

        let mut ids = Vec::new();
        for i in 0..15 {
            ids.push(repo.add(new_snippet(&format!("S{i}"), &format!("zz{i}"))));
        }
        // Give the last five the highest usage counts.
        for (bump, id) in ids.iter().rev().take(5).enumerate() {
            for _ in 0..(bump + 1) {
                repo.record_usage(id);
            }
        }

        let results = repo.search("zz", None);
        assert_eq!(results.len(), 10);
        // The five bumped snippets come first, most used first.
        assert_eq!(results[0].id, ids[10]);
        for window in results.windows(2) {
            assert!(window[0].usage_count >= window[1].usage_count);
        }
        // Ties (usage 0) keep insertion order.
        assert_eq!(results[5].id, ids[0]);
    }

    #[test]
    fn search_returns_nothing_when_disabled() {
        let mut repo = SnippetRepository::new(
            SnippetConfig {
                enabled: false,
                ..Default::default()
            },
            Box::new(MemoryStore::new()),
        );
        repo.initialize();
        assert!(repo.search("func", None).is_empty());
        // Direct lookups still work; only offering is switched off.
        assert!(repo.get("js-function").is_some());
    }

    #[test]
    fn search_no_match_is_empty_not_an_error() {
        let repo = repo();
        assert!(repo.search("qqqqqq", None).is_empty());
    }

    #[test]
    fn save_writes_only_the_custom_partition() {
        let mut repo = repo();
        let id = repo.add(new_snippet("Custom", "cu"));
        repo.save().unwrap();

        let stored = repo.store.load().unwrap().unwrap();
        let custom = stored["customSnippets"].as_array().unwrap();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0]["id"], id.as_str());
    }

    #[test]
    fn save_merges_into_foreign_store_keys() {
        let mut repo = SnippetRepository::new(
            SnippetConfig::default(),
            Box::new(MemoryStore::with_value(json!({"otherPluginData": 7}))),
        );
        repo.initialize();
        repo.add(new_snippet("Custom", "cu"));

        let stored = repo.store.load().unwrap().unwrap();
        assert_eq!(stored["otherPluginData"], 7);
        assert_eq!(stored["customSnippets"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn round_trip_through_fresh_repository() {
        let store_value;
        let id;
        let original;
        {
            let mut repo = repo();
            id = repo.add(NewSnippet {
                name: "Round Trip".into(),
                prefixes: vec!["rt".into()],
                body: vec!["line".into()],
                description: Some("desc".into()),
                scope: vec!["markdown".into()],
            });
            repo.save().unwrap();
            original = repo.get(&id).unwrap().clone();
            store_value = repo.store.load().unwrap().unwrap();
        }

        let mut fresh = SnippetRepository::new(
            SnippetConfig::default(),
            Box::new(MemoryStore::with_value(store_value)),
        );
        fresh.initialize();

        assert_eq!(fresh.get(&id), Some(&original));
        assert_eq!(
            fresh.get_all().len(),
            builtin::BUILTIN_IDS.len() + 1,
            "built-ins unaffected"
        );
    }

    #[test]
    fn mutation_survives_failing_store() {
        struct FailingStore;
        impl SnippetStore for FailingStore {
            fn load(&self) -> Result<Option<Value>> {
                Ok(None)
            }
            fn save(&self, _: &Value) -> Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "ro").into())
            }
        }

        let mut repo = SnippetRepository::new(SnippetConfig::default(), Box::new(FailingStore));
        repo.initialize();

        // add/update/record_usage do not propagate the save failure.
        let id = repo.add(new_snippet("Volatile", "vo"));
        assert!(repo.record_usage(&id));
        assert_eq!(repo.get(&id).unwrap().usage_count, 1);
        // Explicit save does report it.
        assert!(repo.save().is_err());
    }
}
