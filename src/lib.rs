//! snipstash - trigger-prefixed text snippets with placeholder expansion.
//!
//! Snippets are short, named text templates keyed by trigger prefixes. A
//! search over the trigger prefixes (fuzzy or literal) produces ranked
//! candidates; expanding one resolves numbered `${N:default}` placeholders
//! and `{{date}}`-style dynamic tokens into literal text plus an ordered
//! sequence of cursor stops for interactive fill-in.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings consumed by the repository
//! - [`error`] - Error types and result aliases
//! - [`expand`] - Template expansion engine
//! - [`repo`] - Snippet repository, built-ins, fuzzy search, persistence
//! - [`snippet`] - The snippet data model
//!
//! # Example
//!
//! ```
//! use snipstash::config::SnippetConfig;
//! use snipstash::repo::{MemoryStore, SnippetRepository};
//!
//! let mut repo = SnippetRepository::new(SnippetConfig::default(), Box::new(MemoryStore::new()));
//! repo.initialize();
//!
//! let results = repo.search("fn", None);
//! let expansion = snipstash::expand::expand(results[0]);
//! assert!(expansion.stops.first() == Some(&9));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod expand;
pub mod repo;
pub mod snippet;

pub use error::{Result, SnipError};
