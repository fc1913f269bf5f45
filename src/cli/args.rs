//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// snipstash - trigger-prefixed text snippets.
#[derive(Debug, Parser)]
#[command(name = "snipstash")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the snippet store file (overrides ~/.snipstash/snippets.json)
    #[arg(short, long, global = true, env = "SNIPSTASH_STORE")]
    pub store: Option<PathBuf>,

    /// Use literal prefix matching instead of fuzzy matching
    #[arg(long, global = true)]
    pub no_fuzzy: bool,

    /// Maximum number of suggestions a search returns (1..=20)
    #[arg(long, global = true, value_name = "N")]
    pub max_suggestions: Option<usize>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all snippets
    List(ListArgs),

    /// Search snippets by trigger prefix
    Search(SearchArgs),

    /// Expand the best match for a trigger and print the result
    Expand(ExpandArgs),

    /// Show a single snippet by id
    Show(ShowArgs),

    /// Add a new snippet
    Add(AddArgs),

    /// Edit an existing snippet
    Edit(EditArgs),

    /// Remove a snippet by id
    Rm(RmArgs),

    /// Show usage statistics
    Stats(StatsArgs),
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Only snippets applying to this scope (e.g., markdown)
    #[arg(long)]
    pub scope: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `search` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SearchArgs {
    /// Trigger prefix to search for
    pub query: String,

    /// Only snippets applying to this scope
    #[arg(long)]
    pub scope: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `expand` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExpandArgs {
    /// Trigger prefix; the highest-ranked match is expanded
    pub query: String,

    /// Only snippets applying to this scope
    #[arg(long)]
    pub scope: Option<String>,

    /// Also print tab-stop offsets on stderr
    #[arg(long)]
    pub stops: bool,

    /// Report the next tab stop after this offset on stderr
    #[arg(long, value_name = "OFFSET")]
    pub at: Option<usize>,

    /// Do not count this expansion in usage statistics
    #[arg(long)]
    pub no_record: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Snippet id
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AddArgs {
    /// Human-readable snippet name
    #[arg(long)]
    pub name: String,

    /// Trigger prefix (repeatable; the first is canonical)
    #[arg(long = "prefix", required = true)]
    pub prefixes: Vec<String>,

    /// Body line (repeatable, in order)
    #[arg(long = "body")]
    pub body: Vec<String>,

    /// Read the body from a file instead
    #[arg(long, conflicts_with = "body")]
    pub body_file: Option<PathBuf>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Scope tag (repeatable; none means universal)
    #[arg(long = "scope")]
    pub scope: Vec<String>,
}

/// Arguments for the `edit` command.
#[derive(Debug, Clone, clap::Args)]
pub struct EditArgs {
    /// Snippet id
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// Replacement trigger prefixes (repeatable)
    #[arg(long = "prefix")]
    pub prefixes: Vec<String>,

    /// Replacement body lines (repeatable, in order)
    #[arg(long = "body")]
    pub body: Vec<String>,

    /// Read the replacement body from a file instead
    #[arg(long, conflicts_with = "body")]
    pub body_file: Option<PathBuf>,

    /// New description (an empty string clears it)
    #[arg(long)]
    pub description: Option<String>,

    /// Replacement scope tags (repeatable)
    #[arg(long = "scope")]
    pub scope: Vec<String>,
}

/// Arguments for the `rm` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RmArgs {
    /// Snippet id
    pub id: String,
}

/// Arguments for the `stats` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
