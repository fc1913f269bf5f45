//! Command-line interface for snipstash.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations over the repository

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::run;
