//! CLI command implementations.
//!
//! Each subcommand is a small function over an initialized
//! [`SnippetRepository`]; [`run`] builds the repository from the global flags
//! and routes to it. Unknown ids and empty expansion matches surface as
//! typed errors here, so `main` can turn them into a non-zero exit code.

use std::io::Read;
use std::path::PathBuf;

use crate::cli::args::{
    AddArgs, Cli, Commands, EditArgs, ExpandArgs, ListArgs, RmArgs, SearchArgs, ShowArgs,
    StatsArgs,
};
use crate::config::SnippetConfig;
use crate::error::{Result, SnipError};
use crate::expand;
use crate::repo::{JsonFileStore, SnippetRepository};
use crate::snippet::{NewSnippet, Snippet, SnippetPatch};

/// Build the repository and execute the requested subcommand.
pub fn run(cli: &Cli) -> Result<()> {
    let config = SnippetConfig {
        fuzzy_match: !cli.no_fuzzy,
        max_suggestions: cli
            .max_suggestions
            .unwrap_or_else(|| SnippetConfig::default().max_suggestions),
        ..Default::default()
    };

    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(JsonFileStore::default_path);
    let mut repo = SnippetRepository::new(config, Box::new(JsonFileStore::new(store_path)));
    repo.initialize();

    match &cli.command {
        Commands::List(args) => list(&repo, args),
        Commands::Search(args) => search(&repo, args),
        Commands::Expand(args) => expand_command(&mut repo, args),
        Commands::Show(args) => show(&repo, args),
        Commands::Add(args) => add(&mut repo, args, cli.quiet),
        Commands::Edit(args) => edit(&mut repo, args, cli.quiet),
        Commands::Rm(args) => rm(&mut repo, args, cli.quiet),
        Commands::Stats(args) => stats(&repo, args),
    }
}

fn list(repo: &SnippetRepository, args: &ListArgs) -> Result<()> {
    let snippets: Vec<&Snippet> = repo
        .get_all()
        .into_iter()
        .filter(|s| match &args.scope {
            Some(scope) => s.applies_to(scope),
            None => true,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snippets)?);
        return Ok(());
    }

    for snippet in snippets {
        print_snippet_line(snippet);
    }
    Ok(())
}

fn search(repo: &SnippetRepository, args: &SearchArgs) -> Result<()> {
    let results = repo.search(&args.query, args.scope.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for snippet in results {
        print_snippet_line(snippet);
    }
    Ok(())
}

fn expand_command(repo: &mut SnippetRepository, args: &ExpandArgs) -> Result<()> {
    let id = {
        let results = repo.search(&args.query, args.scope.as_deref());
        match results.first() {
            Some(snippet) => snippet.id.clone(),
            None => {
                return Err(SnipError::NoMatch {
                    query: args.query.clone(),
                })
            }
        }
    };

    // get() cannot miss here; search returned the id from the map.
    let snippet = repo.get(&id).cloned().ok_or(SnipError::SnippetNotFound {
        id: id.clone(),
    })?;
    let expansion = expand::expand(&snippet);

    println!("{}", expansion.expanded_text);

    if args.stops {
        let offsets: Vec<String> = expansion.stops.iter().map(usize::to_string).collect();
        eprintln!("stops: [{}]", offsets.join(", "));
    }

    if let Some(offset) = args.at {
        match expand::next_stop(&expansion, offset) {
            Some(stop) => eprintln!("next stop: {stop}"),
            None => eprintln!("next stop: none"),
        }
    }

    if !args.no_record {
        repo.record_usage(&id);
    }
    Ok(())
}

fn show(repo: &SnippetRepository, args: &ShowArgs) -> Result<()> {
    let snippet = repo.get(&args.id).ok_or_else(|| SnipError::SnippetNotFound {
        id: args.id.clone(),
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(snippet)?);
        return Ok(());
    }

    println!("id:          {}", snippet.id);
    println!("name:        {}", snippet.name);
    println!("prefixes:    {}", snippet.prefixes.join(", "));
    if let Some(description) = &snippet.description {
        println!("description: {description}");
    }
    if !snippet.scope.is_empty() {
        println!("scope:       {}", snippet.scope.join(", "));
    }
    println!("used:        {} times", snippet.usage_count);
    println!();
    println!("{}", snippet.body_text());
    Ok(())
}

fn add(repo: &mut SnippetRepository, args: &AddArgs, quiet: bool) -> Result<()> {
    let body = read_body(&args.body, args.body_file.as_ref())?;

    let id = repo.add(NewSnippet {
        name: args.name.clone(),
        prefixes: args.prefixes.clone(),
        body,
        description: args.description.clone(),
        scope: args.scope.clone(),
    });

    if quiet {
        println!("{id}");
    } else {
        println!("Added snippet {id}");
    }
    Ok(())
}

fn edit(repo: &mut SnippetRepository, args: &EditArgs, quiet: bool) -> Result<()> {
    let body = if args.body.is_empty() && args.body_file.is_none() {
        None
    } else {
        Some(read_body(&args.body, args.body_file.as_ref())?)
    };

    let patch = SnippetPatch {
        name: args.name.clone(),
        prefixes: (!args.prefixes.is_empty()).then(|| args.prefixes.clone()),
        body,
        // An empty --description clears the field.
        description: args
            .description
            .clone()
            .map(|d| (!d.is_empty()).then_some(d)),
        scope: (!args.scope.is_empty()).then(|| args.scope.clone()),
    };

    if !repo.update(&args.id, patch) {
        return Err(SnipError::SnippetNotFound {
            id: args.id.clone(),
        });
    }

    if !quiet {
        println!("Updated snippet {}", args.id);
    }
    Ok(())
}

fn rm(repo: &mut SnippetRepository, args: &RmArgs, quiet: bool) -> Result<()> {
    if !repo.remove(&args.id) {
        return Err(SnipError::SnippetNotFound {
            id: args.id.clone(),
        });
    }

    if !quiet {
        println!("Removed snippet {}", args.id);
    }
    Ok(())
}

fn stats(repo: &SnippetRepository, args: &StatsArgs) -> Result<()> {
    let mut snippets = repo.get_all();
    snippets.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));

    if args.json {
        let rows: Vec<serde_json::Value> = snippets
            .iter()
            .map(|s| {
                serde_json::json!({
                    "id": s.id,
                    "trigger": s.trigger(),
                    "usageCount": s.usage_count,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for snippet in snippets {
        println!(
            "{:>6}  {:<12} {}",
            snippet.usage_count,
            snippet.trigger(),
            snippet.name
        );
    }
    Ok(())
}

/// Body lines from repeated `--body` flags, a file, or stdin (in that order).
fn read_body(lines: &[String], file: Option<&PathBuf>) -> Result<Vec<String>> {
    if !lines.is_empty() {
        return Ok(lines.to_vec());
    }

    let content = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    Ok(content.lines().map(str::to_string).collect())
}

fn print_snippet_line(snippet: &Snippet) {
    println!(
        "{:<38} {:<12} {:<24} uses: {}",
        snippet.id,
        snippet.trigger(),
        snippet.name,
        snippet.usage_count
    );
}
