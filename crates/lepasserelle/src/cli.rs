// CLI Interface
//
// This module provides the command-line interface for mgsearch. Nothing
// persists between runs, so every invocation ingests its inputs first and
// then answers.

use crate::config::{EngineConfig, DEFAULT_CONFIG_FILE};
use crate::engine::Engine;
use crate::errors::format_error;
use anyhow::{Context, Result as AnyhowResult};
use clap::{Args, Parser, Subcommand};
use lerecherche::{extract_matching_line, highlight_term, parse_query, SearchResult};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// mgsearch - Local document search and autocomplete
#[derive(Parser, Debug)]
#[command(name = "mgsearch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rank local files and commit messages by keyword, and autocomplete words", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./mgsearch.toml when present)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Print JSON instead of text
    #[arg(global = true, long = "json")]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Sources ingested before a command runs
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// File to index (repeatable)
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Commit message to index (repeatable)
    #[arg(long = "commit", short = 'c', value_name = "MESSAGE")]
    pub commits: Vec<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the ingested documents against a query
    Search {
        /// Search query
        #[arg(value_name = "QUERY")]
        query: String,

        /// Documents and commit messages to search
        #[command(flatten)]
        inputs: InputArgs,

        /// Maximum number of results to return
        #[arg(long = "top-k")]
        top_k: Option<usize>,
    },

    /// Autocomplete a prefix from the ingested words
    Suggest {
        /// Word prefix
        #[arg(value_name = "PREFIX")]
        prefix: String,

        /// Documents and commit messages to take words from
        #[command(flatten)]
        inputs: InputArgs,

        /// Maximum number of suggestions to return
        #[arg(long = "limit")]
        limit: Option<usize>,
    },

    /// Print engine statistics after ingesting the inputs
    Stats {
        /// Documents and commit messages to ingest
        #[command(flatten)]
        inputs: InputArgs,
    },
}

impl Cli {
    /// Run the CLI
    pub fn run(self) -> AnyhowResult<()> {
        init_logging_impl(self.verbose);

        let config = load_config(self.config.as_ref())?;
        let json = self.json;

        match self.command {
            Commands::Search {
                query,
                inputs,
                top_k,
            } => {
                let mut engine = build_engine(config, &inputs);
                let top_k = top_k.unwrap_or(engine.config().search.max_results);
                let results = engine.search(&query, top_k);
                cmd_search_impl(&query, &results, json)
            }
            Commands::Suggest {
                prefix,
                inputs,
                limit,
            } => {
                let engine = build_engine(config, &inputs);
                let limit = limit.unwrap_or(engine.config().suggest.max_suggestions);
                let suggestions = engine.suggest(&prefix, limit);

                if json {
                    println!("{}", serde_json::to_string_pretty(&suggestions)?);
                } else if suggestions.is_empty() {
                    println!("No suggestions for: {}", prefix);
                } else {
                    for s in &suggestions {
                        println!("{} ({:.2}, used {}x)", s.text, s.score, s.frequency);
                    }
                }
                Ok(())
            }
            Commands::Stats { inputs } => {
                let engine = build_engine(config, &inputs);
                let stats = engine.stats();

                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    println!("Documents indexed:   {}", stats.documents_indexed);
                    println!("Suggestions indexed: {}", stats.suggestions_indexed);
                    println!("Queries served:      {}", stats.queries_served);
                    println!("Average latency:     {:.2}ms", stats.average_latency_ms);
                }
                Ok(())
            }
        }
    }
}

/// Initialize logging implementation
///
/// `RUST_LOG` wins unless `--verbose` is given.
fn init_logging_impl(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Explicit file must load; the default file is optional
fn load_config(explicit: Option<&PathBuf>) -> AnyhowResult<EngineConfig> {
    let config = match explicit {
        Some(path) => {
            anyhow::ensure!(path.exists(), "Config file not found: {:?}", path);
            EngineConfig::load(path)?
        }
        None => EngineConfig::load(DEFAULT_CONFIG_FILE)?,
    };

    let config = config.with_env_overrides();
    config
        .validate()
        .context("Invalid configuration after environment overrides")?;
    Ok(config)
}

/// Create an engine and ingest every input; failures are logged and skipped
pub fn build_engine(config: EngineConfig, inputs: &InputArgs) -> Engine {
    let mut engine = Engine::new(config);

    for path in &inputs.files {
        if let Err(e) = engine.try_ingest_file(path, None) {
            warn!("{}", format_error(&e));
        }
    }

    for (i, message) in inputs.commits.iter().enumerate() {
        if let Err(e) = engine.try_ingest_commit_message(message, i as u64 + 1, None) {
            warn!("{}", format_error(&e));
        }
    }

    debug!("Ingested {} document(s)", engine.documents().len());
    engine
}

/// Search command output
fn cmd_search_impl(query: &str, results: &[SearchResult], json: bool) -> AnyhowResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for: {}", query);
        return Ok(());
    }

    println!("\nFound {} result(s) for: '{}'\n", results.len(), query);
    for result in results {
        for line in render_result(query, result) {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Text lines for one result: header, then the first matching line of a
/// local file with the matched term highlighted
pub fn render_result(query: &str, result: &SearchResult) -> Vec<String> {
    let doc = &result.document;
    let mut lines = vec![format!(
        "{}. {} [{}] (score {:.3})",
        result.rank, doc.title, doc.source_tag, result.score.relevance
    )];

    if doc.is_local_file() {
        let tokens = parse_query(query).map(|q| q.tokens).unwrap_or_default();
        for token in &tokens {
            match extract_matching_line(&doc.title, token) {
                Ok(Some(found)) => {
                    lines.push(format!(
                        "   {}: {}",
                        found.line_number,
                        highlight_term(found.text.trim(), token)
                    ));
                    break;
                }
                Ok(None) => {}
                Err(e) => {
                    debug!("Could not reopen {}: {}", doc.title, e);
                    break;
                }
            }
        }
    } else {
        lines.push(format!("   Message: {}", doc.body));
    }

    lines
}

/// Main entry point for the CLI
pub fn main() -> AnyhowResult<()> {
    let cli = Cli::parse();
    cli.run()
}
