//! lepasserelle - Engine & Integration
//!
//! *La Passerelle* (The Bridge) - Ties the document store, the suggestion trie
//! and the ranker together behind one engine context, plus the mgsearch CLI

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Command-line interface
pub mod cli;
/// TOML configuration with environment overrides
pub mod config;
/// Engine context
pub mod engine;
/// Engine error types
pub mod errors;
/// Word extraction and document ingestion
pub mod ingest;
/// Word -> locator postings
pub mod lexical;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineStats};
pub use errors::{format_error, EngineError};
pub use ingest::{extract_words, lexical_form, IngestionPipeline};
pub use lexical::{LexicalIndex, WordLocations};

/// Bridge library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
