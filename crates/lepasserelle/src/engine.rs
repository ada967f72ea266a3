// Engine - Core Orchestration
//
// *Le Moteur* (The Engine) - One context object owning the store, the
// suggestion trie, the lexical index and the query statistics

use crate::config::EngineConfig;
use crate::errors::{EngineError, Result};
use crate::ingest::IngestionPipeline;
use crate::lexical::{LexicalIndex, WordLocations};
use leprefixe::{Suggestion, SuggestionIndex, SuggestionSource};
use lerecherche::{QueryProcessor, SearchResult};
use lestockage::{Document, DocumentId, DocumentStore};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Engine - Main orchestration struct
///
/// Every mutating operation takes `&mut self`; share it behind a `Mutex`
/// when several threads need it.
///
/// # Example
///
/// ```
/// use lepasserelle::{Engine, EngineConfig};
///
/// let mut engine = Engine::new(EngineConfig::default());
/// engine.ingest_text("hello world", "greeting", None);
/// let results = engine.search("hello", 5);
/// assert_eq!(results[0].document.title, "greeting");
/// ```
#[derive(Debug)]
pub struct Engine<L: LexicalIndex = WordLocations> {
    /// Active configuration
    config: EngineConfig,

    /// Document log
    store: DocumentStore,

    /// Autocomplete trie
    suggestions: SuggestionIndex,

    /// Word -> locator postings (written, not read by search)
    lexical: L,

    /// Ranker and query statistics
    processor: QueryProcessor,

    /// Cleared by `shutdown`
    initialized: bool,
}

/// Snapshot of engine statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineStats {
    /// Documents added since the last initialization
    pub documents_indexed: usize,

    /// Queries that reached the scoring scan
    pub queries_served: usize,

    /// Mean latency over served queries
    pub average_latency_ms: f64,

    /// Distinct words in the suggestion index
    pub suggestions_indexed: usize,
}

impl Engine<WordLocations> {
    /// Create an initialized engine with the in-memory lexical index
    pub fn new(config: EngineConfig) -> Self {
        Self::with_lexical(config, WordLocations::new())
    }
}

impl<L: LexicalIndex> Engine<L> {
    /// Create an initialized engine writing words to `lexical`
    pub fn with_lexical(config: EngineConfig, lexical: L) -> Self {
        let store = store_for(&config);
        info!(
            "Search engine initialized (capacity {})",
            config.store.document_capacity
        );

        Self {
            config,
            store,
            suggestions: SuggestionIndex::new(),
            lexical,
            processor: QueryProcessor::new(),
            initialized: true,
        }
    }

    /// Start over with empty state and the current store limits.
    ///
    /// Document ids continue from where they left off.
    pub fn initialize(&mut self) {
        self.teardown();
        self.store.reset(
            self.config.store.document_capacity,
            self.config.store.max_body_length,
        );
        self.initialized = true;
        info!("Search engine initialized");
    }

    /// Release all state; later calls are no-ops until `initialize`
    pub fn shutdown(&mut self) {
        if !self.initialized {
            debug!("Shutdown on an engine that is not initialized");
            return;
        }
        self.teardown();
        self.initialized = false;
        info!("Search engine shut down");
    }

    /// Whether the engine accepts operations
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn teardown(&mut self) {
        self.store.clear();
        self.suggestions.clear();
        self.lexical.clear();
        self.processor.reset_stats();
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            warn!("Search engine not initialized");
            Err(EngineError::NotInitialized)
        }
    }

    fn pipeline(&mut self) -> IngestionPipeline<'_, L> {
        IngestionPipeline::new(
            &mut self.store,
            &mut self.suggestions,
            &mut self.lexical,
            &self.config.ingest,
        )
    }

    // ===== Ingestion =====

    /// Ingest a file, reporting why nothing was added
    pub fn try_ingest_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        score: Option<f32>,
    ) -> Result<DocumentId> {
        self.ensure_initialized()?;
        self.pipeline().ingest_file(path, score)
    }

    /// Ingest free text under `label`, reporting why nothing was added
    pub fn try_ingest_text(
        &mut self,
        text: &str,
        label: &str,
        score: Option<f32>,
    ) -> Result<DocumentId> {
        self.ensure_initialized()?;
        self.pipeline().ingest_text(text, label, score)
    }

    /// Ingest a commit message, reporting why nothing was added
    pub fn try_ingest_commit_message(
        &mut self,
        message: &str,
        commit_id: u64,
        score: Option<f32>,
    ) -> Result<DocumentId> {
        self.ensure_initialized()?;
        self.pipeline().ingest_commit_message(message, commit_id, score)
    }

    /// Ingest an assembled document, reporting why nothing was added
    pub fn try_ingest_document(
        &mut self,
        document: Document,
        score: Option<f32>,
    ) -> Result<DocumentId> {
        self.ensure_initialized()?;
        self.pipeline().ingest_document(document, score)
    }

    /// Add one word to autocomplete, reporting why it was rejected
    pub fn try_add_suggestion(&mut self, word: &str, score: f32) -> Result<Suggestion> {
        self.ensure_initialized()?;
        if !self
            .suggestions
            .add_suggestion(word, score, SuggestionSource::Manual)
        {
            return Err(EngineError::EmptyInput);
        }
        self.suggestions.lookup(word).ok_or(EngineError::EmptyInput)
    }

    /// Ingest a file; `None` when nothing was added
    pub fn ingest_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        score: Option<f32>,
    ) -> Option<DocumentId> {
        self.try_ingest_file(path, score).ok()
    }

    /// Ingest free text; `None` when nothing was added
    pub fn ingest_text(
        &mut self,
        text: &str,
        label: &str,
        score: Option<f32>,
    ) -> Option<DocumentId> {
        self.try_ingest_text(text, label, score).ok()
    }

    /// Ingest a commit message; `None` when nothing was added
    pub fn ingest_commit_message(
        &mut self,
        message: &str,
        commit_id: u64,
        score: Option<f32>,
    ) -> Option<DocumentId> {
        self.try_ingest_commit_message(message, commit_id, score).ok()
    }

    /// Ingest an assembled document; `None` when nothing was added
    pub fn ingest_document(
        &mut self,
        document: Document,
        score: Option<f32>,
    ) -> Option<DocumentId> {
        self.try_ingest_document(document, score).ok()
    }

    /// Add one word to autocomplete; returns the updated entry
    pub fn add_suggestion(&mut self, word: &str, score: f32) -> Option<Suggestion> {
        self.try_add_suggestion(word, score).ok()
    }

    // ===== Queries =====

    /// Ranked documents for `query`, capped by `search.max_results`
    pub fn search(&mut self, query: &str, max_results: usize) -> Vec<SearchResult> {
        if self.ensure_initialized().is_err() {
            return Vec::new();
        }
        let cap = max_results.min(self.config.search.max_results);
        self.processor.search(&self.store, query, cap)
    }

    /// Search with the configured result cap
    pub fn search_default(&mut self, query: &str) -> Vec<SearchResult> {
        self.search(query, self.config.search.max_results)
    }

    /// Autocomplete `prefix`, capped by `suggest.max_suggestions`
    pub fn suggest(&self, prefix: &str, max_results: usize) -> Vec<Suggestion> {
        if self.ensure_initialized().is_err() {
            return Vec::new();
        }
        let cap = max_results.min(self.config.suggest.max_suggestions);
        self.suggestions.suggest(prefix, cap)
    }

    /// Autocomplete with the configured cap
    pub fn suggest_default(&self, prefix: &str) -> Vec<Suggestion> {
        self.suggest(prefix, self.config.suggest.max_suggestions)
    }

    // ===== Introspection =====

    /// Current statistics
    pub fn stats(&self) -> EngineStats {
        let query_stats = self.processor.stats();
        EngineStats {
            documents_indexed: self.store.total_documents(),
            queries_served: query_stats.queries_served,
            average_latency_ms: query_stats.average_latency_ms,
            suggestions_indexed: self.suggestions.len(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Caps and scores apply immediately; store limits apply from the next
    /// `initialize`.
    pub fn update_config(&mut self, config: EngineConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| EngineError::config_error(e.to_string()))?;
        self.config = config;
        debug!("Configuration updated");
        Ok(())
    }

    /// Stored documents
    pub fn documents(&self) -> &DocumentStore {
        &self.store
    }

    /// Autocomplete trie
    pub fn suggestions(&self) -> &SuggestionIndex {
        &self.suggestions
    }

    /// Lexical index written during ingestion
    pub fn lexical(&self) -> &L {
        &self.lexical
    }
}

impl Default for Engine<WordLocations> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn store_for(config: &EngineConfig) -> DocumentStore {
    DocumentStore::with_limits(config.store.document_capacity, config.store.max_body_length)
}
