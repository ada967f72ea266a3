// Ingestion Pipeline
//
// *L'Ingestion* - Turn files, text and commit messages into documents and words
//
// Each unit is split into words first; every word goes to the suggestion
// index and the lexical index, then the unit is appended to the document
// store with exactly one store call.

use crate::config::IngestConfig;
use crate::errors::{EngineError, Result};
use crate::lexical::LexicalIndex;
use leprefixe::{SuggestionIndex, SuggestionSource};
use lestockage::{
    read_excerpt, Document, DocumentId, DocumentStore, COMMIT_MESSAGE_TAG, LOCAL_FILE_TAG,
    VIRTUAL_TAG,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Lexical locator used for every commit message
pub const COMMIT_LOCATOR: &str = "COMMIT";

/// Split text into maximal runs of ASCII letters, digits and `_`
pub fn extract_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
}

/// Lexical index form of a word: lowercase letters only
pub fn lexical_form(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Title given to a commit message document
pub fn commit_title(commit_id: u64) -> String {
    format!("Commit #{}", commit_id)
}

/// Borrowed view over the engine state that ingestion writes to
pub struct IngestionPipeline<'a, L: LexicalIndex> {
    store: &'a mut DocumentStore,
    suggestions: &'a mut SuggestionIndex,
    lexical: &'a mut L,
    config: &'a IngestConfig,
}

impl<'a, L: LexicalIndex> IngestionPipeline<'a, L> {
    /// Create a pipeline over the given state
    pub fn new(
        store: &'a mut DocumentStore,
        suggestions: &'a mut SuggestionIndex,
        lexical: &'a mut L,
        config: &'a IngestConfig,
    ) -> Self {
        Self {
            store,
            suggestions,
            lexical,
            config,
        }
    }

    /// Ingest a whole file.
    ///
    /// Words come from the full contents; the stored body is truncated by the
    /// store. An unreadable file is skipped entirely.
    pub fn ingest_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        score: Option<f32>,
    ) -> Result<DocumentId> {
        let path = path.as_ref();
        let locator = path.to_string_lossy().into_owned();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Could not read file '{}': {}", locator, e);
                return Err(EngineError::unreadable(path, e));
            }
        };

        let score = score.unwrap_or(self.config.document_score);
        let mut reader = BufReader::new(file);
        let mut line = Vec::new();
        let mut words = 0;
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&line);
                    words += self.index_words(&text, &locator, score, SuggestionSource::Document);
                }
                Err(e) => {
                    warn!("Read of '{}' stopped early: {}", locator, e);
                    break;
                }
            }
        }
        debug!("Indexed {} word(s) from {}", words, locator);

        let excerpt = read_excerpt(path, self.store.max_body_length())
            .map_err(|e| EngineError::unreadable(path, e))?;
        let body = String::from_utf8_lossy(&excerpt).into_owned();
        self.append(Document::new(locator, body, LOCAL_FILE_TAG))
    }

    /// Ingest free text under `label`
    pub fn ingest_text(
        &mut self,
        text: &str,
        label: &str,
        score: Option<f32>,
    ) -> Result<DocumentId> {
        let score = score.unwrap_or(self.config.document_score);
        self.index_words(text, label, score, SuggestionSource::Document);

        self.append(Document::new(label, text, VIRTUAL_TAG))
    }

    /// Ingest a commit message as `Commit #<commit_id>`
    pub fn ingest_commit_message(
        &mut self,
        message: &str,
        commit_id: u64,
        score: Option<f32>,
    ) -> Result<DocumentId> {
        let score = score.unwrap_or(self.config.commit_score);
        let words = self.index_words(
            message,
            COMMIT_LOCATOR,
            score,
            SuggestionSource::CommitMessage,
        );
        info!("Indexed commit #{} ({} word(s))", commit_id, words);

        self.append(Document::new(
            commit_title(commit_id),
            message,
            COMMIT_MESSAGE_TAG,
        ))
    }

    /// Ingest a document assembled by the caller; its title is the locator
    pub fn ingest_document(
        &mut self,
        document: Document,
        score: Option<f32>,
    ) -> Result<DocumentId> {
        let score = score.unwrap_or(self.config.document_score);
        let locator = document.title.clone();
        self.index_words(&document.body, &locator, score, SuggestionSource::Document);

        self.append(document)
    }

    /// Feed every word of `text` to both indexes; returns the word count
    fn index_words(
        &mut self,
        text: &str,
        locator: &str,
        score: f32,
        source: SuggestionSource,
    ) -> usize {
        let mut count = 0;
        for word in extract_words(text) {
            self.suggestions.add_suggestion(word, score, source);

            let form = lexical_form(word);
            if !form.is_empty() {
                self.lexical.insert(&form, locator);
            }
            count += 1;
        }
        count
    }

    fn append(&mut self, document: Document) -> Result<DocumentId> {
        self.store
            .add_virtual(document)
            .ok_or(EngineError::CapacityExceeded {
                capacity: self.store.capacity(),
            })
    }
}
