// Suggestion index
//
// *L'Index de Suggestions* - Insert raw words, answer ranked prefix queries

use crate::trie::{normalize_key, normalize_prefix, TrieNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One autocomplete candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Most recently inserted raw text for the key
    pub text: String,

    /// Last written score
    pub score: f32,

    /// Number of insertions under this key
    pub frequency: u32,

    /// Time of the latest insertion
    pub last_used: Option<DateTime<Utc>>,
}

/// Where a suggested word came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionSource {
    /// Word read from a file or assembled document
    Document,

    /// Word taken from a commit message
    CommitMessage,

    /// Word supplied directly by a caller
    Manual,
}

impl SuggestionSource {
    /// Score used when the caller does not supply a positive one
    pub fn baseline_score(&self) -> f32 {
        match self {
            SuggestionSource::Document => 0.6,
            SuggestionSource::CommitMessage => 0.7,
            SuggestionSource::Manual => 0.5,
        }
    }
}

/// Prefix trie over normalized words
#[derive(Debug, Default)]
pub struct SuggestionIndex {
    /// Shared root; the empty prefix
    root: TrieNode,

    /// Distinct normalized words
    words: usize,

    /// Successful insertions, duplicates included
    total_insertions: usize,
}

impl SuggestionIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw word with an explicit score.
    ///
    /// Returns `false` when the word has no alphanumeric characters. Key
    /// length is not capped.
    pub fn insert(&mut self, raw: &str, score: f32) -> bool {
        let key = normalize_key(raw);
        if key.is_empty() {
            debug!("Ignoring suggestion without alphanumerics: {:?}", raw);
            return false;
        }

        let node = self.root.descend_or_create(key.as_bytes());
        if !node.is_terminal() {
            self.words += 1;
        }
        node.record(raw, score, Utc::now());
        self.total_insertions += 1;
        true
    }

    /// Insert a word, falling back to the source baseline when `score <= 0`.
    pub fn add_suggestion(&mut self, raw: &str, score: f32, source: SuggestionSource) -> bool {
        let score = if score > 0.0 {
            score
        } else {
            source.baseline_score()
        };

        debug!("Adding to autocomplete: '{}' ({:.2})", raw, score);
        self.insert(raw, score)
    }

    /// Ranked suggestions for a prefix.
    ///
    /// Terminal nodes under the prefix are collected in pre-order (node first,
    /// then children in ascending character order) until `max_results` are
    /// found, then sorted by score descending. Equal scores keep pre-order.
    pub fn suggest(&self, prefix: &str, max_results: usize) -> Vec<Suggestion> {
        if prefix.is_empty() || max_results == 0 {
            return Vec::new();
        }

        let normalized = normalize_prefix(prefix);
        let Some(node) = self.root.descend(normalized.as_bytes()) else {
            return Vec::new();
        };

        let mut suggestions = Vec::new();
        node.collect(&mut suggestions, max_results);

        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
        suggestions
    }

    /// Exact lookup of the entry a word normalizes to
    pub fn lookup(&self, word: &str) -> Option<Suggestion> {
        let key = normalize_key(word);
        if key.is_empty() {
            return None;
        }
        self.root.descend(key.as_bytes())?.to_suggestion()
    }

    /// Number of distinct normalized words
    pub fn len(&self) -> usize {
        self.words
    }

    /// Whether nothing has been inserted
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Successful insertions, duplicates included
    pub fn total_insertions(&self) -> usize {
        self.total_insertions
    }

    /// Number of trie nodes, root included
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Free every node and start over from an empty root
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.words = 0;
        self.total_insertions = 0;
    }
}
