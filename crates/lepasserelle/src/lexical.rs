// Lexical index
//
// Word -> locator postings written during ingestion. Search does not consult
// it; it is kept for callers that want word locations.

use std::collections::{BTreeSet, HashMap};

/// Sink for (word, locator) pairs produced by ingestion
pub trait LexicalIndex {
    /// Record that `word` occurs in the unit identified by `locator`
    fn insert(&mut self, word: &str, locator: &str);

    /// Forget every posting; called on engine teardown
    fn clear(&mut self) {}
}

/// In-memory postings map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordLocations {
    postings: HashMap<String, BTreeSet<String>>,
}

impl WordLocations {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Locators recorded for a word, in sorted order
    pub fn locations(&self, word: &str) -> Option<&BTreeSet<String>> {
        self.postings.get(word)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Whether no word has been recorded
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

impl LexicalIndex for WordLocations {
    fn insert(&mut self, word: &str, locator: &str) {
        self.postings
            .entry(word.to_string())
            .or_default()
            .insert(locator.to_string());
    }

    fn clear(&mut self) {
        self.postings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_dedupes_locators() {
        let mut index = WordLocations::new();
        index.insert("hello", "a.txt");
        index.insert("hello", "a.txt");
        index.insert("hello", "COMMIT");
        index.insert("world", "a.txt");

        assert_eq!(index.len(), 2);
        let locs: Vec<&str> = index
            .locations("hello")
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(locs, vec!["COMMIT", "a.txt"]);
        assert!(index.locations("missing").is_none());

        index.clear();
        assert!(index.is_empty());
    }
}
