// Core search implementation

use crate::query::{parse_query, ParsedQuery};
use crate::ranking::{RawScore, Score, TermScorer};
use lestockage::{Document, DocumentStore};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result rank (1-based)
    pub rank: usize,

    /// Snapshot of the document with `relevance_score` set
    pub document: Document,

    /// Score breakdown
    pub score: Score,
}

/// Running query statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct QueryStats {
    /// Queries that reached the scoring scan
    pub queries_served: usize,

    /// Arithmetic mean latency over all served queries
    pub average_latency_ms: f64,
}

impl QueryStats {
    fn record(&mut self, elapsed_ms: f64) {
        self.queries_served += 1;
        let n = self.queries_served as f64;
        self.average_latency_ms = (self.average_latency_ms * (n - 1.0) + elapsed_ms) / n;
    }
}

/// Scores every stored document against a query and ranks them
#[derive(Debug, Clone, Default)]
pub struct QueryProcessor {
    scorer: TermScorer,
    stats: QueryStats,
}

impl QueryProcessor {
    /// Create a processor with the default scorer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with a custom scorer
    pub fn with_scorer(scorer: TermScorer) -> Self {
        Self {
            scorer,
            stats: QueryStats::default(),
        }
    }

    /// Execute a search query against `store`.
    ///
    /// An empty store, a query without tokens or `max_results == 0` yield an
    /// empty list and leave the stats untouched.
    pub fn search(
        &mut self,
        store: &DocumentStore,
        query: &str,
        max_results: usize,
    ) -> Vec<SearchResult> {
        if max_results == 0 {
            return Vec::new();
        }

        if store.is_empty() {
            debug!("No documents indexed");
            return Vec::new();
        }

        let parsed = match parse_query(query) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Rejected query {:?}: {}", query, e);
                return Vec::new();
            }
        };

        let start = Instant::now();
        let results = self.rank(store.all(), &parsed, max_results);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.stats.record(elapsed_ms);
        info!(
            "Search '{}': {} result(s) in {:.2}ms",
            query,
            results.len(),
            elapsed_ms
        );

        results
    }

    /// Score and rank `documents` without touching stats.
    ///
    /// Every document is scored, including those with no hits. Equal
    /// relevance falls back to ascending document id.
    pub fn rank(
        &self,
        documents: &[Document],
        query: &ParsedQuery,
        max_results: usize,
    ) -> Vec<SearchResult> {
        let raws: Vec<RawScore> = documents
            .iter()
            .map(|doc| {
                let title = doc.title.to_ascii_lowercase();
                let body = doc.body.to_ascii_lowercase();
                self.scorer.raw_score(&title, &body, &query.tokens)
            })
            .collect();

        let relevance = self
            .scorer
            .normalize(&raws.iter().map(|r| r.raw).collect::<Vec<_>>());

        let mut order: Vec<usize> = (0..documents.len()).collect();
        order.sort_by(|&a, &b| {
            relevance[b]
                .total_cmp(&relevance[a])
                .then_with(|| documents[a].id.cmp(&documents[b].id))
        });
        order.truncate(max_results);

        order
            .into_iter()
            .enumerate()
            .map(|(i, idx)| {
                let mut document = documents[idx].clone();
                document.relevance_score = relevance[idx];
                SearchResult {
                    rank: i + 1,
                    document,
                    score: Score {
                        relevance: relevance[idx],
                        raw: raws[idx].raw,
                        words_matched: raws[idx].words_matched,
                    },
                }
            })
            .collect()
    }

    /// Query statistics so far
    pub fn stats(&self) -> QueryStats {
        self.stats
    }

    /// Reset the query statistics
    pub fn reset_stats(&mut self) {
        self.stats = QueryStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lestockage::{LOCAL_FILE_TAG, VIRTUAL_TAG};

    fn store_with(docs: &[(&str, &str)]) -> DocumentStore {
        let mut store = DocumentStore::new();
        for (title, body) in docs {
            store.add(*title, *body, LOCAL_FILE_TAG);
        }
        store
    }

    #[test]
    fn test_search_engine_basic() {
        let store = store_with(&[
            ("notes.txt", "hello world foo"),
            ("foo.txt", "hello hello"),
        ]);
        let mut processor = QueryProcessor::new();

        let results = processor.search(&store, "hello", 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.title, "foo.txt");
        assert_eq!(results[0].document.relevance_score, 1.0);
        assert_eq!(results[1].document.title, "notes.txt");
        assert_eq!(results[1].document.relevance_score, 0.5);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].rank, 2);
    }

    #[test]
    fn test_zero_score_documents_still_returned() {
        let store = store_with(&[("a", "apple"), ("b", "banana")]);
        let mut processor = QueryProcessor::new();

        let results = processor.search(&store, "apple", 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].score.relevance, 0.0);
    }

    #[test]
    fn test_ties_ordered_by_id() {
        let mut store = DocumentStore::new();
        store.add("x", "same", VIRTUAL_TAG);
        store.add("y", "same", VIRTUAL_TAG);
        store.add("z", "same", VIRTUAL_TAG);

        let mut processor = QueryProcessor::new();
        let ids: Vec<u64> = processor
            .search(&store, "same", 10)
            .iter()
            .map(|r| r.document.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_truncated_to_max_results() {
        let store = store_with(&[("a", "q"), ("b", "q q"), ("c", "q q q")]);
        let mut processor = QueryProcessor::new();

        let results = processor.search(&store, "q", 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.title, "c");
        assert!(processor.search(&store, "q", 0).is_empty());
    }

    #[test]
    fn test_case_insensitive_title_and_body() {
        let store = store_with(&[("README.md", "Install Notes")]);
        let mut processor = QueryProcessor::new();

        let results = processor.search(&store, "readme install", 10);
        assert_eq!(results[0].score.words_matched, 2);
        // (3 + 1) * (1 + 2/2)
        assert_eq!(results[0].score.raw, 8.0);
    }

    #[test]
    fn test_stats_track_served_queries() {
        let store = store_with(&[("a", "b")]);
        let mut processor = QueryProcessor::new();

        processor.search(&store, "b", 5);
        processor.search(&store, "a", 5);
        processor.search(&store, "   ", 5);
        processor.search(&DocumentStore::new(), "a", 5);

        let stats = processor.stats();
        assert_eq!(stats.queries_served, 2);
        assert!(stats.average_latency_ms >= 0.0);

        processor.reset_stats();
        assert_eq!(processor.stats(), QueryStats::default());
    }

    #[test]
    fn test_with_scorer_changes_weights() {
        let store = store_with(&[("key", "other"), ("other", "key key")]);

        // Default: title hit (3) beats two body hits (2)
        let mut processor = QueryProcessor::new();
        assert_eq!(processor.search(&store, "key", 10)[0].document.title, "key");

        let mut flat = QueryProcessor::with_scorer(TermScorer::new().with_weights(1.0, 1.0));
        assert_eq!(flat.search(&store, "key", 10)[0].document.title, "other");
    }

    #[test]
    fn test_stats_running_mean() {
        let mut stats = QueryStats::default();
        stats.record(2.0);
        stats.record(4.0);
        stats.record(6.0);
        assert_eq!(stats.queries_served, 3);
        assert!((stats.average_latency_ms - 4.0).abs() < 1e-9);
    }
}
