// Ranking integration and property tests

use lerecherche::QueryProcessor;
use lestockage::{DocumentStore, LOCAL_FILE_TAG, VIRTUAL_TAG};
use proptest::prelude::*;

#[test]
fn test_scenario_two_files_hello() {
    let mut store = DocumentStore::new();
    let a = store.add("hello.txt", "hello world foo", LOCAL_FILE_TAG).unwrap();
    let b = store.add("foo.txt", "hello hello", LOCAL_FILE_TAG).unwrap();

    let mut processor = QueryProcessor::new();
    let results = processor.search(&store, "hello", 10);

    // The title "hello.txt" contains the term once: A = 1*3 + 1, B = 0*3 + 2.
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document.id, a);
    assert_eq!(results[0].score.raw, 4.0);
    assert_eq!(results[0].document.relevance_score, 1.0);
    assert_eq!(results[1].document.id, b);
    assert_eq!(results[1].score.raw, 2.0);
    assert_eq!(results[1].document.relevance_score, 0.5);
}

#[test]
fn test_scenario_body_only_hits() {
    // Titles free of the query term, so only body hits count.
    let mut store = DocumentStore::new();
    let a = store.add("a.txt", "hello world foo", LOCAL_FILE_TAG).unwrap();
    let b = store.add("b.txt", "hello hello", LOCAL_FILE_TAG).unwrap();

    let mut processor = QueryProcessor::new();
    let results = processor.search(&store, "hello", 10);

    assert_eq!(results[0].document.id, b);
    assert_eq!(results[0].score.raw, 2.0);
    assert_eq!(results[0].document.relevance_score, 1.0);
    assert_eq!(results[1].document.id, a);
    assert_eq!(results[1].score.raw, 1.0);
    assert_eq!(results[1].document.relevance_score, 0.5);
}

#[test]
fn test_empty_store_returns_nothing() {
    let store = DocumentStore::new();
    let mut processor = QueryProcessor::new();
    assert!(processor.search(&store, "anything", 10).is_empty());
    assert!(processor.search(&store, "", 10).is_empty());
    assert_eq!(processor.stats().queries_served, 0);
}

#[test]
fn test_full_coverage_beats_partial() {
    let mut store = DocumentStore::new();
    // Same number of raw hits (2) in both bodies.
    let partial = store.add("p", "red red", VIRTUAL_TAG).unwrap();
    let full = store.add("f", "red blue", VIRTUAL_TAG).unwrap();

    let mut processor = QueryProcessor::new();
    let results = processor.search(&store, "red blue", 10);

    assert_eq!(results[0].document.id, full);
    assert_eq!(results[1].document.id, partial);
    assert!(results[0].score.relevance >= results[1].score.relevance);
}

fn arb_docs() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec(("[a-d ]{0,12}", "[a-d ]{0,60}"), 0..25)
}

proptest! {
    #[test]
    fn prop_scores_bounded_and_sorted(docs in arb_docs(), query in "[a-d ]{0,10}", max in 0usize..30) {
        let mut store = DocumentStore::new();
        for (title, body) in &docs {
            store.add(title.clone(), body.clone(), VIRTUAL_TAG);
        }

        let mut processor = QueryProcessor::new();
        let results = processor.search(&store, &query, max);

        prop_assert!(results.len() <= max);
        for r in &results {
            prop_assert!(r.document.relevance_score >= 0.0);
            prop_assert!(r.document.relevance_score <= 1.0);
            prop_assert_eq!(r.document.relevance_score, r.score.relevance);
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].score.relevance >= pair[1].score.relevance);
            if pair[0].score.relevance == pair[1].score.relevance {
                prop_assert!(pair[0].document.id < pair[1].document.id);
            }
        }
    }

    #[test]
    fn prop_top_result_is_one_when_anything_matches(docs in arb_docs(), term in "[a-d]{1,2}") {
        let mut store = DocumentStore::new();
        for (title, body) in &docs {
            store.add(title.clone(), body.clone(), VIRTUAL_TAG);
        }

        let mut processor = QueryProcessor::new();
        let results = processor.search(&store, &term, store.len().max(1));
        if results.iter().any(|r| r.score.raw > 0.0) {
            prop_assert_eq!(results[0].score.relevance, 1.0);
        }
    }
}
