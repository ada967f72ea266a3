//! lerecherche - Search & Ranking
//!
//! *La Recherche* (The Search) - Full-scan keyword ranking over the document store

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Terminal highlighting and matching-line lookup
pub mod highlight;
/// Query parsing and limits
pub mod query;
/// Term-match scoring
pub mod ranking;
/// Full-scan ranked search
pub mod search;

pub use highlight::{extract_matching_line, highlight_term, MatchingLine};
pub use query::{parse_query, ParsedQuery, MAX_QUERY_LENGTH, MAX_QUERY_TOKENS};
pub use ranking::{RawScore, Score, TermScorer};
pub use search::{QueryProcessor, QueryStats, SearchResult};

/// Search library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
