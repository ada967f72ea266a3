//! leprefixe - Prefix Suggestions
//!
//! *Le Préfixe* (The Prefix) - Character trie over normalized words for autocomplete

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Suggestion index over the trie
pub mod index;
/// Trie nodes and key normalization
pub mod trie;

pub use index::{Suggestion, SuggestionIndex, SuggestionSource};
pub use trie::{normalize_key, normalize_prefix, TrieNode};

/// Suggestion library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
