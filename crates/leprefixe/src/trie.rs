// Trie nodes
//
// Every node exclusively owns its children and there are no parent links, so
// dropping a node frees its whole subtree and no node is reachable twice.

use crate::index::Suggestion;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Normalize a word into its trie key.
///
/// Lowercases ASCII letters and drops every character that is not an ASCII
/// letter or digit. Dropped characters do not split the word, so `foo-bar`
/// becomes `foobar`.
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Normalize a lookup prefix.
///
/// Only case is folded. Punctuation is kept and therefore never matches a
/// branch, unlike [`normalize_key`].
pub fn normalize_prefix(prefix: &str) -> String {
    prefix.to_ascii_lowercase()
}

/// One trie node per distinct prefix
#[derive(Debug, Default)]
pub struct TrieNode {
    /// Children keyed by ASCII alphanumeric byte, iterated in ascending order
    children: BTreeMap<u8, TrieNode>,

    /// Some normalized word ends exactly here
    is_terminal: bool,

    /// Latest raw text inserted for this key
    suggestion: Option<String>,

    /// Latest score written for this key
    score: f32,

    /// Number of insertions that ended here
    frequency: u32,

    /// Time of the latest insertion
    last_used: Option<DateTime<Utc>>,
}

impl TrieNode {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a word ends at this node
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Number of insertions that ended here
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Whether the node has any children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Walk `key` from this node, returning the node it ends at.
    ///
    /// Bytes outside 7-bit ASCII never match.
    pub fn descend(&self, key: &[u8]) -> Option<&TrieNode> {
        let mut current = self;
        for byte in key {
            if !byte.is_ascii() {
                return None;
            }
            current = current.children.get(byte)?;
        }
        Some(current)
    }

    /// Walk `key` from this node, creating missing nodes.
    pub(crate) fn descend_or_create(&mut self, key: &[u8]) -> &mut TrieNode {
        let mut current = self;
        for &byte in key {
            current = current.children.entry(byte).or_default();
        }
        current
    }

    /// Record one insertion ending at this node.
    ///
    /// Text, score and timestamp are overwritten; frequency accumulates.
    pub(crate) fn record(&mut self, raw: &str, score: f32, now: DateTime<Utc>) {
        self.is_terminal = true;
        self.suggestion = Some(raw.to_string());
        self.score = score;
        self.frequency += 1;
        self.last_used = Some(now);
    }

    /// Snapshot of this node if it is terminal
    pub fn to_suggestion(&self) -> Option<Suggestion> {
        if !self.is_terminal {
            return None;
        }
        let text = self.suggestion.as_ref()?;
        Some(Suggestion {
            text: text.clone(),
            score: self.score,
            frequency: self.frequency,
            last_used: self.last_used,
        })
    }

    /// Pre-order collection of terminal descendants, stopping at `max`.
    pub fn collect(&self, out: &mut Vec<Suggestion>, max: usize) {
        if out.len() >= max {
            return;
        }

        if let Some(suggestion) = self.to_suggestion() {
            out.push(suggestion);
        }

        for child in self.children.values() {
            if out.len() >= max {
                break;
            }
            child.collect(out, max);
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(TrieNode::node_count).sum::<usize>()
    }
}
