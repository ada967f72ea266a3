// Document store
//
// Append-only log of documents for the lifetime of the process. There is no
// update or delete; the only way to drop documents is `clear`.

use crate::document::{Document, DocumentId, LOCAL_FILE_TAG, MAX_BODY_LENGTH};
use crate::source::{read_excerpt, unreadable_placeholder};
use std::path::Path;
use tracing::{debug, warn};

/// Default maximum number of stored documents
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded collection of documents
#[derive(Debug, Clone)]
pub struct DocumentStore {
    /// Documents in insertion (and id) order
    documents: Vec<Document>,

    /// Maximum number of documents
    capacity: usize,

    /// Body cap applied on insertion
    max_body_length: usize,

    /// Next id to hand out
    next_id: DocumentId,

    /// Running total used for stats
    total_documents: usize,
}

impl DocumentStore {
    /// Create a store with the default capacity and body limit
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_CAPACITY, MAX_BODY_LENGTH)
    }

    /// Create a store with explicit limits
    pub fn with_limits(capacity: usize, max_body_length: usize) -> Self {
        Self {
            documents: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
            max_body_length,
            next_id: 1,
            total_documents: 0,
        }
    }

    /// Append a new document.
    ///
    /// Returns `None` without touching the store when it is full.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        source_tag: impl Into<String>,
    ) -> Option<DocumentId> {
        self.push(Document::new(title, body, source_tag))
    }

    /// Append a document composed elsewhere (e.g. a commit record).
    ///
    /// The store assigns the id and applies its limits; the caller's
    /// timestamp and reserved signals are kept.
    pub fn add_virtual(&mut self, document: Document) -> Option<DocumentId> {
        self.push(document)
    }

    /// Append a document whose body is the first bytes of `path`.
    ///
    /// An unreadable file still produces a document, with a placeholder body
    /// naming the failure.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> Option<DocumentId> {
        if self.is_full() {
            warn!("Document limit reached ({}), skipping file", self.capacity);
            return None;
        }

        let title = path.as_ref().to_string_lossy().into_owned();
        debug!("Adding search document: {}", title);

        let body = match read_excerpt(path.as_ref(), self.max_body_length) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Could not read {}: {}", title, e);
                unreadable_placeholder(&title)
            }
        };

        self.push(Document::new(title, body, LOCAL_FILE_TAG))
    }

    fn push(&mut self, mut document: Document) -> Option<DocumentId> {
        if self.is_full() {
            warn!(
                "Document limit reached ({}), dropping '{}'",
                self.capacity, document.title
            );
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;

        document.id = id;
        document.relevance_score = 0.0;
        document.enforce_limits(self.max_body_length);

        self.documents.push(document);
        self.total_documents += 1;
        Some(id)
    }

    /// Read-only view of every stored document, in id order
    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by id
    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        // Ids increase strictly with insertion order.
        self.documents
            .binary_search_by_key(&id, |d| d.id)
            .ok()
            .map(|idx| &self.documents[idx])
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Whether further insertions will be rejected
    pub fn is_full(&self) -> bool {
        self.documents.len() >= self.capacity
    }

    /// Maximum number of documents
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Body cap in bytes
    pub fn max_body_length(&self) -> usize {
        self.max_body_length
    }

    /// Total documents indexed since the last `clear`
    pub fn total_documents(&self) -> usize {
        self.total_documents
    }

    /// Drop every document and reset the stats counter.
    ///
    /// Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.total_documents = 0;
    }

    /// Clear the store and adopt new limits, keeping the id sequence.
    pub fn reset(&mut self, capacity: usize, max_body_length: usize) {
        self.clear();
        self.capacity = capacity;
        self.max_body_length = max_body_length;
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{COMMIT_MESSAGE_TAG, VIRTUAL_TAG};
    use std::io::Write;

    #[test]
    fn test_ids_are_sequential() {
        let mut store = DocumentStore::new();
        assert_eq!(store.add("a", "one", VIRTUAL_TAG), Some(1));
        assert_eq!(store.add("b", "two", VIRTUAL_TAG), Some(2));
        assert_eq!(store.add("c", "three", VIRTUAL_TAG), Some(3));
        assert_eq!(store.len(), 3);
        assert_eq!(store.total_documents(), 3);
        assert_eq!(store.get(2).map(|d| d.title.as_str()), Some("b"));
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut store = DocumentStore::with_limits(2, MAX_BODY_LENGTH);
        assert!(store.add("a", "", VIRTUAL_TAG).is_some());
        assert!(store.add("b", "", VIRTUAL_TAG).is_some());
        assert!(store.is_full());
        assert_eq!(store.add("c", "", VIRTUAL_TAG), None);
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_documents(), 2);
    }

    #[test]
    fn test_body_truncated_to_limit() {
        let mut store = DocumentStore::with_limits(10, 16);
        let id = store.add("long", "x".repeat(16 + 9), VIRTUAL_TAG).unwrap();
        assert_eq!(store.get(id).unwrap().body.len(), 16);
    }

    #[test]
    fn test_add_virtual_assigns_id_and_keeps_signals() {
        let mut store = DocumentStore::new();
        store.add("first", "", VIRTUAL_TAG);

        let mut doc = Document::new("Commit #1", "initial import", COMMIT_MESSAGE_TAG)
            .with_authority_score(0.5);
        doc.id = 99;
        doc.relevance_score = 0.7;

        let id = store.add_virtual(doc).unwrap();
        assert_eq!(id, 2);

        let stored = store.get(id).unwrap();
        assert_eq!(stored.authority_score, 0.5);
        assert_eq!(stored.relevance_score, 0.0);
        assert_eq!(stored.source_tag, COMMIT_MESSAGE_TAG);
    }

    #[test]
    fn test_add_file_reads_excerpt() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", "a".repeat(40)).unwrap();

        let mut store = DocumentStore::with_limits(10, 32);
        let id = store.add_file(file.path()).unwrap();
        let doc = store.get(id).unwrap();
        assert_eq!(doc.body.len(), 32);
        assert_eq!(doc.source_tag, LOCAL_FILE_TAG);
        assert!(doc.is_local_file());
    }

    #[test]
    fn test_add_file_unreadable_uses_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.txt");

        let mut store = DocumentStore::new();
        let id = store.add_file(&path).unwrap();
        let doc = store.get(id).unwrap();
        assert!(doc.body.starts_with("(Could not read file '"));
        assert!(doc.body.contains("gone.txt"));
    }

    #[test]
    fn test_clear_does_not_reuse_ids() {
        let mut store = DocumentStore::new();
        store.add("a", "", VIRTUAL_TAG);
        store.add("b", "", VIRTUAL_TAG);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.total_documents(), 0);
        assert_eq!(store.add("c", "", VIRTUAL_TAG), Some(3));
    }

    #[test]
    fn test_reset_swaps_limits_and_keeps_ids() {
        let mut store = DocumentStore::with_limits(1, 8);
        store.add("a", "", VIRTUAL_TAG);
        store.reset(2, 4);

        assert!(store.is_empty());
        assert_eq!(store.capacity(), 2);
        assert_eq!(store.max_body_length(), 4);
        assert_eq!(store.add("b", "abcdefgh", VIRTUAL_TAG), Some(2));
        assert_eq!(store.get(2).unwrap().body, "abcd");
    }

    #[test]
    fn test_add_virtual_keeps_created_at() {
        let stamp = chrono::DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let doc = Document::new("Commit #2", "tidy", COMMIT_MESSAGE_TAG).with_created_at(stamp);

        let mut store = DocumentStore::new();
        let id = store.add_virtual(doc).unwrap();
        assert_eq!(store.get(id).unwrap().created_at, stamp);
    }
}
