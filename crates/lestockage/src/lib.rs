//! lestockage - Document Storage Layer
//!
//! *Le Stockage* (The Storage) - Bounded, append-only document log for the process lifetime

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Indexed document type and field limits.
pub mod document;
/// Reading raw source excerpts from disk.
pub mod source;
/// Capacity-bounded document store.
pub mod store;

pub use document::{
    truncate_to_boundary, Document, DocumentId, COMMIT_MESSAGE_TAG, LOCAL_FILE_TAG,
    MAX_BODY_LENGTH, MAX_TITLE_LENGTH, VIRTUAL_TAG,
};
pub use source::{read_excerpt, unreadable_placeholder};
pub use store::{DocumentStore, DEFAULT_CAPACITY};

/// Storage library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
