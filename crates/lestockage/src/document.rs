// Document record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sequential document identifier (starts at 1)
pub type DocumentId = u64;

/// Maximum stored title length in bytes
pub const MAX_TITLE_LENGTH: usize = 256;

/// Default maximum stored body length in bytes
pub const MAX_BODY_LENGTH: usize = 1024;

/// Source tag for documents read from a file
pub const LOCAL_FILE_TAG: &str = "local-file";

/// Source tag for commit-message records
pub const COMMIT_MESSAGE_TAG: &str = "commit-msg";

/// Source tag for text composed by the caller
pub const VIRTUAL_TAG: &str = "virtual";

/// One indexed unit of text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Store-assigned id (0 until the document is appended)
    pub id: DocumentId,

    /// File path or synthetic label such as `Commit #3`
    pub title: String,

    /// Text excerpt, capped at the store's body limit
    pub body: String,

    /// Provenance marker
    pub source_tag: String,

    /// Ingestion timestamp
    pub created_at: DateTime<Utc>,

    /// Reserved ranking signal, not read by the scorer
    pub click_count: u32,

    /// Reserved ranking signal, not read by the scorer
    pub authority_score: f32,

    /// Relevance in the current result set (0-1)
    pub relevance_score: f32,
}

impl Document {
    /// Create an unassigned document stamped with the current time
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        source_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            body: body.into(),
            source_tag: source_tag.into(),
            created_at: Utc::now(),
            click_count: 0,
            authority_score: 0.0,
            relevance_score: 0.0,
        }
    }

    /// Override the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set the reserved authority signal
    pub fn with_authority_score(mut self, authority_score: f32) -> Self {
        self.authority_score = authority_score;
        self
    }

    /// Whether the document was read from a file
    pub fn is_local_file(&self) -> bool {
        self.source_tag == LOCAL_FILE_TAG
    }

    /// Apply the title and body caps in place.
    pub(crate) fn enforce_limits(&mut self, max_body_length: usize) {
        self.title = truncate_to_boundary(std::mem::take(&mut self.title), MAX_TITLE_LENGTH);
        self.body = truncate_to_boundary(std::mem::take(&mut self.body), max_body_length);
    }
}

/// Truncate `text` to at most `max_len` bytes.
///
/// The cut moves back to the previous character boundary so the result is
/// always valid UTF-8; for ASCII text the result is exactly `max_len` bytes.
pub fn truncate_to_boundary(mut text: String, max_len: usize) -> String {
    if text.len() <= max_len {
        return text;
    }

    let mut cut = max_len;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text
}
