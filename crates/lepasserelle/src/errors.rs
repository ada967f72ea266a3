// Error Handling
//
// *La Gestion des Erreurs* (The Error Management) - Why an engine operation produced nothing

use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Engine error types
///
/// None of these are fatal: the engine stays usable after every one of them.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine was shut down (or never initialized)
    #[error("Engine is not initialized")]
    NotInitialized,

    /// The document store is full
    #[error("Document limit reached ({capacity})")]
    CapacityExceeded {
        /// Configured store capacity
        capacity: usize,
    },

    /// A source file could not be read
    #[error("Could not read '{}'", path.display())]
    UnreadableSource {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Nothing usable in the input (empty word, empty query)
    #[error("Input is empty")]
    EmptyInput,

    /// Rejected configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },
}

impl EngineError {
    /// Create an unreadable-source error
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::UnreadableSource {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config_error(message: impl Into<String>) -> Self {
        EngineError::Config {
            message: message.into(),
        }
    }

    /// Check if retrying with different input can succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            EngineError::UnreadableSource { .. } => true, // skip the file
            EngineError::EmptyInput => true,
            EngineError::Config { .. } => true,
            EngineError::NotInitialized | EngineError::CapacityExceeded { .. } => false,
        }
    }

    /// Get user-friendly suggestion for recovery
    pub fn suggestion(&self) -> Option<String> {
        match self {
            EngineError::NotInitialized => {
                Some("Call initialize() before ingesting or querying.".to_string())
            }
            EngineError::CapacityExceeded { .. } => Some(
                "Raise store.document_capacity or MGSEARCH_DOCUMENT_CAPACITY.".to_string(),
            ),
            EngineError::UnreadableSource { .. } => {
                Some("Check that the file exists and is readable.".to_string())
            }
            EngineError::Config { .. } => {
                Some("Fix the configuration file and try again.".to_string())
            }
            EngineError::EmptyInput => None,
        }
    }
}

/// Format an error for display to the user, with its recovery hint
pub fn format_error(error: &EngineError) -> String {
    let mut message = format!("Error: {}", error);

    if let EngineError::UnreadableSource { source, .. } = error {
        message.push_str(&format!(" ({})", source));
    }

    if let Some(suggestion) = error.suggestion() {
        message.push_str(&format!("\n\nSuggestion: {}", suggestion));
    }

    message
}
