//! Error types for tree building and serialization.

use thiserror::Error;

/// Errors that can occur while building, loading, or writing a document tree.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("<{tag}> is a void element and cannot have children")]
    InvalidStructure { tag: String },

    #[error("scope discipline violated: expected {expected}, found {found}")]
    ScopeDiscipline { expected: String, found: String },

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "json")]
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl Error {
    pub(crate) fn void_element(tag: &str) -> Self {
        Error::InvalidStructure {
            tag: tag.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
