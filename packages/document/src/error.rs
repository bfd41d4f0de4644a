//! Error types for the document model

use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A tag read at the model/surface boundary has no block or markup kind
    #[error("Unknown element type: {0}")]
    UnknownType(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl DocumentError {
    pub fn unknown_type(tag: impl Into<String>) -> Self {
        Self::UnknownType(tag.into())
    }

    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument(message.into())
    }
}
