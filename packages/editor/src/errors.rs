//! Error types for the editor

use scrivener_document::DocumentError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Delta index out of bounds, section collision, or removal of the last paragraph
    #[error("Structural error: {0}")]
    Structural(String),

    /// Presentation surface disagrees with the model after a flush
    #[error("Surface out of sync: {0}")]
    Sync(String),

    #[error("Unknown element type: {0}")]
    UnknownType(String),

    /// Malformed argument to an editing operation
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error category carried by error notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Structural,
    Sync,
    UnknownType,
    Validation,
    Config,
}

impl EditorError {
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }

    pub fn sync(message: impl Into<String>) -> Self {
        Self::Sync(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::Structural(_) => ErrorKind::Structural,
            EditorError::Sync(_) => ErrorKind::Sync,
            EditorError::UnknownType(_) => ErrorKind::UnknownType,
            EditorError::Validation(_) => ErrorKind::Validation,
            EditorError::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<DocumentError> for EditorError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::UnknownType(tag) => EditorError::UnknownType(tag),
            DocumentError::InvalidDocument(message) => EditorError::Structural(message),
        }
    }
}

impl From<std::io::Error> for EditorError {
    fn from(e: std::io::Error) -> Self {
        EditorError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(e: serde_json::Error) -> Self {
        EditorError::Config(e.to_string())
    }
}
