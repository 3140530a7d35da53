//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Malformed element tree: {0}")]
    MalformedElement(#[source] serde_json::Error),

    #[error("Element not found: {id}")]
    MissingElement { id: String },

    #[error("State cell '{atom}' is read-only")]
    ReadOnly { atom: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event action aborted: {0}")]
    Aborted(String),
}
