//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
