//! Error types for the docir library.

use std::io;
use thiserror::Error;

/// Result type alias for docir operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, mutating, or exporting IR.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No persisted IR exists for the given document id.
    #[error("No IR found for document_id: {0}")]
    DocumentNotFound(String),

    /// No block with the given id exists in the document.
    #[error("Block {0} not found")]
    BlockNotFound(String),

    /// The persistence backend has no object at the given path.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// A metadata payload could not be parsed as a JSON object.
    #[error("Malformed metadata: {0}")]
    MalformedMetadata(String),

    /// Error serializing or deserializing the IR document.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The persistence backend failed.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// The external conversion pipeline failed.
    #[error("Conversion error: {0}")]
    Convert(String),

    /// Fetching the source document failed.
    #[error("Download error: {0}")]
    Download(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error is a recoverable Not-Found condition, as opposed
    /// to a hard backend or serialization failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::DocumentNotFound(_) | Error::BlockNotFound(_) | Error::ObjectNotFound(_)
        )
    }
}
