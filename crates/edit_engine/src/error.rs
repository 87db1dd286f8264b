//! Error types for editing operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// The identifier is absent from the current identifier table
    #[error("Element not found: {0}")]
    NotFound(String),

    /// The operation does not support the kind of element the identifier
    /// resolved to (e.g. insert-after on a run)
    #[error("{operation} is not supported for {kind} {id}")]
    UnsupportedTarget {
        operation: &'static str,
        kind: doc_model::NodeType,
        id: String,
    },

    /// The format command named a property the engine does not model
    #[error("Unrecognized property: {0} (expected bold, italic or size)")]
    UnrecognizedProperty(String),

    /// A malformed argument value, e.g. a non-integer size
    #[error("Parse failure: {0}")]
    ParseFailure(String),

    /// Load or save failed at the container layer
    #[error("Document I/O failed: {0}")]
    Io(#[from] store::DocxError),

    /// Document model error
    #[error("Document model error: {0}")]
    DocModel(#[from] doc_model::DocModelError),
}

pub type EditResult<T> = std::result::Result<T, EditError>;
