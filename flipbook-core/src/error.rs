//! Error types for document model operations.

use thiserror::Error;

/// Result type for core document operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the document model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Page not found in the document.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Element not found on the page.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The last remaining page cannot be removed.
    #[error("Cannot remove the last remaining page")]
    LastPage,

    /// A document must contain at least one page.
    #[error("Document has no pages")]
    EmptyDocument,

    /// A persisted document failed shape validation.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
