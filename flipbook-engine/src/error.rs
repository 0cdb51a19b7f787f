//! Error types for engine operations.

use thiserror::Error;

use flipbook_core::CoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while editing a document.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An error from the underlying document model.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Page not found in the active document.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Element not found on the given page.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A gesture operation was requested with no active drag session.
    #[error("No drag session in progress")]
    NoActiveDrag,

    /// A new gesture was started while another is in progress.
    #[error("A drag session is already in progress")]
    DragInProgress,

    /// An I/O error during save/load.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization or deserialization error during save/load.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
