//! Error types for the document I/O layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides
//! [`BackendError`] that wraps lopdf and I/O failures and converts them to
//! [`PdfError`] for unified error handling across the workspace.

use readdress_core::PdfError;
use thiserror::Error;

/// Error type for PDF backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading or writing PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error resolving font or encoding information.
    #[error("font error: {0}")]
    Font(String),

    /// Error while drawing the overlay or serializing the result.
    #[error("composition error: {0}")]
    Compose(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => PdfError::Parse(msg),
            BackendError::Io(e) => PdfError::Io(e.to_string()),
            BackendError::Font(msg) => PdfError::Font(msg),
            BackendError::Compose(msg) => PdfError::Compose(msg),
            BackendError::Core(e) => e,
        }
    }
}
