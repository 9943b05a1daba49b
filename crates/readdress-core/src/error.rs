//! Error types for readdress.
//!
//! Provides [`PdfError`], the unified fatal error type returned by every
//! fallible operation across the workspace. Backend-specific errors are
//! converted into this type at the crate boundary.

use std::fmt;

/// Fatal error types for document processing.
///
/// These errors indicate conditions that prevent the current operation from
/// producing a result. None of them leave a partially modified document
/// behind: every transformation is copy-out.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Error parsing PDF structure or syntax.
    Parse(String),
    /// I/O error reading or writing document data.
    Io(String),
    /// Error resolving font or encoding information.
    Font(String),
    /// The caller supplied invalid input (e.g. an empty search query).
    InvalidInput(String),
    /// A match referenced a page outside the document.
    PageOutOfRange {
        /// The 0-based page index that was requested.
        page: usize,
        /// The number of pages in the document.
        count: usize,
    },
    /// Failure while drawing the overlay or serializing the result.
    Compose(String),
    /// The document is encrypted and cannot be processed.
    PasswordRequired,
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::Parse(msg) => write!(f, "parse error: {msg}"),
            PdfError::Io(msg) => write!(f, "I/O error: {msg}"),
            PdfError::Font(msg) => write!(f, "font error: {msg}"),
            PdfError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            PdfError::PageOutOfRange { page, count } => {
                write!(f, "page index {page} out of range (document has {count} pages)")
            }
            PdfError::Compose(msg) => write!(f, "composition error: {msg}"),
            PdfError::PasswordRequired => write!(f, "PDF is encrypted and cannot be processed"),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_error() {
        let err = PdfError::Parse("bad xref".to_string());
        assert_eq!(err.to_string(), "parse error: bad xref");
    }

    #[test]
    fn display_page_out_of_range() {
        let err = PdfError::PageOutOfRange { page: 5, count: 2 };
        assert_eq!(
            err.to_string(),
            "page index 5 out of range (document has 2 pages)"
        );
    }

    #[test]
    fn from_std_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PdfError = io_err.into();
        assert!(matches!(err, PdfError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(PdfError::InvalidInput("empty".into()));
        assert!(err.to_string().contains("empty"));
    }
}
