//! Top-level document type tying the matching engine to the PDF backend.

use readdress_core::{Match, PdfError, SelectionRect, TextFragment, normalize};
use readdress_pdf::{LoadedPdf, compose_overlay, extract_fragments, raw_page_text, shift_pages};

/// A PDF document opened for matching and rewriting.
///
/// Owns the original byte buffer for the session's lifetime. Every
/// transformation ([`compose`](Document::compose),
/// [`shift`](Document::shift)) reads from that buffer and returns a new
/// output buffer; the original is never mutated, so transformations can be
/// stacked without aliasing hazards.
///
/// # Example
///
/// ```ignore
/// let doc = Document::open(bytes)?;
/// let matches = doc.search("123 Old Street")?;
/// let updated = doc.compose(&matches, "456 New Avenue")?;
/// ```
pub struct Document {
    bytes: Vec<u8>,
    pdf: LoadedPdf,
}

impl Document {
    /// Open a document from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::Parse`] if the bytes are not a valid PDF and
    /// [`PdfError::PasswordRequired`] if the document is encrypted.
    pub fn open(bytes: Vec<u8>) -> Result<Self, PdfError> {
        let pdf = LoadedPdf::open(&bytes).map_err(PdfError::from)?;
        Ok(Self { bytes, pdf })
    }

    /// Open a document from a file path.
    ///
    /// Convenience wrapper around [`Document::open`] that reads the file
    /// into memory first.
    pub fn open_file(path: impl AsRef<std::path::Path>) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| PdfError::Io(e.to_string()))?;
        Self::open(bytes)
    }

    /// The original document bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pdf.page_count()
    }

    /// Width and height of a page's media box in document units.
    pub fn page_size(&self, page_index: usize) -> Result<(f64, f64), PdfError> {
        let bounds = self.pdf.media_box(page_index).map_err(PdfError::from)?;
        Ok((bounds.width(), bounds.height()))
    }

    /// The ordered text fragments of a page.
    pub fn fragments(&self, page_index: usize) -> Result<Vec<TextFragment>, PdfError> {
        extract_fragments(&self.pdf, page_index).map_err(PdfError::from)
    }

    /// Search every page for `query` and return all matches in page order.
    ///
    /// Matching is fuzzy: case, Unicode composition, dash variants, and all
    /// whitespace are folded away, so `"Block C-13"` finds `"BLOCK C – 13"`
    /// even when the page splits it across several fragments. Overlapping
    /// occurrences are all reported. Zero matches is a normal empty result,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidInput`] if the query normalizes to the
    /// empty string, or a parse error if a page fails to load. Pages are
    /// processed strictly sequentially.
    pub fn search(&self, query: &str) -> Result<Vec<Match>, PdfError> {
        if normalize(query).is_empty() {
            return Err(PdfError::InvalidInput("search text is empty".into()));
        }

        let mut matches = Vec::new();
        for page_index in 0..self.page_count() {
            let fragments = self.fragments(page_index)?;
            matches.extend(readdress_core::find_matches_on_page(
                &fragments, query, page_index,
            ));
        }
        Ok(matches)
    }

    /// Convert a manual selection into the same page-space [`Match`] shape
    /// the search path produces.
    ///
    /// The selection must already be unscaled and must have passed the
    /// caller-side drag threshold
    /// ([`readdress_core::passes_drag_threshold`]).
    pub fn reconcile(&self, selection: &SelectionRect) -> Result<Match, PdfError> {
        if selection.page_index >= self.page_count() {
            return Err(PdfError::PageOutOfRange {
                page: selection.page_index,
                count: self.page_count(),
            });
        }
        Ok(readdress_core::reconcile(selection))
    }

    /// Cover each match and draw `replacement` centered in its place.
    ///
    /// Returns the finished document as a new byte buffer; the held
    /// original is untouched. Fails atomically: an out-of-range page index
    /// in any match produces [`PdfError::PageOutOfRange`] and no output.
    pub fn compose(&self, matches: &[Match], replacement: &str) -> Result<Vec<u8>, PdfError> {
        compose_overlay(&self.bytes, matches, replacement).map_err(PdfError::from)
    }

    /// Return a copy of the document with every page translated by
    /// `(dx, dy)`. A zero offset in both axes is a passthrough copy.
    pub fn shift(&self, dx: f64, dy: f64) -> Result<Vec<u8>, PdfError> {
        shift_pages(&self.bytes, dx, dy).map_err(PdfError::from)
    }

    /// Raw full-text dump of one page: extracted fragment strings joined by
    /// single spaces, no normalization.
    pub fn page_text(&self, page_index: usize) -> Result<String, PdfError> {
        raw_page_text(&self.pdf, page_index).map_err(PdfError::from)
    }

    /// Raw full-text dump of the whole document, each page labeled with a
    /// 1-based marker. Diagnostic aid for troubleshooting failed matches.
    pub fn dump_text(&self) -> Result<String, PdfError> {
        let mut out = String::new();
        for page_index in 0..self.page_count() {
            if page_index > 0 {
                out.push('\n');
            }
            out.push_str(&format!("--- Page {} ---\n", page_index + 1));
            out.push_str(&self.page_text(page_index)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("bytes", &self.bytes.len())
            .field("page_count", &self.page_count())
            .finish()
    }
}
