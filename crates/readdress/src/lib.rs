//! readdress: locate text in a PDF, cover it, and stamp replacement text
//! centered in the original box.
//!
//! The high-level entry point is [`Document`]: open a PDF from bytes or a
//! path, [`search`](Document::search) for a string (fuzzy: case, Unicode
//! composition, dash variants, and whitespace are folded away) or
//! [`reconcile`](Document::reconcile) a manually drawn selection, then
//! [`compose`](Document::compose) the redaction overlay into a fresh byte
//! buffer. The original document is never mutated.
//!
//! The underlying layers are exposed for direct use: `readdress-core` holds
//! the backend-independent matching engine and `readdress-pdf` the
//! lopdf-backed document I/O.

mod document;

pub use document::Document;
pub use readdress_core::{
    MIN_DRAG_PX, Match, PdfError, ReplaceMode, SavedConfig, SelectionRect, TextFragment,
    find_matches, find_matches_on_page, normalize, passes_drag_threshold, reconcile,
};
pub use readdress_pdf::{BackendError, compose_overlay, extract_fragments, shift_pages};
