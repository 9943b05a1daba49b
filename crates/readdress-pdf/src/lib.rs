//! readdress-pdf: lopdf-backed document I/O for readdress.
//!
//! Supplies the document side of the pipeline: parsing a PDF into page-level
//! access ([`LoadedPdf`]), extracting positioned text fragments from content
//! streams ([`extract_fragments`]), drawing the redaction overlay
//! ([`compose_overlay`]), and whole-document page repositioning
//! ([`shift_pages`]). The matching engine itself lives in `readdress-core`;
//! this crate only produces its inputs and consumes its outputs.

pub mod backend;
pub mod compose;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod fonts;
pub mod shift;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::{LoadedPdf, PageBounds};
pub use compose::compose_overlay;
pub use error::BackendError;
pub use extract::{extract_fragments, raw_page_text};
pub use fonts::{FontMetrics, standard_font};
pub use shift::shift_pages;
