//! readdress-core: backend-independent matching and coordinate algorithms.
//!
//! This crate holds the engine that makes readdress work: text
//! normalization for fuzzy matching, the fragment index (a canonical
//! character stream with per-byte back-references into positioned source
//! fragments), the match locator that turns occurrences into page-space
//! bounding boxes, and the coordinate reconciler that brings user-drawn
//! viewport rectangles into the same representation. It knows nothing about
//! PDF syntax; the `readdress-pdf` crate supplies fragments and consumes
//! matches.

pub mod config;
pub mod error;
pub mod fragment;
pub mod locate;
pub mod normalize;
pub mod reconcile;
pub mod stream;

pub use config::{ReplaceMode, SavedConfig};
pub use error::PdfError;
pub use fragment::TextFragment;
pub use locate::{Match, find_matches, find_matches_on_page};
pub use normalize::normalize;
pub use reconcile::{MIN_DRAG_PX, SelectionRect, passes_drag_threshold, reconcile};
pub use stream::NormalizedStream;
