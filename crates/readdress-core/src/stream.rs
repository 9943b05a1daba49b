//! Fragment index builder: a normalized character stream with per-byte
//! back-references into the source fragments.
//!
//! Matching runs against the canonical stream, and the parallel back-ref
//! vector maps any match offset back to the fragment that produced it. This
//! is what lets a query like `"Block C-13"` match page content split across
//! several fragments with arbitrary inter-fragment spacing.

use crate::fragment::TextFragment;
use crate::normalize::fold_char;

/// A page's canonical text plus a back-reference per canonical byte.
///
/// Invariant: `text.len() == backrefs.len()`, and every back-reference is a
/// valid index into the fragment slice the stream was built from. Built
/// fresh per page and discarded after locating matches; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStream {
    text: String,
    backrefs: Vec<usize>,
}

impl NormalizedStream {
    /// Build the index from an ordered sequence of fragments.
    ///
    /// For every fragment in order, every character of its text is folded
    /// individually; the folded output is appended to the stream with one
    /// back-reference per appended byte. Characters that fold to nothing
    /// (whitespace) contribute no stream position. A fragment with an empty
    /// string contributes nothing but still occupies its index.
    pub fn build(fragments: &[TextFragment]) -> Self {
        let mut text = String::new();
        let mut backrefs = Vec::new();
        let mut folded = String::new();

        for (index, fragment) in fragments.iter().enumerate() {
            for ch in fragment.text.chars() {
                folded.clear();
                fold_char(ch, &mut folded);
                if folded.is_empty() {
                    continue;
                }
                text.push_str(&folded);
                backrefs.extend(std::iter::repeat(index).take(folded.len()));
            }
        }

        Self { text, backrefs }
    }

    /// The canonical text stream.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Back-references, one per byte of [`text`](Self::text).
    pub fn backrefs(&self) -> &[usize] {
        &self.backrefs
    }

    /// The fragment index that produced the canonical byte at `offset`.
    pub fn fragment_at(&self, offset: usize) -> Option<usize> {
        self.backrefs.get(offset).copied()
    }

    /// Whether the stream holds no canonical text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
