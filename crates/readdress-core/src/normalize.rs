//! Text normalization for fuzzy matching.
//!
//! Reduces text to a comparison-only canonical form: case differences,
//! Unicode composition differences, dash variants, and all whitespace are
//! folded away. `"Block C - 13"`, `"Block C-13"`, and `"BLOCK C–13"` all
//! normalize to the same canonical string.

use unicode_normalization::UnicodeNormalization;

/// Unicode hyphen/dash block mapped to the ASCII hyphen (U+2010..=U+2015:
/// hyphen, non-breaking hyphen, figure dash, en dash, em dash, horizontal bar).
const DASH_BLOCK: std::ops::RangeInclusive<char> = '\u{2010}'..='\u{2015}';

/// Normalize text into its canonical comparable form.
///
/// Deterministic, pure, and total over all input strings (including the
/// empty string). Steps, in order: case-fold (locale-independent), Unicode
/// canonical composition, dash unification, whitespace removal.
///
/// The fold is applied character by character so the fragment index builder
/// can track exactly which source character produced which canonical bytes;
/// normalizing a single-character string therefore yields the same result as
/// that character's contribution inside a longer string.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        fold_char(ch, &mut out);
    }
    out
}

/// Fold a single character into `out`.
///
/// Appends zero or more canonical characters: whitespace contributes
/// nothing, dashes contribute `-`, and case-folding may expand one character
/// into several (e.g. `ß` → `ss`).
pub(crate) fn fold_char(ch: char, out: &mut String) {
    for lowered in ch.to_lowercase() {
        for composed in std::iter::once(lowered).nfc() {
            let canonical = if DASH_BLOCK.contains(&composed) {
                '-'
            } else {
                composed
            };
            if !canonical.is_whitespace() {
                out.push(canonical);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn whitespace_is_deleted() {
        assert_eq!(normalize("  a \t b\nc "), "abc");
        assert_eq!(normalize(" \t\n"), "");
    }

    #[test]
    fn case_is_folded() {
        assert_eq!(normalize("Block"), "block");
        assert_eq!(normalize("STREET"), "street");
    }

    #[test]
    fn dash_variants_unify() {
        // hyphen, en dash, em dash, horizontal bar
        assert_eq!(normalize("a\u{2010}b"), "a-b");
        assert_eq!(normalize("a\u{2013}b"), "a-b");
        assert_eq!(normalize("a\u{2014}b"), "a-b");
        assert_eq!(normalize("a\u{2015}b"), "a-b");
    }

    #[test]
    fn address_variants_are_equivalent() {
        let canonical = normalize("Block C-13");
        assert_eq!(normalize("Block C - 13"), canonical);
        assert_eq!(normalize("BLOCK C\u{2013}13"), canonical);
    }

    #[test]
    fn normalization_is_idempotent() {
        for s in ["Block C - 13", "MIXED case\u{2014}text", "", "  ", "straße"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn canonical_composition_applies() {
        // Precomposed é and the OHM SIGN singleton both land on their NFC form.
        assert_eq!(normalize("caf\u{00E9}"), "caf\u{00E9}");
        assert_eq!(normalize("\u{2126}"), "\u{3C9}"); // Ω → ω after case-fold
    }

    #[test]
    fn single_char_fold_matches_in_context() {
        let mut folded = String::new();
        fold_char('–', &mut folded);
        assert_eq!(folded, "-");

        folded.clear();
        fold_char(' ', &mut folded);
        assert_eq!(folded, "");
    }
}
