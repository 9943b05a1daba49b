//! Match locator: find every occurrence of a query in a page's fragments and
//! derive one page-space bounding rectangle per occurrence.

use crate::fragment::TextFragment;
use crate::normalize::normalize;
use crate::stream::NormalizedStream;

/// A located (or user-designated) rectangle in page space.
///
/// Coordinates are in the document's own unscaled units with a bottom-left
/// origin: `y` is the bottom edge of the box. This is the single canonical
/// representation consumed by the compositor, regardless of whether the
/// match came from a text search or a manual selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    /// 0-based page index.
    pub page_index: usize,
    /// Left edge in page space.
    pub x: f64,
    /// Bottom edge in page space.
    pub y: f64,
    /// Box width, non-negative.
    pub width: f64,
    /// Box height, non-negative.
    pub height: f64,
    /// The original (non-normalized) query for search-derived matches;
    /// empty for manual selections.
    pub text: String,
}

/// Find every occurrence of `query` across all pages.
///
/// Pages are processed strictly in order; the page index of each match is
/// its position in `pages`. Returns an empty list immediately if the
/// normalized query is empty.
pub fn find_matches(pages: &[Vec<TextFragment>], query: &str) -> Vec<Match> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for (page_index, fragments) in pages.iter().enumerate() {
        locate_on_page(fragments, query, &needle, page_index, &mut matches);
    }
    matches
}

/// Find every occurrence of `query` in a single page's fragments.
pub fn find_matches_on_page(
    fragments: &[TextFragment],
    query: &str,
    page_index: usize,
) -> Vec<Match> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }
    let mut matches = Vec::new();
    locate_on_page(fragments, query, &needle, page_index, &mut matches);
    matches
}

fn locate_on_page(
    fragments: &[TextFragment],
    query: &str,
    needle: &str,
    page_index: usize,
    out: &mut Vec<Match>,
) {
    let stream = NormalizedStream::build(fragments);
    let hay = stream.text();

    let mut from = 0;
    while from <= hay.len() {
        let Some(pos) = hay[from..].find(needle) else {
            break;
        };
        let start = from + pos;
        let end = start + needle.len();

        out.push(match_from_span(&stream, fragments, start, end, page_index, query));

        // Overlapping occurrences are all reported: restart one character
        // past the match start, not past its end.
        let step = hay[start..].chars().next().map_or(1, char::len_utf8);
        from = start + step;
    }
}

/// Derive one bounding rectangle from a canonical span `[start, end)`.
fn match_from_span(
    stream: &NormalizedStream,
    fragments: &[TextFragment],
    start: usize,
    end: usize,
    page_index: usize,
    query: &str,
) -> Match {
    let first = stream.backrefs()[start];
    let last = stream.backrefs()[end - 1];

    // Horizontal envelope over the inclusive fragment range. Fragments
    // between the first and last are included even if they contributed no
    // canonical bytes, so skipped whitespace fragments leave no gaps.
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for fragment in &fragments[first..=last] {
        let x0 = fragment.origin_x();
        let x1 = x0 + fragment.width;
        min_x = min_x.min(x0.min(x1));
        max_x = max_x.max(x0.max(x1));
    }

    let anchor = &fragments[first];
    let (x, width) = if min_x.is_finite() && max_x.is_finite() && max_x >= min_x {
        (min_x, max_x - min_x)
    } else {
        // The range always contains at least the first fragment; this guards
        // against non-finite fragment data only.
        (anchor.origin_x(), anchor.width.abs())
    };

    // Vertical extent from the first covering fragment only. A match that
    // spans text lines reports the first line's height.
    Match {
        page_index,
        x,
        y: anchor.origin_y(),
        width,
        height: anchor.line_height(),
        text: query.to_string(),
    }
}
