//! Coordinate reconciler: convert a user-drawn viewport rectangle into the
//! same page-space representation the match locator produces.
//!
//! The interactive selection lives in rendering-viewport space (top-left
//! origin, at display scale); the document layer works in page space
//! (bottom-left origin, unscaled). The caller divides by the display scale
//! before reconciliation, so this module only flips the vertical axis.

use crate::locate::Match;

/// Minimum drag size in display pixels (measured before unscaling). Drags
/// smaller than this in either dimension are accidental clicks, not
/// selections.
pub const MIN_DRAG_PX: f64 = 5.0;

/// A user-drawn rectangle in viewport space, already divided by the display
/// scale.
///
/// Top-left origin: `y` is the distance from the top of the page render.
/// `viewport_height` is the unscaled full page height, supplied alongside so
/// the vertical flip needs no other context. Exists only while translating a
/// drag gesture into a [`Match`]; never stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionRect {
    /// Left edge.
    pub x: f64,
    /// Top edge (distance from the top of the page).
    pub y: f64,
    /// Selection width.
    pub width: f64,
    /// Selection height.
    pub height: f64,
    /// 0-based page index the selection was drawn on.
    pub page_index: usize,
    /// Unscaled full page height.
    pub viewport_height: f64,
}

/// Whether a drag of the given on-screen size (pre-unscale display pixels)
/// counts as a real selection.
///
/// Callers must apply this gate before [`reconcile`]; the reconciler assumes
/// it is only ever given a rectangle that already passed the threshold.
pub fn passes_drag_threshold(width_px: f64, height_px: f64) -> bool {
    width_px >= MIN_DRAG_PX && height_px >= MIN_DRAG_PX
}

/// Convert a selection rectangle into a page-space [`Match`].
///
/// The page coordinate system has a bottom-left origin, so the top edge at
/// `y` maps to a bottom edge at `viewport_height - y - height`. Horizontal
/// position and both sizes pass through unchanged: they are origin- and
/// scale-invariant once unscaled.
pub fn reconcile(selection: &SelectionRect) -> Match {
    Match {
        page_index: selection.page_index,
        x: selection.x,
        y: selection.viewport_height - selection.y - selection.height,
        width: selection.width,
        height: selection.height,
        text: String::new(),
    }
}
