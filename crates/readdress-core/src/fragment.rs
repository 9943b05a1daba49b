//! Positioned text fragments, the input to the matching engine.

/// An atomic positioned run of text as extracted from a page.
///
/// One fragment corresponds to one shown string in the page content (a `Tj`
/// operand or one string element of a `TJ` array). The placement transform is
/// the full text rendering matrix with font size and horizontal scaling
/// folded in, so `transform[4]`/`transform[5]` are the page-space origin of
/// the run and `transform[3]` carries the vertical scale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFragment {
    /// The decoded text content of this run.
    pub text: String,
    /// Placement transform `[a, b, c, d, e, f]` at time of rendering.
    pub transform: [f64; 6],
    /// Horizontal advance of the run in page-space units.
    pub width: f64,
    /// Explicit glyph-box height, if the extractor computed one.
    pub height: Option<f64>,
}

impl TextFragment {
    /// Create a fragment without an explicit height.
    pub fn new(text: impl Into<String>, transform: [f64; 6], width: f64) -> Self {
        Self {
            text: text.into(),
            transform,
            width,
            height: None,
        }
    }

    /// Horizontal origin in page space.
    pub fn origin_x(&self) -> f64 {
        self.transform[4]
    }

    /// Vertical origin (baseline) in page space.
    pub fn origin_y(&self) -> f64 {
        self.transform[5]
    }

    /// Height of the run's text line.
    ///
    /// Uses the explicit `height` when present, else the absolute value of
    /// the transform's vertical scale component.
    pub fn line_height(&self) -> f64 {
        self.height.unwrap_or_else(|| self.transform[3].abs())
    }
}
