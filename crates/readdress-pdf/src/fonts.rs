//! Glyph width metrics for the standard Type1 fonts.
//!
//! Width data (in 1/1000 em-square units) sourced from the Adobe AFM
//! specifications, indexed by WinAnsiEncoding character codes. Used in two
//! places: computing fragment advance widths during extraction when a font
//! dictionary lacks an explicit /Widths array, and measuring replacement
//! lines for centering during composition.

use crate::encoding::char_to_winansi;

/// Width assumed for glyphs with no metric data.
pub const DEFAULT_GLYPH_WIDTH: f64 = 500.0;

/// Glyph widths for one font, indexed by character code.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    widths: [f64; 256],
}

impl FontMetrics {
    fn from_table(table: &[u16; 256]) -> Self {
        let mut widths = [0.0; 256];
        for (slot, &w) in widths.iter_mut().zip(table.iter()) {
            *slot = f64::from(w);
        }
        Self { widths }
    }

    /// Build metrics from a font dictionary's /Widths array.
    ///
    /// `first_char` is the code of `widths[0]`; codes outside the array fall
    /// back to the base font's metrics (or the default width).
    pub fn with_widths_array(base: &FontMetrics, first_char: usize, widths: &[f64]) -> Self {
        let mut metrics = base.clone();
        for (i, &w) in widths.iter().enumerate() {
            let code = first_char + i;
            if code < 256 {
                metrics.widths[code] = w;
            }
        }
        metrics
    }

    /// Metrics for Helvetica, the face used for replacement text.
    pub fn helvetica() -> Self {
        Self::from_table(&HELVETICA)
    }

    /// Width of a character code in 1/1000 em units.
    pub fn code_width(&self, code: u8) -> f64 {
        let w = self.widths[code as usize];
        if w > 0.0 { w } else { DEFAULT_GLYPH_WIDTH }
    }

    /// Width of a Unicode character in 1/1000 em units, via WinAnsi.
    pub fn char_width(&self, ch: char) -> f64 {
        match char_to_winansi(ch) {
            Some(code) => self.code_width(code),
            None => DEFAULT_GLYPH_WIDTH,
        }
    }

    /// Rendered width of `text` at `size`, in document units.
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch)).sum::<f64>() / 1000.0 * size
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::helvetica()
    }
}

/// Look up built-in metrics by BaseFont name.
///
/// Subset prefixes (`ABCDEF+Helvetica`) are stripped first. Returns `None`
/// for faces without built-in data; callers fall back to Helvetica metrics
/// with the default glyph width.
pub fn standard_font(name: &str) -> Option<FontMetrics> {
    let name = match name.split_once('+') {
        Some((prefix, rest)) if prefix.len() == 6 => rest,
        _ => name,
    };
    match name {
        "Helvetica" | "Helvetica-Oblique" | "Arial" | "ArialMT" => {
            Some(FontMetrics::from_table(&HELVETICA))
        }
        "Helvetica-Bold" | "Helvetica-BoldOblique" | "Arial-BoldMT" => {
            Some(FontMetrics::from_table(&HELVETICA_BOLD))
        }
        "Times-Roman" | "TimesNewRomanPSMT" => Some(FontMetrics::from_table(&TIMES_ROMAN)),
        "Courier" | "Courier-Bold" | "Courier-Oblique" | "Courier-BoldOblique" => {
            Some(FontMetrics::from_table(&COURIER))
        }
        _ => None,
    }
}

// Courier is monospaced, all widths 600.
static COURIER: [u16; 256] = [600; 256];

// Helvetica (also Helvetica-Oblique), Adobe AFM widths via WinAnsiEncoding.
#[rustfmt::skip]
static HELVETICA: [u16; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 32-47: space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48-63: 0-9 : ; < = > ?
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 64-79: @ A-O
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 80-95: P-Z [ \ ] ^ _
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 96-111: ` a-o
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 112-127: p-z { | } ~
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    // 128-143
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    // 144-159
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    // 160-175
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 176-191
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192-207
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 208-223
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224-239
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 240-255
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

// Helvetica-Bold (also Helvetica-BoldOblique).
#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 32-47
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48-63
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    // 64-79
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    // 80-95
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    // 96-111
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    // 112-127
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
    // 128-143
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    // 144-159
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    // 160-175
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 176-191
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192-207
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 208-223
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224-239
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    // 240-255
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

// Times-Roman.
#[rustfmt::skip]
static TIMES_ROMAN: [u16; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 32-47
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    // 48-63
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    // 64-79
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    // 80-95
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    // 96-111
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    // 112-127
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541, 0,
    // 128-143
    500, 0, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333, 889, 0, 611, 0,
    // 144-159
    0, 333, 333, 444, 444, 350, 500, 1000, 333, 980, 389, 333, 722, 0, 444, 722,
    // 160-175
    250, 333, 500, 500, 500, 500, 200, 500, 333, 760, 276, 500, 564, 333, 760, 333,
    // 176-191
    400, 564, 300, 300, 333, 500, 453, 250, 333, 300, 310, 500, 750, 750, 750, 444,
    // 192-207
    722, 722, 722, 722, 722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333,
    // 208-223
    722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722, 722, 722, 556, 500,
    // 224-239
    444, 444, 444, 444, 444, 444, 667, 444, 444, 444, 444, 444, 278, 278, 278, 278,
    // 240-255
    500, 500, 500, 500, 500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500,
];
