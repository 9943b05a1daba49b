//! Text fragment extraction from page content streams.
//!
//! A reduced content-stream interpreter that tracks the PDF text state
//! (BT/ET, Tf, Td/TD/Tm/T*/TL, Tc/Tw/Tz/Ts, q/Q/cm) and emits one
//! [`TextFragment`] per shown string: a `Tj`/`'`/`"` operand or one string
//! element of a `TJ` array. Font size and horizontal scaling are folded into
//! the fragment transform, so `transform[4..]` is the page-space baseline
//! origin and the vertical scale magnitude approximates the glyph height.
//!
//! Path, image, and form-XObject operators are ignored: fragments come from
//! the page's own content streams only.

use std::collections::HashMap;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId};
use readdress_core::TextFragment;

use crate::backend::{LoadedPdf, object_to_f64};
use crate::encoding::decode_pdf_string;
use crate::error::BackendError;
use crate::fonts::{FontMetrics, standard_font};

const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Extract the ordered text fragments of a page.
pub fn extract_fragments(
    pdf: &LoadedPdf,
    page_index: usize,
) -> Result<Vec<TextFragment>, BackendError> {
    let page_id = pdf.page_id(page_index)?;
    let bytes = pdf.page_content_bytes(page_id)?;
    let content = Content::decode(&bytes)
        .map_err(|e| BackendError::Parse(format!("failed to decode page content: {e}")))?;
    let fonts = page_font_metrics(pdf, page_id)?;
    let fragments = interpret(&content.operations, &fonts);

    #[cfg(feature = "tracing")]
    tracing::debug!(page = page_index, fragments = fragments.len(), "extracted text fragments");

    Ok(fragments)
}

/// Raw full-text dump of a page: the extracted fragment strings joined by
/// single spaces, no normalization applied. Diagnostic aid for
/// troubleshooting failed matches.
pub fn raw_page_text(pdf: &LoadedPdf, page_index: usize) -> Result<String, BackendError> {
    let fragments = extract_fragments(pdf, page_index)?;
    Ok(fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" "))
}

/// Text state parameters that are part of the graphics state and restored
/// by q/Q. The text and line matrices are not: those are managed by BT/Tm.
#[derive(Debug, Clone)]
struct TextParams {
    font: String,
    size: f64,
    char_spacing: f64,
    word_spacing: f64,
    /// Horizontal scaling as a fraction (Tz 100 → 1.0).
    h_scaling: f64,
    leading: f64,
    rise: f64,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            font: String::new(),
            size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scaling: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

fn interpret(ops: &[Operation], fonts: &HashMap<String, FontMetrics>) -> Vec<TextFragment> {
    let default_metrics = FontMetrics::default();
    let mut fragments = Vec::new();

    let mut ctm = IDENTITY;
    let mut stack: Vec<([f64; 6], TextParams)> = Vec::new();
    let mut params = TextParams::default();
    let mut tm = IDENTITY;
    let mut lm = IDENTITY;

    for op in ops {
        match op.operator.as_str() {
            "BT" => {
                tm = IDENTITY;
                lm = IDENTITY;
            }
            "ET" => {}
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    params.font = String::from_utf8_lossy(name).into_owned();
                }
                if let Some(size) = op.operands.get(1).and_then(|o| object_to_f64(o).ok()) {
                    params.size = size;
                }
            }
            "Td" | "TD" => {
                if let (Some(tx), Some(ty)) = (operand_f64(op, 0), operand_f64(op, 1)) {
                    if op.operator == "TD" {
                        params.leading = -ty;
                    }
                    lm = multiply(&translation(tx, ty), &lm);
                    tm = lm;
                }
            }
            "Tm" => {
                if let Some(m) = operand_matrix(op) {
                    lm = m;
                    tm = lm;
                }
            }
            "T*" => {
                lm = multiply(&translation(0.0, -params.leading), &lm);
                tm = lm;
            }
            "TL" => {
                if let Some(v) = operand_f64(op, 0) {
                    params.leading = v;
                }
            }
            "Tc" => {
                if let Some(v) = operand_f64(op, 0) {
                    params.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some(v) = operand_f64(op, 0) {
                    params.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some(v) = operand_f64(op, 0) {
                    params.h_scaling = v / 100.0;
                }
            }
            "Ts" => {
                if let Some(v) = operand_f64(op, 0) {
                    params.rise = v;
                }
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    let advance =
                        show_string(bytes, &params, &tm, &ctm, fonts, &default_metrics, &mut fragments);
                    tm = multiply(&translation(advance, 0.0), &tm);
                }
            }
            "'" => {
                lm = multiply(&translation(0.0, -params.leading), &lm);
                tm = lm;
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    let advance =
                        show_string(bytes, &params, &tm, &ctm, fonts, &default_metrics, &mut fragments);
                    tm = multiply(&translation(advance, 0.0), &tm);
                }
            }
            "\"" => {
                if let Some(v) = operand_f64(op, 0) {
                    params.word_spacing = v;
                }
                if let Some(v) = operand_f64(op, 1) {
                    params.char_spacing = v;
                }
                lm = multiply(&translation(0.0, -params.leading), &lm);
                tm = lm;
                if let Some(Object::String(bytes, _)) = op.operands.get(2) {
                    let advance =
                        show_string(bytes, &params, &tm, &ctm, fonts, &default_metrics, &mut fragments);
                    tm = multiply(&translation(advance, 0.0), &tm);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => {
                                let advance = show_string(
                                    bytes,
                                    &params,
                                    &tm,
                                    &ctm,
                                    fonts,
                                    &default_metrics,
                                    &mut fragments,
                                );
                                tm = multiply(&translation(advance, 0.0), &tm);
                            }
                            Object::Integer(_) | Object::Real(_) => {
                                if let Ok(n) = object_to_f64(item) {
                                    let tx = -n / 1000.0 * params.size * params.h_scaling;
                                    tm = multiply(&translation(tx, 0.0), &tm);
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }
            "q" => stack.push((ctm, params.clone())),
            "Q" => {
                if let Some((saved_ctm, saved_params)) = stack.pop() {
                    ctm = saved_ctm;
                    params = saved_params;
                }
            }
            "cm" => {
                if let Some(m) = operand_matrix(op) {
                    ctm = multiply(&m, &ctm);
                }
            }
            _ => {}
        }
    }

    fragments
}

/// Emit a fragment for one shown string and return its text-space advance.
fn show_string(
    bytes: &[u8],
    params: &TextParams,
    tm: &[f64; 6],
    ctm: &[f64; 6],
    fonts: &HashMap<String, FontMetrics>,
    default_metrics: &FontMetrics,
    out: &mut Vec<TextFragment>,
) -> f64 {
    let metrics = fonts.get(&params.font).unwrap_or(default_metrics);
    let text = decode_pdf_string(bytes);

    // Advance per PDF text space: ((w/1000)·size + Tc + Tw·space) · Th
    let mut advance = 0.0;
    for ch in text.chars() {
        let glyph = metrics.char_width(ch) / 1000.0 * params.size;
        let spacing = params.char_spacing + if ch == ' ' { params.word_spacing } else { 0.0 };
        advance += (glyph + spacing) * params.h_scaling;
    }

    let m = multiply(tm, ctm);
    let trm = multiply(
        &[
            params.size * params.h_scaling,
            0.0,
            0.0,
            params.size,
            0.0,
            params.rise,
        ],
        &m,
    );

    let mut fragment = TextFragment::new(
        text,
        trm,
        advance * (m[0] * m[0] + m[1] * m[1]).sqrt(),
    );
    fragment.height = Some((trm[2] * trm[2] + trm[3] * trm[3]).sqrt());
    out.push(fragment);

    advance
}

/// Width metrics for every font named in the page's resources.
fn page_font_metrics(
    pdf: &LoadedPdf,
    page_id: ObjectId,
) -> Result<HashMap<String, FontMetrics>, BackendError> {
    let mut map = HashMap::new();
    let Some(resources) = pdf.effective_resources(page_id)? else {
        return Ok(map);
    };
    let Ok(fonts_obj) = resources.get(b"Font") else {
        return Ok(map);
    };
    let Object::Dictionary(fonts_dict) = pdf.resolve(fonts_obj) else {
        return Ok(map);
    };
    for (name, value) in fonts_dict.iter() {
        if let Object::Dictionary(font_dict) = pdf.resolve(value) {
            map.insert(
                String::from_utf8_lossy(name).into_owned(),
                metrics_for_font(pdf, font_dict),
            );
        }
    }
    Ok(map)
}

/// Resolve a font dictionary to width metrics: an explicit /Widths array
/// wins, then built-in standard-font data by /BaseFont, then Helvetica
/// defaults.
fn metrics_for_font(pdf: &LoadedPdf, font_dict: &Dictionary) -> FontMetrics {
    let base = font_dict
        .get(b"BaseFont")
        .ok()
        .and_then(|o| match pdf.resolve(o) {
            Object::Name(n) => standard_font(&String::from_utf8_lossy(n)),
            _ => None,
        })
        .unwrap_or_default();

    let first_char = font_dict
        .get(b"FirstChar")
        .ok()
        .and_then(|o| object_to_f64(pdf.resolve(o)).ok())
        .unwrap_or(0.0) as usize;

    if let Ok(widths_obj) = font_dict.get(b"Widths") {
        if let Ok(array) = pdf.resolve(widths_obj).as_array() {
            let values: Vec<f64> = array
                .iter()
                .filter_map(|o| object_to_f64(pdf.resolve(o)).ok())
                .collect();
            if !values.is_empty() {
                return FontMetrics::with_widths_array(&base, first_char, &values);
            }
        }
    }

    base
}

fn operand_f64(op: &Operation, index: usize) -> Option<f64> {
    op.operands.get(index).and_then(|o| object_to_f64(o).ok())
}

fn operand_matrix(op: &Operation) -> Option<[f64; 6]> {
    if op.operands.len() < 6 {
        return None;
    }
    let mut m = [0.0; 6];
    for (slot, operand) in m.iter_mut().zip(op.operands.iter()) {
        *slot = object_to_f64(operand).ok()?;
    }
    Some(m)
}

/// Affine multiply with row-vector convention: `a` is applied first.
fn multiply(a: &[f64; 6], b: &[f64; 6]) -> [f64; 6] {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
        a[4] * b[0] + a[5] * b[2] + b[4],
        a[4] * b[1] + a[5] * b[3] + b[5],
    ]
}

fn translation(tx: f64, ty: f64) -> [f64; 6] {
    [1.0, 0.0, 0.0, 1.0, tx, ty]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::minimal_pdf;

    fn fragments_for(content: &[u8]) -> Vec<TextFragment> {
        let bytes = minimal_pdf(content);
        let pdf = LoadedPdf::open(&bytes).unwrap();
        extract_fragments(&pdf, 0).unwrap()
    }

    #[test]
    fn simple_tj_yields_one_positioned_fragment() {
        let frags = fragments_for(b"BT /F1 12 Tf 50 700 Td (123 Old Street) Tj ET");
        assert_eq!(frags.len(), 1);

        let f = &frags[0];
        assert_eq!(f.text, "123 Old Street");
        assert!((f.origin_x() - 50.0).abs() < 1e-6);
        assert!((f.origin_y() - 700.0).abs() < 1e-6);
        assert!((f.line_height() - 12.0).abs() < 1e-6);
        // 14 Helvetica glyphs at 12pt land well under the page width
        assert!(f.width > 40.0 && f.width < 120.0, "width = {}", f.width);
    }

    #[test]
    fn tj_array_emits_one_fragment_per_string() {
        let frags = fragments_for(b"BT /F1 10 Tf 10 100 Td [(He) -200 (llo)] TJ ET");
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].text, "He");
        assert_eq!(frags[1].text, "llo");

        // Second fragment starts after the first's advance plus the kerning
        // offset: He = (722 + 556)/1000 · 10 = 12.78, kern = 200/1000 · 10 = 2
        let expected = 10.0 + 12.78 + 2.0;
        assert!(
            (frags[1].origin_x() - expected).abs() < 1e-6,
            "origin_x = {}",
            frags[1].origin_x()
        );
    }

    #[test]
    fn td_moves_to_the_next_line() {
        let frags = fragments_for(b"BT /F1 12 Tf 72 720 Td (Line1) Tj 0 -20 Td (Line2) Tj ET");
        assert_eq!(frags.len(), 2);
        assert!((frags[0].origin_y() - 720.0).abs() < 1e-6);
        assert!((frags[1].origin_y() - 700.0).abs() < 1e-6);
        assert!((frags[1].origin_x() - 72.0).abs() < 1e-6);
    }

    #[test]
    fn t_star_uses_the_leading() {
        let frags = fragments_for(b"BT /F1 12 Tf 14 TL 72 720 Td (A) Tj T* (B) Tj ET");
        assert_eq!(frags.len(), 2);
        assert!((frags[1].origin_y() - 706.0).abs() < 1e-6);
    }

    #[test]
    fn cm_scales_positions_and_height() {
        let frags = fragments_for(b"2 0 0 2 0 0 cm BT /F1 12 Tf 10 20 Td (X) Tj ET");
        assert_eq!(frags.len(), 1);
        assert!((frags[0].origin_x() - 20.0).abs() < 1e-6);
        assert!((frags[0].origin_y() - 40.0).abs() < 1e-6);
        assert!((frags[0].line_height() - 24.0).abs() < 1e-6);
    }

    #[test]
    fn q_restores_the_transform() {
        let frags =
            fragments_for(b"q 2 0 0 2 0 0 cm Q BT /F1 12 Tf 10 20 Td (X) Tj ET");
        assert_eq!(frags.len(), 1);
        assert!((frags[0].origin_x() - 10.0).abs() < 1e-6);
        assert!((frags[0].origin_y() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn word_spacing_widens_the_advance() {
        let plain = fragments_for(b"BT /F1 12 Tf 0 0 Td (a b) Tj ET");
        let spaced = fragments_for(b"BT /F1 12 Tf 5 Tw 0 0 Td (a b) Tj ET");
        assert!((spaced[0].width - plain[0].width - 5.0).abs() < 1e-6);
    }

    #[test]
    fn empty_page_has_no_fragments() {
        assert!(fragments_for(b"BT ET").is_empty());
    }

    #[test]
    fn raw_page_text_joins_fragments_with_spaces() {
        let bytes = minimal_pdf(b"BT /F1 12 Tf 0 0 Td (Hello) Tj 0 -20 Td (World) Tj ET");
        let pdf = LoadedPdf::open(&bytes).unwrap();
        assert_eq!(raw_page_text(&pdf, 0).unwrap(), "Hello World");
    }

    #[test]
    fn matrix_multiply_composes_translations() {
        let a = translation(5.0, 7.0);
        let b = translation(1.0, 2.0);
        assert_eq!(multiply(&a, &b), translation(6.0, 9.0));
    }
}
