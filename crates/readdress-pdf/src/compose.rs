//! Redaction/overlay compositor.
//!
//! Draws an opaque cover over each match rectangle and renders replacement
//! text centered inside the original box, then serializes the document into
//! a fresh byte buffer. The input buffer is never modified.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId, dictionary};
use readdress_core::{Match, PdfError};

use crate::backend::LoadedPdf;
use crate::error::BackendError;
use crate::fonts::FontMetrics;

/// Resource name under which the replacement-text font is registered on
/// each touched page.
const COVER_FONT_NAME: &str = "RdF1";

/// Boxes taller than this are treated as multi-line blocks. An auto-detected
/// single text line has a height close to its font size; a manually drawn
/// region is usually much taller.
const BLOCK_HEIGHT_THRESHOLD: f64 = 24.0;

/// Font size used for blocks, and the fallback for implausibly short lines.
const BLOCK_FONT_SIZE: f64 = 12.0;

/// Line boxes must be taller than this for their height to be believable as
/// a font size.
const MIN_LINE_FONT_SIZE: f64 = 5.0;

/// Line spacing as a multiple of the font size.
const LINE_SPACING: f64 = 1.2;

/// Cover each match with an opaque rectangle and draw `replacement` centered
/// in its place. Returns the finished document as a new byte buffer.
///
/// Matches are validated against the page count before any page is touched:
/// an out-of-range page index fails the whole composition and no partial
/// document is produced. Matches are drawn in list order; overlapping
/// rectangles on the same page paint over one another in that order.
pub fn compose_overlay(
    bytes: &[u8],
    matches: &[Match],
    replacement: &str,
) -> Result<Vec<u8>, BackendError> {
    let mut pdf = LoadedPdf::open(bytes)?;
    let count = pdf.page_count();
    for m in matches {
        if m.page_index >= count {
            return Err(BackendError::Core(PdfError::PageOutOfRange {
                page: m.page_index,
                count,
            }));
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(matches = matches.len(), pages = count, "composing overlay");

    let helvetica = FontMetrics::helvetica();
    let font_id = pdf.inner_mut().add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    // Pages are processed strictly in order; within a page, matches keep
    // their list order so later covers draw over earlier ones.
    for page_index in 0..count {
        let page_matches: Vec<&Match> =
            matches.iter().filter(|m| m.page_index == page_index).collect();
        if page_matches.is_empty() {
            continue;
        }

        let page_id = pdf.page_id(page_index)?;
        ensure_font_resource(&mut pdf, page_id, font_id)?;

        let content_bytes = pdf.page_content_bytes(page_id)?;
        let mut content = Content::decode(&content_bytes)
            .map_err(|e| BackendError::Parse(format!("failed to decode page content: {e}")))?;

        for m in page_matches {
            push_cover_ops(&mut content.operations, m);
            push_text_ops(&mut content.operations, m, replacement, &helvetica);
        }

        let encoded = content
            .encode()
            .map_err(|e| BackendError::Compose(format!("failed to encode content: {e}")))?;
        pdf.inner_mut()
            .change_page_content(page_id, encoded)
            .map_err(|e| BackendError::Compose(format!("failed to replace content: {e}")))?;
    }

    pdf.save_to_bytes()
}

/// Opaque white cover, slightly larger than the match box so glyph overshoot
/// at the edges cannot bleed through.
fn push_cover_ops(ops: &mut Vec<Operation>, m: &Match) {
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "rg",
        vec![Object::Real(1.0), Object::Real(1.0), Object::Real(1.0)],
    ));
    ops.push(Operation::new(
        "re",
        vec![
            Object::Real((m.x - 2.0) as f32),
            Object::Real((m.y - 2.0) as f32),
            Object::Real((m.width + 4.0) as f32),
            Object::Real((m.height + 5.0) as f32),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

/// Replacement text, centered line by line inside the match box.
fn push_text_ops(ops: &mut Vec<Operation>, m: &Match, replacement: &str, metrics: &FontMetrics) {
    let lines: Vec<&str> = replacement.split('\n').collect();
    let layout = TextLayout::for_box(m, lines.len());

    for (i, line) in lines.iter().enumerate() {
        let baseline = layout.first_baseline - i as f64 * layout.line_height;
        let line_width = metrics.text_width(line, layout.font_size);
        let tx = m.x + (m.width - line_width) / 2.0;

        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(COVER_FONT_NAME.as_bytes().to_vec()),
                Object::Real(layout.font_size as f32),
            ],
        ));
        ops.push(Operation::new(
            "rg",
            vec![Object::Real(0.0), Object::Real(0.0), Object::Real(0.0)],
        ));
        ops.push(Operation::new(
            "Td",
            vec![Object::Real(tx as f32), Object::Real(baseline as f32)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(
                crate::encoding::encode_winansi(line),
                lopdf::StringFormat::Literal,
            )],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
}

/// Font size and vertical placement for a match box.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextLayout {
    font_size: f64,
    line_height: f64,
    first_baseline: f64,
}

impl TextLayout {
    /// Classify the box and place the first baseline.
    ///
    /// A **block** (height over [`BLOCK_HEIGHT_THRESHOLD`]) gets a fixed
    /// 12-unit font with the line group centered on the box's vertical
    /// midpoint; the `font_size / 4` term approximates the baseline-to-
    /// visual-center offset. A **line** uses its own height as the font size
    /// (falling back to 12 under [`MIN_LINE_FONT_SIZE`]) with the first
    /// baseline on the box's bottom edge.
    fn for_box(m: &Match, line_count: usize) -> Self {
        let is_block = m.height > BLOCK_HEIGHT_THRESHOLD;
        let font_size = if is_block {
            BLOCK_FONT_SIZE
        } else if m.height > MIN_LINE_FONT_SIZE {
            m.height
        } else {
            BLOCK_FONT_SIZE
        };
        let line_height = LINE_SPACING * font_size;

        let first_baseline = if is_block {
            let group_height = line_count.saturating_sub(1) as f64 * line_height;
            let center = m.y + m.height / 2.0;
            center + group_height / 2.0 - font_size / 4.0
        } else {
            m.y
        };

        Self {
            font_size,
            line_height,
            first_baseline,
        }
    }
}

/// Register the replacement font in the page's resources, materializing
/// inherited or missing resources onto the page dictionary first.
fn ensure_font_resource(
    pdf: &mut LoadedPdf,
    page_id: ObjectId,
    font_id: ObjectId,
) -> Result<(), BackendError> {
    let resources_entry = {
        let page_dict = pdf
            .inner()
            .get_object(page_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;
        page_dict.get(b"Resources").ok().cloned()
    };

    let resources_ref: Option<ObjectId> = match resources_entry {
        Some(Object::Reference(rid)) => Some(rid),
        Some(Object::Dictionary(_)) => None,
        Some(other) => {
            return Err(BackendError::Parse(format!(
                "Resources is not a dictionary: {other:?}"
            )));
        }
        None => {
            // Inherited or absent: materialize an equivalent dictionary on
            // the page itself. References inside the clone stay valid.
            let materialized = pdf
                .effective_resources(page_id)?
                .unwrap_or_else(Dictionary::new);
            let page_dict = page_dict_mut(pdf, page_id)?;
            page_dict.set("Resources", Object::Dictionary(materialized));
            None
        }
    };

    // Locate the /Font subdictionary and insert the entry; a /Font held as
    // an indirect reference is patched at document level.
    let font_dict_ref = match resources_ref {
        Some(rid) => {
            let res = pdf
                .inner_mut()
                .get_object_mut(rid)
                .and_then(|o| o.as_dict_mut())
                .map_err(|e| BackendError::Parse(format!("failed to get resources: {e}")))?;
            add_font_entry(res, font_id)
        }
        None => {
            let page_dict = page_dict_mut(pdf, page_id)?;
            let res = page_dict
                .get_mut(b"Resources")
                .and_then(|o| o.as_dict_mut())
                .map_err(|e| BackendError::Parse(format!("failed to get resources: {e}")))?;
            add_font_entry(res, font_id)
        }
    };

    if let Some(rid) = font_dict_ref {
        let fonts = pdf
            .inner_mut()
            .get_object_mut(rid)
            .and_then(|o| o.as_dict_mut())
            .map_err(|e| BackendError::Parse(format!("failed to get font dictionary: {e}")))?;
        fonts.set(COVER_FONT_NAME, Object::Reference(font_id));
    }

    Ok(())
}

fn page_dict_mut<'a>(
    pdf: &'a mut LoadedPdf,
    page_id: ObjectId,
) -> Result<&'a mut Dictionary, BackendError> {
    pdf.inner_mut()
        .get_object_mut(page_id)
        .and_then(|o| o.as_dict_mut())
        .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))
}

/// Insert the font into a resources dictionary's /Font entry. Returns the
/// object id of an indirect /Font dictionary that must be patched instead.
fn add_font_entry(resources: &mut Dictionary, font_id: ObjectId) -> Option<ObjectId> {
    match resources.get(b"Font") {
        Ok(Object::Reference(rid)) => Some(*rid),
        Ok(Object::Dictionary(_)) => {
            if let Ok(Object::Dictionary(fonts)) = resources.get_mut(b"Font") {
                fonts.set(COVER_FONT_NAME, Object::Reference(font_id));
            }
            None
        }
        _ => {
            resources.set(
                "Font",
                dictionary! { COVER_FONT_NAME => Object::Reference(font_id) },
            );
            None
        }
    }
}
