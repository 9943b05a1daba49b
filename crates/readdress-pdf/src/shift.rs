//! Whole-document page repositioning.
//!
//! Re-embeds every page's content as a single Form XObject and repaints it
//! translated by a fixed offset. The shifted result is a flattened
//! re-embedding: per-page text structure is discarded, so this is only used
//! as a final whole-document step, never followed by further text matching.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, Stream, dictionary};

use crate::backend::LoadedPdf;
use crate::error::BackendError;

/// XObject name used for each re-embedded page.
const PAGE_FORM_NAME: &str = "Fm0";

/// Return a copy of the document with every page translated by `(dx, dy)`.
///
/// A zero offset in both axes is a passthrough: the input bytes are returned
/// unchanged (as a fresh buffer). The input is never mutated.
pub fn shift_pages(bytes: &[u8], dx: f64, dy: f64) -> Result<Vec<u8>, BackendError> {
    if dx == 0.0 && dy == 0.0 {
        return Ok(bytes.to_vec());
    }

    let mut pdf = LoadedPdf::open(bytes)?;

    for index in 0..pdf.page_count() {
        let page_id = pdf.page_id(index)?;
        let media = pdf.media_box(index)?;
        let content_bytes = pdf.page_content_bytes(page_id)?;
        let resources = pdf
            .effective_resources(page_id)?
            .unwrap_or_else(Dictionary::new);

        // The page becomes a fixed-size graphical unit: its old content and
        // resources move into a Form XObject with the page's media box.
        let form_id = pdf.inner_mut().add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => vec![
                    Object::Real(media.x0 as f32),
                    Object::Real(media.y0 as f32),
                    Object::Real(media.x1 as f32),
                    Object::Real(media.y1 as f32),
                ],
                "Resources" => Object::Dictionary(resources),
            },
            content_bytes,
        ));

        let operations = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(1.0),
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(1.0),
                    Object::Real(dx as f32),
                    Object::Real(dy as f32),
                ],
            ),
            Operation::new("Do", vec![Object::Name(PAGE_FORM_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ];
        let encoded = Content { operations }
            .encode()
            .map_err(|e| BackendError::Compose(format!("failed to encode content: {e}")))?;
        pdf.inner_mut()
            .change_page_content(page_id, encoded)
            .map_err(|e| BackendError::Compose(format!("failed to replace content: {e}")))?;

        let page_dict = pdf
            .inner_mut()
            .get_object_mut(page_id)
            .and_then(|o| o.as_dict_mut())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;
        page_dict.set(
            "Resources",
            dictionary! {
                "XObject" => dictionary! { PAGE_FORM_NAME => Object::Reference(form_id) },
            },
        );
    }

    pdf.save_to_bytes()
}
