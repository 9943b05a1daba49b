//! lopdf-backed document access.
//!
//! Wraps a parsed [`lopdf::Document`] with the page-level lookups the rest
//! of the crate needs: ordered page IDs, inherited page attributes, and
//! copy-out serialization.

use lopdf::{Dictionary, Object, ObjectId};
use readdress_core::PdfError;

use crate::error::BackendError;

/// A page's media box in PDF coordinates (bottom-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PageBounds {
    /// Page width in document units.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Page height in document units.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// A parsed PDF document with cached page ordering.
pub struct LoadedPdf {
    inner: lopdf::Document,
    /// Ordered page ObjectIds, indexed by 0-based page number.
    page_ids: Vec<ObjectId>,
}

impl std::fmt::Debug for LoadedPdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedPdf")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

impl LoadedPdf {
    /// Parse a document from raw bytes.
    ///
    /// Encrypted documents are rejected with [`PdfError::PasswordRequired`]:
    /// overlay composition cannot operate on encrypted content streams.
    pub fn open(bytes: &[u8]) -> Result<Self, BackendError> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(PdfError::PasswordRequired));
        }

        // get_pages returns BTreeMap<u32, ObjectId> keyed by 1-based page number
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();

        Ok(Self { inner, page_ids })
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    /// Mutable access to the underlying lopdf document.
    pub fn inner_mut(&mut self) -> &mut lopdf::Document {
        &mut self.inner
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// ObjectId of the page at a 0-based index.
    pub fn page_id(&self, index: usize) -> Result<ObjectId, BackendError> {
        self.page_ids.get(index).copied().ok_or_else(|| {
            BackendError::Core(PdfError::PageOutOfRange {
                page: index,
                count: self.page_ids.len(),
            })
        })
    }

    /// Follow an indirect reference to the underlying object.
    ///
    /// Non-reference objects are returned unchanged; a dangling reference
    /// resolves to itself.
    pub fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.inner.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }

    /// The page's media box, resolved through the page tree if inherited.
    pub fn media_box(&self, index: usize) -> Result<PageBounds, BackendError> {
        let page_id = self.page_id(index)?;
        let obj = self
            .resolve_inherited(page_id, b"MediaBox")?
            .ok_or_else(|| BackendError::Parse("MediaBox not found on page or ancestors".into()))?;
        let array = self
            .resolve(obj)
            .as_array()
            .map_err(|e| BackendError::Parse(format!("MediaBox is not an array: {e}")))?;
        if array.len() != 4 {
            return Err(BackendError::Parse(format!(
                "expected 4-element MediaBox, got {}",
                array.len()
            )));
        }
        Ok(PageBounds {
            x0: object_to_f64(&array[0])?,
            y0: object_to_f64(&array[1])?,
            x1: object_to_f64(&array[2])?,
            y1: object_to_f64(&array[3])?,
        })
    }

    /// The page's effective `/Resources` dictionary (inherited if needed),
    /// cloned so the caller can hold it across mutations. References inside
    /// the clone remain valid within this document.
    pub fn effective_resources(&self, page_id: ObjectId) -> Result<Option<Dictionary>, BackendError> {
        match self.resolve_inherited(page_id, b"Resources")? {
            Some(obj) => {
                let dict = self
                    .resolve(obj)
                    .as_dict()
                    .map_err(|e| BackendError::Parse(format!("Resources is not a dictionary: {e}")))?;
                Ok(Some(dict.clone()))
            }
            None => Ok(None),
        }
    }

    /// Look up a key in the page dictionary, walking up the page tree via
    /// `/Parent` if the key is not found on the page itself.
    pub fn resolve_inherited(
        &self,
        page_id: ObjectId,
        key: &[u8],
    ) -> Result<Option<&Object>, BackendError> {
        let mut current_id = page_id;
        loop {
            let dict = self
                .inner
                .get_object(current_id)
                .and_then(|o| o.as_dict())
                .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

            if let Ok(value) = dict.get(key) {
                return Ok(Some(value));
            }

            match dict.get(b"Parent") {
                Ok(parent_obj) => {
                    current_id = parent_obj.as_reference().map_err(|e| {
                        BackendError::Parse(format!("invalid /Parent reference: {e}"))
                    })?;
                }
                Err(_) => return Ok(None),
            }
        }
    }

    /// The page's content stream bytes, concatenated and decompressed.
    ///
    /// `/Contents` may be a single stream reference or an array of stream
    /// references; array parts are joined with a separating space. A page
    /// with no `/Contents` entry yields an empty buffer.
    pub fn page_content_bytes(&self, page_id: ObjectId) -> Result<Vec<u8>, BackendError> {
        let page_dict = self
            .inner
            .get_object(page_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        let contents_obj = match page_dict.get(b"Contents") {
            Ok(obj) => obj,
            Err(_) => return Ok(Vec::new()),
        };

        match contents_obj {
            Object::Reference(id) => {
                let stream = self
                    .inner
                    .get_object(*id)
                    .and_then(|o| o.as_stream())
                    .map_err(|e| BackendError::Parse(format!("/Contents is not a stream: {e}")))?;
                decode_content_stream(stream)
            }
            Object::Array(parts) => {
                let mut content = Vec::new();
                for part in parts {
                    let id = part.as_reference().map_err(|e| {
                        BackendError::Parse(format!("/Contents array item is not a reference: {e}"))
                    })?;
                    let stream = self.inner.get_object(id).and_then(|o| o.as_stream()).map_err(
                        |e| BackendError::Parse(format!("/Contents array item is not a stream: {e}")),
                    )?;
                    let bytes = decode_content_stream(stream)?;
                    if !content.is_empty() {
                        content.push(b' ');
                    }
                    content.extend_from_slice(&bytes);
                }
                Ok(content)
            }
            _ => Err(BackendError::Parse(
                "/Contents is not a reference or array".to_string(),
            )),
        }
    }

    /// Serialize the document into a fresh byte buffer.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, BackendError> {
        let mut buf = Vec::new();
        self.inner
            .save_to(&mut buf)
            .map_err(|e| BackendError::Compose(format!("failed to serialize PDF: {e}")))?;
        Ok(buf)
    }
}

/// Decode one content stream, decompressing if a filter is present.
fn decode_content_stream(stream: &lopdf::Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Parse(format!("failed to decompress content stream: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
pub(crate) fn object_to_f64(obj: &Object) -> Result<f64, BackendError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(f64::from(*f)),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{minimal_pdf, two_page_pdf};

    #[test]
    fn open_valid_pdf() {
        let bytes = minimal_pdf(b"BT ET");
        let pdf = LoadedPdf::open(&bytes).unwrap();
        assert_eq!(pdf.page_count(), 1);
    }

    #[test]
    fn open_invalid_bytes_fails() {
        assert!(LoadedPdf::open(b"not a pdf").is_err());
    }

    #[test]
    fn page_id_out_of_range() {
        let bytes = minimal_pdf(b"BT ET");
        let pdf = LoadedPdf::open(&bytes).unwrap();
        let err = pdf.page_id(3).unwrap_err();
        match err {
            BackendError::Core(PdfError::PageOutOfRange { page, count }) => {
                assert_eq!(page, 3);
                assert_eq!(count, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn media_box_is_inherited_from_pages_node() {
        // two_page_pdf stores MediaBox on the Pages node only
        let bytes = two_page_pdf(b"BT ET", b"BT ET");
        let pdf = LoadedPdf::open(&bytes).unwrap();
        let bounds = pdf.media_box(1).unwrap();
        assert_eq!(bounds.width(), 612.0);
        assert_eq!(bounds.height(), 792.0);
    }

    #[test]
    fn effective_resources_found_for_page() {
        let bytes = minimal_pdf(b"BT /F1 12 Tf (Hi) Tj ET");
        let pdf = LoadedPdf::open(&bytes).unwrap();
        let page_id = pdf.page_id(0).unwrap();
        let resources = pdf.effective_resources(page_id).unwrap();
        assert!(resources.is_some_and(|r| r.has(b"Font")));
    }

    #[test]
    fn save_to_bytes_round_trips() {
        let bytes = minimal_pdf(b"BT ET");
        let mut pdf = LoadedPdf::open(&bytes).unwrap();
        let saved = pdf.save_to_bytes().unwrap();
        assert!(saved.starts_with(b"%PDF-"));
        assert_eq!(LoadedPdf::open(&saved).unwrap().page_count(), 1);
    }

    #[test]
    fn object_to_f64_accepts_integers_and_reals() {
        assert_eq!(object_to_f64(&Object::Integer(7)).unwrap(), 7.0);
        assert_eq!(object_to_f64(&Object::Real(2.5)).unwrap(), 2.5);
        assert!(object_to_f64(&Object::Null).is_err());
    }
}
