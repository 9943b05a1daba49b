//! Helpers for CLI integration tests: build a test PDF on disk.

use std::path::{Path, PathBuf};

use lopdf::{Object, Stream, dictionary};

/// Write a single-page 612×792 PDF with the given content stream into
/// `dir` and return its path.
pub fn write_test_pdf(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => Object::Reference(content_id),
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        },
    });
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => 1,
    });
    if let Ok(page_obj) = doc.get_object_mut(page_id) {
        if let Ok(dict) = page_obj.as_dict_mut() {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// The standard test document: one address line at (50, 700).
pub fn address_pdf(dir: &Path) -> PathBuf {
    write_test_pdf(
        dir,
        "deed.pdf",
        b"BT /F1 12 Tf 50 700 Td (123 Old Street) Tj ET",
    )
}
