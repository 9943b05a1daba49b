use std::path::{Path, PathBuf};

use readdress::Document;

/// Open a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not
/// found or cannot be parsed as a valid PDF.
pub fn open_document(file: &Path) -> Result<Document, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    Document::open_file(file).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Derived output path for a rewritten document: `updated_<input-name>`
/// next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.pdf".to_string());
    input.with_file_name(format!("updated_{name}"))
}

/// Write the finished document, mapping failures to an exit code.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), i32> {
    std::fs::write(path, bytes).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", path.display());
        1
    })
}
