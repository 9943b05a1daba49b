use std::path::Path;

use crate::cli::OutputFormat;
use crate::shared::open_document;

pub fn run(file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let doc = open_document(file)?;

    match format {
        OutputFormat::Text => {
            let dump = doc.dump_text().map_err(|e| {
                eprintln!("Error: {e}");
                1
            })?;
            print!("{dump}");
        }
        OutputFormat::Json => {
            let mut pages = Vec::new();
            for page_index in 0..doc.page_count() {
                let text = doc.page_text(page_index).map_err(|e| {
                    eprintln!("Error: {e}");
                    1
                })?;
                pages.push(serde_json::json!({
                    "page": page_index + 1,
                    "text": text,
                }));
            }
            let json = serde_json::to_string_pretty(&pages).map_err(|e| {
                eprintln!("Error: failed to serialize dump: {e}");
                1
            })?;
            println!("{json}");
        }
    }

    Ok(())
}
