use std::path::Path;

use crate::cli::OutputFormat;
use crate::shared::open_document;

pub fn run(file: &Path, query: &str, format: &OutputFormat) -> Result<(), i32> {
    let doc = open_document(file)?;

    let matches = doc.search(query).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    match format {
        OutputFormat::Text => {
            if matches.is_empty() {
                println!("found 0 matches for {query:?}");
                return Ok(());
            }
            println!("page\ttext\tx\ty\twidth\theight");
            for m in &matches {
                println!(
                    "{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
                    m.page_index + 1,
                    m.text,
                    m.x,
                    m.y,
                    m.width,
                    m.height,
                );
            }
            println!("found {} matches", matches.len());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&matches).map_err(|e| {
                eprintln!("Error: failed to serialize matches: {e}");
                1
            })?;
            println!("{json}");
        }
    }

    Ok(())
}
