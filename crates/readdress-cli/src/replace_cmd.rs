use std::path::Path;

use readdress::{ReplaceMode, SavedConfig};

use crate::config;
use crate::shared::{default_output_path, open_document, write_output};

pub fn run(
    file: &Path,
    query: Option<&str>,
    text: Option<&str>,
    output: Option<&Path>,
    no_save: bool,
) -> Result<(), i32> {
    // Fall back to the saved configuration for omitted arguments.
    let saved = config::load();
    let query = match query {
        Some(q) => q.to_string(),
        None => match &saved {
            Some(s) if !s.search_text.is_empty() => s.search_text.clone(),
            _ => {
                eprintln!("Error: no search text given and none saved; pass QUERY");
                return Err(1);
            }
        },
    };
    let text = match text {
        Some(t) => t.to_string(),
        None => match &saved {
            Some(s) if !s.new_address.is_empty() => s.new_address.clone(),
            _ => {
                eprintln!("Error: no replacement text given and none saved; pass --text");
                return Err(1);
            }
        },
    };

    let doc = open_document(file)?;
    let matches = doc.search(&query).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    if matches.is_empty() {
        // A soft status, not a failure: the user can retry with other text.
        println!("found 0 matches for {query:?}; nothing to replace");
        println!("hint: run `readdress dump {}` to inspect the extracted text", file.display());
        return Ok(());
    }

    let updated = doc.compose(&matches, &text).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let out_path = output.map(Path::to_path_buf).unwrap_or_else(|| default_output_path(file));
    write_output(&out_path, &updated)?;
    println!("replaced {} matches -> {}", matches.len(), out_path.display());

    if !no_save {
        let record = SavedConfig {
            mode: ReplaceMode::Auto,
            search_text: query,
            new_address: text,
            manual_selection: None,
        };
        if let Err(e) = config::save(&record) {
            eprintln!("warning: could not save configuration: {e}");
        }
    }

    Ok(())
}
