use std::path::Path;

use readdress::{ReplaceMode, SavedConfig, SelectionRect, passes_drag_threshold};

use crate::config;
use crate::shared::{default_output_path, open_document, write_output};

/// Selection parameters as drawn on screen, before unscaling.
pub struct Selection {
    /// 1-based page number.
    pub page: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Display scale the selection was drawn at.
    pub scale: f64,
}

pub fn run(
    file: &Path,
    selection: &Selection,
    text: Option<&str>,
    output: Option<&Path>,
    no_save: bool,
) -> Result<(), i32> {
    if selection.page == 0 {
        eprintln!("Error: --page is 1-based");
        return Err(1);
    }
    if selection.scale <= 0.0 {
        eprintln!("Error: --scale must be positive");
        return Err(1);
    }

    // The drag threshold applies to the on-screen size, before unscaling.
    if !passes_drag_threshold(selection.width, selection.height) {
        eprintln!(
            "Error: selection too small ({}x{} px); draw at least 5x5 px",
            selection.width, selection.height
        );
        return Err(1);
    }

    let text = match text {
        Some(t) => t.to_string(),
        None => match config::load() {
            Some(s) if !s.new_address.is_empty() => s.new_address,
            _ => {
                eprintln!("Error: no replacement text given and none saved; pass --text");
                return Err(1);
            }
        },
    };

    let doc = open_document(file)?;
    let page_index = selection.page - 1;
    let (_, page_height) = doc.page_size(page_index).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let rect = SelectionRect {
        x: selection.x / selection.scale,
        y: selection.y / selection.scale,
        width: selection.width / selection.scale,
        height: selection.height / selection.scale,
        page_index,
        viewport_height: page_height,
    };
    let m = doc.reconcile(&rect).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let updated = doc.compose(&[m], &text).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let out_path = output.map(Path::to_path_buf).unwrap_or_else(|| default_output_path(file));
    write_output(&out_path, &updated)?;
    println!("masked selection on page {} -> {}", selection.page, out_path.display());

    if !no_save {
        let record = SavedConfig {
            mode: ReplaceMode::Manual,
            search_text: String::new(),
            new_address: text,
            manual_selection: Some(rect),
        };
        if let Err(e) = config::save(&record) {
            eprintln!("warning: could not save configuration: {e}");
        }
    }

    Ok(())
}
