use std::path::Path;

use crate::shared::{default_output_path, open_document, write_output};

pub fn run(file: &Path, dx: f64, dy: f64, output: Option<&Path>) -> Result<(), i32> {
    let doc = open_document(file)?;

    let shifted = doc.shift(dx, dy).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let out_path = output.map(Path::to_path_buf).unwrap_or_else(|| default_output_path(file));
    write_output(&out_path, &shifted)?;
    println!("shifted by ({dx}, {dy}) -> {}", out_path.display());

    Ok(())
}
