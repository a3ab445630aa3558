//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use num_complex::Complex64;

use qpe_core::UnitaryMatrix;

/// Load a unitary matrix from a JSON file.
pub fn load_unitary(path: &str) -> Result<UnitaryMatrix> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    parse_unitary(&source).with_context(|| format!("Invalid unitary matrix in {path}"))
}

/// Parse a matrix given as rows of `[re, im]` pairs.
///
/// ```text
/// [[[1, 0], [0, 0]],
///  [[0, 0], [0, 1]]]
/// ```
pub fn parse_unitary(source: &str) -> Result<UnitaryMatrix> {
    let rows: Vec<Vec<[f64; 2]>> = serde_json::from_str(source)?;
    let rows = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|[re, im]| Complex64::new(re, im))
                .collect()
        })
        .collect();
    Ok(UnitaryMatrix::from_rows(rows)?)
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn write_output(content: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))
        }
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
