//! Dataset discovery and decoding.
//!
//! A dataset is a directory tree of CSV files; each file becomes one
//! [`SourceTable`]. Per-file read or decode failures are reported as
//! warnings and never abort the load.

use std::path::{Path, PathBuf};

use crate::{
    error::Result,
    table::{FieldValue, SourceTable},
};

/// A dataset load: every table that decoded, plus per-source warnings.
#[derive(Debug, Default)]
pub struct LoadedDataset {
    pub tables: Vec<SourceTable>,
    pub warnings: Vec<String>,
}

/// Recursively discover and decode all CSV files under `root`.
///
/// Hidden files and directories (names starting with `.`) are skipped.
/// Tables come back sorted by relative path so document ids are stable
/// across rebuilds.
pub fn load_dataset(root: &Path) -> Result<LoadedDataset> {
    let canonical_root = root.canonicalize()?;
    let mut files = Vec::new();
    walk_dir(&canonical_root, &canonical_root, &mut files)?;
    files.sort();

    let mut loaded = LoadedDataset::default();
    for rel in files {
        let abs = canonical_root.join(&rel);
        let rel_str = rel.to_string_lossy().to_string();
        match decode_csv(&abs, &rel_str) {
            Ok(table) => loaded.tables.push(table),
            Err(e) => {
                tracing::warn!(source = %rel_str, "failed to read source: {e}");
                loaded.warnings.push(format!("failed to read {rel_str}: {e}"));
            }
        }
    }

    Ok(loaded)
}

fn walk_dir(root: &Path, current: &Path, results: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        // Skip hidden files and directories.
        if name.starts_with('.') {
            continue;
        }

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk_dir(root, &entry.path(), results)?;
        } else if file_type.is_file() && is_csv(&entry.path()) {
            let path = entry.path();
            let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            results.push(rel);
        }
    }

    Ok(())
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Decode one CSV file into a [`SourceTable`].
///
/// Malformed rows are skipped; short rows are padded with nulls and long
/// rows truncated to the header width.
fn decode_csv(path: &Path, rel: &str) -> std::result::Result<SourceTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    let mut bad_rows = 0usize;
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(_) => {
                bad_rows += 1;
                continue;
            }
        };
        let mut row: Vec<FieldValue> =
            record.iter().take(columns.len()).map(FieldValue::parse).collect();
        row.resize(columns.len(), FieldValue::Null);
        rows.push(row);
    }

    if bad_rows > 0 {
        tracing::debug!(source = %rel, bad_rows, "skipped malformed rows");
    }

    Ok(SourceTable {
        path: rel.to_string(),
        columns,
        rows,
    })
}
