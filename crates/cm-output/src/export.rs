//! Saving a history export to disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use cm_sim::HistoryExport;

use crate::OutputResult;

/// Write `export` to `dir/<export.filename>` and return the full path.
pub fn save_history(dir: &Path, export: &HistoryExport) -> OutputResult<PathBuf> {
    let path = dir.join(&export.filename);
    fs::write(&path, export.csv.as_bytes())?;
    info!(path = %path.display(), rows = export.rows, "history saved");
    Ok(path)
}
