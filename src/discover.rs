//! Input and output path resolution for the command-line front end.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{Error, Result};

pub const DEFAULT_INPUT_DIR: &str = "quote-analysis/input";
pub const DEFAULT_OUTPUT_DIR: &str = "quote-analysis/output";

pub fn is_docx(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx"))
}

/// Newest `.docx` file directly inside `dir`, by modification time.
///
/// A missing directory counts as empty. On equal times the entry listed later wins.
pub fn find_latest_docx(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() || !is_docx(&path) {
            continue;
        }
        let modified = entry.metadata()?.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        if latest.as_ref().is_none_or(|(t, _)| modified >= *t) {
            latest = Some((modified, path));
        }
    }

    if let Some((_, path)) = &latest {
        log::debug!("Latest .docx in {}: {}", dir.display(), path.display());
    }
    Ok(latest.map(|(_, path)| path))
}

/// `<output_dir>/<input stem>.json`
pub fn default_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{stem}.json"))
}

/// Pick the input file: the explicit path, or the newest `.docx` in `input_dir`.
pub fn resolve_input(explicit: Option<&Path>, input_dir: &Path) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => find_latest_docx(input_dir)?.ok_or_else(|| Error::NoInput(input_dir.to_path_buf()))?,
    };

    if !path.exists() {
        return Err(Error::NotFound(path));
    }
    if !is_docx(&path) {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        return Err(Error::UnsupportedExtension(ext));
    }
    Ok(path)
}
