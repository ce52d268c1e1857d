use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid DOCX: {0}")]
    InvalidDocx(String),

    /// The package has no entry at the given path.
    #[error("entry not found in package: {0}")]
    MissingEntry(String),

    #[error("document.xml has no w:document/w:body")]
    MissingBody,

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no .docx file found in {}", .0.display())]
    NoInput(PathBuf),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("input must be a .docx file (got extension {0:?})")]
    UnsupportedExtension(String),
}
