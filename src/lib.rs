pub mod assemble;
pub mod classify;
pub mod discover;
mod docx;
mod error;
pub mod markup;
pub mod project;
pub mod table;
pub mod text;

pub use assemble::ExtractedDocument;
pub use error::{Error, Result};

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use chrono::Utc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JsonFormat {
    #[default]
    Pretty,
    Compact,
}

pub fn extract_docx(input: &Path) -> Result<ExtractedDocument> {
    let t0 = Instant::now();

    let xml = docx::open(input)?;
    let t_read = t0.elapsed();

    let source = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let doc = extract_document_xml(&xml, &source)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: read={:.1}ms, extract={:.1}ms, total={:.1}ms ({} paragraphs, {} tables)",
        t_read.as_secs_f64() * 1000.0,
        (t_total - t_read).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.paragraphs.len(),
        doc.tables.len(),
    );

    Ok(doc)
}

pub fn extract_docx_bytes(input: &[u8], source: &str) -> Result<ExtractedDocument> {
    let xml = docx::read_document_xml(Cursor::new(input))?;
    extract_document_xml(&xml, source)
}

/// Extract from the text of `word/document.xml` directly.
pub fn extract_document_xml(xml: &str, source: &str) -> Result<ExtractedDocument> {
    let root = markup::parse(xml)?;
    let body = docx::body(&root)?;
    Ok(assemble::assemble(source, Utc::now(), body))
}

pub fn to_json(doc: &ExtractedDocument, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

/// Serialize and write `doc`, creating the parent directory if needed.
pub fn write_json(doc: &ExtractedDocument, output: &Path, format: JsonFormat) -> Result<()> {
    let json = to_json(doc, format)?;
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(output, json)?;
    Ok(())
}
