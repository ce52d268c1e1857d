use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::classify::{ParagraphKind, ParagraphRecord};
use crate::markup::Element;
use crate::project::{self, Record};
use crate::table::{self, Grid};
use crate::text::paragraph_text;

/// The JSON document produced for one `.docx`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub source: String,
    pub extracted_at: String,
    pub paragraphs: Vec<ParagraphRecord>,
    /// Paragraphs classified as section headings, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titles: Option<Vec<String>>,
    pub tables: Vec<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables_as_objects: Option<Vec<Vec<Record>>>,
}

/// Build the output document from a `w:body` element.
///
/// Body-level paragraphs are classified: headings go to `titles`, empties are
/// dropped. Every body-level table is reconstructed, normalized and projected.
pub fn assemble(source: &str, extracted_at: DateTime<Utc>, body: &Element) -> ExtractedDocument {
    let mut paragraphs = Vec::new();
    let mut titles = Vec::new();
    let mut tables = Vec::new();

    for block in body.block_children() {
        if block.is_wml("p") {
            let record = ParagraphRecord::new(paragraph_text(block));
            match record.kind {
                ParagraphKind::Empty => {}
                ParagraphKind::Heading => titles.push(record.text),
                _ => paragraphs.push(record),
            }
        } else if block.is_wml("tbl") {
            tables.push(project::normalize(table::reconstruct(block)));
        }
    }

    let tables_as_objects: Vec<Vec<Record>> = tables.iter().map(project::to_records).collect();

    log::debug!(
        "Assembled {source}: {} paragraphs, {} titles, {} tables",
        paragraphs.len(),
        titles.len(),
        tables.len()
    );

    ExtractedDocument {
        source: source.to_string(),
        extracted_at: extracted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        paragraphs,
        titles: (!titles.is_empty()).then_some(titles),
        tables,
        tables_as_objects: (!tables_as_objects.is_empty()).then_some(tables_as_objects),
    }
}
