#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}">
  <w:body>
{body}
  </w:body>
</w:document>"#
    )
}

/// A paragraph with a single run.
pub fn para(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
}

/// A table cell with optional `w:tcPr` children.
pub fn cell(tc_pr: &str, text: &str) -> String {
    let pr = if tc_pr.is_empty() {
        String::new()
    } else {
        format!("<w:tcPr>{tc_pr}</w:tcPr>")
    };
    format!("<w:tc>{pr}{}</w:tc>", para(text))
}

pub fn span(n: usize) -> String {
    format!(r#"<w:gridSpan w:val="{n}"/>"#)
}

pub const RESTART: &str = r#"<w:vMerge w:val="restart"/>"#;
pub const CONTINUE: &str = "<w:vMerge/>";

pub fn row(cells: &[String]) -> String {
    format!("<w:tr>{}</w:tr>", cells.concat())
}

/// A table; `grid_cols == 0` leaves out `w:tblGrid`.
pub fn table(grid_cols: usize, rows: &[String]) -> String {
    let grid = if grid_cols == 0 {
        String::new()
    } else {
        let cols = r#"<w:gridCol w:w="1200"/>"#.repeat(grid_cols);
        format!("<w:tblGrid>{cols}</w:tblGrid>")
    };
    format!("<w:tbl><w:tblPr/>{grid}{}</w:tbl>", rows.concat())
}

/// Zip the given (path, content) entries.
pub fn package(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).expect("start zip entry");
        zip.write_all(content.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip").into_inner()
}

/// A minimal `.docx` whose body is `body`.
pub fn docx(body: &str) -> Vec<u8> {
    package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/document.xml", &document_xml(body)),
    ])
}

pub fn write_docx(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, docx(body)).expect("write fixture");
    path
}
