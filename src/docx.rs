//! Reading the main document part out of a `.docx` package.

use std::io::{Read, Seek};
use std::path::Path;

use crate::error::{Error, Result};
use crate::markup::Element;

pub(crate) const DOCUMENT_PART: &str = "word/document.xml";

pub(crate) fn open(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    read_document_xml(file)
}

/// Read `word/document.xml` from a zip package.
pub(crate) fn read_document_xml<R: Read + Seek>(reader: R) -> Result<String> {
    let mut zip = zip::ZipArchive::new(reader)
        .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;

    let mut xml_content = String::new();
    zip.by_name(DOCUMENT_PART)
        .map_err(|_| Error::MissingEntry(DOCUMENT_PART.into()))?
        .read_to_string(&mut xml_content)?;
    Ok(xml_content)
}

/// The `w:body` of a parsed `w:document` root.
pub(crate) fn body(root: &Element) -> Result<&Element> {
    if !root.is_wml("document") {
        return Err(Error::MissingBody);
    }
    root.wml("body").ok_or(Error::MissingBody)
}
