use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphKind {
    Empty,
    Date,
    Note,
    Heading,
    Title,
    Content,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParagraphRecord {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ParagraphKind,
}

impl ParagraphRecord {
    pub fn new(text: String) -> Self {
        let kind = classify(&text);
        Self { text, kind }
    }
}

static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}[./-][0-9]{1,2}[./-][0-9]{1,2}|日期[：:]").unwrap());

const NOTE_MARKERS: &[char] = &['※', '★'];
const HEADING_KEYWORDS: &[&str] = &["功能列表", "作業列表"];
const TITLE_PHRASE: &str = "報價單";

/// Classify cleaned paragraph text. Rules are checked in order; first match wins.
pub fn classify(text: &str) -> ParagraphKind {
    if text.trim().is_empty() {
        return ParagraphKind::Empty;
    }
    if DATE.is_match(text) {
        return ParagraphKind::Date;
    }
    if text.starts_with(NOTE_MARKERS) {
        return ParagraphKind::Note;
    }
    if HEADING_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return ParagraphKind::Heading;
    }
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact == TITLE_PHRASE {
        return ParagraphKind::Title;
    }
    ParagraphKind::Content
}
