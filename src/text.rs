//! Text collection from WML subtrees and cleanup of the collected text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::markup::{Element, Node, WML_NS};

/// Property and embedded-object containers whose contents are never visible text.
const SKIP_ELEMENTS: &[&str] = &[
    "rPr",
    "pPr",
    "tblPr",
    "tcPr",
    "trPr",
    "sectPr",
    "drawing",
    "pict",
    "object",
    "fldChar",
    "instrText",
];

/// Style identifiers Word leaks into text, e.g. `00A1B2C3`. ASCII word
/// boundaries, so a code glued to CJK text still counts as a token.
static HEX_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)[0-9A-Fa-f]{8}(?-u:\b)").unwrap());

static FONT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:微軟正黑體|Times New Roman|Arial|eastAsia|Calibri|宋體|黑體)\b").unwrap()
});

/// Collect raw text fragments under `node` in document order.
///
/// `w:br` and `w:cr` become `"\n"`, `w:tab` becomes `" "`. Nothing is cleaned.
pub fn collect(node: Option<&Node>) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(node) = node {
        collect_node(node, &mut out);
    }
    out
}

/// Same as [`collect`] for a node already known to be an element.
pub fn collect_element(el: &Element) -> Vec<String> {
    let mut out = Vec::new();
    collect_into(el, &mut out);
    out
}

fn collect_node(node: &Node, out: &mut Vec<String>) {
    match node {
        Node::Text(text) => out.push(text.clone()),
        Node::Element(el) => collect_into(el, out),
    }
}

fn collect_into(el: &Element, out: &mut Vec<String>) {
    if el.namespace.as_deref() == Some(WML_NS) {
        match el.name.as_str() {
            "br" | "cr" => {
                out.push("\n".to_string());
                return;
            }
            "tab" => {
                out.push(" ".to_string());
                return;
            }
            name if SKIP_ELEMENTS.contains(&name) => return,
            _ => {}
        }
    }
    for child in &el.children {
        collect_node(child, out);
    }
}

/// Strip style artifacts and normalize whitespace.
///
/// Hex tokens are removed only when they contain a letter, so `20251219` survives.
/// Each line is collapsed to single spaces; blank-line runs shrink to one.
pub fn clean(raw: &str) -> String {
    let without_hex = HEX_TOKEN.replace_all(raw, |caps: &Captures| {
        let token = &caps[0];
        if token.bytes().any(|b| b.is_ascii_alphabetic()) {
            String::new()
        } else {
            token.to_string()
        }
    });
    let without_fonts = FONT_NAME.replace_all(&without_hex, "");
    let normalized = without_fonts.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    let mut blank_streak = 0;
    for line in normalized.split('\n') {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            blank_streak += 1;
            if blank_streak == 1 {
                lines.push(line);
            }
            continue;
        }
        blank_streak = 0;
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}

/// Cleaned text of a single `w:p`.
pub fn paragraph_text(p: &Element) -> String {
    clean(&collect_element(p).concat())
}
