mod common;

use common::{CONTINUE, RESTART, cell, docx, package, para, row, span, table};
use docx_quote_json::classify::{ParagraphKind, classify};
use docx_quote_json::{Error, extract_docx_bytes};

fn s(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn spanned_header_without_id_or_quote_columns() {
    common::init_logging();
    let body = table(
        0,
        &[
            row(&[cell(&span(2), "主功能"), cell("", "說明")]),
            row(&[cell("", "登入"), cell("", "帳號"), cell("", "密碼驗證")]),
        ],
    );
    let doc = extract_docx_bytes(&docx(&body), "scenario1.docx").unwrap();

    assert_eq!(
        doc.tables,
        vec![vec![
            s(&["ID", "Feature", "欄位3", "Description", "Quote"]),
            s(&["1", "登入", "帳號", "密碼驗證", ""]),
        ]]
    );

    let records = doc.tables_as_objects.as_ref().unwrap();
    let json = serde_json::to_value(&records[0][0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "ID": "1",
            "Feature": "登入",
            "欄位3": "帳號",
            "Description": "密碼驗證",
            "Quote": "",
            "type": "original",
        })
    );
}

#[test]
fn vertical_merge_is_not_copied_into_continuation_rows() {
    let body = table(
        3,
        &[
            row(&[cell("", "編號"), cell("", "主功能"), cell("", "報價")]),
            row(&[cell("", "1"), cell(RESTART, "會員管理"), cell("", "100")]),
            row(&[cell("", "2"), cell(CONTINUE, ""), cell("", "200")]),
            row(&[cell("", "3"), cell(r#"<w:vMerge w:val="continue"/>"#, ""), cell("", "300")]),
        ],
    );
    let doc = extract_docx_bytes(&docx(&body), "scenario2.docx").unwrap();

    assert_eq!(
        doc.tables[0],
        vec![
            s(&["ID", "Feature", "Quote"]),
            s(&["1", "會員管理", "100"]),
            s(&["2", "", "200"]),
            s(&["3", "", "300"]),
        ]
    );
    let features: Vec<_> = doc.tables_as_objects.unwrap()[0]
        .iter()
        .map(|r| r.get("Feature").unwrap().to_string())
        .collect();
    assert_eq!(features, ["會員管理", "", ""]);
}

#[test]
fn second_merge_group_keeps_its_row_intact() {
    let body = table(
        3,
        &[
            row(&[cell("", "編號"), cell("", "主功能"), cell("", "報價")]),
            row(&[cell("", "1"), cell(RESTART, "會員管理"), cell("", "100")]),
            row(&[cell("", "2"), cell(CONTINUE, ""), cell("", "200")]),
            row(&[cell("", "3"), cell(RESTART, "報表"), cell("", "300")]),
            row(&[cell("", "4"), cell("", "匯出"), cell("", "400")]),
        ],
    );
    let doc = extract_docx_bytes(&docx(&body), "groups.docx").unwrap();

    assert_eq!(doc.tables[0][3], s(&["3", "報表", "300"]));
    assert_eq!(doc.tables[0][4], s(&["4", "匯出", "400"]));
    let quotes: Vec<_> = doc.tables_as_objects.unwrap()[0]
        .iter()
        .map(|r| r.get("Quote").unwrap().to_string())
        .collect();
    assert_eq!(quotes, ["100", "200", "300", "400"]);
}

#[test]
fn date_takes_precedence_over_title() {
    let doc = extract_docx_bytes(&docx(&para("2025.12.19 報價單")), "s3.docx").unwrap();
    assert_eq!(doc.paragraphs.len(), 1);
    assert_eq!(doc.paragraphs[0].text, "2025.12.19 報價單");
    assert_eq!(doc.paragraphs[0].kind, ParagraphKind::Date);
}

#[test]
fn note_paragraph() {
    let doc = extract_docx_bytes(&docx(&para("※ 本報價單有效期限為一個月")), "s4.docx").unwrap();
    assert_eq!(doc.paragraphs[0].kind, ParagraphKind::Note);
}

#[test]
fn missing_document_part_is_fatal() {
    let bytes = package(&[("[Content_Types].xml", "<Types/>"), ("word/styles.xml", "<w:styles/>")]);
    let err = extract_docx_bytes(&bytes, "broken.docx").unwrap_err();
    match &err {
        Error::MissingEntry(path) => assert_eq!(path, "word/document.xml"),
        other => panic!("expected MissingEntry, got {other:?}"),
    }
    assert!(err.to_string().contains("word/document.xml"));
}

#[test]
fn missing_body_is_fatal() {
    let xml = format!(r#"<w:document xmlns:w="{}"/>"#, common::W_NS);
    let bytes = package(&[("word/document.xml", &xml)]);
    assert!(matches!(extract_docx_bytes(&bytes, "x.docx"), Err(Error::MissingBody)));
}

#[test]
fn non_zip_input_is_rejected() {
    let err = extract_docx_bytes(b"not a zip at all", "x.docx").unwrap_err();
    assert!(matches!(err, Error::InvalidDocx(_)));
}

#[test]
fn malformed_xml_is_reported() {
    let bytes = package(&[("word/document.xml", "<w:document><w:body>")]);
    assert!(matches!(extract_docx_bytes(&bytes, "x.docx"), Err(Error::Xml(_))));
}

#[test]
fn repeated_page_headers_are_dropped() {
    let header = row(&[cell("", "編號"), cell("", "主功能"), cell("", "報價")]);
    let body = table(
        3,
        &[
            header.clone(),
            row(&[cell("", "1"), cell("", "報表"), cell("", "10")]),
            header,
            row(&[cell("", "編號"), cell("", "主功能"), cell("", "")]),
            row(&[cell("", "2"), cell("", "匯出"), cell("", "20")]),
        ],
    );
    let doc = extract_docx_bytes(&docx(&body), "paged.docx").unwrap();
    assert_eq!(
        doc.tables[0],
        vec![
            s(&["ID", "Feature", "Quote"]),
            s(&["1", "報表", "10"]),
            s(&["編號", "主功能", ""]),
            s(&["2", "匯出", "20"]),
        ]
    );
}

#[test]
fn existing_ids_are_never_renumbered() {
    let body = table(
        2,
        &[
            row(&[cell("", "ID"), cell("", "說明")]),
            row(&[cell("", ""), cell("", "a")]),
            row(&[cell("", "B-7"), cell("", "b")]),
        ],
    );
    let doc = extract_docx_bytes(&docx(&body), "ids.docx").unwrap();
    let ids: Vec<_> = doc.tables[0][1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(ids, ["", "B-7"]);
}

#[test]
fn body_order_headings_and_tables() {
    let body = [
        para("報 價 單"),
        para("客戶：某公司"),
        "<w:p/>".to_string(),
        para("一、功能列表"),
        table(1, &[row(&[cell("", "主功能")]), row(&[cell("", "登入")])]),
        para("★ 以上報價未稅"),
        "<w:sectPr/>".to_string(),
    ]
    .concat();
    let doc = extract_docx_bytes(&docx(&body), "order.docx").unwrap();

    let kinds: Vec<_> = doc.paragraphs.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, [ParagraphKind::Title, ParagraphKind::Content, ParagraphKind::Note]);
    assert_eq!(doc.titles.as_deref(), Some(&["一、功能列表".to_string()][..]));
    assert_eq!(doc.tables.len(), 1);
    assert_eq!(doc.tables[0][0], s(&["ID", "Feature", "Quote"]));

    for p in &doc.paragraphs {
        assert_eq!(classify(&p.text), p.kind);
    }
}

#[test]
fn paragraph_text_does_not_depend_on_run_granularity() {
    let split = r#"<w:p><w:r><w:t xml:space="preserve">報價  </w:t></w:r><w:r><w:br/></w:r><w:r><w:t>  說明</w:t><w:tab/><w:t>00AB12CD</w:t></w:r></w:p>"#;
    let joined = para("報價  \n  說明 00AB12CD");
    let a = extract_docx_bytes(&docx(split), "a.docx").unwrap();
    let b = extract_docx_bytes(&docx(&joined), "b.docx").unwrap();
    assert_eq!(a.paragraphs, b.paragraphs);
    assert_eq!(a.paragraphs[0].text, "報價\n說明");
}

#[test]
fn content_controls_are_unwrapped() {
    let body = format!(
        "<w:sdt><w:sdtPr/><w:sdtContent>{}{}</w:sdtContent></w:sdt>",
        para("包在內容控制項裡"),
        table(1, &[row(&[cell("", "報價")]), row(&[cell("", "5")])]),
    );
    let doc = extract_docx_bytes(&docx(&body), "sdt.docx").unwrap();
    assert_eq!(doc.paragraphs[0].text, "包在內容控制項裡");
    assert_eq!(doc.tables[0], vec![s(&["ID", "Quote"]), s(&["1", "5"])]);
}

#[test]
fn output_json_shape() {
    let body = [para("日期：2025/12/19"), table(1, &[row(&[cell("", "主功能")])])].concat();
    let doc = extract_docx_bytes(&docx(&body), "shape.docx").unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&docx_quote_json::to_json(&doc, docx_quote_json::JsonFormat::Compact).unwrap())
            .unwrap();

    assert_eq!(json["source"], "shape.docx");
    assert!(json["extractedAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(json["paragraphs"][0]["type"], "date");
    assert!(json.get("titles").is_none());
    assert_eq!(json["tables"][0][0], serde_json::json!(["ID", "Feature", "Quote"]));
    assert_eq!(json["tablesAsObjects"][0], serde_json::json!([]));
}
