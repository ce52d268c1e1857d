//! Header normalization and row-to-record projection for reconstructed tables.
//!
//! [`normalize`] runs the grid transforms in their fixed order; [`to_records`]
//! then turns every data row into a [`Record`] keyed by the header row.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::table::Grid;

pub const ID_FIELD: &str = "ID";
pub const QUOTE_FIELD: &str = "Quote";

/// Tag carried by every record projected from the source document.
pub const RECORD_KIND: &str = "original";
const RECORD_KIND_FIELD: &str = "type";

const ID_LABELS: &[&str] = &["編號", ID_FIELD];
const QUOTE_LABELS: &[&str] = &["報價", QUOTE_FIELD];

/// Source header label → canonical field name.
const HEADER_FIELDS: &[(&str, &str)] = &[
    ("編號", ID_FIELD),
    ("主功能", "Feature"),
    ("說明", "Description"),
    ("操作說明", "Instructions"),
    ("報價", QUOTE_FIELD),
];

/// Field name for a column whose header is blank or missing.
pub fn default_field_name(index: usize) -> String {
    match index {
        0 => ID_FIELD.to_string(),
        3 => "Instructions".to_string(),
        4 => QUOTE_FIELD.to_string(),
        n => format!("欄位{}", n + 1),
    }
}

/// Canonical field for a known header label. Canonical names map to themselves.
pub fn canonical_field(label: &str) -> Option<&'static str> {
    HEADER_FIELDS
        .iter()
        .find(|(source, canonical)| label.eq_ignore_ascii_case(source) || label.eq_ignore_ascii_case(canonical))
        .map(|(_, canonical)| *canonical)
}

pub fn header_field_name(cell: &str, index: usize) -> String {
    let label = cell.trim();
    if label.is_empty() {
        return default_field_name(index);
    }
    canonical_field(label).map_or_else(|| label.to_string(), str::to_string)
}

fn matches_label(cell: &str, labels: &[&str]) -> bool {
    let cell = cell.trim();
    labels.iter().any(|label| cell.eq_ignore_ascii_case(label))
}

fn max_width(grid: &Grid) -> usize {
    grid.iter().map(Vec::len).max().unwrap_or(0)
}

fn padded_trimmed(row: &[String], width: usize) -> Vec<&str> {
    (0..width)
        .map(|i| row.get(i).map_or("", |cell| cell.trim()))
        .collect()
}

/// Drop data rows identical to the header row, as repeated on each page of a
/// table that breaks across pages.
pub fn remove_duplicate_headers(grid: Grid) -> Grid {
    let width = max_width(&grid);
    let mut rows = grid.into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    if header.is_empty() {
        return std::iter::once(header).chain(rows).collect();
    }

    let mut kept = Vec::new();
    let mut dropped = 0usize;
    {
        let header_key = padded_trimmed(&header, width);
        for row in rows {
            if padded_trimmed(&row, width) == header_key {
                dropped += 1;
            } else {
                kept.push(row);
            }
        }
    }
    if dropped > 0 {
        log::debug!("Removed {dropped} repeated header row(s)");
    }

    std::iter::once(header).chain(kept).collect()
}

/// Insert a blank `ID` column at position 0 unless the header already has one.
pub fn ensure_id_column(mut grid: Grid) -> Grid {
    let Some(header) = grid.first() else {
        return grid;
    };
    if header.iter().any(|cell| matches_label(cell, ID_LABELS)) {
        return grid;
    }
    for (i, row) in grid.iter_mut().enumerate() {
        let cell = if i == 0 { ID_FIELD } else { "" };
        row.insert(0, cell.to_string());
    }
    grid
}

/// Append a blank `Quote` column unless the header already has one.
pub fn ensure_quote_column(mut grid: Grid) -> Grid {
    let Some(header) = grid.first() else {
        return grid;
    };
    if header.iter().any(|cell| matches_label(cell, QUOTE_LABELS)) {
        return grid;
    }
    for (i, row) in grid.iter_mut().enumerate() {
        let cell = if i == 0 { QUOTE_FIELD } else { "" };
        row.push(cell.to_string());
    }
    grid
}

/// Rewrite the header row with canonical field names.
pub fn translate_headers(mut grid: Grid) -> Grid {
    if let Some(header) = grid.first_mut() {
        for (i, cell) in header.iter_mut().enumerate() {
            *cell = header_field_name(cell, i);
        }
    }
    grid
}

pub fn align_rows(mut grid: Grid) -> Grid {
    let width = max_width(&grid);
    for row in &mut grid {
        row.resize(width, String::new());
    }
    grid
}

/// Number data rows `1..=N` in the ID column, but only when every ID cell is blank.
pub fn fill_sequential_ids(mut grid: Grid) -> Grid {
    let Some(id_col) = grid
        .first()
        .and_then(|header| header.iter().position(|cell| matches_label(cell, ID_LABELS)))
    else {
        return grid;
    };

    let has_any_id = grid[1..]
        .iter()
        .any(|row| row.get(id_col).is_some_and(|cell| !cell.trim().is_empty()));
    if has_any_id {
        return grid;
    }

    for (n, row) in grid[1..].iter_mut().enumerate() {
        if let Some(cell) = row.get_mut(id_col) {
            *cell = (n + 1).to_string();
        }
    }
    grid
}

/// Run every header normalization step in order.
pub fn normalize(grid: Grid) -> Grid {
    let grid = remove_duplicate_headers(grid);
    let grid = ensure_id_column(grid);
    let grid = ensure_quote_column(grid);
    let grid = translate_headers(grid);
    let grid = align_rows(grid);
    fill_sequential_ids(grid)
}

/// One projected table row. Field order follows the header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Set a field, overwriting an existing value in its original position.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Project data rows into records keyed by the header row.
pub fn to_records(grid: &Grid) -> Vec<Record> {
    let Some(header) = grid.first() else {
        return Vec::new();
    };
    let width = max_width(grid);
    let fields: Vec<String> = (0..width)
        .map(|i| header_field_name(header.get(i).map_or("", String::as_str), i))
        .collect();

    grid[1..]
        .iter()
        .map(|row| {
            let mut record = Record::default();
            for (i, field) in fields.iter().enumerate() {
                let value = row.get(i).map_or("", |cell| cell.trim());
                record.insert(field.as_str(), value);
            }
            record.insert(RECORD_KIND_FIELD, RECORD_KIND);
            record
        })
        .collect()
}
