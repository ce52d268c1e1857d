//! Reconstruction of `w:tbl` into a dense rectangular grid of cell strings.
//!
//! Horizontal spans (`w:gridSpan`) expand into blank cells to the right of the
//! text. Vertical merges (`w:vMerge`) keep the text in the first row of the
//! merged group only; continuation rows get blanks at that column.

use crate::markup::Element;
use crate::text::paragraph_text;

pub type Grid = Vec<Vec<String>>;

/// Width used when a table declares no grid and has no cells at all.
const FALLBACK_WIDTH: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VMerge {
    Restart,
    Continue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub grid_span: usize,
    pub v_merge: Option<VMerge>,
}

impl Default for CellSpan {
    fn default() -> Self {
        Self {
            grid_span: 1,
            v_merge: None,
        }
    }
}

impl CellSpan {
    /// Read span and merge markers from a `w:tc`'s `w:tcPr`.
    pub fn of(tc: &Element) -> Self {
        let Some(tc_pr) = tc.wml("tcPr") else {
            return Self::default();
        };

        let grid_span = match tc_pr.wml("gridSpan").and_then(|n| n.wml_val()) {
            Some(val) => match val.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    log::warn!("Ignoring invalid gridSpan value {val:?}");
                    1
                }
            },
            None => 1,
        };

        // A bare <w:vMerge/> means "continue" in OOXML.
        let v_merge = tc_pr.wml("vMerge").and_then(|n| match n.wml_val() {
            Some("restart") => Some(VMerge::Restart),
            None | Some("continue") | Some("1") => Some(VMerge::Continue),
            Some(other) => {
                log::debug!("Unknown vMerge value {other:?}, treating cell as unmerged");
                None
            }
        });

        Self { grid_span, v_merge }
    }
}

/// A source cell reduced to what reconstruction needs.
#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    pub text: String,
    pub span: CellSpan,
}

impl GridCell {
    pub fn new(text: impl Into<String>, span: CellSpan) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    pub fn from_tc(tc: &Element) -> Self {
        Self::new(cell_text(tc), CellSpan::of(tc))
    }
}

/// Per-column vertical-merge state carried from one row to the next.
///
/// Its length is the number of grid columns the previous row reached; a column
/// beyond that was never covered and cannot be continued.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeState {
    continues: Vec<bool>,
}

impl MergeState {
    pub fn covers(&self, col: usize) -> bool {
        col < self.continues.len()
    }

    pub fn continues_at(&self, col: usize) -> bool {
        self.continues.get(col).copied().unwrap_or(false)
    }

    fn mark(&mut self, start: usize, span: usize, merging: bool) {
        let end = start + span;
        if self.continues.len() < end {
            self.continues.resize(end, false);
        }
        for flag in &mut self.continues[start..end] {
            *flag = merging;
        }
    }
}

/// Cleaned text of each paragraph in a cell, empties skipped, one per line.
pub fn cell_text(tc: &Element) -> String {
    tc.block_children()
        .into_iter()
        .filter(|b| b.is_wml("p"))
        .map(paragraph_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rows of a `w:tbl` as source cells, `w:sdt` wrappers unwrapped.
pub fn read_rows(tbl: &Element) -> Vec<Vec<GridCell>> {
    tbl.block_children()
        .into_iter()
        .filter(|n| n.is_wml("tr"))
        .map(|tr| {
            tr.block_children()
                .into_iter()
                .filter(|n| n.is_wml("tc"))
                .map(GridCell::from_tc)
                .collect()
        })
        .collect()
}

/// Declared `w:gridCol` count, or the widest row measured in grid columns.
pub fn grid_width(tbl: &Element, rows: &[Vec<GridCell>]) -> usize {
    let declared = tbl
        .wml("tblGrid")
        .map(|grid| grid.wml_children("gridCol").count())
        .unwrap_or(0);
    if declared > 0 {
        return declared;
    }
    rows.iter()
        .map(|row| row.iter().map(|c| c.span.grid_span).sum::<usize>())
        .max()
        .filter(|&w| w > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Place one row's cells on the grid.
///
/// Returns the row, padded or cut to `width`, and the merge state for the next row.
pub fn reconstruct_row(cells: &[GridCell], prev: &MergeState, width: usize) -> (Vec<String>, MergeState) {
    let mut row: Vec<String> = Vec::with_capacity(width);
    let mut next = prev.clone();
    let mut col = 0usize;
    // Grid columns still claimed by this cell and every cell after it.
    let mut remaining: usize = cells.iter().map(|c| c.span.grid_span.max(1)).sum();

    for cell in cells {
        let span = cell.span.grid_span.max(1);

        if cell.span.v_merge == Some(VMerge::Continue) {
            // The continuation cell occupies the merged column itself.
            next.mark(col, span, prev.covers(col));
        } else {
            // Only fill a merged column when the source omitted its cell,
            // i.e. the remaining cells cannot reach the right edge otherwise.
            while prev.continues_at(col) && remaining < width.saturating_sub(col) {
                row.push(String::new());
                col += 1;
            }
            next.mark(col, span, false);
        }

        row.push(cell.text.clone());
        row.extend(std::iter::repeat_n(String::new(), span - 1));
        col += span;
        remaining -= span;
    }

    if row.len() > width {
        log::warn!(
            "Row spans {} grid columns but the table has {width}; dropping the overflow",
            row.len()
        );
        row.truncate(width);
    }
    row.resize(width, String::new());

    (row, next)
}

/// Rebuild a `w:tbl` as a rectangular grid.
pub fn reconstruct(tbl: &Element) -> Grid {
    let rows = read_rows(tbl);
    let width = grid_width(tbl, &rows);

    let mut state = MergeState::default();
    let mut grid = Vec::with_capacity(rows.len());
    for cells in &rows {
        let (row, next) = reconstruct_row(cells, &state, width);
        grid.push(row);
        state = next;
    }

    log::debug!("Reconstructed table: {} rows x {width} columns", grid.len());
    grid
}
