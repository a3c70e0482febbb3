//! Table extraction and grid normalization
//!
//! Tables are read as raw cell text first, then normalized into rectangular
//! grids of trimmed strings when attributed to a section.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::models::{Table, TableRows};
use super::formatting::extract_cell_text;

/// Two-dimensional grid of trimmed cell text, every row the same width
pub type TableGrid = Vec<Vec<String>>;

static GRID_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"grid_span: Some\(GridSpan \{ val: (\d+)").expect("valid regex"));

static VMERGE_CONTINUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"vertical_merge: Some\(VMerge \{ val: Continue").expect("valid regex")
});

/// Extract table rows from a docx-rs Table
///
/// Merged cells read like Word shows them: a horizontally merged cell repeats
/// its text across every grid column it spans, and a vertical merge
/// continuation repeats the text of the cell above it.
pub(crate) fn extract_table(table: &docx_rs::Table) -> Table {
    let mut rows: TableRows = Vec::new();
    // Text most recently placed in each grid column
    let mut column_text: Vec<String> = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut row_cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            let column = row_cells.len();
            let (span, continues) = cell_merge(cell);

            let text = if continues {
                column_text.get(column).cloned().unwrap_or_default()
            } else {
                extract_cell_text(cell)
            };

            for _ in 0..span {
                row_cells.push(text.clone());
            }
        }

        if column_text.len() < row_cells.len() {
            column_text.resize(row_cells.len(), String::new());
        }
        column_text[..row_cells.len()].clone_from_slice(&row_cells);

        rows.push(row_cells);
    }

    Table::new(rows).with_column_count(table.grid.len())
}

/// Grid columns a cell spans, and whether it continues a vertical merge
fn cell_merge(cell: &docx_rs::TableCell) -> (usize, bool) {
    // Both live in private fields, so read them through the debug output
    let property_debug = format!("{:?}", cell.property);
    let span = GRID_SPAN
        .captures(&property_debug)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .filter(|span| *span > 0)
        .unwrap_or(1);

    (span, VMERGE_CONTINUE.is_match(&property_debug))
}

/// Build a rectangular grid of trimmed cell text
///
/// The column count is the larger of the declared grid width and the widest
/// row; shorter rows are padded with empty strings.
pub fn normalize_grid(table: &Table) -> TableGrid {
    let widest_row = table.rows.iter().map(Vec::len).max().unwrap_or(0);
    let column_count = table.column_count.max(widest_row);

    table
        .rows
        .iter()
        .map(|row| {
            let mut cells: Vec<String> = row.iter().map(|cell| cell.trim().to_string()).collect();
            cells.resize(column_count, String::new());
            cells
        })
        .collect()
}
