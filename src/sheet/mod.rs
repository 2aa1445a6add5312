//! Row-oriented view of an uploaded spreadsheet.
//!
//! All cell values are coerced to strings at load time; absent cells read as
//! the empty string. Rows are reported by spreadsheet line number: the header
//! occupies line 1, so the row at index `i` is line `i + 2`.

pub mod reader;

use std::collections::HashMap;

pub use reader::read_sheet;

/// A loaded spreadsheet: ordered headers plus ordered data rows.
#[derive(Debug, Clone)]
pub struct SheetTable {
    headers: Vec<String>,
    rows: Vec<Row>,
}

/// One data row, keyed by column name. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    pub fn new(cells: HashMap<String, String>) -> Self {
        Self { cells }
    }

    /// Cell value for a column, or `""` when the cell is absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

impl SheetTable {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Spreadsheet line number for the row at `index` (header is line 1).
    pub fn line_number(index: usize) -> u32 {
        index as u32 + 2
    }
}
