//! Spreadsheet loading via calamine.
//!
//! Reads the first worksheet of an `.xlsx`/`.xls` workbook; the first row is
//! the header, every other row becomes a [`Row`] with all cells coerced to
//! strings. Fully empty rows are kept so they surface as validation errors
//! instead of silently shifting line numbers.

use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use log::info;

use super::{Row, SheetTable};
use crate::pipeline::PipelineError;

/// Load a workbook into a [`SheetTable`].
///
/// An unreadable or corrupt file is a [`PipelineError::Load`]; a workbook
/// whose first sheet has no rows at all yields an empty table with no
/// headers, which the structural validator then rejects.
pub fn read_sheet(path: &Path) -> Result<SheetTable, PipelineError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| PipelineError::Load(format!("{}: {e}", path.display())))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| PipelineError::Load("workbook has no worksheets".into()))?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| PipelineError::Load(format!("failed to read sheet '{first}': {e}")))?;

    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Ok(SheetTable::new(Vec::new(), Vec::new()));
    };

    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();

    let mut rows = Vec::new();
    for data_row in rows_iter {
        let mut cells = HashMap::new();
        for (idx, cell) in data_row.iter().enumerate() {
            if let Some(header) = headers.get(idx) {
                if !header.is_empty() {
                    cells.insert(header.clone(), cell_to_string(cell));
                }
            }
        }
        rows.push(Row::new(cells));
    }

    info!(
        "loaded {} rows from '{first}' (columns: {})",
        rows.len(),
        headers.join(", ")
    );
    Ok(SheetTable::new(headers, rows))
}

/// Coerce a cell to its string form. Whole-number floats (how Excel stores
/// most serials) drop the fractional part, so `123.0` reads back as `"123"`.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{dt}"),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn write_workbook(rows: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "mac").unwrap();
        sheet.write_string(0, 1, "serie").unwrap();
        for (i, (mac, serie)) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            sheet.write_string(r, 0, *mac).unwrap();
            sheet.write_string(r, 1, *serie).unwrap();
        }
        workbook.save(dir.path().join("assets.xlsx")).unwrap();
        dir
    }

    #[test]
    fn reads_header_and_rows() {
        let dir = write_workbook(&[("AA:BB", "123"), ("CC:DD", "456")]);
        let table = read_sheet(&dir.path().join("assets.xlsx")).unwrap();

        assert_eq!(table.headers(), ["mac", "serie"]);
        assert_eq!(table.len(), 2);
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("mac"), "AA:BB");
        assert_eq!(rows[1].get("serie"), "456");
    }

    #[test]
    fn numeric_serial_reads_back_without_fraction() {
        let dir = tempfile::tempdir().unwrap();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "mac").unwrap();
        sheet.write_string(0, 1, "serie").unwrap();
        sheet.write_string(1, 0, "AA:BB").unwrap();
        sheet.write_number(1, 1, 987654.0).unwrap();
        let path = dir.path().join("assets.xlsx");
        workbook.save(&path).unwrap();

        let table = read_sheet(&path).unwrap();
        assert_eq!(table.rows().next().unwrap().get("serie"), "987654");
    }

    #[test]
    fn absent_cells_read_as_empty() {
        let dir = write_workbook(&[("AA:BB", "")]);
        let table = read_sheet(&dir.path().join("assets.xlsx")).unwrap();

        let row = table.rows().next().unwrap();
        assert_eq!(row.get("serie"), "");
        assert_eq!(row.get("no_such_column"), "");
    }

    #[test]
    fn unreadable_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();

        let err = read_sheet(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Load(_)));
    }
}
