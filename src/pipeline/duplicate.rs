//! Cross-system duplicate check.
//!
//! A row is rejected when its MAC or serial is already assigned to a
//! persisted inventory record. The check is exhaustive: every row is
//! inspected, and a row whose MAC *and* serial both conflict produces two
//! issues.

use std::collections::HashMap;

use log::{info, warn};

use super::error::PipelineError;
use super::result::ValidationIssue;
use crate::db::{AssignmentRow, AssignmentStore};
use crate::sheet::SheetTable;

/// Run the duplicate check against the current database snapshot.
pub async fn check_assignments(
    store: &dyn AssignmentStore,
    table: &SheetTable,
) -> Result<(), PipelineError> {
    let existing = store
        .existing_assignments()
        .await
        .map_err(|e| PipelineError::Database(format!("{e:#}")))?;
    info!("loaded {} assigned inventory records", existing.len());

    let issues = find_conflicts(table, &existing);
    if issues.is_empty() {
        Ok(())
    } else {
        warn!("{} duplicate assignment(s) found", issues.len());
        Err(PipelineError::DuplicateAssignment(issues))
    }
}

/// Pure conflict scan over a database snapshot. MAC and serial maps are
/// built independently; empty values never conflict.
fn find_conflicts(table: &SheetTable, existing: &[AssignmentRow]) -> Vec<ValidationIssue> {
    let mut by_mac: HashMap<&str, &AssignmentRow> = HashMap::new();
    let mut by_serial: HashMap<&str, &AssignmentRow> = HashMap::new();
    for record in existing {
        if !record.id_mac.is_empty() {
            by_mac.insert(record.id_mac.as_str(), record);
        }
        if !record.serial_fornecedor.is_empty() {
            by_serial.insert(record.serial_fornecedor.as_str(), record);
        }
    }

    let mut issues = Vec::new();
    for (idx, row) in table.rows().enumerate() {
        let linha = SheetTable::line_number(idx);

        if let Some(record) = by_mac.get(row.get("mac")) {
            issues.push(ValidationIssue::line(
                linha,
                format!(
                    "MAC '{}' already assigned to inventory record {} (category {})",
                    row.get("mac"),
                    record.id,
                    record.id_produto
                ),
            ));
        }
        if let Some(record) = by_serial.get(row.get("serie")) {
            issues.push(ValidationIssue::line(
                linha,
                format!(
                    "serial '{}' already assigned to inventory record {} (category {})",
                    row.get("serie"),
                    record.id,
                    record.id_produto
                ),
            ));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Row;
    use std::collections::HashMap as Map;

    fn row(mac: &str, serie: &str) -> Row {
        let mut cells = Map::new();
        cells.insert("mac".to_string(), mac.to_string());
        cells.insert("serie".to_string(), serie.to_string());
        Row::new(cells)
    }

    fn table(rows: Vec<Row>) -> SheetTable {
        SheetTable::new(vec!["mac".into(), "serie".into()], rows)
    }

    fn assigned(id: &str, produto: &str, mac: &str, serial: &str) -> AssignmentRow {
        AssignmentRow {
            id: id.to_string(),
            id_produto: produto.to_string(),
            id_mac: mac.to_string(),
            serial_fornecedor: serial.to_string(),
        }
    }

    #[test]
    fn clean_batch_has_no_conflicts() {
        let existing = vec![assigned("7", "3", "EE:FF", "999")];
        let issues = find_conflicts(&table(vec![row("AA:BB", "123")]), &existing);
        assert!(issues.is_empty());
    }

    #[test]
    fn conflict_names_line_value_record_and_category() {
        let existing = vec![assigned("7", "3", "AA:BB", "999")];
        let issues = find_conflicts(&table(vec![row("AA:BB", "123")]), &existing);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].linha, Some(2));
        let msg = &issues[0].mensagem;
        assert!(msg.contains("AA:BB") && msg.contains('7') && msg.contains('3'));
    }

    #[test]
    fn mac_and_serial_conflicts_are_reported_separately() {
        let existing = vec![
            assigned("7", "3", "AA:BB", "555"),
            assigned("8", "3", "EE:FF", "123"),
        ];
        let issues = find_conflicts(&table(vec![row("AA:BB", "123")]), &existing);

        assert_eq!(issues.len(), 2);
        assert!(issues[0].mensagem.contains("MAC"));
        assert!(issues[1].mensagem.contains("serial"));
    }

    #[test]
    fn scan_is_exhaustive_across_rows() {
        let existing = vec![assigned("7", "3", "AA:BB", "123")];
        let issues = find_conflicts(
            &table(vec![row("AA:BB", "900"), row("CC:DD", "123")]),
            &existing,
        );

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].linha, Some(2));
        assert_eq!(issues[1].linha, Some(3));
    }

    #[test]
    fn empty_row_values_never_conflict() {
        // Snapshot rows always have both fields filled, but guard anyway.
        let existing = vec![assigned("7", "3", "AA:BB", "123")];
        let issues = find_conflicts(&table(vec![row("", "")]), &existing);
        assert!(issues.is_empty());
    }
}
