//! Structural validation of the uploaded batch.
//!
//! Three checks, in order: required columns present, required fields
//! non-empty, and identifying values unique within the batch. Missing
//! columns fail immediately; the other two accumulate and are reported
//! together.

use std::collections::HashMap;

use log::warn;

use super::error::PipelineError;
use super::result::ValidationIssue;
use crate::sheet::SheetTable;

/// Columns every batch must carry.
pub const REQUIRED_COLUMNS: [&str; 2] = ["mac", "serie"];

pub fn validate_structure(table: &SheetTable) -> Result<(), PipelineError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .copied()
        .collect();
    if !missing.is_empty() {
        let mensagem = format!("missing required columns: {}", missing.join(", "));
        warn!("{mensagem}");
        return Err(PipelineError::Validation(vec![ValidationIssue::batch(
            mensagem,
        )]));
    }

    let mut issues = Vec::new();

    for (idx, row) in table.rows().enumerate() {
        let empty: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| row.get(c).is_empty())
            .map(|c| format!("required field empty: {c}"))
            .collect();
        if !empty.is_empty() {
            issues.push(ValidationIssue::line(
                SheetTable::line_number(idx),
                empty.join("; "),
            ));
        }
    }

    for column in REQUIRED_COLUMNS {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for row in table.rows() {
            *counts.entry(row.get(column)).or_insert(0) += 1;
        }
        for (idx, row) in table.rows().enumerate() {
            let value = row.get(column);
            if counts[value] > 1 {
                issues.push(ValidationIssue::line(
                    SheetTable::line_number(idx),
                    format!("duplicate value in column {column}: {value}"),
                ));
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        warn!("{} structural issue(s) found in the batch", issues.len());
        Err(PipelineError::Validation(issues))
    }
}
