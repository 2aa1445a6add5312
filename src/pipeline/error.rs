//! Stage-level error taxonomy.
//!
//! Every variant aborts the run and converts into a [`BatchResult`]; row-level
//! update failures never appear here, they are folded into `RowOutcome`s by
//! the executor.

use thiserror::Error;

use super::result::{BatchResult, ValidationIssue};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The spreadsheet could not be parsed as tabular data.
    #[error("failed to read spreadsheet: {0}")]
    Load(String),

    /// The duplicate-check query could not execute.
    #[error("duplicate-check query failed: {0}")]
    Database(String),

    /// Structural problems in the uploaded batch (missing columns, empty
    /// fields, intra-batch duplicates). Carries the full accumulated list.
    #[error("spreadsheet validation failed ({} issue(s))", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// A MAC or serial in the batch is already assigned in the inventory.
    #[error("duplicate assignments found ({} issue(s))", .0.len())]
    DuplicateAssignment(Vec<ValidationIssue>),

    /// The list call failed at the transport level.
    #[error("inventory list request failed: {0}")]
    AllocationTransport(String),

    /// The list call returned a non-200 status; carries the raw body.
    #[error("{0}")]
    AllocationApi(String),

    /// Fewer unassigned records than rows to process.
    #[error("insufficient stock: required {required}, available {available}")]
    InsufficientStock { required: usize, available: u64 },
}

impl From<PipelineError> for BatchResult {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(issues) | PipelineError::DuplicateAssignment(issues) => {
                BatchResult::from_issues(issues)
            }
            other => BatchResult::from_issues(vec![ValidationIssue::batch(other.to_string())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_errors_become_a_single_batch_issue() {
        let result = BatchResult::from(PipelineError::InsufficientStock {
            required: 5,
            available: 3,
        });

        assert_eq!(result.detail.len(), 1);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "error");
        let mensagem = json["detail"][0]["mensagem"].as_str().unwrap();
        assert!(mensagem.contains('5') && mensagem.contains('3'));
    }

    #[test]
    fn validation_errors_keep_the_full_issue_list() {
        let issues = vec![
            ValidationIssue::line(2, "required field empty: mac"),
            ValidationIssue::line(3, "required field empty: serie"),
        ];
        let result = BatchResult::from(PipelineError::Validation(issues));
        assert_eq!(result.detail.len(), 2);
    }
}
