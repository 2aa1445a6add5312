//! The result envelope every caller receives.
//!
//! A run always produces a [`BatchResult`]: stage failures carry
//! [`ValidationIssue`]s, the executor carries one [`RowOutcome`] per input
//! row. Wire field names (`linha`, `mensagem`) follow the inventory system's
//! contract.

use serde::{Deserialize, Serialize};

/// Overall or per-row status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Result of processing one row: line number, the inventory record id used
/// (if one was resolved), and a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub linha: u32,
    pub id: Option<String>,
    pub status: Status,
    pub mensagem: String,
}

impl RowOutcome {
    pub fn success(linha: u32, id: String, mensagem: impl Into<String>) -> Self {
        Self {
            linha,
            id: Some(id),
            status: Status::Success,
            mensagem: mensagem.into(),
        }
    }

    pub fn error(linha: u32, id: Option<String>, mensagem: impl Into<String>) -> Self {
        Self {
            linha,
            id,
            status: Status::Error,
            mensagem: mensagem.into(),
        }
    }
}

/// A problem found before row processing. `linha` is absent for batch-level
/// failures (unreadable file, database error, missing columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub linha: Option<u32>,
    pub mensagem: String,
}

impl ValidationIssue {
    pub fn batch(mensagem: impl Into<String>) -> Self {
        Self {
            linha: None,
            mensagem: mensagem.into(),
        }
    }

    pub fn line(linha: u32, mensagem: impl Into<String>) -> Self {
        Self {
            linha: Some(linha),
            mensagem: mensagem.into(),
        }
    }
}

/// One entry in a [`BatchResult`]'s detail list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailEntry {
    Row(RowOutcome),
    Issue(ValidationIssue),
}

/// The sole contract returned to every external caller of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub status: Status,
    pub detail: Vec<DetailEntry>,
}

impl BatchResult {
    /// Envelope for an executor run: success iff every row succeeded, one
    /// detail entry per input row either way.
    pub fn from_outcomes(outcomes: Vec<RowOutcome>) -> Self {
        let status = if outcomes.iter().all(|o| o.status == Status::Success) {
            Status::Success
        } else {
            Status::Error
        };
        Self {
            status,
            detail: outcomes.into_iter().map(DetailEntry::Row).collect(),
        }
    }

    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            status: Status::Error,
            detail: issues.into_iter().map(DetailEntry::Issue).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_outcome_list_is_a_success() {
        let result = BatchResult::from_outcomes(Vec::new());
        assert_eq!(result.status, Status::Success);
        assert!(result.detail.is_empty());
    }

    #[test]
    fn one_failed_row_makes_the_batch_an_error() {
        let result = BatchResult::from_outcomes(vec![
            RowOutcome::success(2, "10".into(), "updated successfully"),
            RowOutcome::error(3, None, "no inventory available"),
        ]);
        assert_eq!(result.status, Status::Error);
        assert_eq!(result.detail.len(), 2);
    }

    #[test]
    fn row_outcomes_serialize_with_wire_field_names() {
        let result = BatchResult::from_outcomes(vec![RowOutcome::success(
            2,
            "10".into(),
            "updated successfully",
        )]);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["detail"][0]["linha"], 2);
        assert_eq!(json["detail"][0]["id"], "10");
        assert_eq!(json["detail"][0]["mensagem"], "updated successfully");
    }

    #[test]
    fn issues_serialize_without_row_fields() {
        let result =
            BatchResult::from_issues(vec![ValidationIssue::batch("missing required columns: mac")]);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "error");
        assert!(json["detail"][0]["linha"].is_null());
        assert!(json["detail"][0].get("id").is_none());
        assert!(json["detail"][0].get("status").is_none());
    }
}
