//! The reconciliation pipeline.
//!
//! Load → duplicate check → structural validation → stock allocation →
//! normalization → update execution. The first stage to report failure ends
//! the run and its issues become the [`BatchResult`]; once row processing
//! starts, every row is attempted and failure is recorded, never retried.

pub mod duplicate;
pub mod error;
pub mod execute;
pub mod normalize;
pub mod result;
pub mod stock;
pub mod validate;

use std::path::Path;

use log::{error, info};

pub use error::PipelineError;
pub use normalize::InventoryRecord;
pub use result::{BatchResult, DetailEntry, RowOutcome, Status, ValidationIssue};

use crate::api::InventoryApi;
use crate::db::AssignmentStore;
use crate::sheet::{self, SheetTable};

/// One pipeline run over one spreadsheet. Holds only its two external
/// collaborators; no state survives across invocations.
pub struct Pipeline<S, A> {
    store: S,
    api: A,
}

impl<S: AssignmentStore, A: InventoryApi> Pipeline<S, A> {
    pub fn new(store: S, api: A) -> Self {
        Self { store, api }
    }

    /// Run the full pipeline over a spreadsheet file.
    pub async fn run(&self, path: &Path, id_produto: &str) -> BatchResult {
        match sheet::read_sheet(path) {
            Ok(table) => self.run_table(&table, id_produto).await,
            Err(e) => {
                error!("{e}");
                BatchResult::from(e)
            }
        }
    }

    /// Run the stages after loading. Split out so callers with an
    /// already-built table (tests, other frontends) can drive the pipeline
    /// without a file.
    pub async fn run_table(&self, table: &SheetTable, id_produto: &str) -> BatchResult {
        match self.stages(table, id_produto).await {
            Ok(outcomes) => {
                let result = BatchResult::from_outcomes(outcomes);
                info!(
                    "batch finished with status {:?} ({} row(s))",
                    result.status,
                    result.detail.len()
                );
                result
            }
            Err(e) => {
                error!("pipeline aborted: {e}");
                BatchResult::from(e)
            }
        }
    }

    async fn stages(
        &self,
        table: &SheetTable,
        id_produto: &str,
    ) -> Result<Vec<RowOutcome>, PipelineError> {
        duplicate::check_assignments(&self.store, table).await?;
        validate::validate_structure(table)?;

        let raw = stock::allocate(&self.api, table.len(), id_produto).await?;
        let records = normalize::normalize_records(&raw);

        Ok(execute::execute_updates(&self.api, table, &records).await)
    }
}
