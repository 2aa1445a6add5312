//! Read-only access to already-persisted inventory assignments.
//!
//! The duplicate check only needs one query: every inventory record whose MAC
//! and supplier serial are both already filled in. The trait keeps the
//! pipeline testable without a database.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::Row as _;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

/// One persisted inventory record that already claims a MAC and a serial.
#[derive(Debug, Clone)]
pub struct AssignmentRow {
    pub id: String,
    pub id_produto: String,
    pub id_mac: String,
    pub serial_fornecedor: String,
}

/// Snapshot provider for the duplicate check.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// All records with non-empty MAC *and* non-empty serial.
    async fn existing_assignments(&self) -> Result<Vec<AssignmentRow>>;
}

/// Ids are cast to CHAR so callers see them the same way the API does
/// (string identifiers), whatever the column types are.
const EXISTING_ASSIGNMENTS_QUERY: &str = "\
    SELECT CAST(id AS CHAR) AS id, CAST(id_produto AS CHAR) AS id_produto, \
           id_mac, serial_fornecedor \
    FROM patrimonio \
    WHERE id_mac IS NOT NULL AND id_mac != '' \
      AND serial_fornecedor IS NOT NULL AND serial_fornecedor != ''";

/// MySQL-backed store over the inventory database.
pub struct MysqlAssignmentStore {
    pool: MySqlPool,
}

impl MysqlAssignmentStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .connect(database_url)
            .await
            .context("failed to connect to the inventory database")?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl AssignmentStore for MysqlAssignmentStore {
    async fn existing_assignments(&self) -> Result<Vec<AssignmentRow>> {
        let rows = sqlx::query(EXISTING_ASSIGNMENTS_QUERY)
            .fetch_all(&self.pool)
            .await
            .context("failed to query existing assignments")?;

        rows.into_iter()
            .map(|row| {
                Ok(AssignmentRow {
                    id: row.try_get("id")?,
                    id_produto: row.try_get("id_produto")?,
                    id_mac: row.try_get("id_mac")?,
                    serial_fornecedor: row.try_get("serial_fornecedor")?,
                })
            })
            .collect()
    }
}
