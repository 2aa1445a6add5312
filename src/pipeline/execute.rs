//! Per-row update execution.
//!
//! Rows pair with normalized records by position: row `i` consumes record
//! `i`, never reassigned based on content. Every failure here is local to
//! its row — the batch always produces exactly one outcome per input row.

use chrono::Local;
use log::{info, warn};
use serde_json::Value;

use super::normalize::{InventoryRecord, integer_id};
use super::result::RowOutcome;
use crate::api::InventoryApi;
use crate::sheet::{Row, SheetTable};

/// Date format the inventory API expects for `data_aquisicao`.
const ACQUISITION_DATE_FORMAT: &str = "%d/%m/%Y";

pub async fn execute_updates(
    api: &dyn InventoryApi,
    table: &SheetTable,
    records: &[InventoryRecord],
) -> Vec<RowOutcome> {
    let mut outcomes = Vec::with_capacity(table.len());

    for (i, row) in table.rows().enumerate() {
        let linha = SheetTable::line_number(i);

        let Some(record) = records.get(i) else {
            warn!("line {linha}: no inventory record left to allocate");
            outcomes.push(RowOutcome::error(linha, None, "no inventory available"));
            continue;
        };

        outcomes.push(update_one(api, linha, i, row, record).await);
    }

    outcomes
}

async fn update_one(
    api: &dyn InventoryApi,
    linha: u32,
    position: usize,
    row: &Row,
    record: &InventoryRecord,
) -> RowOutcome {
    let Some(id) = resolve_id(record) else {
        warn!("line {linha}: allocated record has no usable id");
        return RowOutcome::error(
            linha,
            None,
            format!("inventory record at position {position} has no 'id'"),
        );
    };

    let mut merged = record.clone();
    merged.insert(
        "id_mac".to_string(),
        Value::String(row.get("mac").trim().to_string()),
    );
    merged.insert(
        "serial_fornecedor".to_string(),
        Value::String(row.get("serie").trim().to_string()),
    );
    merged.insert(
        "data_aquisicao".to_string(),
        Value::String(Local::now().format(ACQUISITION_DATE_FORMAT).to_string()),
    );

    match api.update_record(&id, &Value::Object(merged)).await {
        Ok(reply) if reply.status == 200 && reply.body.contains(r#""type":"success""#) => {
            info!("line {linha}: inventory record {id} updated");
            RowOutcome::success(linha, id, "updated successfully")
        }
        Ok(reply) => {
            let mensagem = error_message(&reply.body);
            warn!("line {linha}: update of record {id} rejected: {mensagem}");
            RowOutcome::error(linha, Some(id), mensagem)
        }
        Err(e) => {
            warn!("line {linha}: update of record {id} failed: {e:#}");
            RowOutcome::error(linha, None, format!("{e:#}"))
        }
    }
}

/// Resolve a record's identifier from `id` or the uppercase `ID` the API
/// sometimes emits. Numeric ids are stringified; empty or non-scalar values
/// resolve to nothing.
fn resolve_id(record: &InventoryRecord) -> Option<String> {
    let value = record.get("id").or_else(|| record.get("ID"))?;
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => integer_id(n),
        _ => return None,
    };
    if id.is_empty() { None } else { Some(id) }
}

/// Error detail from a rejected update: the JSON body's `message` field when
/// present, the raw body otherwise.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> InventoryRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn resolve_id_tolerates_uppercase_and_numbers() {
        assert_eq!(resolve_id(&record(json!({"id": "10"}))), Some("10".into()));
        assert_eq!(resolve_id(&record(json!({"ID": "11"}))), Some("11".into()));
        assert_eq!(resolve_id(&record(json!({"id": 12}))), Some("12".into()));
        assert_eq!(resolve_id(&record(json!({"id": " 13 "}))), Some("13".into()));
    }

    #[test]
    fn resolve_id_rejects_unusable_values() {
        assert_eq!(resolve_id(&record(json!({"id": ""}))), None);
        assert_eq!(resolve_id(&record(json!({"id": null}))), None);
        assert_eq!(resolve_id(&record(json!({"setor": "A"}))), None);
    }

    #[test]
    fn error_message_prefers_the_message_field() {
        assert_eq!(
            error_message(r#"{"type":"error","message":"campo inválido"}"#),
            "campo inválido"
        );
        assert_eq!(error_message(r#"{"type":"error"}"#), r#"{"type":"error"}"#);
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }
}
