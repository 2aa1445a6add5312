//! Stock availability check.
//!
//! One list call against the inventory API asks for unassigned, active
//! records of the requested category; the declared total must cover the
//! batch. The raw `registros` value is passed on untouched — shape coercion
//! is the normalizer's job.

use log::info;
use serde_json::Value;

use super::error::PipelineError;
use crate::api::InventoryApi;

/// Page size requested from the list endpoint.
pub const PAGE_SIZE: usize = 1000;

/// Assert that at least `required` records are available and return the raw
/// record list from the API response.
pub async fn allocate(
    api: &dyn InventoryApi,
    required: usize,
    id_produto: &str,
) -> Result<Value, PipelineError> {
    let reply = api
        .list_available(id_produto, PAGE_SIZE)
        .await
        .map_err(|e| PipelineError::AllocationTransport(format!("{e:#}")))?;

    if reply.status != 200 {
        return Err(PipelineError::AllocationApi(reply.body));
    }

    let parsed: Value = serde_json::from_str(&reply.body).map_err(|e| {
        PipelineError::AllocationApi(format!("unparseable inventory list response: {e}"))
    })?;

    let available = declared_total(&parsed);
    if available < required as u64 {
        return Err(PipelineError::InsufficientStock {
            required,
            available,
        });
    }

    info!("stock check passed: required {required}, available {available}");
    Ok(parsed.get("registros").cloned().unwrap_or(Value::Null))
}

/// The API is loose about `total`: number or numeric string, sometimes
/// absent. Anything unusable counts as zero.
fn declared_total(response: &Value) -> u64 {
    match response.get("total") {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
