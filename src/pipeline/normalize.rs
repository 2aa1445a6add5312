//! Coercion of the API's record list into a uniform shape.
//!
//! The list endpoint has been observed returning a single object, an object
//! list, JSON-encoded strings (of objects or of whole lists), and bare
//! identifiers. Everything funnels through one recursive rule into
//! `Vec<InventoryRecord>` at this boundary, so later stages never branch on
//! runtime shape again. The rule is idempotent: normalizing an
//! already-normalized list yields the same list.

use log::warn;
use serde_json::{Map, Number, Value};

/// One allocatable asset, as opaque field/value pairs around an `id`.
pub type InventoryRecord = Map<String, Value>;

/// Normalize the raw `registros` value from a list response.
///
/// Top level: objects become a singleton list, strings are retried as JSON,
/// arrays normalize per element, `null` is empty, anything else is skipped
/// with a warning.
pub fn normalize_records(raw: &Value) -> Vec<InventoryRecord> {
    match raw {
        Value::Null => Vec::new(),
        Value::Object(record) => vec![record.clone()],
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => normalize_records(&parsed),
            Err(_) => vec![bare_id(s)],
        },
        Value::Array(items) => items.iter().flat_map(normalize_item).collect(),
        other => {
            warn!("unexpected shape for inventory record list: {other}");
            Vec::new()
        }
    }
}

/// Element rule: objects kept, numbers wrapped as `{"id": ...}`, strings
/// retried as JSON (objects used, lists recursively flattened in, anything
/// else treated as a bare id), other shapes skipped with a warning.
fn normalize_item(item: &Value) -> Vec<InventoryRecord> {
    match item {
        Value::Object(record) => vec![record.clone()],
        Value::Number(n) => vec![bare_id(&integer_id(n))],
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(record)) => vec![record],
            Ok(list @ Value::Array(_)) => normalize_records(&list),
            Ok(_) | Err(_) => vec![bare_id(s)],
        },
        other => {
            warn!("skipping inventory record with unexpected shape: {other}");
            Vec::new()
        }
    }
}

fn bare_id(id: &str) -> InventoryRecord {
    let mut record = Map::new();
    record.insert("id".to_string(), Value::String(id.to_string()));
    record
}

/// Stringify a numeric id, dropping a fractional part the way the API's own
/// exports do (`7.0` is record `"7"`).
pub fn integer_id(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(f) = n.as_f64() {
        (f as i64).to_string()
    } else {
        n.to_string()
    }
}
