//! Wire types and payloads for the inventory API.

use serde_json::{Value, json};

/// Raw reply from the inventory API. Interpretation (status codes, success
/// markers, body parsing) belongs to the pipeline stages, so fakes in tests
/// can script replies without an HTTP server.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

/// Grid payload for the list endpoint: unassigned (`id_mac` and
/// `serial_fornecedor` both empty), active records of one category, first
/// page, sorted by id descending. The API expects the filter set as a
/// JSON-encoded string inside the form fields.
pub fn list_payload(id_produto: &str, page_size: usize) -> Value {
    let filters = json!([
        {"TB": "patrimonio.id_produto", "OP": "=", "P": id_produto},
        {"TB": "patrimonio.situacao", "OP": "=", "P": "1"},
        {"TB": "patrimonio.id_mac", "OP": "=", "P": ""},
        {"TB": "patrimonio.serial_fornecedor", "OP": "=", "P": ""},
    ]);

    json!({
        "grid_param": filters.to_string(),
        "page": "1",
        "rp": page_size.to_string(),
        "sortname": "patrimonio.id",
        "sortorder": "desc",
    })
}
