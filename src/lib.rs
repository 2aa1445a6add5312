//! Reconciles asset spreadsheets against an IXC inventory API.
//!
//! An uploaded spreadsheet of physical assets (MAC address, supplier serial)
//! is validated against structural rules and against the inventory database,
//! available inventory records are allocated to the validated rows, and one
//! update call per row is issued to the external API, with per-row outcomes
//! aggregated into a single [`pipeline::BatchResult`] envelope.

pub mod api;
pub mod config;
pub mod db;
pub mod pipeline;
pub mod sheet;
