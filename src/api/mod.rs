//! Client for the external inventory API.

pub mod client;
pub mod models;

pub use client::{InventoryApi, IxcClient};
pub use models::{ApiReply, list_payload};
