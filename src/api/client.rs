//! HTTP implementation of the inventory API contract.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use reqwest::header::{AUTHORIZATION, COOKIE};
use serde_json::Value;

use super::models::{ApiReply, list_payload};
use crate::config::Config;

/// Per-request timeout for every call to the inventory API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Interface the pipeline needs from the inventory API. An `Err` from either
/// method is a transport-level failure; HTTP-level rejection comes back as an
/// [`ApiReply`] with a non-200 status.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// List unassigned, active records of one inventory category.
    async fn list_available(&self, id_produto: &str, page_size: usize) -> Result<ApiReply>;

    /// PUT the merged record to `{base_url}/{id}`.
    async fn update_record(&self, id: &str, record: &Value) -> Result<ApiReply>;
}

/// reqwest-backed client for the IXC inventory API.
///
/// Both endpoints share Basic auth and the optional session cookie; the list
/// endpoint additionally wants the `ixcsoft: listar` header with the grid
/// payload as a JSON body on a GET.
pub struct IxcClient {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
    session_cookie: Option<String>,
}

impl IxcClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {}", STANDARD.encode(&config.token)),
            session_cookie: config.session_cookie.clone(),
        })
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let req = req.header(AUTHORIZATION, &self.auth_header);
        match &self.session_cookie {
            Some(cookie) => req.header(COOKIE, cookie),
            None => req,
        }
    }
}

#[async_trait]
impl InventoryApi for IxcClient {
    async fn list_available(&self, id_produto: &str, page_size: usize) -> Result<ApiReply> {
        debug!("listing available records for category {id_produto}");
        let req = self
            .with_auth(self.http.get(&self.base_url))
            .header("ixcsoft", "listar")
            .json(&list_payload(id_produto, page_size));

        let resp = req.send().await.context("inventory list request failed")?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .context("failed to read inventory list response")?;
        Ok(ApiReply { status, body })
    }

    async fn update_record(&self, id: &str, record: &Value) -> Result<ApiReply> {
        let url = format!("{}/{id}", self.base_url);
        debug!("updating inventory record {id}");
        let req = self.with_auth(self.http.put(&url)).json(record);

        let resp = req
            .send()
            .await
            .with_context(|| format!("update request for record {id} failed"))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .with_context(|| format!("failed to read update response for record {id}"))?;
        Ok(ApiReply { status, body })
    }
}
