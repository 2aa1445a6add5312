//! Environment-driven configuration.
//!
//! Settings come from the process environment, with `.env` support via
//! dotenvy. Required variables produce a descriptive error naming the
//! variable; the session cookie is optional and an empty value counts as
//! absent.

use anyhow::{Context, Result};

/// Runtime configuration for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the inventory API (list endpoint; updates append `/{id}`).
    pub api_base_url: String,
    /// Raw Basic-auth credential, base64-encoded at header construction.
    pub token: String,
    /// Optional session cookie forwarded on every API call.
    pub session_cookie: Option<String>,
    /// MySQL DSN for the duplicate-check query.
    pub database_url: String,
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            api_base_url: require("API_BASE_URL")?,
            token: require("TOKEN")?,
            session_cookie: std::env::var("IXC_SESSION")
                .ok()
                .filter(|s| !s.is_empty()),
            database_url: require("DATABASE_URL")?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("missing required environment variable {name}"))
}
