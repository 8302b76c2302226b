//! Backend configuration.

use serde::{Deserialize, Serialize};

/// Environment variable holding the backend URL.
pub const BACKEND_URL_ENV: &str = "INVOICE_PDF_BACKEND_URL";
/// Environment variable holding the backend's public (anon) key.
pub const BACKEND_KEY_ENV: &str = "INVOICE_PDF_BACKEND_KEY";

/// Connection settings for the hosted datastore and auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    /// Both values must be non-empty after trimming.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Option<Self> {
        let url = url.into().trim().to_string();
        let anon_key = anon_key.into().trim().to_string();
        if url.is_empty() || anon_key.is_empty() {
            return None;
        }
        Some(Self { url, anon_key })
    }

    /// Read the configuration from the environment.
    ///
    /// Returns `None` when either variable is missing or empty, meaning the
    /// backend is not configured.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::new(lookup(BACKEND_URL_ENV)?, lookup(BACKEND_KEY_ENV)?);
        if config.is_none() {
            log::debug!("{} or {} is empty", BACKEND_URL_ENV, BACKEND_KEY_ENV);
        }
        config
    }
}
