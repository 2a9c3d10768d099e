//! Client configuration parsed from environment variables.
//!
//! The binary loads `.env` through `dotenvy` before calling
//! [`ClientConfig::from_env`]; CLI flags override individual fields afterwards.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api";
pub const DEFAULT_STORAGE_PATH: &str = ".zheye/storage.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required value was present but empty.
    #[error("config value {var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl HttpTimeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root; endpoint paths such as `/columns` are appended to it.
    pub base_url: String,
    /// JSON file backing the persisted key/value store.
    pub storage_path: PathBuf,
    /// Router base path, e.g. `/vue-zheye`. Empty when routes live at the root.
    pub router_base: String,
    pub timeouts: HttpTimeouts,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `ZHEYE_BASE_URL`: default `http://127.0.0.1:3000/api`
    /// - `ZHEYE_STORAGE_PATH`: default `.zheye/storage.json`
    /// - `ZHEYE_ROUTER_BASE`: default empty
    /// - `ZHEYE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `ZHEYE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if `ZHEYE_BASE_URL` is set but blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = match std::env::var("ZHEYE_BASE_URL") {
            Ok(raw) => normalize_base_url(&raw).ok_or(ConfigError::Empty { var: "ZHEYE_BASE_URL" })?,
            Err(_) => DEFAULT_BASE_URL.to_owned(),
        };
        let storage_path = std::env::var("ZHEYE_STORAGE_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        let router_base = normalize_router_base(&std::env::var("ZHEYE_ROUTER_BASE").unwrap_or_default());
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("ZHEYE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("ZHEYE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, storage_path, router_base, timeouts })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            router_base: String::new(),
            timeouts: HttpTimeouts::default(),
        }
    }
}

/// Trim whitespace and trailing slashes. Returns `None` for a blank URL.
#[must_use]
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

/// Normalize a router base to `/segment` form, or empty for the root.
#[must_use]
pub fn normalize_router_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
