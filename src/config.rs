//! Server configuration from environment variables.
//!
//! | Variable              | Default        |
//! |-----------------------|----------------|
//! | `STORAGE_DIR`         | `data/storage` |
//! | `PORT`                | `3000`         |
//! | `PERSIST_DEBOUNCE_MS` | `1000`         |
//! | `STORAGE_QUOTA_BYTES` | unset (no cap) |
//!
//! Unparseable numbers fall back to the default with a warning.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::store::DEFAULT_DEBOUNCE;

pub const DEFAULT_STORAGE_DIR: &str = "data/storage";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub storage_dir: PathBuf,
    pub port: u16,
    pub debounce: Duration,
    pub storage_quota: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            port: DEFAULT_PORT,
            debounce: DEFAULT_DEBOUNCE,
            storage_quota: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let storage_dir = lookup("STORAGE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR));

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let debounce_ms = parse_or(&lookup, "PERSIST_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS);
        let storage_quota = lookup("STORAGE_QUOTA_BYTES").and_then(|raw| match raw.trim().parse::<usize>() {
            Ok(limit) => Some(limit),
            Err(_) => {
                tracing::warn!(value = %raw, "Invalid STORAGE_QUOTA_BYTES, storage quota disabled");
                None
            }
        });

        Self {
            storage_dir,
            port,
            debounce: Duration::from_millis(debounce_ms),
            storage_quota,
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  STORAGE_DIR: {}", self.storage_dir.display());
        tracing::info!("  PORT: {}", self.port);
        tracing::info!("  PERSIST_DEBOUNCE_MS: {}", self.debounce.as_millis());
        match self.storage_quota {
            Some(limit) => tracing::info!("  STORAGE_QUOTA_BYTES: {}", limit),
            None => tracing::info!("  STORAGE_QUOTA_BYTES: unlimited"),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(name) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, default = %default, "Invalid value, using default");
            default
        }),
    }
}
