//! Sync-related domain models and configuration.
//!
//! Contains the application configuration and the persisted state of the
//! periodic sync engine.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration for the sync engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Interval between sync operations in seconds.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Whether periodic sync is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Push the full local collection to the server before fetching.
    /// The push is a notification side effect only; its response never
    /// feeds reconciliation.
    #[serde(default)]
    pub push_before_fetch: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            enabled: default_enabled(),
            push_before_fetch: false,
        }
    }
}

const fn default_interval() -> u64 {
    45
}

const fn default_enabled() -> bool {
    true
}

/// Configuration for the remote endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Endpoint URL used for both fetch (GET) and push (POST).
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Maximum number of remote entries adapted per fetch.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            fetch_limit: default_fetch_limit(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_server_url() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

const fn default_fetch_limit() -> usize {
    10
}

const fn default_timeout() -> u64 {
    30
}

/// Path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// Base data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sync engine configuration.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Remote endpoint configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Path configuration.
    #[serde(default)]
    pub paths: PathConfig,
}

impl AppConfig {
    /// Get the data directory, using default if not configured.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quotedeck")
    }

    /// Get the durable library database path.
    #[must_use]
    pub fn library_db_path(&self) -> PathBuf {
        self.data_dir().join("library.db")
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_file_path(&self) -> PathBuf {
        self.data_dir().join("config.toml")
    }

    /// Get the session slot path. Lives in the OS temp directory so its
    /// lifetime is bounded by the machine session, not the library.
    #[must_use]
    pub fn session_file_path() -> PathBuf {
        std::env::temp_dir().join("quotedeck-session.json")
    }
}

/// Persisted state of the sync engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncState {
    /// Last successful sync timestamp.
    pub last_sync: Option<DateTime<Utc>>,

    /// Quotes adopted from the server during the last successful sync.
    pub last_added: usize,

    /// Collection size after the last successful sync.
    pub quote_count: usize,

    /// Last error message if any.
    pub last_error: Option<String>,
}

impl SyncState {
    /// Record a completed sync.
    #[must_use]
    pub fn completed(mut self, added: usize, quote_count: usize) -> Self {
        self.last_sync = Some(Utc::now());
        self.last_added = added;
        self.quote_count = quote_count;
        self.last_error = None;
        self
    }

    /// Record a failed sync.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.last_error = Some(error.into());
        self
    }
}
