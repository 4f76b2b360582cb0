//! Configuration file management.
//!
//! Handles loading and saving TOML configuration files.

use std::fs;
use std::path::Path;

use crate::domain::{AppConfig, AppError, Result};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"# quotedeck configuration
# Auto-generated - edit as needed

[sync]
# Interval between background syncs in seconds (default: 45)
interval_secs = 45

# Whether periodic sync is enabled
enabled = true

# Push the full local collection to the server before fetching
push_before_fetch = false

[server]
# Remote endpoint used for fetch (GET) and push (POST)
url = "https://jsonplaceholder.typicode.com/posts"

# Maximum number of remote entries adapted per fetch
fetch_limit = 10

# Request timeout in seconds
timeout_secs = 30

[paths]
# Custom data directory (optional, defaults to ~/.quotedeck)
# data_dir = "/custom/path"
"#;

/// Load configuration from file or create default.
///
/// # Errors
/// Returns error if file exists but cannot be read or parsed.
pub fn load_config() -> Result<AppConfig> {
    let config_path = AppConfig::default_data_dir().join("config.toml");

    if config_path.exists() {
        load_config_from_file(&config_path)
    } else {
        Ok(AppConfig::default())
    }
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

/// Create default configuration file if it doesn't exist.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists() -> Result<()> {
    let config_path = AppConfig::default_data_dir().join("config.toml");

    if !config_path.exists() {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create config directory", e))?;
        }

        fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| AppError::io("Failed to create default config", e))?;

        tracing::info!(path = %config_path.display(), "Created default configuration");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: AppConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.sync.interval_secs, 45);
        assert_eq!(config.server.fetch_limit, 10);
        assert!(!config.sync.push_before_fetch);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        let config = AppConfig::default();

        // Save
        let content = toml::to_string_pretty(&config).unwrap();
        fs::write(&config_path, content).unwrap();

        // Load
        let loaded = load_config_from_file(&config_path).unwrap();

        assert_eq!(loaded.sync.interval_secs, config.sync.interval_secs);
        assert_eq!(loaded.server.url, config.server.url);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[sync]\ninterval_secs = 60\n").unwrap();

        let loaded = load_config_from_file(&config_path).unwrap();
        assert_eq!(loaded.sync.interval_secs, 60);
        assert_eq!(loaded.server.fetch_limit, 10);
    }
}
