//! Session-scoped storage for the last-viewed quote.
//!
//! A JSON file under the OS temp directory: it survives consecutive
//! invocations but not the machine session, which is the closest native
//! analog to a per-session slot.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Quote, Result};

/// Session slot backed by a single JSON file.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a session store at the given path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a session store at the default temp-dir location.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(crate::domain::AppConfig::session_file_path())
    }

    /// Record the last-viewed quote.
    pub fn save_last_viewed(&self, quote: &Quote) -> Result<()> {
        let json = serde_json::to_string(quote).map_err(AppError::json_parse)?;
        fs::write(&self.path, json)
            .map_err(|e| AppError::io("Failed to write session file", e))?;

        Ok(())
    }

    /// Read the last-viewed quote, if one was recorded this session.
    pub fn load_last_viewed(&self) -> Result<Option<Quote>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| AppError::io("Failed to read session file", e))?;

        let quote = serde_json::from_str(&content).map_err(AppError::json_parse)?;
        Ok(Some(quote))
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_session_reads_none() {
        let dir = tempdir().unwrap();
        let session = SessionStore::new(dir.path().join("session.json"));
        assert!(session.load_last_viewed().unwrap().is_none());
    }

    #[test]
    fn test_last_viewed_roundtrip() {
        let dir = tempdir().unwrap();
        let session = SessionStore::new(dir.path().join("session.json"));

        let quote = Quote::new("carpe diem", "latin");
        session.save_last_viewed(&quote).unwrap();

        let loaded = session.load_last_viewed().unwrap().unwrap();
        assert_eq!(loaded, quote);
    }
}
