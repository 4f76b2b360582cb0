//! Remote endpoint client for the sync engine.
//!
//! The endpoint speaks a foreign posts-style schema; its `title` field is
//! adapted as quote text under a constant placeholder category.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::{AppError, Quote, Result, ServerConfig};

/// Category assigned to entries adapted from the foreign schema.
const REMOTE_CATEGORY: &str = "server";

/// Foreign entry shape returned by the endpoint.
#[derive(Debug, Deserialize)]
struct RemoteEntry {
    #[serde(default)]
    title: String,
}

/// HTTP client for the configured endpoint.
pub struct RemoteEndpoint {
    client: reqwest::Client,
    url: String,
    fetch_limit: usize,
}

impl RemoteEndpoint {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AppError::network)?;

        Ok(Self {
            client,
            url: config.url.clone(),
            fetch_limit: config.fetch_limit,
        })
    }

    /// Fetch the remote collection, adapted to quote records.
    ///
    /// # Errors
    /// Returns `Network` on transport failure or non-success status, and
    /// `Format` when the payload is not a JSON array of entries.
    pub async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(AppError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network {
                message: format!("server returned {status}"),
                source: None,
            });
        }

        let body = response.text().await.map_err(AppError::network)?;
        let entries: Vec<RemoteEntry> =
            serde_json::from_str(&body).map_err(AppError::json_parse)?;

        Ok(adapt_entries(entries, self.fetch_limit))
    }

    /// Push the full local collection to the endpoint. The response body is
    /// never used to update local state.
    ///
    /// # Errors
    /// Returns `Network` on transport failure or non-success status.
    pub async fn push_quotes(&self, quotes: &[Quote]) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&quotes)
            .send()
            .await
            .map_err(AppError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network {
                message: format!("server returned {status}"),
                source: None,
            });
        }

        tracing::debug!(count = quotes.len(), "Pushed local collection to server");

        Ok(())
    }
}

/// Convert foreign entries into quote records, capped at the fetch limit.
fn adapt_entries(entries: Vec<RemoteEntry>, limit: usize) -> Vec<Quote> {
    entries
        .into_iter()
        .take(limit)
        .map(|entry| Quote {
            text: entry.title,
            category: REMOTE_CATEGORY.to_string(),
            timestamp: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapt_entries_caps_at_limit() {
        let entries: Vec<RemoteEntry> =
            serde_json::from_str(r#"[{"title":"a"},{"title":"b"},{"title":"c"}]"#).unwrap();

        let quotes = adapt_entries(entries, 2);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].text, "a");
        assert_eq!(quotes[0].category, REMOTE_CATEGORY);
    }

    #[test]
    fn test_adapt_entries_tolerates_missing_title() {
        let entries: Vec<RemoteEntry> =
            serde_json::from_str(r#"[{"body":"no title here"}]"#).unwrap();

        let quotes = adapt_entries(entries, 10);

        assert_eq!(quotes.len(), 1);
        assert!(quotes[0].text.is_empty());
    }

    #[test]
    fn test_non_array_payload_is_format_error() {
        let err = serde_json::from_str::<Vec<RemoteEntry>>(r#"{"title":"x"}"#)
            .map_err(AppError::json_parse)
            .unwrap_err();

        assert!(matches!(err, AppError::Format { .. }));
    }
}
