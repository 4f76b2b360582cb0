//! Domain models for the quote collection.
//!
//! These models represent the quote records held in the local store and
//! exchanged with the remote endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single quote record.
///
/// Fields default to empty strings on deserialization so that imported
/// documents are accepted without per-element validation; the editor is the
/// only place that enforces non-empty fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// The quotation body.
    #[serde(default)]
    pub text: String,
    /// Free-form classification tag. Some exported documents use `author`
    /// for this field instead.
    #[serde(default, alias = "author")]
    pub category: String,
    /// Creation time, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Quote {
    /// Create a quote stamped with the current time.
    #[must_use]
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            timestamp: Some(Utc::now()),
        }
    }

    /// The merge key used during reconciliation: trimmed, case-folded text.
    #[must_use]
    pub fn normalized_text(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" — {}", self.text, self.category)
    }
}

/// Summary statistics for the local collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LibraryStats {
    /// Number of quotes in the collection.
    pub quote_count: usize,
    /// Number of distinct categories.
    pub category_count: usize,
    /// Last successful sync timestamp, if any.
    pub last_sync: Option<DateTime<Utc>>,
    /// Storage file size in bytes.
    pub storage_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_text() {
        let quote = Quote::new("  Stay Hungry  ", "motivation");
        assert_eq!(quote.normalized_text(), "stay hungry");
    }

    #[test]
    fn test_author_alias_accepted() {
        let quote: Quote = serde_json::from_str(r#"{"text":"hi","author":"someone"}"#)
            .expect("author variant should deserialize");
        assert_eq!(quote.category, "someone");
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let quote: Quote = serde_json::from_str(r#"{"body":"unrelated"}"#)
            .expect("malformed entries are accepted as-is");
        assert!(quote.text.is_empty());
        assert!(quote.category.is_empty());
    }
}
