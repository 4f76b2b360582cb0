//! Quote entry and removal.
//!
//! The editor is the only place that enforces non-empty fields; imported
//! documents are appended without per-element validation.

use crate::domain::{AppError, Quote, Result};

use super::store::QuoteStore;

/// Validate and append a user-submitted quote.
///
/// Both fields are trimmed; either empty after trimming rejects the
/// submission without touching the store. Exact duplicates are permitted.
///
/// # Errors
/// Returns `Validation` for empty fields, or a storage error if persistence
/// fails.
pub fn submit(store: &QuoteStore, text: &str, category: &str) -> Result<Quote> {
    let text = text.trim();
    let category = category.trim();

    if text.is_empty() {
        return Err(AppError::validation("quote text must not be empty"));
    }
    if category.is_empty() {
        return Err(AppError::validation("quote category must not be empty"));
    }

    let quote = Quote::new(text, category);
    store.mutate(|quotes| quotes.push(quote.clone()))?;

    tracing::info!(category = %quote.category, "Quote added");

    Ok(quote)
}

/// Remove a quote by its 1-based position in the listing.
///
/// # Errors
/// Returns `Validation` when the position is out of range.
pub fn remove(store: &QuoteStore, position: usize) -> Result<Quote> {
    store.mutate(|quotes| {
        if position == 0 || position > quotes.len() {
            return Err(AppError::validation(format!(
                "position {} is out of range (1-{})",
                position,
                quotes.len()
            )));
        }

        Ok(quotes.remove(position - 1))
    })?
}
