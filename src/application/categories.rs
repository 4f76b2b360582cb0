//! Category index derived from the quote collection.

use crate::domain::Quote;

/// Synthetic wildcard that matches every quote.
pub const ALL_CATEGORIES: &str = "all";

/// Distinct category values in first-seen order, prefixed with the `all`
/// wildcard. Values are taken verbatim, so entries imported without a
/// category contribute an empty value.
#[must_use]
pub fn derive_categories(quotes: &[Quote]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];

    for quote in quotes {
        if !categories.contains(&quote.category) {
            categories.push(quote.category.clone());
        }
    }

    categories
}

/// Quotes matching a category; the wildcard matches everything.
#[must_use]
pub fn filter_quotes<'a>(quotes: &'a [Quote], category: &str) -> Vec<&'a Quote> {
    quotes
        .iter()
        .filter(|q| category == ALL_CATEGORIES || q.category == category)
        .collect()
}

/// Pick the effective filter: an explicit request wins, otherwise the
/// persisted choice. A persisted choice that no longer matches any derived
/// category falls back to the wildcard with a warning instead of silently
/// matching nothing.
#[must_use]
pub fn resolve_filter(
    requested: Option<&str>,
    persisted: Option<&str>,
    categories: &[String],
) -> String {
    if let Some(category) = requested {
        return category.to_string();
    }

    match persisted {
        Some(category) if categories.iter().any(|c| c == category) => category.to_string(),
        Some(category) => {
            tracing::warn!(
                category = %category,
                "Persisted filter no longer matches any category, falling back to '{ALL_CATEGORIES}'"
            );
            ALL_CATEGORIES.to_string()
        }
        None => ALL_CATEGORIES.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Quote> {
        vec![
            Quote::new("a", "wisdom"),
            Quote::new("b", "humor"),
            Quote::new("c", "wisdom"),
        ]
    }

    #[test]
    fn test_derive_first_seen_order() {
        let categories = derive_categories(&sample());
        assert_eq!(categories, vec!["all", "wisdom", "humor"]);
    }

    #[test]
    fn test_derive_empty_collection() {
        let categories = derive_categories(&[]);
        assert_eq!(categories, vec!["all"]);
    }

    #[test]
    fn test_filter_exact_match() {
        let quotes = sample();
        let filtered = filter_quotes(&quotes, "wisdom");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_wildcard_matches_all() {
        let quotes = sample();
        assert_eq!(filter_quotes(&quotes, ALL_CATEGORIES).len(), 3);
    }

    #[test]
    fn test_filter_zero_matches() {
        let quotes = sample();
        assert!(filter_quotes(&quotes, "absent").is_empty());
    }

    #[test]
    fn test_resolve_explicit_request_wins() {
        let categories = derive_categories(&sample());
        let filter = resolve_filter(Some("humor"), Some("wisdom"), &categories);
        assert_eq!(filter, "humor");
    }

    #[test]
    fn test_resolve_stale_persisted_falls_back() {
        let categories = derive_categories(&sample());
        let filter = resolve_filter(None, Some("deleted-category"), &categories);
        assert_eq!(filter, ALL_CATEGORIES);
    }

    #[test]
    fn test_resolve_defaults_to_wildcard() {
        let filter = resolve_filter(None, None, &[ALL_CATEGORIES.to_string()]);
        assert_eq!(filter, ALL_CATEGORIES);
    }
}
