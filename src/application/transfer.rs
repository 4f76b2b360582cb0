//! JSON import and export for the quote collection.

use serde_json::Value;

use crate::domain::{AppError, Quote, Result};

use super::store::QuoteStore;

/// Serialize the full collection as a pretty-printed JSON document.
///
/// # Errors
/// Returns error if serialization fails.
pub fn export_json(store: &QuoteStore) -> Result<String> {
    serde_json::to_string_pretty(&store.read()).map_err(AppError::json_parse)
}

/// Parse a JSON document and append its entries to the collection.
///
/// The top-level value must be an array; anything else rejects the whole
/// document and leaves the store untouched. Elements are appended without
/// per-element validation: entries that do not deserialize as quote records
/// become blank records, matching the renderer's tolerance for absent
/// fields. Import always appends, never replaces.
///
/// # Errors
/// Returns `Format` for unparseable documents or a non-array top level.
pub fn import_document(store: &QuoteStore, contents: &str) -> Result<usize> {
    let value: Value = serde_json::from_str(contents).map_err(AppError::json_parse)?;

    let Value::Array(items) = value else {
        return Err(AppError::format(
            "imported document must be a JSON array of quotes",
        ));
    };

    let imported: Vec<Quote> = items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect();

    let count = imported.len();
    store.mutate(|quotes| quotes.extend(imported))?;

    tracing::info!(count, "Imported quotes");

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::LocalStorage;
    use tempfile::tempdir;

    fn open_store(dir: &std::path::Path) -> QuoteStore {
        let storage = LocalStorage::open(&dir.join("library.db")).unwrap();
        QuoteStore::open(storage).unwrap()
    }

    #[test]
    fn test_export_import_doubles_duplicates() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        store
            .replace(vec![Quote::new("a", "x"), Quote::new("b", "y")])
            .unwrap();

        let document = export_json(&store).unwrap();
        let added = import_document(&store, &document).unwrap();

        assert_eq!(added, 2);
        let quotes = store.read();
        assert_eq!(quotes.len(), 4);
        assert_eq!(quotes.iter().filter(|q| q.text == "a").count(), 2);
    }

    #[test]
    fn test_import_appends_never_replaces() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        store.replace(vec![Quote::new("kept", "local")]).unwrap();

        import_document(&store, r#"[{"text":"new","category":"remote"}]"#).unwrap();

        let quotes = store.read();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].text, "kept");
    }

    #[test]
    fn test_import_object_rejected_storage_untouched() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        store.replace(vec![Quote::new("only", "one")]).unwrap();

        // Second connection observes the stored bytes directly.
        let raw = LocalStorage::open(&dir.path().join("library.db")).unwrap();
        let before = raw.get_raw("quotes").unwrap();

        let err = import_document(&store, r#"{"text":"x","category":"y"}"#).unwrap_err();

        assert!(matches!(err, AppError::Format { .. }));
        assert_eq!(raw.get_raw("quotes").unwrap(), before);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_import_unparseable_rejected() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let before = store.read();

        let err = import_document(&store, "not json at all").unwrap_err();

        assert!(matches!(err, AppError::Format { .. }));
        assert_eq!(store.read(), before);
    }

    #[test]
    fn test_import_tolerates_malformed_elements() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let before = store.len();

        let added = import_document(&store, r#"[{"foo": 1}, 42]"#).unwrap();

        assert_eq!(added, 2);
        assert_eq!(store.len(), before + 2);
        let quotes = store.read();
        assert!(quotes[before].text.is_empty());
    }

    #[test]
    fn test_import_accepts_author_variant() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());

        import_document(&store, r#"[{"text":"old style","author":"someone"}]"#).unwrap();

        let quotes = store.read();
        assert!(quotes
            .iter()
            .any(|q| q.text == "old style" && q.category == "someone"));
    }
}
