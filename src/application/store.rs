//! Owned quote store.
//!
//! The single holder of the in-memory collection and its backing storage.
//! Editor, importer and sync engine all go through `read`/`replace`/`mutate`,
//! so a reconciliation and a local edit can never interleave into a lost
//! update. Every mutation persists the full collection before the lock is
//! released.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{Quote, Result, SyncState};
use crate::infrastructure::LocalStorage;

/// Seed collection used when the durable slot has never been written.
const DEFAULT_QUOTES: &[(&str, &str)] = &[
    ("The best way to predict the future is to invent it.", "innovation"),
    ("Simplicity is the ultimate sophistication.", "design"),
    ("Well begun is half done.", "wisdom"),
    ("Talk is cheap. Show me the code.", "programming"),
    ("What we think, we become.", "mindfulness"),
];

struct Inner {
    storage: LocalStorage,
    quotes: Vec<Quote>,
}

/// Mutex-guarded collection backed by durable storage. One lock covers both
/// the collection and its persistence, so the two can never diverge between
/// callers.
pub struct QuoteStore {
    inner: Mutex<Inner>,
}

impl QuoteStore {
    /// Load the persisted collection, seeding defaults when storage is empty.
    ///
    /// # Errors
    /// Returns error if the storage slot cannot be read or seeded.
    pub fn open(storage: LocalStorage) -> Result<Self> {
        let quotes = match storage.load_quotes()? {
            Some(quotes) => quotes,
            None => {
                let seeded = seed_quotes();
                storage.save_quotes(&seeded)?;
                tracing::info!(count = seeded.len(), "Seeded default quote collection");
                seeded
            }
        };

        Ok(Self {
            inner: Mutex::new(Inner { storage, quotes }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current collection.
    #[must_use]
    pub fn read(&self) -> Vec<Quote> {
        self.lock().quotes.clone()
    }

    /// Number of quotes in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().quotes.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().quotes.is_empty()
    }

    /// Replace the whole collection and persist it.
    ///
    /// # Errors
    /// Returns error if persistence fails; the in-memory collection is left
    /// unchanged in that case.
    pub fn replace(&self, quotes: Vec<Quote>) -> Result<()> {
        let mut guard = self.lock();
        guard.storage.save_quotes(&quotes)?;
        guard.quotes = quotes;

        Ok(())
    }

    /// Apply a mutation atomically: the closure runs on a working copy under
    /// the lock, the result is persisted, and only then does the in-memory
    /// collection advance. A failed save leaves both unchanged.
    ///
    /// # Errors
    /// Returns error if persistence fails.
    pub fn mutate<T>(&self, f: impl FnOnce(&mut Vec<Quote>) -> T) -> Result<T> {
        let mut guard = self.lock();
        let mut next = guard.quotes.clone();
        let out = f(&mut next);

        guard.storage.save_quotes(&next)?;
        guard.quotes = next;

        Ok(out)
    }

    /// Last-used category filter from the durable slot.
    pub fn last_filter(&self) -> Result<Option<String>> {
        self.lock().storage.load_last_filter()
    }

    /// Persist the last-used category filter.
    pub fn set_last_filter(&self, category: &str) -> Result<()> {
        self.lock().storage.save_last_filter(category)
    }

    /// Persisted sync engine state.
    pub fn sync_state(&self) -> Result<SyncState> {
        self.lock().storage.load_sync_state()
    }

    /// Persist the sync engine state.
    pub fn save_sync_state(&self, state: &SyncState) -> Result<()> {
        self.lock().storage.save_sync_state(state)
    }

    /// Size of the backing database file in bytes.
    pub fn storage_size(&self) -> Result<u64> {
        self.lock().storage.storage_size()
    }
}

/// Build the default seed collection.
fn seed_quotes() -> Vec<Quote> {
    DEFAULT_QUOTES
        .iter()
        .map(|(text, category)| Quote::new(*text, *category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store(dir: &std::path::Path) -> QuoteStore {
        let storage = LocalStorage::open(&dir.join("library.db")).unwrap();
        QuoteStore::open(storage).unwrap()
    }

    #[test]
    fn test_open_seeds_empty_storage() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());

        assert_eq!(store.len(), DEFAULT_QUOTES.len());
    }

    #[test]
    fn test_open_does_not_reseed() {
        let dir = tempdir().unwrap();

        {
            let store = open_store(dir.path());
            store.replace(vec![Quote::new("only one", "custom")]).unwrap();
        }

        let store = open_store(dir.path());
        assert_eq!(store.len(), 1);
        assert_eq!(store.read()[0].text, "only one");
    }

    #[test]
    fn test_mutate_persists() {
        let dir = tempdir().unwrap();

        {
            let store = open_store(dir.path());
            store
                .mutate(|quotes| quotes.push(Quote::new("added", "test")))
                .unwrap();
        }

        let store = open_store(dir.path());
        assert!(store.read().iter().any(|q| q.text == "added"));
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        let dir = tempdir().unwrap();
        let store = std::sync::Arc::new(open_store(dir.path()));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .mutate(|quotes| quotes.push(Quote::new(format!("t{i}"), "thread")))
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), DEFAULT_QUOTES.len() + 4);
    }
}
