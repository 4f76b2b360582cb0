//! Synchronization engine for the quote collection.
//!
//! Fetches the remote collection and reconciles it into the local store
//! under an additive-union conflict policy, persisting the outcome and the
//! sync state after every run.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{Quote, Result};
use crate::infrastructure::RemoteEndpoint;

use super::store::QuoteStore;

/// Result of a single sync run.
#[derive(Debug, Clone, Copy)]
pub struct SyncOutcome {
    /// Quotes adopted from the server.
    pub added: usize,
    /// Collection size after reconciliation.
    pub total: usize,
}

impl SyncOutcome {
    /// Whether the run changed the local collection.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.added > 0
    }
}

/// Service driving sync runs against the remote endpoint.
pub struct SyncService {
    store: Arc<QuoteStore>,
    remote: RemoteEndpoint,
    push_before_fetch: bool,
}

impl SyncService {
    /// Create a new sync service.
    #[must_use]
    pub const fn new(store: Arc<QuoteStore>, remote: RemoteEndpoint, push_before_fetch: bool) -> Self {
        Self {
            store,
            remote,
            push_before_fetch,
        }
    }

    /// Perform one full sync run: optional push, fetch, reconcile, persist.
    ///
    /// The push is fire-and-forget: its failure is logged and never affects
    /// reconciliation. A failed fetch is recorded in the persisted sync
    /// state before the error is returned.
    ///
    /// # Errors
    /// Returns error if the fetch fails or the reconciled collection cannot
    /// be persisted.
    pub async fn sync_once(&self) -> Result<SyncOutcome> {
        tracing::info!("Starting sync");

        if self.push_before_fetch {
            let local = self.store.read();
            if let Err(e) = self.remote.push_quotes(&local).await {
                tracing::warn!(error = %e, "Push to server failed, continuing with fetch");
            }
        }

        let remote_quotes = match self.remote.fetch_quotes().await {
            Ok(quotes) => quotes,
            Err(e) => {
                let state = self.store.sync_state()?.with_error(e.to_string());
                self.store.save_sync_state(&state)?;
                return Err(e);
            }
        };

        let added = self
            .store
            .mutate(|quotes| reconcile(quotes, &remote_quotes))?;
        let total = self.store.len();

        let state = self.store.sync_state()?.completed(added, total);
        self.store.save_sync_state(&state)?;

        tracing::info!(added, total, "Sync completed");

        Ok(SyncOutcome { added, total })
    }
}

/// Merge the fetched collection into the local one.
///
/// Additive union keyed by normalized text: remote quotes whose normalized
/// text is absent locally are appended in order; local entries are never
/// removed or overwritten, and exact-key collisions are not updated even
/// when other fields differ. Returns the number of adopted quotes.
pub fn reconcile(local: &mut Vec<Quote>, remote: &[Quote]) -> usize {
    let mut seen: HashSet<String> = local.iter().map(Quote::normalized_text).collect();
    let mut added = 0;

    for quote in remote {
        if seen.insert(quote.normalized_text()) {
            local.push(quote.clone());
            added += 1;
        }
    }

    added
}
