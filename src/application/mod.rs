//! Application layer - use cases and orchestration.
//!
//! This layer contains the main business logic for managing, displaying
//! and synchronizing the quote collection.

pub mod categories;
pub mod daemon;
pub mod editor;
pub mod formatter;
pub mod store;
pub mod sync_service;
pub mod transfer;

pub use categories::{derive_categories, filter_quotes, resolve_filter, ALL_CATEGORIES};
pub use formatter::{
    format_categories, format_notice, format_quote, format_quotes_json, format_quotes_table,
    format_stats, pick_random, Notice, OutputFormat, NO_QUOTES_MESSAGE,
};
pub use store::QuoteStore;
pub use sync_service::{SyncOutcome, SyncService};
