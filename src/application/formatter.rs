//! Display and selection for quote records.
//!
//! Supports multiple output formats: plain text, JSON, and table view, plus
//! the transient notices surfaced after each operation.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use rand::seq::SliceRandom;

use crate::domain::{LibraryStats, Quote};

/// Message rendered when the pool of quotes is empty.
pub const NO_QUOTES_MESSAGE: &str = "No quotes available.";

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable colored text.
    #[default]
    Plain,
    /// JSON format for programmatic use.
    Json,
    /// Compact table listing.
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(format!("Unknown format: {s}. Use: plain, json, table")),
        }
    }
}

/// Kind of transient notice shown to the user.
#[derive(Debug, Clone, Copy)]
pub enum Notice {
    Success,
    Warning,
    Error,
    Info,
}

/// Format a one-line notice in the style the terminal surfaces them.
#[must_use]
pub fn format_notice(kind: Notice, message: &str) -> String {
    match kind {
        Notice::Success => format!("{} {message}", "✓".green().bold()),
        Notice::Warning => format!("{} {message}", "!".yellow().bold()),
        Notice::Error => format!("{} {message}", "✗".red().bold()),
        Notice::Info => format!("{} {message}", "·".blue().bold()),
    }
}

/// Select a uniformly random quote from the pool. Returns `None` for an
/// empty pool; a one-element pool always yields that element.
#[must_use]
pub fn pick_random<'a>(pool: &[&'a Quote]) -> Option<&'a Quote> {
    pool.choose(&mut rand::thread_rng()).copied()
}

/// Format a single quote for plain display.
#[must_use]
pub fn format_quote(quote: &Quote) -> String {
    let mut out = format!("\u{201c}{}\u{201d}", quote.text.bold());
    out.push_str(&format!("\n    — {}", quote.category.cyan()));

    if let Some(dt) = quote.timestamp {
        out.push_str(&format!(
            "  {}",
            dt.format("(%Y-%m-%d)").to_string().dimmed()
        ));
    }

    out
}

/// Format quotes as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_quotes_json(quotes: &[&Quote]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(quotes)
}

/// Format a table listing of quotes. Positions are 1-based and match the
/// argument `remove` takes.
#[must_use]
pub fn format_quotes_table(quotes: &[&Quote]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Added", "Category", "Quote"]);

    for (i, quote) in quotes.iter().enumerate() {
        let added = quote.timestamp.map_or_else(
            || "-".to_string(),
            |dt| dt.format("%Y-%m-%d").to_string(),
        );

        table.add_row(vec![
            &(i + 1).to_string(),
            &added,
            &truncate(&quote.category, 18),
            &truncate(&quote.text, 50),
        ]);
    }

    table.to_string()
}

/// Format the derived category list for display.
#[must_use]
pub fn format_categories(categories: &[String], active: &str) -> String {
    categories
        .iter()
        .map(|c| {
            if c == active {
                format!("* {}", c.bold())
            } else {
                format!("  {c}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats library statistics for display.
#[must_use]
pub fn format_stats(stats: &LibraryStats) -> String {
    let last_sync = stats.last_sync.map_or_else(
        || "never".to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );

    format!(
        "{}\n  Quotes: {}\n  Categories: {}\n  Last sync: {}\n  Storage: {}",
        "📊 Library".bold(),
        stats.quote_count.to_string().cyan(),
        stats.category_count.to_string().cyan(),
        last_sync.green(),
        format_bytes(stats.storage_bytes).yellow()
    )
}

/// Format bytes as human readable string.
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Truncates a string to max length with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world!", 8), "hello...");
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("plain".parse::<OutputFormat>(), Ok(OutputFormat::Plain)));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!(matches!("table".parse::<OutputFormat>(), Ok(OutputFormat::Table)));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_pick_random_empty_pool() {
        assert!(pick_random(&[]).is_none());
    }

    #[test]
    fn test_pick_random_single_element() {
        let quote = Quote::new("only", "one");
        let pool = vec![&quote];

        for _ in 0..10 {
            let picked = pick_random(&pool).unwrap();
            assert_eq!(picked, &quote);
        }
    }

    #[test]
    fn test_pick_random_returns_member() {
        let quotes: Vec<Quote> = (0..5)
            .map(|i| Quote::new(format!("q{i}"), "cat"))
            .collect();
        let pool: Vec<&Quote> = quotes.iter().collect();

        for _ in 0..20 {
            let picked = pick_random(&pool).unwrap();
            assert!(quotes.iter().any(|q| q == picked));
        }
    }

    #[test]
    fn test_format_quote_contains_fields() {
        colored::control::set_override(false);
        let quote = Quote::new("carpe diem", "latin");
        let out = format_quote(&quote);
        assert!(out.contains("carpe diem"));
        assert!(out.contains("latin"));
    }

    #[test]
    fn test_format_table_positions_are_one_based() {
        let quotes = vec![Quote::new("first", "a"), Quote::new("second", "b")];
        let pool: Vec<&Quote> = quotes.iter().collect();
        let table = format_quotes_table(&pool);
        assert!(table.contains('1'));
        assert!(table.contains("second"));
    }
}
