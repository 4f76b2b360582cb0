//! quotedeck - Manage, display and sync a local quote collection.
//!
//! Quotes live in a local `SQLite`-backed store and are reconciled against a
//! remote endpoint, either on demand or from a periodic daemon. Supports
//! category filtering, JSON import/export, and multiple output formats.

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    daemon, derive_categories, editor, filter_quotes, format_categories, format_notice,
    format_quote, format_quotes_json, format_quotes_table, format_stats, pick_random, resolve_filter,
    transfer, Notice, OutputFormat, QuoteStore, SyncService, NO_QUOTES_MESSAGE,
};
use cli::{Cli, Commands};
use domain::{AppConfig, AppError, LibraryStats};
use infrastructure::{ensure_config_exists, load_config, LocalStorage, RemoteEndpoint, SessionStore};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let format = cli
        .output_format()
        .map_err(|e| AppError::Config { message: e })?;

    match cli.command {
        Commands::Show { category } => {
            cmd_show(category.as_deref(), format)?;
        }
        Commands::Last => {
            cmd_last(format)?;
        }
        Commands::Add { text, category } => {
            cmd_add(&text, &category)?;
        }
        Commands::Remove { position } => {
            cmd_remove(position)?;
        }
        Commands::List { category } => {
            cmd_list(category.as_deref(), format)?;
        }
        Commands::Categories => {
            cmd_categories()?;
        }
        Commands::Export { output } => {
            cmd_export(output.as_deref())?;
        }
        Commands::Import { file } => {
            cmd_import(&file)?;
        }
        Commands::Sync => {
            cmd_sync()?;
        }
        Commands::Daemon { interval } => {
            cmd_daemon(interval)?;
        }
        Commands::Stats => {
            cmd_stats()?;
        }
        Commands::Paths => {
            cmd_paths()?;
        }
    }

    Ok(())
}

/// Open the quote store configured for this invocation.
fn open_store(config: &AppConfig) -> domain::Result<QuoteStore> {
    let storage = LocalStorage::open(&config.library_db_path())?;
    QuoteStore::open(storage)
}

/// Build the async runtime used by the sync commands.
fn build_runtime() -> domain::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::io("Failed to build async runtime", e))
}

/// Show a random quote command.
fn cmd_show(category: Option<&str>, format: OutputFormat) -> domain::Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    let quotes = store.read();
    let categories = derive_categories(&quotes);
    let filter = resolve_filter(category, store.last_filter()?.as_deref(), &categories);

    // An explicit choice becomes the new persisted filter
    if category.is_some() {
        store.set_last_filter(&filter)?;
    }

    let pool = filter_quotes(&quotes, &filter);

    match pick_random(&pool) {
        None => println!("{NO_QUOTES_MESSAGE}"),
        Some(quote) => {
            print_quotes(std::slice::from_ref(&quote), format)?;
            SessionStore::default_location().save_last_viewed(quote)?;
        }
    }

    Ok(())
}

/// Show the last-viewed quote of this session.
fn cmd_last(format: OutputFormat) -> domain::Result<()> {
    let session = SessionStore::default_location();

    match session.load_last_viewed()? {
        Some(quote) => print_quotes(&[&quote], format)?,
        None => println!(
            "{}",
            format_notice(Notice::Info, "No quote viewed yet this session.")
        ),
    }

    Ok(())
}

/// Add a quote command.
fn cmd_add(text: &str, category: &str) -> domain::Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    let quote = editor::submit(&store, text, category)?;

    println!(
        "{}",
        format_notice(
            Notice::Success,
            &format!("Quote added to category \"{}\".", quote.category)
        )
    );

    Ok(())
}

/// Remove a quote by listing position.
fn cmd_remove(position: usize) -> domain::Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    let quote = editor::remove(&store, position)?;

    println!(
        "{}",
        format_notice(Notice::Success, &format!("Removed {quote}"))
    );

    Ok(())
}

/// List quotes command.
fn cmd_list(category: Option<&str>, format: OutputFormat) -> domain::Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    if store.is_empty() {
        println!("{NO_QUOTES_MESSAGE}");
        return Ok(());
    }

    let quotes = store.read();
    let categories = derive_categories(&quotes);
    let filter = resolve_filter(category, store.last_filter()?.as_deref(), &categories);

    if category.is_some() {
        store.set_last_filter(&filter)?;
    }

    let pool = filter_quotes(&quotes, &filter);

    if pool.is_empty() {
        println!("{NO_QUOTES_MESSAGE}");
        return Ok(());
    }

    print_quotes(&pool, format)?;

    Ok(())
}

/// List derived categories command.
fn cmd_categories() -> domain::Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    let quotes = store.read();
    let categories = derive_categories(&quotes);
    let active = resolve_filter(None, store.last_filter()?.as_deref(), &categories);

    println!("{}", format_categories(&categories, &active));

    Ok(())
}

/// Export the collection command.
fn cmd_export(output_path: Option<&str>) -> domain::Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    let content = transfer::export_json(&store)?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &content)
                .map_err(|e| AppError::io(format!("Failed to write {path}"), e))?;
            println!(
                "{}",
                format_notice(
                    Notice::Success,
                    &format!("Exported {} quotes to {path}", store.len())
                )
            );
        }
        None => {
            println!("{content}");
        }
    }

    Ok(())
}

/// Import a JSON document command.
fn cmd_import(file: &str) -> domain::Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    let contents = std::fs::read_to_string(file)
        .map_err(|e| AppError::io(format!("Failed to read {file}"), e))?;

    let added = transfer::import_document(&store, &contents)?;

    println!(
        "{}",
        format_notice(
            Notice::Success,
            &format!("Imported {added} quotes ({} total).", store.len())
        )
    );

    Ok(())
}

/// One-shot sync command. Failures surface as a notice, not an exit code:
/// the next run simply tries again.
fn cmd_sync() -> domain::Result<()> {
    let config = load_config()?;
    let store = Arc::new(open_store(&config)?);
    let remote = RemoteEndpoint::new(&config.server)?;
    let service = SyncService::new(store, remote, config.sync.push_before_fetch);

    let runtime = build_runtime()?;

    match runtime.block_on(service.sync_once()) {
        Ok(outcome) if outcome.changed() => println!(
            "{}",
            format_notice(
                Notice::Warning,
                &format!(
                    "Adopted {} new quotes from server ({} total).",
                    outcome.added, outcome.total
                )
            )
        ),
        Ok(_) => println!(
            "{}",
            format_notice(Notice::Info, "Already up to date with server.")
        ),
        Err(e) => println!(
            "{}",
            format_notice(Notice::Error, &format!("Sync failed: {e}"))
        ),
    }

    Ok(())
}

/// Periodic sync daemon command.
fn cmd_daemon(interval: Option<u64>) -> domain::Result<()> {
    ensure_config_exists()?;
    let config = load_config()?;

    if !config.sync.enabled {
        return Err(AppError::Config {
            message: "Periodic sync is disabled in the configuration".into(),
        });
    }

    let store = Arc::new(open_store(&config)?);
    let remote = RemoteEndpoint::new(&config.server)?;
    let service = SyncService::new(store, remote, config.sync.push_before_fetch);

    let period = Duration::from_secs(interval.unwrap_or(config.sync.interval_secs));

    let runtime = build_runtime()?;
    runtime.block_on(async {
        let (handle, shutdown) = daemon::shutdown_channel();

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                handle.shutdown();
            }
        });

        daemon::run(service, period, shutdown).await;
    });

    Ok(())
}

/// Show statistics command.
fn cmd_stats() -> domain::Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    let quotes = store.read();
    let stats = LibraryStats {
        quote_count: quotes.len(),
        // The derived list always carries the synthetic wildcard
        category_count: derive_categories(&quotes).len() - 1,
        last_sync: store.sync_state()?.last_sync,
        storage_bytes: store.storage_size()?,
    };

    println!("{}", format_stats(&stats));

    Ok(())
}

/// Show file paths command.
fn cmd_paths() -> domain::Result<()> {
    let config = load_config()?;
    let session = SessionStore::default_location();

    println!("{}", "📂 quotedeck paths".bold());
    println!();
    println!("  {}  {}", "config:".green(), config.config_file_path().display());
    println!("  {} {}", "library:".blue(), config.library_db_path().display());
    println!("  {} {}", "session:".yellow(), session.path().display());

    Ok(())
}

/// Render a pool of quotes in the requested format.
fn print_quotes(pool: &[&domain::Quote], format: OutputFormat) -> domain::Result<()> {
    let output = match format {
        OutputFormat::Plain => pool
            .iter()
            .map(|q| format_quote(q))
            .collect::<Vec<_>>()
            .join("\n\n"),
        OutputFormat::Json => format_quotes_json(pool).map_err(AppError::json_parse)?,
        OutputFormat::Table => format_quotes_table(pool),
    };

    println!("{output}");
    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
