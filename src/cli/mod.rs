//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;

/// quotedeck - Manage, display and sync a local quote collection.
#[derive(Parser, Debug)]
#[command(name = "quotedeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format: plain, json, or table.
    #[arg(short, long, default_value = "plain")]
    pub format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a random quote, optionally filtered by category.
    Show {
        /// Category filter. Omitted: the last-used filter is re-applied.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show the quote last viewed in this session.
    Last,

    /// Add a new quote to the collection.
    Add {
        /// The quotation text.
        text: String,

        /// Category tag for the quote.
        #[arg(short, long)]
        category: String,
    },

    /// Remove a quote by its position in the listing.
    Remove {
        /// 1-based position as shown by `list`.
        position: usize,
    },

    /// List quotes, optionally filtered by category.
    List {
        /// Category filter. Omitted: the last-used filter is re-applied.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List the categories derived from the collection.
    Categories,

    /// Export the collection as a JSON document.
    Export {
        /// Output file path (stdout if not specified).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import quotes from a JSON document (appends, never replaces).
    Import {
        /// Path of the JSON file to import.
        file: String,
    },

    /// Sync once with the remote endpoint.
    Sync,

    /// Run the periodic sync daemon until interrupted.
    Daemon {
        /// Override the configured sync interval in seconds.
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show statistics about the collection.
    Stats,

    /// Show config and data file paths being used.
    Paths,
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}
