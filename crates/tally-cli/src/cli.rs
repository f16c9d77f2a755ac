//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Categorize bank statement spending
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Categorize bank statement transactions and summarize spending", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.local/share/tally/config/tally.toml, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Category store file (overrides `categories_file` from the config)
    #[arg(long, global = true)]
    pub categories: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show outflow and inflow totals with per-category breakdowns
    Summary {
        /// Statement CSV file
        file: PathBuf,

        /// Print the summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the rows of one statement view with their categories
    Transactions {
        /// Statement CSV file
        file: PathBuf,

        /// Statement view: debits or credits
        #[arg(long, default_value = "debits")]
        view: String,
    },

    /// Manage categories and keywords (list, add, keyword, test)
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Change row categories and learn their narrations as keywords
    Recategorize {
        /// Statement CSV file
        file: PathBuf,

        /// Statement view the row numbers refer to: debits or credits
        #[arg(long, default_value = "debits")]
        view: String,

        /// ROW=CATEGORY, using row numbers from `tally transactions` (repeatable)
        #[arg(long = "set", value_name = "ROW=CATEGORY", required = true)]
        set: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories and their keywords
    List,

    /// Add a new category
    Add {
        /// Category name
        name: String,
    },

    /// Add a keyword to a category
    Keyword {
        /// Category name
        category: String,
        /// Narration text that should map to the category
        keyword: String,
    },

    /// Show which category a narration maps to
    Test {
        /// Narration text to look up
        narration: String,
    },
}
