//! Tally CLI - Bank statement categorizer
//!
//! Usage:
//!   tally summary statement.csv                 Totals and per-category breakdowns
//!   tally transactions statement.csv            List debit rows with categories
//!   tally categories add Food                   Create a category
//!   tally recategorize statement.csv --set 3=Food   Fix a row and learn its narration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.categories.as_deref())?;
    let mut session = commands::open_session(&config)?;

    match cli.command {
        Commands::Summary { file, json } => {
            commands::cmd_summary(&mut session, &config, &file, json)
        }
        Commands::Transactions { file, view } => {
            let view = commands::parse_view(&view)?;
            commands::cmd_transactions(&mut session, &config, &file, view)
        }
        Commands::Categories { action } => match action {
            None | Some(CategoriesAction::List) => commands::cmd_categories_list(&session),
            Some(CategoriesAction::Add { name }) => {
                commands::cmd_categories_add(&mut session, &name)
            }
            Some(CategoriesAction::Keyword { category, keyword }) => {
                commands::cmd_categories_keyword(&mut session, &category, &keyword)
            }
            Some(CategoriesAction::Test { narration }) => {
                commands::cmd_categories_test(&session, &narration)
            }
        },
        Commands::Recategorize { file, view, set } => {
            let view = commands::parse_view(&view)?;
            commands::cmd_recategorize(&mut session, &config, &file, view, &set)
        }
    }
}
