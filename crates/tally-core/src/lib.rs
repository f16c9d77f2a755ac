//! Tally Core Library
//!
//! Bank statement categorization for the Tally tool:
//! - CSV statement import (date, narration, withdrawal and deposit columns)
//! - Keyword categorization against a user-editable category store
//! - Per-category totals for the debit and credit views
//! - Session state tying the store to the loaded statement and learning
//!   keywords from the user's category edits

pub mod categories;
pub mod categorize;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod reports;
pub mod session;

pub use categories::{Category, CategoryMap, CategoryStore};
pub use categorize::{categorize, match_category};
pub use config::Config;
pub use error::{Error, Result};
pub use import::{load_statement, load_transactions, ImportOptions};
pub use models::{
    AmountColumn, CategoryEdit, CategoryTotal, EditOutcome, Statement, StatementView, Summary,
    Transaction, UNCATEGORIZED,
};
pub use reports::{summarize, summary, total};
pub use session::Session;
