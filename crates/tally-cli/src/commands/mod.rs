//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config, session, statement loading)
//! - `statement` - Statement commands (summary, transactions, recategorize)
//! - `categories` - Category store commands (list, add, keyword, test)

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

pub mod categories;
pub mod core;
pub mod statement;

// Re-export command functions for main.rs
pub use categories::*;
pub use core::*;
pub use statement::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn get_thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .expect("',' is a single-byte separator")
            .precision(Precision::Decimals(2))
    })
}

/// Format an amount with thousands separators and the currency label, e.g. `1,234.50 INR`
pub fn format_amount(amount: f64, currency: &str) -> String {
    let mut formatted = if amount == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "0.00".to_owned()
    } else {
        get_thousands_separator_formatter().fmt_string(amount.abs())
    };

    // numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3"
    match formatted.find('.') {
        Some(dot) => {
            for _ in formatted.len() - dot - 1..2 {
                formatted.push('0');
            }
        }
        None => formatted.push_str(".00"),
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{} {}", sign, formatted, currency)
}
