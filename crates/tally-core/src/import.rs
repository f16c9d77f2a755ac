//! CSV import for bank statement exports
//!
//! Statements carry a date column (DD/MM/YY), a narration column and separate
//! withdrawal/deposit amount columns. Extra columns are ignored.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use tracing::debug;

use crate::categorize::categorize;
use crate::categories::CategoryMap;
use crate::error::{Error, Result};
use crate::models::{Statement, Transaction};

/// Column names and date format of the statement CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub date_format: String,
    pub date_column: String,
    pub narration_column: String,
    pub withdrawal_column: String,
    pub deposit_column: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            date_format: "%d/%m/%y".to_string(),
            date_column: "Date".to_string(),
            narration_column: "Narration".to_string(),
            withdrawal_column: "Withdrawal Amt.".to_string(),
            deposit_column: "Deposit Amt.".to_string(),
        }
    }
}

/// Positions of the required columns in the header row
struct ColumnIndexes {
    date: usize,
    narration: usize,
    withdrawal: usize,
    deposit: usize,
}

impl ColumnIndexes {
    fn resolve(headers: &StringRecord, options: &ImportOptions) -> Result<Self> {
        // Header names are compared after trimming surrounding whitespace
        let names: Vec<&str> = headers.iter().map(str::trim).collect();
        let find = |name: &str| names.iter().position(|h| *h == name);

        let date = find(options.date_column.as_str());
        let narration = find(options.narration_column.as_str());
        let withdrawal = find(options.withdrawal_column.as_str());
        let deposit = find(options.deposit_column.as_str());

        match (date, narration, withdrawal, deposit) {
            (Some(date), Some(narration), Some(withdrawal), Some(deposit)) => Ok(Self {
                date,
                narration,
                withdrawal,
                deposit,
            }),
            _ => {
                let missing: Vec<&str> = [
                    (date, &options.date_column),
                    (narration, &options.narration_column),
                    (withdrawal, &options.withdrawal_column),
                    (deposit, &options.deposit_column),
                ]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, name)| name.as_str())
                .collect();
                Err(Error::Parse(format!(
                    "Missing required column(s): {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// Parse statement CSV into uncategorized transactions.
///
/// Fails on the first malformed row; no partial table is returned.
pub fn load_transactions<R: Read>(reader: R, options: &ImportOptions) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnIndexes::resolve(&headers, options)?;

    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date = parse_date(field(columns.date), &options.date_format).map_err(|e| {
            Error::Parse(format!("line {}, column '{}': {}", line, options.date_column, e))
        })?;

        let withdrawal_amount = parse_amount(field(columns.withdrawal)).map_err(|e| {
            Error::Parse(format!(
                "line {}, column '{}': {}",
                line, options.withdrawal_column, e
            ))
        })?;

        let deposit_amount = parse_amount(field(columns.deposit)).map_err(|e| {
            Error::Parse(format!(
                "line {}, column '{}': {}",
                line, options.deposit_column, e
            ))
        })?;

        transactions.push(Transaction::new(
            date,
            field(columns.narration),
            withdrawal_amount,
            deposit_amount,
        ));
    }

    debug!("Parsed {} statement rows", transactions.len());
    Ok(transactions)
}

/// Parse, categorize and split a statement into its debit and credit views
pub fn load_statement<R: Read>(
    reader: R,
    options: &ImportOptions,
    categories: &CategoryMap,
) -> Result<Statement> {
    let mut transactions = load_transactions(reader, options)?;
    categorize(&mut transactions, categories);
    let statement = Statement::from_transactions(transactions);
    debug!(
        "Statement has {} debits and {} credits",
        statement.debits.len(),
        statement.credits.len()
    );
    Ok(statement)
}

/// Parse a date with the statement's fixed format
fn parse_date(s: &str, format: &str) -> std::result::Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, format)
        .map_err(|_| format!("Unable to parse date '{}' (expected {})", s, format))
}

/// Parse an amount string, handling thousands separators and blank/"nan" cells
fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let cleaned = s.trim().replace(',', "");

    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
        return Ok(0.0);
    }

    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| format!("Unable to parse amount '{}'", s))?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("Amount must be a non-negative number, got '{}'", s));
    }

    Ok(amount)
}
