//! Domain models for Tally

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reserved default category. Always present in the store, never matched against.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A normalized statement row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub narration: String,
    pub withdrawal_amount: f64,
    pub deposit_amount: f64,
    pub category: String,
}

impl Transaction {
    /// Create an uncategorized transaction
    pub fn new(
        date: NaiveDate,
        narration: impl Into<String>,
        withdrawal_amount: f64,
        deposit_amount: f64,
    ) -> Self {
        Self {
            date,
            narration: narration.into(),
            withdrawal_amount,
            deposit_amount,
            category: UNCATEGORIZED.to_string(),
        }
    }

    pub fn amount(&self, column: AmountColumn) -> f64 {
        match column {
            AmountColumn::Withdrawal => self.withdrawal_amount,
            AmountColumn::Deposit => self.deposit_amount,
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category == UNCATEGORIZED
    }
}

/// Which amount column a summary sums over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountColumn {
    Withdrawal,
    Deposit,
}

impl AmountColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Withdrawal => "withdrawal",
            Self::Deposit => "deposit",
        }
    }
}

impl std::fmt::Display for AmountColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One half of a loaded statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementView {
    /// Rows with a withdrawal amount (expenses)
    Debits,
    /// Rows with a deposit amount (payments received)
    Credits,
}

impl StatementView {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debits => "debits",
            Self::Credits => "credits",
        }
    }

    /// The amount column summarized for this view
    pub fn amount_column(&self) -> AmountColumn {
        match self {
            Self::Debits => AmountColumn::Withdrawal,
            Self::Credits => AmountColumn::Deposit,
        }
    }
}

impl std::str::FromStr for StatementView {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debits" | "debit" | "expenses" | "withdrawals" => Ok(Self::Debits),
            "credits" | "credit" | "payments" | "deposits" => Ok(Self::Credits),
            _ => Err(format!("Unknown view: {} (use debits or credits)", s)),
        }
    }
}

impl std::fmt::Display for StatementView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A loaded statement split into its debit and credit views.
///
/// Each view owns its own copy of the rows, so a row carrying both a
/// withdrawal and a deposit shows up in both and is edited per view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub debits: Vec<Transaction>,
    pub credits: Vec<Transaction>,
}

impl Statement {
    /// Split categorized rows into debit (withdrawal > 0) and credit (deposit > 0) views
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let debits = transactions
            .iter()
            .filter(|t| t.withdrawal_amount > 0.0)
            .cloned()
            .collect();
        let credits = transactions
            .into_iter()
            .filter(|t| t.deposit_amount > 0.0)
            .collect();
        Self { debits, credits }
    }

    pub fn view(&self, view: StatementView) -> &[Transaction] {
        match view {
            StatementView::Debits => &self.debits,
            StatementView::Credits => &self.credits,
        }
    }

    pub fn view_mut(&mut self, view: StatementView) -> &mut Vec<Transaction> {
        match view {
            StatementView::Debits => &mut self.debits,
            StatementView::Credits => &mut self.credits,
        }
    }
}

/// Per-category total within one view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    /// Share of the view total, 0-100
    pub percentage: f64,
    pub transaction_count: i64,
}

/// Summary of one statement view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub view: StatementView,
    pub total: f64,
    pub categories: Vec<CategoryTotal>,
}

/// A user's change to one row's category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEdit {
    /// Index of the row within its view
    pub row: usize,
    pub category: String,
    /// Narration as shown to the user; learned as a keyword for `category`
    pub narration: String,
}

/// Result of applying a batch of edits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    /// Rows whose category changed
    pub changed: usize,
    /// Edits that taught the store a new keyword
    pub keywords_learned: usize,
}
