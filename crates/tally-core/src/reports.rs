//! Per-category totals for a statement view

use std::collections::BTreeMap;

use crate::models::{AmountColumn, CategoryTotal, StatementView, Summary, Transaction};

/// Sum of one amount column across all rows
pub fn total(transactions: &[Transaction], column: AmountColumn) -> f64 {
    transactions.iter().map(|t| t.amount(column)).sum()
}

/// Group rows by category and sum `column`, largest total first.
///
/// Groups are formed in category-name order and the sort is stable, so
/// categories with equal totals stay in name order.
pub fn summarize(transactions: &[Transaction], column: AmountColumn) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<&str, (f64, i64)> = BTreeMap::new();
    for txn in transactions {
        let entry = groups.entry(txn.category.as_str()).or_insert((0.0, 0));
        entry.0 += txn.amount(column);
        entry.1 += 1;
    }

    let grand_total: f64 = groups.values().map(|(amount, _)| amount).sum();

    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (amount, count))| CategoryTotal {
            category: category.to_string(),
            total: amount,
            percentage: if grand_total > 0.0 {
                amount / grand_total * 100.0
            } else {
                0.0
            },
            transaction_count: count,
        })
        .collect();

    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// Total and per-category breakdown for one view of a statement
pub fn summary(transactions: &[Transaction], view: StatementView) -> Summary {
    let column = view.amount_column();
    Summary {
        view,
        total: total(transactions, column),
        categories: summarize(transactions, column),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(category: &str, withdrawal: f64, deposit: f64) -> Transaction {
        let mut t = Transaction::new(
            NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
            "x",
            withdrawal,
            deposit,
        );
        t.category = category.to_string();
        t
    }

    fn pairs(totals: &[CategoryTotal]) -> Vec<(&str, f64)> {
        totals
            .iter()
            .map(|t| (t.category.as_str(), t.total))
            .collect()
    }

    #[test]
    fn test_summarize_sorted_descending() {
        let rows = vec![
            txn("Food", 100.0, 0.0),
            txn("Transport", 30.0, 0.0),
            txn("Food", 50.0, 0.0),
        ];
        let totals = summarize(&rows, AmountColumn::Withdrawal);
        assert_eq!(pairs(&totals), vec![("Food", 150.0), ("Transport", 30.0)]);
        assert_eq!(totals[0].transaction_count, 2);
        assert_eq!(totals[1].transaction_count, 1);
    }

    #[test]
    fn test_percentages() {
        let rows = vec![txn("Rent", 750.0, 0.0), txn("Food", 250.0, 0.0)];
        let totals = summarize(&rows, AmountColumn::Withdrawal);
        assert!((totals[0].percentage - 75.0).abs() < 1e-9);
        assert!((totals[1].percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_name_order() {
        let rows = vec![
            txn("Zoo", 10.0, 0.0),
            txn("Apple", 10.0, 0.0),
            txn("Mango", 20.0, 0.0),
        ];
        let totals = summarize(&rows, AmountColumn::Withdrawal);
        assert_eq!(
            pairs(&totals),
            vec![("Mango", 20.0), ("Apple", 10.0), ("Zoo", 10.0)]
        );
    }

    #[test]
    fn test_column_selection() {
        let rows = vec![txn("Salary", 0.0, 5000.0), txn("Refund", 0.0, 200.0)];
        let deposits = summarize(&rows, AmountColumn::Deposit);
        assert_eq!(pairs(&deposits), vec![("Salary", 5000.0), ("Refund", 200.0)]);

        let withdrawals = summarize(&rows, AmountColumn::Withdrawal);
        assert!(withdrawals.iter().all(|t| t.total == 0.0 && t.percentage == 0.0));
    }

    #[test]
    fn test_empty() {
        assert!(summarize(&[], AmountColumn::Withdrawal).is_empty());
        assert_eq!(total(&[], AmountColumn::Deposit), 0.0);
    }

    #[test]
    fn test_summary_uses_view_column() {
        let rows = vec![txn("Food", 40.0, 0.0), txn("Food", 60.0, 0.0)];
        let s = summary(&rows, StatementView::Debits);
        assert_eq!(s.view, StatementView::Debits);
        assert_eq!(s.total, 100.0);
        assert_eq!(pairs(&s.categories), vec![("Food", 100.0)]);
    }
}
