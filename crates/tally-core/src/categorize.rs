//! Keyword categorization
//!
//! A narration matches a keyword only on exact equality after trimming and
//! lowercasing both sides. Categories are tried in stored order and the first
//! match wins. "Uncategorized" is never matched against.

use tracing::debug;

use crate::categories::CategoryMap;
use crate::models::{Transaction, UNCATEGORIZED};

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Find the category whose keywords contain `narration`
pub fn match_category<'a>(narration: &str, categories: &'a CategoryMap) -> Option<&'a str> {
    let narration = fold(narration);
    categories
        .iter()
        .filter(|c| c.name != UNCATEGORIZED && !c.keywords.is_empty())
        .find(|c| c.keywords.iter().any(|k| fold(k) == narration))
        .map(|c| c.name.as_str())
}

/// Assign a category to every "Uncategorized" row.
///
/// Rows that already carry another category (for example from a manual edit)
/// are left as they are. Returns the number of rows newly categorized.
pub fn categorize(transactions: &mut [Transaction], categories: &CategoryMap) -> usize {
    let mut matched = 0;

    for txn in transactions.iter_mut().filter(|t| t.is_uncategorized()) {
        if let Some(name) = match_category(&txn.narration, categories) {
            txn.category = name.to_string();
            matched += 1;
        }
    }

    debug!(
        "Categorized {} of {} transactions",
        matched,
        transactions.len()
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(narration: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
            narration,
            100.0,
            0.0,
        )
    }

    /// Build a map from (category, keyword) pairs; an empty keyword adds just the category
    fn categories(entries: &[(&str, &str)]) -> CategoryMap {
        let mut map = CategoryMap::default();
        for &(name, keyword) in entries {
            map.insert_category(name);
            map.insert_keyword(name, keyword);
        }
        map
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let map = categories(&[("Shopping", "Amazon")]);
        assert_eq!(match_category("  amazon  ", &map), Some("Shopping"));
        assert_eq!(match_category("AMAZON", &map), Some("Shopping"));
    }

    #[test]
    fn test_exact_match_only() {
        let map = categories(&[("Shopping", "Amazon")]);
        assert_eq!(match_category("AMAZON PAY INDIA", &map), None);
        assert_eq!(match_category("amaz", &map), None);
    }

    #[test]
    fn test_first_category_wins() {
        let map = categories(&[("Food", "SWIGGY"), ("Delivery", "swiggy")]);
        let mut rows = vec![txn("Swiggy")];
        categorize(&mut rows, &map);
        assert_eq!(rows[0].category, "Food");
    }

    #[test]
    fn test_uncategorized_keywords_are_ignored() {
        let mut map = CategoryMap::default();
        map.insert_keyword(UNCATEGORIZED, "ATM WDL");
        map.insert_category("Cash");
        map.insert_keyword("Cash", "ATM WDL");

        assert_eq!(match_category("ATM WDL", &map), Some("Cash"));

        let only_uncategorized = {
            let mut m = CategoryMap::default();
            m.insert_keyword(UNCATEGORIZED, "ATM WDL");
            m
        };
        assert_eq!(match_category("ATM WDL", &only_uncategorized), None);
    }

    #[test]
    fn test_unmatched_rows_stay_uncategorized() {
        let map = categories(&[("Entertainment", "netflix")]);
        let mut rows = vec![txn("Netflix"), txn("UPI-RANDOM-SHOP")];

        let matched = categorize(&mut rows, &map);

        assert_eq!(matched, 1);
        assert_eq!(rows[0].category, "Entertainment");
        assert_eq!(rows[1].category, UNCATEGORIZED);
        assert!(rows
            .iter()
            .all(|r| r.category == UNCATEGORIZED || map.contains(&r.category)));
    }

    #[test]
    fn test_manual_categories_survive_rerun() {
        let map = categories(&[("Entertainment", "netflix"), ("Gifts", "")]);
        let mut rows = vec![txn("Netflix"), txn("FLOWERS")];
        categorize(&mut rows, &map);

        rows[0].category = "Gifts".to_string();
        rows[1].category = "Gifts".to_string();
        categorize(&mut rows, &map);

        assert_eq!(rows[0].category, "Gifts");
        assert_eq!(rows[1].category, "Gifts");
    }

    #[test]
    fn test_empty_store() {
        let map = CategoryMap::default();
        let mut rows = vec![txn("anything")];
        assert_eq!(categorize(&mut rows, &map), 0);
        assert!(rows[0].is_uncategorized());
    }
}
