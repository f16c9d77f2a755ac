//! Integration tests for tally-core
//!
//! These tests exercise the full load → categorize → edit → summarize workflow.

use std::fs;

use chrono::NaiveDate;
use tally_core::{
    load_transactions, CategoryEdit, CategoryStore, Error, ImportOptions, Session, StatementView,
    UNCATEGORIZED,
};
use tempfile::TempDir;

/// A month of statement rows in the bank's export layout, with the extra
/// reference/value-date/balance columns the loader ignores.
fn statement_csv() -> &'static str {
    r#"Date,Narration,Chq./Ref.No.,Value Dt,Withdrawal Amt.,Deposit Amt.,Closing Balance
01/04/23,NEFT-ACME CORP SALARY,N0001,01/04/23,,"85,000.00","1,20,000.00"
02/04/23,Netflix,0000000002,02/04/23,649.00,,"1,19,351.00"
03/04/23,SWIGGY BANGALORE,0000000003,03/04/23,412.50,,"1,18,938.50"
05/04/23,SWIGGY BANGALORE,0000000004,05/04/23,"1,087.50",,"1,17,851.00"
07/04/23,RENT APRIL,0000000005,07/04/23,"25,000.00",,"92,851.00"
09/04/23,REFUND AMAZON,0000000006,09/04/23,,1299.00,"94,150.00"
12/04/23,UBER TRIP,0000000007,12/04/23,230.00,nan,"93,920.00""#
}

fn open_session(dir: &TempDir) -> Session {
    let store = CategoryStore::load(dir.path().join("categories.json")).expect("load store");
    Session::open(store)
}

#[test]
fn test_end_to_end_single_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("categories.json");
    fs::write(&path, r#"{"Uncategorized": [], "Entertainment": ["netflix"]}"#).unwrap();

    let mut session = Session::open(CategoryStore::load(&path).unwrap());
    let csv = "Date,Narration,Withdrawal Amt.,Deposit Amt.\n01/04/23,Netflix,500.00,\n";
    session
        .load_statement(csv.as_bytes(), &ImportOptions::default())
        .unwrap();

    let statement = session.statement().unwrap();
    assert_eq!(statement.debits.len(), 1);
    assert!(statement.credits.is_empty());

    let row = &statement.debits[0];
    assert_eq!(row.category, "Entertainment");
    assert_eq!(row.withdrawal_amount, 500.0);
    assert_eq!(row.deposit_amount, 0.0);
    assert_eq!(row.date, NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
}

#[test]
fn test_full_workflow() {
    let dir = TempDir::new().unwrap();
    let mut session = open_session(&dir);
    let options = ImportOptions::default();

    session.add_category("Entertainment").unwrap();
    session.add_category("Food").unwrap();
    session.add_category("Housing").unwrap();
    session.add_category("Income").unwrap();
    session.add_keyword("Entertainment", "NETFLIX").unwrap();

    session
        .load_statement(statement_csv().as_bytes(), &options)
        .unwrap();

    {
        let statement = session.statement().unwrap();
        assert_eq!(statement.debits.len(), 5);
        assert_eq!(statement.credits.len(), 2);
        assert_eq!(statement.debits[0].category, "Entertainment");
        assert!(statement.debits[1..].iter().all(|t| t.category == UNCATEGORIZED));
    }

    // User corrects a few rows in the debit view
    let edits = vec![
        CategoryEdit {
            row: 1,
            category: "Food".to_string(),
            narration: "SWIGGY BANGALORE".to_string(),
        },
        CategoryEdit {
            row: 3,
            category: "Housing".to_string(),
            narration: "RENT APRIL".to_string(),
        },
    ];
    let outcome = session.apply_edits(StatementView::Debits, &edits).unwrap();
    assert_eq!(outcome.changed, 2);
    assert_eq!(outcome.keywords_learned, 2);

    let debits = session.summary(StatementView::Debits).unwrap();
    assert_eq!(debits.total, 649.0 + 412.5 + 1087.5 + 25000.0 + 230.0);
    let order: Vec<&str> = debits
        .categories
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    // The second SWIGGY row was not edited, so it is still uncategorized in this session
    assert_eq!(
        order,
        vec!["Housing", UNCATEGORIZED, "Entertainment", "Food"]
    );
    let share: f64 = debits.categories.iter().map(|c| c.percentage).sum();
    assert!((share - 100.0).abs() < 1e-9);

    // A fresh session on the same store categorizes both SWIGGY rows
    let mut next = open_session(&dir);
    next.load_statement(statement_csv().as_bytes(), &options)
        .unwrap();
    let debits = next.summary(StatementView::Debits).unwrap();
    let food = debits
        .categories
        .iter()
        .find(|c| c.category == "Food")
        .unwrap();
    assert_eq!(food.total, 1500.0);
    assert_eq!(food.transaction_count, 2);

    let credits = next.summary(StatementView::Credits).unwrap();
    assert_eq!(credits.total, 86299.0);
    assert_eq!(credits.categories.len(), 1);
    assert_eq!(credits.categories[0].category, UNCATEGORIZED);
}

#[test]
fn test_store_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("categories.json");

    let mut store = CategoryStore::load(&path).unwrap();
    store.add_category("Travel").unwrap();
    store.add_category("Bills").unwrap();
    store.add_keyword("Travel", "UBER TRIP").unwrap();
    store.add_keyword("Bills", "BESCOM").unwrap();

    let reloaded = CategoryStore::load(&path).unwrap();
    assert_eq!(reloaded.map(), store.map());

    // The file stays a plain JSON object of string arrays
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["Travel"][0], "UBER TRIP");
    assert!(raw["Uncategorized"].as_array().unwrap().is_empty());
}

#[test]
fn test_load_is_all_or_nothing() {
    let csv = "Date,Narration,Withdrawal Amt.,Deposit Amt.\n01/04/23,A,10,\n02/04/23,B,abc,\n";
    let err = load_transactions(csv.as_bytes(), &ImportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_loading_is_deterministic() {
    let options = ImportOptions::default();
    let a = load_transactions(statement_csv().as_bytes(), &options).unwrap();
    let b = load_transactions(statement_csv().as_bytes(), &options).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 7);
}
