//! Statement command implementations

use std::path::Path;

use anyhow::{bail, Context, Result};
use tally_core::{CategoryEdit, Config, Session, StatementView, Summary};

use super::{format_amount, load_file, truncate};

pub fn cmd_summary(session: &mut Session, config: &Config, file: &Path, json: bool) -> Result<()> {
    load_file(session, config, file)?;

    let debits = session.summary(StatementView::Debits)?;
    let credits = session.summary(StatementView::Credits)?;

    if json {
        let out = serde_json::json!({
            "currency": config.currency,
            "debits": debits,
            "credits": credits,
        });
        let rendered = serde_json::to_string_pretty(&out).context("Failed to serialize summary")?;
        println!("{}", rendered);
        return Ok(());
    }

    print_summary("📊 Spending Summary", &debits, &config.currency);
    print_summary("💰 Payments Received", &credits, &config.currency);

    Ok(())
}

fn print_summary(title: &str, summary: &Summary, currency: &str) {
    println!();
    println!("{} ({})", title, summary.view);
    println!("   ─────────────────────────────────────────────────────────────");

    if summary.categories.is_empty() {
        println!("   No {} in this statement.", summary.view);
        return;
    }

    println!("   Total: {}", format_amount(summary.total, currency));
    println!();
    println!(
        "   {:25} │ {:>18} │ {:>6} │ {:>5}",
        "Category", "Amount", "Share", "Count"
    );
    println!("   ──────────────────────────┼────────────────────┼────────┼───────");

    for entry in &summary.categories {
        println!(
            "   {:25} │ {:>18} │ {:>5.1}% │ {:>5}",
            truncate(&entry.category, 25),
            format_amount(entry.total, currency),
            entry.percentage,
            entry.transaction_count
        );
    }
}

pub fn cmd_transactions(
    session: &mut Session,
    config: &Config,
    file: &Path,
    view: StatementView,
) -> Result<()> {
    load_file(session, config, file)?;
    let statement = session
        .statement()
        .context("Statement was not loaded")?;
    let rows = statement.view(view);
    let column = view.amount_column();

    println!();
    println!("📋 Transactions ({})", view);
    println!("   ─────────────────────────────────────────────────────────────");

    if rows.is_empty() {
        println!("   No {} in this statement.", view);
        return Ok(());
    }

    println!(
        "   {:>4} │ {:10} │ {:30} │ {:>18} │ Category",
        "Row", "Date", "Narration", "Amount"
    );
    println!("   ─────┼────────────┼────────────────────────────────┼────────────────────┼──────────");

    for (i, txn) in rows.iter().enumerate() {
        println!(
            "   {:>4} │ {:10} │ {:30} │ {:>18} │ {}",
            i + 1,
            txn.date.format("%d/%m/%Y"),
            truncate(&txn.narration, 30),
            format_amount(txn.amount(column), &config.currency),
            txn.category
        );
    }

    println!();
    println!("   {} rows. Change a category with:", rows.len());
    println!(
        "   tally recategorize {} --view {} --set ROW=CATEGORY",
        file.display(),
        view
    );

    Ok(())
}

/// Parse a `ROW=CATEGORY` argument into a 1-based row number and category
pub fn parse_assignment(arg: &str) -> Result<(usize, String)> {
    let Some((row, category)) = arg.split_once('=') else {
        bail!("Invalid assignment '{}' (expected ROW=CATEGORY)", arg);
    };
    let row: usize = row
        .trim()
        .parse()
        .with_context(|| format!("Invalid row number in '{}'", arg))?;
    let category = category.trim();
    if row == 0 {
        bail!("Row numbers start at 1");
    }
    if category.is_empty() {
        bail!("Missing category in '{}'", arg);
    }
    Ok((row, category.to_string()))
}

pub fn cmd_recategorize(
    session: &mut Session,
    config: &Config,
    file: &Path,
    view: StatementView,
    assignments: &[String],
) -> Result<()> {
    load_file(session, config, file)?;
    let rows = session
        .statement()
        .context("Statement was not loaded")?
        .view(view);

    let mut edits = Vec::with_capacity(assignments.len());
    for arg in assignments {
        let (row, category) = parse_assignment(arg)?;
        let Some(txn) = rows.get(row - 1) else {
            bail!("Row {} out of range ({} has {} rows)", row, view, rows.len());
        };
        edits.push(CategoryEdit {
            row: row - 1,
            category,
            narration: txn.narration.clone(),
        });
    }

    let outcome = session.apply_edits(view, &edits)?;

    println!("✏️  Recategorized {} ({})", file.display(), view);
    for edit in &edits {
        println!(
            "   Row {:>4}: {} → {}",
            edit.row + 1,
            truncate(&edit.narration, 40),
            edit.category
        );
    }
    println!(
        "✅ {} rows changed, {} keywords learned",
        outcome.changed, outcome.keywords_learned
    );

    let summary = session.summary(view)?;
    let title = match view {
        StatementView::Debits => "📊 Spending Summary",
        StatementView::Credits => "💰 Payments Received",
    };
    print_summary(title, &summary, &config.currency);

    Ok(())
}
