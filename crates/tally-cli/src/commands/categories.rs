//! Category store command implementations

use anyhow::Result;
use tally_core::{match_category, Session, UNCATEGORIZED};

pub fn cmd_categories_list(session: &Session) -> Result<()> {
    let store = session.store();

    println!("🏷️  Categories ({})", store.path().display());
    println!("   ─────────────────────────────────────────────────────────────");

    for category in store.map().iter() {
        if category.keywords.is_empty() {
            println!("   {}", category.name);
        } else {
            println!("   {} ({})", category.name, category.keywords.join(", "));
        }
    }

    Ok(())
}

pub fn cmd_categories_add(session: &mut Session, name: &str) -> Result<()> {
    if session.add_category(name)? {
        println!("✅ Added category: {}", name.trim());
    } else {
        println!("   Category already exists: {}", name.trim());
    }
    Ok(())
}

pub fn cmd_categories_keyword(session: &mut Session, category: &str, keyword: &str) -> Result<()> {
    if session.add_keyword(category, keyword)? {
        println!("✅ Added keyword '{}' to {}", keyword.trim(), category);
    } else {
        println!("   {} already has keyword '{}'", category, keyword.trim());
    }
    Ok(())
}

pub fn cmd_categories_test(session: &Session, narration: &str) -> Result<()> {
    match match_category(narration, session.store().map()) {
        Some(category) => println!("🏷️  '{}' → {}", narration, category),
        None => println!("🏷️  '{}' → {} (no keyword match)", narration, UNCATEGORIZED),
    }
    Ok(())
}
