//! Session state: the category store plus the currently loaded statement
//!
//! One `Session` per active user session. Loading a statement replaces the
//! previous one wholesale; category edits update the in-memory rows and teach
//! the store the edited narration as a keyword.

use std::io::Read;

use tracing::{debug, info};

use crate::categories::CategoryStore;
use crate::error::{Error, Result};
use crate::import::{load_statement, ImportOptions};
use crate::models::{CategoryEdit, EditOutcome, Statement, StatementView, Summary};
use crate::reports;

pub struct Session {
    store: CategoryStore,
    statement: Option<Statement>,
}

impl Session {
    pub fn open(store: CategoryStore) -> Self {
        Self {
            store,
            statement: None,
        }
    }

    /// Parse, categorize and adopt a new statement.
    ///
    /// On error the previously loaded statement is kept.
    pub fn load_statement<R: Read>(&mut self, reader: R, options: &ImportOptions) -> Result<()> {
        let statement = load_statement(reader, options, self.store.map())?;
        info!(
            "Loaded statement: {} debits, {} credits",
            statement.debits.len(),
            statement.credits.len()
        );
        self.statement = Some(statement);
        Ok(())
    }

    pub fn statement(&self) -> Option<&Statement> {
        self.statement.as_ref()
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    /// Category names for selection lists
    pub fn category_names(&self) -> Vec<String> {
        self.store.category_names()
    }

    pub fn add_category(&mut self, name: &str) -> Result<bool> {
        self.store.add_category(name)
    }

    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> Result<bool> {
        self.store.add_keyword(category, keyword)
    }

    /// Summary of one view of the loaded statement
    pub fn summary(&self, view: StatementView) -> Result<Summary> {
        let statement = self.require_statement()?;
        Ok(reports::summary(statement.view(view), view))
    }

    /// Apply category edits to rows of one view.
    ///
    /// All edits are validated before any is applied. An edit whose category
    /// equals the row's current one is skipped; otherwise the row is
    /// re-labelled and its narration learned as a keyword for the new category.
    ///
    /// Learned keywords are persisted in one write before any row changes, so
    /// on error neither the rows nor the store are modified.
    pub fn apply_edits(&mut self, view: StatementView, edits: &[CategoryEdit]) -> Result<EditOutcome> {
        let rows = self.require_statement()?.view(view);

        for edit in edits {
            if edit.row >= rows.len() {
                return Err(Error::InvalidInput(format!(
                    "Row {} out of range ({} has {} rows)",
                    edit.row,
                    view,
                    rows.len()
                )));
            }
            if !self.store.map().contains(&edit.category) {
                return Err(Error::InvalidInput(format!(
                    "Unknown category: {}",
                    edit.category
                )));
            }
        }

        // Staged labels for the whole view; committed only after the store write
        let mut labels: Vec<String> = rows.iter().map(|t| t.category.clone()).collect();
        let mut keywords: Vec<(&str, &str)> = Vec::new();
        let mut outcome = EditOutcome::default();

        for edit in edits {
            let label = &mut labels[edit.row];
            if *label == edit.category {
                continue;
            }

            debug!(
                "Row {} '{}': {} -> {}",
                edit.row, edit.narration, label, edit.category
            );
            *label = edit.category.clone();
            outcome.changed += 1;
            keywords.push((edit.category.as_str(), edit.narration.as_str()));
        }

        outcome.keywords_learned = self.store.add_keywords(&keywords)?;

        if let Some(statement) = self.statement.as_mut() {
            for (row, label) in statement.view_mut(view).iter_mut().zip(labels) {
                row.category = label;
            }
        }

        info!(
            "Applied {} category changes to {}, learned {} keywords",
            outcome.changed, view, outcome.keywords_learned
        );
        Ok(outcome)
    }

    fn require_statement(&self) -> Result<&Statement> {
        self.statement
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("No statement loaded".into()))
    }
}
