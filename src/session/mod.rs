//! The controller behind every user action.
//!
//! Each action validates its input, performs the store call, and only when
//! the store call succeeds applies the same change to the in-memory list and
//! the aggregates. A failed action leaves the session exactly as it was.

use rust_decimal::Decimal;

use crate::db::Database;
use crate::error::{StoreError, ValidationError};
use crate::models::{Budget, Expense, NewExpense};
use crate::tracker::{Snapshot, Tracker};

#[derive(Debug, thiserror::Error)]
pub(crate) enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),
}

pub(crate) struct Session {
    db: Database,
    tracker: Tracker,
    expenses: Vec<Expense>,
    budget: Budget,
    default_budget: Budget,
    loaded: bool,
}

impl Session {
    /// An empty session. Call [`Session::load`] to read the stored expenses.
    pub(crate) fn new(db: Database, default_budget: Budget) -> Self {
        Self {
            db,
            tracker: Tracker::new(),
            expenses: Vec::new(),
            budget: default_budget,
            default_budget,
            loaded: false,
        }
    }

    /// Read every stored expense and rebuild the aggregates from scratch.
    pub(crate) fn load(&mut self) -> Result<Snapshot, StoreError> {
        let expenses = self.db.list_all()?;
        let snapshot = self.tracker.rebuild(&expenses);
        self.expenses = expenses;
        self.loaded = true;
        tracing::info!(count = self.expenses.len(), "session loaded");
        Ok(snapshot)
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Mutations apply deltas to the aggregates, so those must first reflect
    /// every stored row.
    fn ensure_loaded(&mut self) -> Result<(), StoreError> {
        if !self.loaded {
            self.load()?;
        }
        Ok(())
    }

    /// Validate form input and record the expense.
    pub(crate) fn add(
        &mut self,
        amount: &str,
        category: &str,
        description: Option<&str>,
        date: Option<&str>,
    ) -> Result<(Expense, Snapshot), ActionError> {
        let new = NewExpense::parse(amount, category, description, date)?;
        self.add_expense(new)
    }

    pub(crate) fn add_expense(
        &mut self,
        new: NewExpense,
    ) -> Result<(Expense, Snapshot), ActionError> {
        self.ensure_loaded()?;
        let id = self.db.create(&new)?;
        let expense = new.into_expense(id);
        let snapshot = self.tracker.apply_add(&expense);
        self.expenses.insert(0, expense.clone());
        Ok((expense, snapshot))
    }

    /// Delete a displayed expense by id.
    pub(crate) fn delete(&mut self, id: i64) -> Result<(Expense, Snapshot), ActionError> {
        self.ensure_loaded()?;
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(ValidationError::UnknownExpense(id))?;
        self.db.delete(id)?;
        let expense = self.expenses.remove(index);
        let snapshot = self.tracker.apply_remove(&expense);
        Ok((expense, snapshot))
    }

    /// Delete everything, reset the aggregates and put the budget back to its default.
    pub(crate) fn clear_all(&mut self) -> Result<Snapshot, ActionError> {
        self.db.clear_all()?;
        // The store is empty now, which is exactly what the cleared state shows
        self.loaded = true;
        self.expenses.clear();
        self.budget = self.default_budget;
        Ok(self.tracker.clear())
    }

    pub(crate) fn set_budget(&mut self, input: &str) -> Result<Budget, ActionError> {
        self.budget = Budget::parse(input)?;
        tracing::info!(budget = %self.budget, "budget changed");
        Ok(self.budget)
    }

    /// Displayed expenses, most recently created first.
    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        self.tracker.snapshot()
    }

    pub(crate) fn budget(&self) -> Budget {
        self.budget
    }

    pub(crate) fn remaining(&self) -> Decimal {
        self.budget.remaining(self.tracker.total_spent())
    }

    pub(crate) fn database(&self) -> &Database {
        &self.db
    }
}
