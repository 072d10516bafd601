mod schema;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::StoreError;
use crate::models::{Expense, NewExpense};

const BUSY_TIMEOUT: Duration = Duration::from_secs(3);

/// Gateway to the expense table.
///
/// Holds only the location of the database. Every operation opens its own
/// connection and closes it before returning.
pub(crate) struct Database {
    path: PathBuf,
}

impl Database {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Create the database file and the expense table if either is missing.
    /// Safe to call on every startup.
    pub(crate) fn initialize(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let conn = self.connect()?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(schema::EXPENSES_TABLE)?;
        tracing::info!(path = %self.path.display(), "expense store ready");
        Ok(())
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path).map_err(|source| StoreError::Open {
            path: self.path.clone(),
            source,
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Insert one expense and return the id the database assigned to it.
    pub(crate) fn create(&self, expense: &NewExpense) -> Result<i64, StoreError> {
        if expense.amount() <= Decimal::ZERO {
            return Err(StoreError::InvalidAmount(expense.amount()));
        }
        let conn = self.connect()?;
        let id: Option<i64> = conn
            .query_row(
                "INSERT INTO expenses (amount, category, description, date)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id",
                params![
                    format!("{:.2}", expense.amount()),
                    expense.category(),
                    expense.description(),
                    expense.date(),
                ],
                |row| row.get(0),
            )
            .optional()?;
        let id = id.ok_or(StoreError::MissingId)?;
        tracing::info!(id, amount = %expense.amount(), category = expense.category(), "expense created");
        Ok(id)
    }

    /// Delete the expense with `id`. Deleting an id that does not exist is not an error.
    pub(crate) fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        if removed == 0 {
            tracing::debug!(id, "delete matched no expense");
        } else {
            tracing::info!(id, "expense deleted");
        }
        Ok(())
    }

    /// Remove every expense and restart id numbering at 1.
    pub(crate) fn clear_all(&self) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM expenses", [])?;
        tx.execute(schema::RESET_ID_SEQUENCE, [])?;
        tx.commit()?;
        tracing::info!(removed, "all expenses cleared");
        Ok(())
    }

    /// Every stored expense, most recently created first.
    pub(crate) fn list_all(&self) -> Result<Vec<Expense>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, amount, category, description, date FROM expenses ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, NaiveDate>(4)?,
            ))
        })?;

        let mut expenses = Vec::new();
        for row in rows {
            let (id, amount, category, description, date) = row?;
            let amount = Decimal::from_str(&amount).map_err(|e| StoreError::CorruptRow {
                id,
                reason: format!("amount '{amount}': {e}"),
            })?;
            expenses.push(Expense {
                id,
                amount,
                category,
                description,
                date,
            });
        }
        tracing::debug!(count = expenses.len(), "loaded expenses");
        Ok(expenses)
    }
}
