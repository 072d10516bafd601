//! Error kinds shared by the store, the models and the session.

use std::path::PathBuf;

use rust_decimal::Decimal;

/// Any failure of the expense store.
///
/// Store errors are never retried. A failed operation leaves the stored rows
/// exactly as they were before the call.
#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    /// The directory that should hold the database file could not be created.
    #[error("could not create data directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The database file could not be opened.
    #[error("could not open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed to prepare or execute.
    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The insert succeeded but the database did not hand back the new row's id.
    #[error("failed to retrieve generated ID for new expense")]
    MissingId,

    /// The store refuses amounts that are zero or negative.
    #[error("expense amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),

    /// A stored row could not be turned back into an expense.
    #[error("stored expense {id} is unreadable: {reason}")]
    CorruptRow { id: i64, reason: String },
}

/// User input that was rejected before any store call was attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ValidationError {
    #[error("please enter a valid number for amount (got '{0}')")]
    NotANumber(String),

    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    /// The amount does not fit the stored `decimal(10,2)` column.
    #[error("amount {0} is too large")]
    AmountTooLarge(Decimal),

    #[error("category cannot be empty")]
    EmptyCategory,

    #[error("category must be at most {max} characters")]
    CategoryTooLong { max: usize },

    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid number for budget (got '{0}')")]
    InvalidBudget(String),

    #[error("budget must be a positive number")]
    NonPositiveBudget,

    #[error("no expense with ID {0}")]
    UnknownExpense(i64),
}
