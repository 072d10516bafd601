pub(crate) const EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    amount      TEXT NOT NULL,
    category    TEXT NOT NULL,
    description TEXT,
    date        TEXT NOT NULL
);
"#;

/// Dropping the table's row in `sqlite_sequence` restarts AUTOINCREMENT at 1.
pub(crate) const RESET_ID_SEQUENCE: &str = "DELETE FROM sqlite_sequence WHERE name = 'expenses'";
