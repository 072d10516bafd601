use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Expense;

const HEADER: [&str; 5] = ["id", "date", "category", "description", "amount"];

/// Write expenses as CSV, one row per expense in the order given.
pub(crate) fn write_csv<W: Write>(expenses: &[Expense], out: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)
        .context("Failed to write CSV header")?;
    for e in expenses {
        wtr.write_record([
            e.id.to_string(),
            e.date.format("%Y-%m-%d").to_string(),
            e.category.clone(),
            e.description_or_empty().to_string(),
            format!("{:.2}", e.amount),
        ])
        .with_context(|| format!("Failed to write expense {}", e.id))?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(expenses.len())
}

pub(crate) fn export_to_path(expenses: &[Expense], path: &Path) -> Result<usize> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_csv(expenses, file)?;
    tracing::info!(count, path = %path.display(), "expenses exported");
    Ok(count)
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_home(path: &str) -> std::path::PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => directories::UserDirs::new()
            .map(|d| d.home_dir().join(rest))
            .unwrap_or_else(|| Path::new(path).to_path_buf()),
        None => Path::new(path).to_path_buf(),
    }
}

#[cfg(test)]
mod tests;
