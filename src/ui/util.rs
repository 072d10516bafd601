use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Format a decimal amount as dollars with thousand separators.
/// e.g. `1234567.89` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let formatted = format!("{:.2}", val.abs());
    let (int_part, cents) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let grouped: Vec<&str> = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect();
    let sign = if val < Decimal::ZERO { "-" } else { "" };

    format!("{sign}${}.{cents}", grouped.join(","))
}

/// Shorten `s` to at most `max` characters, ending in "…" when cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    match max {
        0 => String::new(),
        _ => {
            let head: String = s.chars().take(max - 1).collect();
            format!("{head}…")
        }
    }
}

/// A text bar `width` cells wide, filled in proportion to `percent`.
pub(crate) fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled.min(width)))
}

/// Cursor into a scrolling list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) index: usize,
    pub(crate) scroll: usize,
}

impl Cursor {
    pub(crate) fn down(&mut self, len: usize, page: usize) {
        if self.index + 1 < len {
            self.index += 1;
            if self.index >= self.scroll + page.max(1) {
                self.scroll = self.index + 1 - page.max(1);
            }
        }
    }

    pub(crate) fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.scroll = self.scroll.min(self.index);
    }

    pub(crate) fn top(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn bottom(&mut self, len: usize, page: usize) {
        if len > 0 {
            self.index = len - 1;
            self.scroll = self.index.saturating_sub(page.saturating_sub(1));
        }
    }

    /// Pull the cursor back inside a list that may have shrunk.
    pub(crate) fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
        self.scroll = self.scroll.min(self.index);
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

/// Weeks of the month containing `date`, Monday first. Cells outside the
/// month are `None`.
pub(crate) fn month_grid(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let days = days_in_month(date.year(), date.month());
    let lead = date
        .with_day(1)
        .map_or(0, |first| first.weekday().num_days_from_monday());

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    for day in 1..=days {
        let slot = ((lead + day - 1) % 7) as usize;
        week[slot] = Some(day);
        if slot == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}
