//! In-memory spending aggregates kept in step with the stored expenses.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::Expense;

/// Remaining values at or below this are treated as zero and their entry removed.
pub(crate) const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// Owned copy of the aggregates, handed to views after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) total_spent: Decimal,
    pub(crate) category_totals: BTreeMap<String, Decimal>,
    /// Keyed by day of month (1-31). Month and year are not part of the key.
    pub(crate) daily_totals: BTreeMap<u32, Decimal>,
}

impl Snapshot {
    /// Percentage of total spending that `amount` represents.
    pub(crate) fn share_percent(&self, amount: Decimal) -> f64 {
        let total = if self.total_spent.is_zero() {
            Decimal::ONE
        } else {
            self.total_spent
        };
        (amount / total * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    }

    /// Categories sorted by amount, largest first; ties by name.
    pub(crate) fn categories_by_amount(&self) -> Vec<(&str, Decimal)> {
        let mut cats: Vec<(&str, Decimal)> = self
            .category_totals
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        cats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        cats
    }

    pub(crate) fn spent_on_day(&self, day: u32) -> Option<Decimal> {
        self.daily_totals.get(&day).copied()
    }
}

#[derive(Debug, Default)]
pub(crate) struct Tracker {
    totals: Snapshot,
}

impl Tracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Recompute everything from `records`. Order does not matter.
    pub(crate) fn rebuild(&mut self, records: &[Expense]) -> Snapshot {
        self.totals = Snapshot::default();
        for record in records {
            self.add(record);
        }
        tracing::debug!(
            records = records.len(),
            total = %self.totals.total_spent,
            "aggregates rebuilt"
        );
        self.snapshot()
    }

    pub(crate) fn apply_add(&mut self, record: &Expense) -> Snapshot {
        self.add(record);
        self.snapshot()
    }

    pub(crate) fn apply_remove(&mut self, record: &Expense) -> Snapshot {
        self.totals.total_spent -= record.amount;
        subtract_or_remove(
            &mut self.totals.category_totals,
            record.category.clone(),
            record.amount,
        );
        subtract_or_remove(
            &mut self.totals.daily_totals,
            record.day_of_month(),
            record.amount,
        );
        self.snapshot()
    }

    pub(crate) fn clear(&mut self) -> Snapshot {
        self.totals = Snapshot::default();
        self.snapshot()
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        self.totals.clone()
    }

    pub(crate) fn total_spent(&self) -> Decimal {
        self.totals.total_spent
    }

    fn add(&mut self, record: &Expense) {
        self.totals.total_spent += record.amount;
        *self
            .totals
            .category_totals
            .entry(record.category.clone())
            .or_default() += record.amount;
        *self
            .totals
            .daily_totals
            .entry(record.day_of_month())
            .or_default() += record.amount;
    }
}

fn subtract_or_remove<K: Ord>(map: &mut BTreeMap<K, Decimal>, key: K, amount: Decimal) {
    let remaining = map.get(&key).copied().unwrap_or_default() - amount;
    if remaining > EPSILON {
        map.insert(key, remaining);
    } else {
        map.remove(&key);
    }
}

#[cfg(test)]
mod tests;
