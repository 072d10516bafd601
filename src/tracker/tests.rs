#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn expense(id: i64, amount: Decimal, category: &str, day: u32) -> Expense {
    Expense {
        id,
        amount,
        category: category.into(),
        description: None,
        date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
    }
}

fn sample() -> Vec<Expense> {
    vec![
        expense(1, dec!(42.50), "Transport", 5),
        expense(2, dec!(10.00), "Food & Dining", 5),
        expense(3, dec!(7.25), "Food & Dining", 12),
        expense(4, dec!(100.00), "Utilities", 28),
    ]
}

// ── Rebuild ───────────────────────────────────────────────────

#[test]
fn test_rebuild_empty() {
    let mut tracker = Tracker::new();
    assert_eq!(tracker.rebuild(&[]), Snapshot::default());
}

#[test]
fn test_rebuild_sums_everything() {
    let mut tracker = Tracker::new();
    let snap = tracker.rebuild(&sample());
    assert_eq!(snap.total_spent, dec!(159.75));
    assert_eq!(snap.category_totals["Food & Dining"], dec!(17.25));
    assert_eq!(snap.category_totals["Transport"], dec!(42.50));
    assert_eq!(snap.daily_totals[&5], dec!(52.50));
    assert_eq!(snap.daily_totals[&28], dec!(100.00));
    assert_eq!(tracker.total_spent(), dec!(159.75));
}

#[test]
fn test_rebuild_is_order_independent() {
    let mut forward = Tracker::new();
    let mut backward = Tracker::new();
    let mut reversed = sample();
    reversed.reverse();
    assert_eq!(forward.rebuild(&sample()), backward.rebuild(&reversed));
}

#[test]
fn test_rebuild_discards_previous_state() {
    let mut tracker = Tracker::new();
    tracker.rebuild(&sample());
    let snap = tracker.rebuild(&[expense(9, dec!(1), "Health", 1)]);
    assert_eq!(snap.total_spent, dec!(1));
    assert_eq!(snap.category_totals.len(), 1);
    assert_eq!(snap.daily_totals.len(), 1);
}

#[test]
fn test_days_from_different_months_share_a_key() {
    let mut tracker = Tracker::new();
    let mut feb = expense(1, dec!(5), "Others", 5);
    feb.date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
    let snap = tracker.rebuild(&[feb, expense(2, dec!(6), "Others", 5)]);
    assert_eq!(snap.daily_totals.len(), 1);
    assert_eq!(snap.daily_totals[&5], dec!(11));
}

// ── Incremental updates ───────────────────────────────────────

#[test]
fn test_apply_add_matches_full_rebuild() {
    let records = sample();
    let new = expense(5, dec!(3.30), "Transport", 12);

    let mut incremental = Tracker::new();
    incremental.rebuild(&records);
    let inc = incremental.apply_add(&new);

    let mut all = records.clone();
    all.push(new);
    let mut full = Tracker::new();
    assert_eq!(inc, full.rebuild(&all));
}

#[test]
fn test_apply_add_new_category_and_day() {
    let mut tracker = Tracker::new();
    let snap = tracker.apply_add(&expense(1, dec!(42.50), "Transport", 5));
    assert_eq!(snap.total_spent, dec!(42.50));
    assert_eq!(
        snap.category_totals,
        BTreeMap::from([("Transport".to_string(), dec!(42.50))])
    );
    assert_eq!(snap.daily_totals, BTreeMap::from([(5, dec!(42.50))]));
}

#[test]
fn test_add_then_remove_restores_state() {
    let mut tracker = Tracker::new();
    let before = tracker.rebuild(&sample());
    let r = expense(5, dec!(19.99), "Shopping", 12);
    tracker.apply_add(&r);
    assert_eq!(tracker.apply_remove(&r), before);
}

#[test]
fn test_add_then_remove_existing_category_restores_state() {
    let mut tracker = Tracker::new();
    let before = tracker.rebuild(&sample());
    let r = expense(5, dec!(0.01), "Transport", 5);
    tracker.apply_add(&r);
    assert_eq!(tracker.apply_remove(&r), before);
}

#[test]
fn test_remove_drops_emptied_entries() {
    let mut tracker = Tracker::new();
    let records = sample();
    tracker.rebuild(&records);
    let snap = tracker.apply_remove(&records[0]);
    assert!(!snap.category_totals.contains_key("Transport"));
    // Day 5 still has the Food & Dining expense
    assert_eq!(snap.daily_totals[&5], dec!(10.00));

    let snap = tracker.apply_remove(&records[1]);
    assert!(!snap.daily_totals.contains_key(&5));
    assert_eq!(snap.category_totals["Food & Dining"], dec!(7.25));
}

#[test]
fn test_remove_within_epsilon_drops_entry() {
    let mut tracker = Tracker::new();
    tracker.rebuild(&[expense(1, dec!(10.0005), "Health", 3)]);
    let snap = tracker.apply_remove(&expense(1, dec!(10.00), "Health", 3));
    assert!(snap.category_totals.is_empty());
    assert!(snap.daily_totals.is_empty());
}

#[test]
fn test_remove_unknown_category_leaves_no_residue() {
    let mut tracker = Tracker::new();
    tracker.rebuild(&sample());
    let snap = tracker.apply_remove(&expense(99, dec!(1), "Never Seen", 30));
    assert!(!snap.category_totals.contains_key("Never Seen"));
    assert!(!snap.daily_totals.contains_key(&30));
}

#[test]
fn test_add_add_remove_same_day() {
    let mut tracker = Tracker::new();
    let taxi = expense(1, dec!(42.50), "Transport", 5);
    let lunch = expense(2, dec!(10.00), "Food & Dining", 5);
    tracker.apply_add(&taxi);
    tracker.apply_add(&lunch);
    let snap = tracker.apply_remove(&taxi);
    assert_eq!(snap.total_spent, dec!(10.00));
    assert_eq!(
        snap.category_totals,
        BTreeMap::from([("Food & Dining".to_string(), dec!(10.00))])
    );
    assert_eq!(snap.daily_totals, BTreeMap::from([(5, dec!(10.00))]));
}

#[test]
fn test_clear() {
    let mut tracker = Tracker::new();
    tracker.rebuild(&sample());
    assert_eq!(tracker.clear(), Snapshot::default());
    assert_eq!(tracker.total_spent(), Decimal::ZERO);
}

// ── Snapshot helpers ──────────────────────────────────────────

#[test]
fn test_share_percent() {
    let mut tracker = Tracker::new();
    let snap = tracker.rebuild(&[
        expense(1, dec!(75), "Transport", 1),
        expense(2, dec!(25), "Health", 1),
    ]);
    assert!((snap.share_percent(dec!(75)) - 75.0).abs() < 1e-9);
    assert!((snap.share_percent(dec!(25)) - 25.0).abs() < 1e-9);
}

#[test]
fn test_share_percent_with_zero_total() {
    let snap = Snapshot::default();
    assert_eq!(snap.share_percent(Decimal::ZERO), 0.0);
}

#[test]
fn test_categories_by_amount() {
    let mut tracker = Tracker::new();
    let snap = tracker.rebuild(&sample());
    let names: Vec<&str> = snap.categories_by_amount().iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["Utilities", "Transport", "Food & Dining"]);
}

#[test]
fn test_spent_on_day() {
    let mut tracker = Tracker::new();
    let snap = tracker.rebuild(&sample());
    assert_eq!(snap.spent_on_day(12), Some(dec!(7.25)));
    assert_eq!(snap.spent_on_day(13), None);
}
