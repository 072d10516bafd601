#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn sample() -> Vec<Expense> {
    vec![
        Expense {
            id: 2,
            amount: dec!(10),
            category: "Food & Dining".into(),
            description: Some("lunch, with \"friends\"".into()),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        },
        Expense {
            id: 1,
            amount: dec!(42.5),
            category: "Transport".into(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        },
    ]
}

#[test]
fn test_write_csv_rows() {
    let mut buf = Vec::new();
    let count = write_csv(&sample(), &mut buf).unwrap();
    assert_eq!(count, 2);
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "id,date,category,description,amount");
    assert_eq!(
        lines[1],
        "2,2024-03-05,Food & Dining,\"lunch, with \"\"friends\"\"\",10.00"
    );
    assert_eq!(lines[2], "1,2024-03-04,Transport,,42.50");
}

#[test]
fn test_write_csv_empty_has_header_only() {
    let mut buf = Vec::new();
    assert_eq!(write_csv(&[], &mut buf).unwrap(), 0);
    assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
}

#[test]
fn test_export_to_path_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("expenses.csv");
    assert_eq!(export_to_path(&sample(), &path).unwrap(), 2);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("Transport"));
}

#[test]
fn test_expand_home_leaves_plain_paths() {
    assert_eq!(
        expand_home("/tmp/x.csv"),
        std::path::PathBuf::from("/tmp/x.csv")
    );
}
