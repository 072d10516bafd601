use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::Category;
use crate::error::ValidationError;

pub const MAX_CATEGORY_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Largest amount a `decimal(10,2)` column holds: 99,999,999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// A stored expense. The id is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl Expense {
    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// A validated expense that has not been stored yet.
///
/// Only constructed through [`NewExpense::new`] or [`NewExpense::parse`], so
/// the amount is always positive and fits two decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    amount: Decimal,
    category: String,
    description: Option<String>,
    date: NaiveDate,
}

impl NewExpense {
    pub fn new(
        amount: Decimal,
        category: &str,
        description: Option<&str>,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: validate_amount(amount)?,
            category: validate_category(category)?,
            description: validate_description(description)?,
            date,
        })
    }

    /// Validate raw form input. A missing date means today.
    pub fn parse(
        amount: &str,
        category: &str,
        description: Option<&str>,
        date: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let amount = parse_amount(amount)?;
        let date = match date {
            Some(d) => parse_date(d)?,
            None => chrono::Local::now().date_naive(),
        };
        Self::new(amount, category, description, date)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn into_expense(self, id: i64) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
        }
    }
}

/// Parse an amount typed by the user. A leading `$` is ignored.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    Decimal::from_str(digits).map_err(|_| ValidationError::NotANumber(trimmed.to_string()))
}

pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.trim().to_string()))
}

fn validate_amount(amount: Decimal) -> Result<Decimal, ValidationError> {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if rounded > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(amount));
    }
    Ok(rounded)
}

fn validate_category(category: &str) -> Result<String, ValidationError> {
    let category = Category::normalize(category);
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(ValidationError::CategoryTooLong {
            max: MAX_CATEGORY_LEN,
        });
    }
    Ok(category)
}

fn validate_description(description: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(text) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(Some(text.to_string()))
}
