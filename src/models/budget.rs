use rust_decimal::{Decimal, RoundingStrategy};

use super::expense::parse_amount;
use crate::error::ValidationError;

/// Monthly spending limit for the running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    amount: Decimal,
}

impl Budget {
    /// 5000.00, restored whenever all data is cleared.
    pub const DEFAULT: Budget = Budget {
        amount: Decimal::from_parts(500_000, 0, 0, false, 2),
    };

    pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
        let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveBudget);
        }
        Ok(Self { amount })
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let amount = parse_amount(input)
            .map_err(|_| ValidationError::InvalidBudget(input.trim().to_string()))?;
        Self::new(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Budget left after `spent`. Negative once the budget is exceeded.
    pub fn remaining(&self, spent: Decimal) -> Decimal {
        self.amount - spent
    }

    pub fn is_exceeded_by(&self, spent: Decimal) -> bool {
        spent > self.amount
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.amount)
    }
}
