//! Monthly budget model
//!
//! A budget is the total a user intends to spend in one period. Setting a new
//! budget for the same period supersedes the old one; the latest wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, UserId};
use super::money::Money;
use super::period::Period;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub user_id: UserId,
    pub amount: Money,
    pub period: Period,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(user_id: UserId, period: Period, amount: Money) -> Self {
        Self {
            id: BudgetId::new(),
            user_id,
            amount,
            period,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.amount, self.period)
    }
}

/// Spending position against a budget
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub period: Period,
    pub budget: Money,
    pub spent: Money,
    pub remaining: Money,
}

impl BudgetStatus {
    pub fn new(period: Period, budget: Money, spent: Money) -> Self {
        Self {
            period,
            budget,
            spent,
            remaining: budget - spent,
        }
    }

    pub fn is_over(&self) -> bool {
        self.remaining.is_negative()
    }

    pub fn percent_used(&self) -> f64 {
        self.spent.percent_of(self.budget)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
