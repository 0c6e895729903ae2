//! Expense model
//!
//! An expense is a single spend logged by a user. The allocator never sees
//! the full record, only the `(date, category, amount)` view in
//! [`SpendRecord`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{ExpenseId, UserId};
use super::money::Money;

/// A logged expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub category: Category,
    /// Amount spent (always positive)
    pub amount: Money,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        user_id: UserId,
        category: Category,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            user_id,
            category,
            amount,
            description: description.into(),
            date,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.description.len() > 200 {
            return Err(ExpenseValidationError::DescriptionTooLong(self.description.len()));
        }
        Ok(())
    }

    pub fn spend_record(&self) -> SpendRecord {
        SpendRecord {
            date: self.date,
            category: self.category,
            amount: self.amount,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)
    }
}

/// Read-only historical spend used for weight derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendRecord {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Money,
}

impl SpendRecord {
    pub fn new(date: NaiveDate, category: Category, amount: Money) -> Self {
        Self {
            date,
            category,
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    DescriptionTooLong(usize),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::DescriptionTooLong(len) => {
                write!(f, "Description too long ({} chars, max 200)", len)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
