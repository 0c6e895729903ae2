//! Budget allocation results
//!
//! An [`AllocationResult`] partitions a monthly budget across categories. Each
//! line carries a [`AllocationReason`] so fallback paths stay visible to the
//! caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::UserId;
use super::money::Money;
use super::period::Period;

/// Why a category received its amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationReason {
    /// Reserved up front by savings percentage
    Savings,
    /// Consistent monthly spend passed through as a fixed bill
    Fixed,
    /// Scaled from a forecast
    Forecast,
    /// Proportional to historical averages
    Historical,
    /// Equal split because no usable weights existed
    FallbackEqual,
}

impl AllocationReason {
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Savings => "savings",
            Self::Fixed => "fixed",
            Self::Forecast => "forecast",
            Self::Historical => "historical",
            Self::FallbackEqual => "fallback_equal",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Savings => "Automatic savings allocation",
            Self::Fixed => "Fixed bill (historical)",
            Self::Forecast => "Forecast-based",
            Self::Historical => "Historical average",
            Self::FallbackEqual => "Equal distribution (fallback)",
        }
    }
}

impl fmt::Display for AllocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One category's share of the budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub category: Category,
    pub amount: Money,
    /// Share of the whole budget, one decimal place
    pub percentage: f64,
    pub reason: AllocationReason,
}

impl Allocation {
    pub fn new(category: Category, amount: Money, reason: AllocationReason) -> Self {
        Self {
            category,
            amount,
            percentage: 0.0,
            reason,
        }
    }
}

/// A complete partition of one budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub budget_amount: Money,
    pub period: Period,
    /// Sorted by amount, largest first
    pub allocations: Vec<Allocation>,
}

impl AllocationResult {
    pub fn total_allocated(&self) -> Money {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    pub fn get(&self, category: Category) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.category == category)
    }

    /// Whether any line came from a degraded path
    pub fn used_fallback(&self) -> bool {
        self.allocations
            .iter()
            .any(|a| a.reason == AllocationReason::FallbackEqual)
    }
}

/// A persisted allocation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAllocation {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: AllocationResult,
}

impl SavedAllocation {
    pub fn new(user_id: UserId, result: AllocationResult) -> Self {
        Self {
            user_id,
            created_at: Utc::now(),
            result,
        }
    }
}
