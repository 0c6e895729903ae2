//! Spending categories
//!
//! The category set is fixed. Declaration order is also the iteration order
//! used by the allocator, which makes tie-breaks deterministic.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    FoodDining,
    BillsUtilities,
    Transport,
    Shopping,
    Entertainment,
    Healthcare,
    Savings,
    Other,
}

impl Category {
    /// Every category, in allocation order
    pub const ALL: [Category; 8] = [
        Category::FoodDining,
        Category::BillsUtilities,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Healthcare,
        Category::Savings,
        Category::Other,
    ];

    /// Display label, as stored and exported
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Savings => "Savings",
            Self::Other => "Other",
        }
    }

    /// Short, shell-friendly name
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::FoodDining => "food",
            Self::BillsUtilities => "bills",
            Self::Transport => "transport",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Healthcare => "healthcare",
            Self::Savings => "savings",
            Self::Other => "other",
        }
    }

    /// Parse a label or slug (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s) || c.slug().eq_ignore_ascii_case(s))
    }

    /// Parse, mapping anything unrecognised to `Other`
    pub fn parse_or_other(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Other)
    }

    pub const fn is_savings(&self) -> bool {
        matches!(self, Self::Savings)
    }

    /// Categories that receive distributed spending money (everything but Savings)
    pub fn variable() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(|c| !c.is_savings())
    }

    /// Prior share of spending used when scaling a forecast
    ///
    /// Policy table, not a fitted quantity. The non-savings weights sum to 1.0.
    pub const fn prior_weight(&self) -> f64 {
        match self {
            Self::FoodDining => 0.25,
            Self::BillsUtilities => 0.30,
            Self::Transport => 0.15,
            Self::Shopping => 0.10,
            Self::Entertainment => 0.08,
            Self::Healthcare => 0.07,
            Self::Savings => 0.0,
            Self::Other => 0.05,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Category::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown category: {}", s)))
    }
}
