//! Custom error types for Budgetwise
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for Budgetwise operations
#[derive(Error, Debug)]
pub enum BudgetwiseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid allocation request (non-positive budget, malformed period, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A forecast was requested but none could be supplied
    #[error("Forecast unavailable: {0}")]
    ForecastUnavailable(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Adding an expense would push spending past the period budget
    #[error(
        "Budget exceeded for {period}: budget {budget}, spent {spent}, remaining {remaining}, \
         attempted {attempted} (would exceed by {would_exceed_by})"
    )]
    BudgetExceeded {
        period: String,
        budget: Money,
        spent: Money,
        remaining: Money,
        attempted: Money,
        would_exceed_by: Money,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BudgetwiseError {
    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for allocation results
    pub fn allocation_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Allocation",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidInput(_))
    }

    /// Whether retrying the failed operation could succeed
    ///
    /// Only transient file-system failures qualify; data errors never do.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Storage(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BudgetwiseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetwiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BudgetwiseError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for Budgetwise operations
pub type BudgetwiseResult<T> = Result<T, BudgetwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetwiseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetwiseError::user_not_found("ana@example.com");
        assert_eq!(err.to_string(), "User not found: ana@example.com");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_budget_exceeded_error() {
        let err = BudgetwiseError::BudgetExceeded {
            period: "2025-11".into(),
            budget: Money::from_units(1000),
            spent: Money::from_units(700),
            remaining: Money::from_units(300),
            attempted: Money::from_units(500),
            would_exceed_by: Money::from_units(200),
        };
        assert!(err.to_string().starts_with("Budget exceeded for 2025-11"));
        assert!(err.to_string().contains("would exceed by $200.00"));
    }

    #[test]
    fn test_retryable() {
        assert!(BudgetwiseError::Io("locked".into()).is_retryable());
        assert!(BudgetwiseError::Storage("rename failed".into()).is_retryable());
        assert!(!BudgetwiseError::InvalidInput("budget".into()).is_retryable());
        assert!(!BudgetwiseError::ForecastUnavailable("no model".into()).is_retryable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BudgetwiseError = io_err.into();
        assert!(matches!(err, BudgetwiseError::Io(_)));
    }
}
