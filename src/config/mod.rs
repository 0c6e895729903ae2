//! Configuration module for Budgetwise
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Allocation defaults and storage retry tuning

pub mod paths;
pub mod settings;

pub use paths::BudgetwisePaths;
pub use settings::{AllocationPreferences, RetrySettings, Settings};
