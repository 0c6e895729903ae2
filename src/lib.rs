//! Budgetwise - personal spending tracker with forecast-driven budgeting
//!
//! This library provides the core functionality for the Budgetwise command
//! line application: users log expenses against monthly budgets, a small
//! per-user model forecasts daily spending, and the allocator splits a
//! monthly budget across spending categories.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Diagnostic tracing setup
//! - `models`: Core data models (users, budgets, expenses, allocations)
//! - `storage`: JSON file storage layer with transactional commits
//! - `audit`: Audit logging system
//! - `forecast`: Spending model and forecast provider
//! - `allocator`: Pure budget allocation engine
//! - `services`: Business logic layer
//! - `export`: CSV, JSON and YAML output
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetwise::allocator::{distribute_budget, AllocationInputs, AllocationPolicy, DistributionRequest};
//! use budgetwise::models::{Money, Period};
//!
//! let request = DistributionRequest::new(Money::from_units(3000), Period::new(2025, 12)?)
//!     .with_forecast(false);
//! let inputs = AllocationInputs::historical(&history, today);
//! let result = distribute_budget(&request, &inputs, &AllocationPolicy::default())?;
//! assert_eq!(result.total_allocated(), Money::from_units(3000));
//! ```

pub mod allocator;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod forecast;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BudgetwiseError, BudgetwiseResult};
