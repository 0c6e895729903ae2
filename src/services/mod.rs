//! Service layer for Budgetwise
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, budget checks, audit logging, and the glue between
//! stored data, the forecaster and the allocator.

pub mod allocation;
pub mod budget;
pub mod expense;
pub mod forecast;
pub mod import;
pub mod user;

pub use allocation::AllocationService;
pub use budget::BudgetService;
pub use expense::{ExpenseFilter, ExpenseService, ExpenseStats};
pub use forecast::ForecastService;
pub use import::{ColumnMapping, ImportResult, ImportService, ParsedExpense};
pub use user::UserService;
