//! Core data models for Budgetwise
//!
//! Users, budgets, expenses, forecast points and allocation results. All
//! amounts are [`Money`] in cents.

pub mod allocation;
pub mod budget;
pub mod category;
pub mod expense;
pub mod forecast;
pub mod ids;
pub mod money;
pub mod period;
pub mod user;

pub use allocation::{Allocation, AllocationReason, AllocationResult, SavedAllocation};
pub use budget::{Budget, BudgetStatus};
pub use category::Category;
pub use expense::{Expense, SpendRecord};
pub use forecast::{predicted_total, ForecastPoint};
pub use ids::{BudgetId, ExpenseId, UserId};
pub use money::Money;
pub use period::Period;
pub use user::User;
