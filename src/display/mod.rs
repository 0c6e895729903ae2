//! Display formatting for terminal output
//!
//! Lists are rendered as tables with `tabled`; single-record views are
//! plain aligned text.

pub mod allocation;
pub mod budget;
pub mod expense;
pub mod forecast;
pub mod format;
pub mod user;

pub use allocation::format_allocation;
pub use budget::{format_budget_history, format_budget_status};
pub use expense::{format_expense_list, format_expense_stats};
pub use forecast::format_forecast;
pub use user::format_user_list;
