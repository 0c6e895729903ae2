//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod allocate;
pub mod budget;
pub mod category;
pub mod expense;
pub mod forecast;
pub mod user;

pub use allocate::{handle_allocate_command, AllocateArgs, OutputFormat};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::handle_categories_command;
pub use expense::{handle_expense_command, ExpenseCommands};
pub use forecast::{handle_forecast_command, ForecastCommands};
pub use user::{handle_user_command, UserCommands};

use chrono::{Local, NaiveDate};

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{Money, Period};

/// Today in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a period argument: "YYYY-MM", "current", "last" or "next"
///
/// `None` means the current period.
pub fn parse_period(arg: Option<&str>) -> BudgetwiseResult<Period> {
    let current = Period::containing(today());
    match arg.map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("current") | Some("this") => Ok(current),
        Some("last") | Some("prev") | Some("previous") => Ok(current.prev()),
        Some("next") => Ok(current.next()),
        Some(other) => {
            Period::parse(other).map_err(|e| BudgetwiseError::InvalidInput(e.to_string()))
        }
    }
}

/// Parse a date argument: "YYYY-MM-DD", "today" or "yesterday"
pub fn parse_date(arg: Option<&str>) -> BudgetwiseResult<NaiveDate> {
    let today = today();
    match arg.map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("today") => Ok(today),
        Some("yesterday") => Ok(today.pred_opt().unwrap_or(today)),
        Some(other) => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            BudgetwiseError::InvalidInput(format!("Invalid date '{}', expected YYYY-MM-DD", other))
        }),
    }
}

/// Parse a money argument such as "1500", "12.50" or "$1,200"
pub fn parse_amount(arg: &str) -> BudgetwiseResult<Money> {
    Money::parse(arg).map_err(|e| BudgetwiseError::InvalidInput(e.to_string()))
}
