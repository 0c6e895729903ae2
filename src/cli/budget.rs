//! Budget CLI commands
//!
//! Monthly budget amounts and how spending stands against them.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_budget_history, format_budget_status};
use crate::error::BudgetwiseResult;
use crate::services::{BudgetService, UserService};
use crate::storage::Storage;

use super::{parse_amount, parse_period};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the budget for a month
    Set {
        /// User email or ID
        user: String,
        /// Amount (e.g., "3000" or "3000.00")
        amount: String,
        /// Budget period (e.g., "2025-01", "current", "next")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Show budget, spent and remaining for a month
    Show {
        /// User email or ID
        user: String,
        /// Budget period (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// List every budget a user has set
    History {
        /// User email or ID
        user: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> BudgetwiseResult<()> {
    let users = UserService::new(storage);
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set {
            user,
            amount,
            period,
        } => {
            let user = users.require(&user)?;
            let period = parse_period(period.as_deref())?;
            let budget = service.set(&user, period, parse_amount(&amount)?)?;
            println!(
                "Budget for {} set to {}",
                budget.period,
                budget.amount.format_with_symbol(symbol)
            );
        }
        BudgetCommands::Show { user, period } => {
            let user = users.require(&user)?;
            let period = parse_period(period.as_deref())?;
            print!("{}", format_budget_status(&service.status(&user, period)?, symbol));
        }
        BudgetCommands::History { user } => {
            let user = users.require(&user)?;
            println!("{}", format_budget_history(&service.history(&user)?, symbol));
        }
    }

    Ok(())
}
