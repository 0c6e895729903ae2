//! Expense CLI commands

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{format_expense_list, format_expense_stats};
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::export::export_expenses_csv;
use crate::models::Category;
use crate::services::{ExpenseFilter, ExpenseService, ImportService, UserService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_period, today};

/// Output format for expense lists
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    Table,
    Csv,
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Log an expense
    Add {
        /// User email or ID
        user: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category name or short name (e.g., "food", "Bills & Utilities")
        #[arg(short, long, default_value = "other")]
        category: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Date (YYYY-MM-DD, "today", "yesterday")
        #[arg(long)]
        date: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// User email or ID
        user: String,
        /// Only this month (e.g., "2025-01", "current")
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        period: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(short, long, value_enum, default_value = "table")]
        format: ListFormat,
    },

    /// Show spending statistics
    Stats {
        /// User email or ID
        user: String,
    },

    /// Import expenses from a CSV file (no budget checks)
    Import {
        /// User email or ID
        user: String,
        /// Path to CSV file
        file: PathBuf,
    },

    /// Delete an expense
    Delete {
        /// User email or ID
        user: String,
        /// Expense ID
        id: String,
    },
}

fn parse_category(arg: &str) -> BudgetwiseResult<Category> {
    Category::parse(arg).ok_or_else(|| {
        BudgetwiseError::InvalidInput(format!(
            "Unknown category '{}'. Run 'budgetwise categories' to see the list.",
            arg
        ))
    })
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetwiseResult<()> {
    let users = UserService::new(storage);
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            user,
            amount,
            category,
            description,
            date,
        } => {
            let user = users.require(&user)?;
            let expense = service.add(
                &user,
                parse_category(&category)?,
                parse_amount(&amount)?,
                &description,
                parse_date(date.as_deref())?,
            )?;
            println!(
                "Logged {} for {} on {}",
                expense.amount.format_with_symbol(symbol),
                expense.category,
                expense.date
            );
            println!("  ID: {}", expense.id);
        }
        ExpenseCommands::List {
            user,
            period,
            from,
            to,
            category,
            limit,
            format,
        } => {
            let user = users.require(&user)?;

            let mut filter = match period {
                Some(period) => ExpenseFilter::new().period(parse_period(Some(&period))?),
                None => ExpenseFilter::new().date_range(
                    from.as_deref().map(|d| parse_date(Some(d))).transpose()?,
                    to.as_deref().map(|d| parse_date(Some(d))).transpose()?,
                ),
            };
            if let Some(category) = category {
                filter = filter.category(parse_category(&category)?);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let expenses = service.list(&user, &filter)?;
            match format {
                ListFormat::Table => println!("{}", format_expense_list(&expenses, symbol)),
                ListFormat::Csv => {
                    let mut stdout = std::io::stdout().lock();
                    export_expenses_csv(&expenses, &mut stdout)?;
                }
            }
        }
        ExpenseCommands::Stats { user } => {
            let user = users.require(&user)?;
            print!("{}", format_expense_stats(&service.stats(&user, today())?, symbol));
        }
        ExpenseCommands::Import { user, file } => {
            let user = users.require(&user)?;
            let import = ImportService::new(storage);

            let parsed = import.parse_csv_file(&file)?;
            let result = import.import_expenses(&user, &parsed)?;

            println!("Imported {} expense(s) from {}", result.imported, file.display());
            if result.errors > 0 {
                println!("{} row(s) skipped:", result.errors);
                for (row, message) in &result.error_messages {
                    println!("  row {}: {}", row, message);
                }
            }
        }
        ExpenseCommands::Delete { user, id } => {
            let user = users.require(&user)?;
            let expense = service.delete(&user, &id)?;
            println!("Deleted expense {} ({})", expense.id, expense);
        }
    }

    Ok(())
}
