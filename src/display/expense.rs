//! Expense display formatting
//!
//! Register-style table for expense lists and a summary view for stats.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Expense;
use crate::services::ExpenseStats;

use super::format::{separator, truncate};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format a list of expenses as a table with a total line
pub fn format_expense_list(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format("%Y-%m-%d").to_string(),
        category: e.category.to_string(),
        amount: e.amount.format_with_symbol(symbol),
        description: truncate(&e.description, 30),
    });

    let total: crate::models::Money = expenses.iter().map(|e| e.amount).sum();

    format!(
        "{}\n{} expense(s), total {}",
        Table::new(rows).with(Style::psql()),
        expenses.len(),
        total.format_with_symbol(symbol)
    )
}

/// Format spending statistics
pub fn format_expense_stats(stats: &ExpenseStats, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Spending Summary\n");
    output.push_str(&separator(32));
    output.push('\n');
    output.push_str(&format!("  Today:          {:>12}\n", stats.today.format_with_symbol(symbol)));
    output.push_str(&format!("  Last 7 days:    {:>12}\n", stats.last_7_days.format_with_symbol(symbol)));
    output.push_str(&format!("  Month to date:  {:>12}\n", stats.month_to_date.format_with_symbol(symbol)));
    output.push_str(&format!("  Largest:        {:>12}\n", stats.largest.format_with_symbol(symbol)));
    output.push_str(&format!("  Expenses:       {:>12}\n", stats.count));

    if !stats.by_category.is_empty() {
        output.push_str("\nBy category\n");
        output.push_str(&separator(32));
        output.push('\n');
        for (category, total) in &stats.by_category {
            output.push_str(&format!(
                "  {:<18}{:>12}\n",
                category.label(),
                total.format_with_symbol(symbol)
            ));
        }
    }

    output
}
