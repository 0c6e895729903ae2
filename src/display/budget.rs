//! Budget display formatting

use crate::models::{Budget, BudgetStatus};

use super::format::format_bar;

/// Format the budget position for one period
pub fn format_budget_status(status: &BudgetStatus, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget for {}\n", status.period));
    output.push_str(&format!(
        "  Budget:     {:>12}\n",
        status.budget.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Spent:      {:>12}\n",
        status.spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Remaining:  {:>12}\n",
        status.remaining.format_with_symbol(symbol)
    ));

    let used = status.percent_used();
    output.push_str(&format!(
        "  Used:       {} {:.1}%\n",
        format_bar(used, 100.0, 20),
        used
    ));

    if status.is_over() {
        output.push_str(&format!(
            "\n  Over budget by {}\n",
            status.remaining.abs().format_with_symbol(symbol)
        ));
    }

    output
}

/// One line per budget, newest period first
pub fn format_budget_history(budgets: &[Budget], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.".to_string();
    }

    budgets
        .iter()
        .map(|b| format!("{}  {:>12}", b.period, b.amount.format_with_symbol(symbol)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Period, UserId};

    #[test]
    fn test_status_within_budget() {
        let status = BudgetStatus::new(
            Period::new(2025, 11).unwrap(),
            Money::from_units(1000),
            Money::from_units(250),
        );
        let output = format_budget_status(&status, "$");

        assert!(output.starts_with("Budget for 2025-11"));
        assert!(output.contains("$750.00"));
        assert!(output.contains("25.0%"));
        assert!(!output.contains("Over budget"));
    }

    #[test]
    fn test_status_over_budget() {
        let status = BudgetStatus::new(
            Period::new(2025, 11).unwrap(),
            Money::from_units(100),
            Money::from_units(130),
        );
        assert!(format_budget_status(&status, "€").contains("Over budget by €30.00"));
    }

    #[test]
    fn test_history() {
        let budget = Budget::new(UserId::new(), Period::new(2025, 12).unwrap(), Money::from_units(3000));
        assert!(format_budget_history(&[budget], "$").contains("2025-12"));
        assert_eq!(format_budget_history(&[], "$"), "No budgets set.");
    }
}
