//! Allocation display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::AllocationResult;

use super::format::format_bar;

#[derive(Tabled)]
struct AllocationRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
    #[tabled(rename = "Basis")]
    reason: String,
}

/// Format an allocation result as a table, largest share first
pub fn format_allocation(result: &AllocationResult, symbol: &str) -> String {
    let mut output = format!(
        "Allocation for {}: {}\n",
        result.period,
        result.budget_amount.format_with_symbol(symbol)
    );

    let rows = result.allocations.iter().map(|a| AllocationRow {
        category: a.category.to_string(),
        amount: a.amount.format_with_symbol(symbol),
        share: format!("{:.1}%", a.percentage),
        bar: format_bar(a.percentage, 100.0, 20),
        reason: a.reason.to_string(),
    });
    output.push_str(&Table::new(rows).with(Style::psql()).to_string());
    output.push('\n');

    output.push_str(&format!(
        "Total allocated: {}\n",
        result.total_allocated().format_with_symbol(symbol)
    ));
    if result.used_fallback() {
        output.push_str("Note: not enough spending data; part of the budget was split equally.\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allocation, AllocationReason, Category, Money, Period};

    #[test]
    fn test_format_allocation() {
        let mut savings = Allocation::new(Category::Savings, Money::from_units(200), AllocationReason::Savings);
        savings.percentage = 10.0;
        let mut other = Allocation::new(Category::Other, Money::from_units(1800), AllocationReason::FallbackEqual);
        other.percentage = 90.0;
        let result = AllocationResult {
            budget_amount: Money::from_units(2000),
            period: Period::new(2025, 12).unwrap(),
            allocations: vec![other, savings],
        };

        let output = format_allocation(&result, "$");
        assert!(output.starts_with("Allocation for 2025-12: $2000.00"));
        assert!(output.contains("Automatic savings allocation"));
        assert!(output.contains("90.0%"));
        assert!(output.contains("Total allocated: $2000.00"));
        assert!(output.contains("split equally"));
    }
}
