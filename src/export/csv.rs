//! CSV Export functionality
//!
//! Exports allocation results and expense lists to CSV format.

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{AllocationResult, Expense};
use std::io::Write;

/// Export one allocation result, one row per category
pub fn export_allocation_csv<W: Write>(
    result: &AllocationResult,
    writer: &mut W,
) -> BudgetwiseResult<()> {
    writeln!(writer, "Period,Category,Amount,Percentage,Reason")
        .map_err(|e| BudgetwiseError::Export(e.to_string()))?;

    for allocation in &result.allocations {
        writeln!(
            writer,
            "{},{},{:.2},{:.1},{}",
            result.period,
            escape_csv(allocation.category.label()),
            allocation.amount.as_f64(),
            allocation.percentage,
            allocation.reason.tag()
        )
        .map_err(|e| BudgetwiseError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Export expenses in the order given
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: &mut W) -> BudgetwiseResult<()> {
    writeln!(writer, "ID,Date,Category,Amount,Description")
        .map_err(|e| BudgetwiseError::Export(e.to_string()))?;

    for expense in expenses {
        writeln!(
            writer,
            "{},{},{},{:.2},{}",
            expense.id.full(),
            expense.date,
            escape_csv(expense.category.label()),
            expense.amount.as_f64(),
            escape_csv(&expense.description)
        )
        .map_err(|e| BudgetwiseError::Export(e.to_string()))?;
    }

    Ok(())
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allocation, AllocationReason, Category, Money, Period, UserId};
    use chrono::NaiveDate;

    #[test]
    fn test_export_allocation_csv() {
        let mut savings = Allocation::new(Category::Savings, Money::from_units(100), AllocationReason::Savings);
        savings.percentage = 10.0;
        let mut food = Allocation::new(Category::FoodDining, Money::from_cents(90050), AllocationReason::Historical);
        food.percentage = 90.0;
        let result = AllocationResult {
            budget_amount: Money::from_cents(100050),
            period: Period::new(2025, 12).unwrap(),
            allocations: vec![food, savings],
        };

        let mut output = Vec::new();
        export_allocation_csv(&result, &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();

        let lines: Vec<&str> = csv_string.lines().collect();
        assert_eq!(lines[0], "Period,Category,Amount,Percentage,Reason");
        assert_eq!(lines[1], "2025-12,Food & Dining,900.50,90.0,historical");
        assert_eq!(lines[2], "2025-12,Savings,100.00,10.0,savings");
    }

    #[test]
    fn test_export_expenses_csv_escapes() {
        let expense = Expense::new(
            UserId::new(),
            Category::Shopping,
            Money::from_cents(1999),
            "Socks, \"wool\"",
            NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
        );

        let mut output = Vec::new();
        export_expenses_csv(&[expense], &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();

        assert!(csv_string.contains("2025-11-03,Shopping,19.99,\"Socks, \"\"wool\"\"\""));
    }
}
