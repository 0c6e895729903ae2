//! YAML Export functionality
//!
//! Same document as the JSON export, for reading and hand-editing.

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::export::json::AllocationExport;
use crate::models::AllocationResult;
use std::io::Write;

/// Export an allocation result to YAML
pub fn export_allocation_yaml<W: Write>(
    user: &str,
    result: &AllocationResult,
    writer: &mut W,
) -> BudgetwiseResult<()> {
    let export = AllocationExport::new(user, result.clone());

    writeln!(writer, "# Budgetwise Allocation Export")
        .map_err(|e| BudgetwiseError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| BudgetwiseError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| BudgetwiseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetwiseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetwiseError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allocation, AllocationReason, Category, Money, Period};

    #[test]
    fn test_yaml_export() {
        let result = AllocationResult {
            budget_amount: Money::from_units(1000),
            period: Period::new(2025, 12).unwrap(),
            allocations: vec![
                Allocation::new(Category::FoodDining, Money::from_units(900), AllocationReason::Historical),
                Allocation::new(Category::Savings, Money::from_units(100), AllocationReason::Savings),
            ],
        };

        let mut output = Vec::new();
        export_allocation_yaml("ana@example.com", &result, &mut output).unwrap();
        let yaml_string = String::from_utf8(output).unwrap();

        assert!(yaml_string.starts_with("# Budgetwise Allocation Export"));
        assert!(yaml_string.contains("user: ana@example.com"));

        let yaml_body: String = yaml_string
            .lines()
            .filter(|l| !l.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed: AllocationExport = serde_yaml::from_str(&yaml_body).unwrap();
        assert_eq!(parsed.allocation, result);
    }
}
