//! Export module for Budgetwise
//!
//! Writes allocation results and expense history in several formats:
//! - CSV: spreadsheet-compatible rows
//! - JSON: machine-readable, with schema version and export metadata
//! - YAML: the JSON document in human-readable form, with a header comment

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_allocation_csv, export_expenses_csv};
pub use json::{export_allocation_json, AllocationExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_allocation_yaml;
