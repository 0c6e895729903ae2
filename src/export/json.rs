//! JSON Export functionality
//!
//! Exports an allocation result with schema versioning.

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::AllocationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// An allocation result as written to disk or stdout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Email of the user the budget belongs to
    pub user: String,

    #[serde(flatten)]
    pub allocation: AllocationResult,
}

impl AllocationExport {
    pub fn new(user: impl Into<String>, allocation: AllocationResult) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user: user.into(),
            allocation,
        }
    }
}

/// Export an allocation result to JSON
pub fn export_allocation_json<W: Write>(
    user: &str,
    result: &AllocationResult,
    writer: &mut W,
    pretty: bool,
) -> BudgetwiseResult<()> {
    let export = AllocationExport::new(user, result.clone());

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| BudgetwiseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetwiseError::Export(e.to_string()))?;

    Ok(())
}
