//! User settings for Budgetwise
//!
//! Display preferences, allocation defaults, and the storage retry policy.

use serde::{Deserialize, Serialize};

use super::paths::BudgetwisePaths;
use crate::allocator::{
    AllocationPolicy, DEFAULT_FIXED_BILL_THRESHOLD, DEFAULT_HISTORY_MONTHS, DEFAULT_MIN_RESERVE,
    DEFAULT_SAVINGS_PERCENT,
};
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::Money;
use crate::storage::file_io::write_json_atomic;

/// Defaults applied by `budgetwise allocate` when flags are omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationPreferences {
    /// Percentage of the budget reserved for savings (0-100)
    pub savings_percent: f64,
    /// Informational floor for the spendable remainder
    pub min_reserve: Money,
    /// Scale by the trained forecast instead of history
    pub use_forecast: bool,
    /// CV below which a category counts as a fixed bill
    pub fixed_bill_threshold: f64,
    /// Lookback window for historical averages
    pub history_months: u32,
    /// Days predicted by `forecast show`
    pub forecast_horizon_days: u32,
}

impl Default for AllocationPreferences {
    fn default() -> Self {
        Self {
            savings_percent: DEFAULT_SAVINGS_PERCENT,
            min_reserve: DEFAULT_MIN_RESERVE,
            use_forecast: true,
            fixed_bill_threshold: DEFAULT_FIXED_BILL_THRESHOLD,
            history_months: DEFAULT_HISTORY_MONTHS,
            forecast_horizon_days: 30,
        }
    }
}

impl AllocationPreferences {
    pub fn policy(&self) -> AllocationPolicy {
        AllocationPolicy {
            fixed_bill_threshold: self.fixed_bill_threshold,
            history_months: self.history_months,
        }
    }
}

/// Bounded retry for storage commits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 50,
            multiplier: 2.0,
        }
    }
}

/// User settings for Budgetwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub allocation: AllocationPreferences,

    #[serde(default)]
    pub retry: RetrySettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            allocation: AllocationPreferences::default(),
            retry: RetrySettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if no file exists
    ///
    /// Defaults are not written back; `budgetwise init` does that.
    pub fn load_or_create(paths: &BudgetwisePaths) -> BudgetwiseResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetwiseError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| BudgetwiseError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetwisePaths) -> BudgetwiseResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
