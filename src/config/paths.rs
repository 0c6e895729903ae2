//! Path management for Budgetwise
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGETWISE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME` or `~/.config` on
//!    Unix, `%APPDATA%` on Windows) joined with `budgetwise`

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::{BudgetwiseError, BudgetwiseResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BUDGETWISE_DATA_DIR";

/// Manages all paths used by Budgetwise
#[derive(Debug, Clone)]
pub struct BudgetwisePaths {
    base_dir: PathBuf,
}

impl BudgetwisePaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no override
    /// is set.
    pub fn new() -> BudgetwiseResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the entity files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Trained forecast models, one per user
    pub fn models_file(&self) -> PathBuf {
        self.data_dir().join("models.json")
    }

    /// Saved allocation runs
    pub fn allocations_file(&self) -> PathBuf {
        self.data_dir().join("allocations.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> BudgetwiseResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            BudgetwiseError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            BudgetwiseError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }

    /// Whether `budgetwise init` has been run (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> BudgetwiseResult<PathBuf> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| BudgetwiseError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("budgetwise"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetwisePaths::with_base_dir(temp_dir.path());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var(DATA_DIR_ENV, temp_dir.path());
        let paths = BudgetwisePaths::new().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetwisePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetwisePaths::with_base_dir(temp_dir.path());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(
            paths.expenses_file(),
            temp_dir.path().join("data").join("expenses.json")
        );
        assert_eq!(
            paths.models_file(),
            temp_dir.path().join("data").join("models.json")
        );
    }
}
