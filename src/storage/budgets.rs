//! Budget repository for JSON storage
//!
//! Manages loading and saving monthly budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{Budget, BudgetId, Period, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> BudgetwiseResult<()> {
        let file_data: BudgetData = read_json(&self.path)?;
        self.restore(file_data.budgets.into_iter().map(|b| (b.id, b)).collect())
    }

    pub fn save(&self) -> BudgetwiseResult<()> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| a.period.cmp(&b.period).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    /// The budget in force for `period`, the most recently created if several
    pub fn get_for_period(&self, user: UserId, period: Period) -> BudgetwiseResult<Option<Budget>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .values()
            .filter(|b| b.user_id == user && b.period == period)
            .max_by_key(|b| b.created_at)
            .cloned())
    }

    /// All of a user's budgets, newest period first
    pub fn get_by_user(&self, user: UserId) -> BudgetwiseResult<Vec<Budget>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut budgets: Vec<_> = data.values().filter(|b| b.user_id == user).cloned().collect();
        budgets.sort_by(|a, b| b.period.cmp(&a.period));
        Ok(budgets)
    }

    pub fn upsert(&self, budget: Budget) -> BudgetwiseResult<()> {
        let mut data = self.data.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(budget.id, budget);
        Ok(())
    }

    pub(crate) fn snapshot(&self) -> BudgetwiseResult<HashMap<BudgetId, Budget>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    pub(crate) fn restore(&self, snapshot: HashMap<BudgetId, Budget>) -> BudgetwiseResult<()> {
        let mut data = self.data.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = snapshot;
        Ok(())
    }
}
