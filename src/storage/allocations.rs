//! Saved allocation runs
//!
//! Append-only history in allocations.json; the latest run for a period is
//! the one shown back to the user.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{Period, SavedAllocation, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AllocationData {
    allocations: Vec<SavedAllocation>,
}

pub struct AllocationRepository {
    path: PathBuf,
    data: RwLock<Vec<SavedAllocation>>,
}

impl AllocationRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> BudgetwiseResult<()> {
        let file_data: AllocationData = read_json(&self.path)?;
        self.restore(file_data.allocations)
    }

    pub fn save(&self) -> BudgetwiseResult<()> {
        let allocations = self.snapshot()?;
        write_json_atomic(&self.path, &AllocationData { allocations })
    }

    pub fn push(&self, saved: SavedAllocation) -> BudgetwiseResult<()> {
        let mut data = self.data.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.push(saved);
        Ok(())
    }

    /// Most recent run for a user and period
    pub fn latest(&self, user: UserId, period: Period) -> BudgetwiseResult<Option<SavedAllocation>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .iter()
            .filter(|s| s.user_id == user && s.result.period == period)
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    pub fn count(&self) -> BudgetwiseResult<usize> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }

    pub(crate) fn snapshot(&self) -> BudgetwiseResult<Vec<SavedAllocation>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    pub(crate) fn restore(&self, snapshot: Vec<SavedAllocation>) -> BudgetwiseResult<()> {
        let mut data = self.data.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = snapshot;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allocation, AllocationReason, AllocationResult, Category, Money};
    use tempfile::TempDir;

    fn result(period: Period, units: i64) -> AllocationResult {
        AllocationResult {
            budget_amount: Money::from_units(units),
            period,
            allocations: vec![Allocation::new(
                Category::Other,
                Money::from_units(units),
                AllocationReason::FallbackEqual,
            )],
        }
    }

    #[test]
    fn test_latest_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("allocations.json");
        let repo = AllocationRepository::new(path.clone());
        let user = UserId::new();
        let december = Period::new(2025, 12).unwrap();

        let mut older = SavedAllocation::new(user, result(december, 100));
        older.created_at -= chrono::Duration::minutes(5);
        repo.push(older).unwrap();
        repo.push(SavedAllocation::new(user, result(december, 200)))
            .unwrap();
        repo.save().unwrap();

        let reloaded = AllocationRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 2);
        let latest = reloaded.latest(user, december).unwrap().unwrap();
        assert_eq!(latest.result.budget_amount, Money::from_units(200));
        assert!(reloaded
            .latest(user, Period::new(2026, 1).unwrap())
            .unwrap()
            .is_none());
    }
}
