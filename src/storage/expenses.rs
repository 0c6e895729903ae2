//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with a per-user index.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{Expense, ExpenseId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a user index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: user_id -> expense_ids
    by_user: RwLock<HashMap<UserId, Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and rebuild the index
    pub fn load(&self) -> BudgetwiseResult<()> {
        let file_data: ExpenseData = read_json(&self.path)?;
        self.restore(file_data.expenses.into_iter().map(|e| (e.id, e)).collect())
    }

    /// Save expenses to disk, newest first
    pub fn save(&self) -> BudgetwiseResult<()> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut expenses);

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    pub fn get(&self, id: ExpenseId) -> BudgetwiseResult<Option<Expense>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(&id).cloned())
    }

    /// A user's expenses, newest first
    pub fn get_by_user(&self, user: UserId) -> BudgetwiseResult<Vec<Expense>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_user = self.by_user.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_user.get(&user).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// A user's expenses dated within `[start, end]`; open ends are unbounded
    pub fn get_by_user_in_range(
        &self,
        user: UserId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> BudgetwiseResult<Vec<Expense>> {
        let all = self.get_by_user(user)?;
        Ok(all
            .into_iter()
            .filter(|e| start.map_or(true, |s| e.date >= s) && end.map_or(true, |d| e.date <= d))
            .collect())
    }

    pub fn upsert(&self, expense: Expense) -> BudgetwiseResult<()> {
        let mut data = self.data.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_user.get_mut(&old.user_id) {
                ids.retain(|&id| id != expense.id);
            }
        }
        by_user.entry(expense.user_id).or_default().push(expense.id);

        data.insert(expense.id, expense);
        Ok(())
    }

    /// Remove an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> BudgetwiseResult<Option<Expense>> {
        let mut data = self.data.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data.remove(&id);
        if let Some(expense) = &removed {
            if let Some(ids) = by_user.get_mut(&expense.user_id) {
                ids.retain(|&other| other != id);
            }
        }
        Ok(removed)
    }

    pub fn count(&self) -> BudgetwiseResult<usize> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }

    pub(crate) fn snapshot(&self) -> BudgetwiseResult<HashMap<ExpenseId, Expense>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    /// Replace the contents and rebuild the index
    pub(crate) fn restore(&self, snapshot: HashMap<ExpenseId, Expense>) -> BudgetwiseResult<()> {
        let mut data = self.data.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        by_user.clear();
        for expense in snapshot.values() {
            by_user.entry(expense.user_id).or_default().push(expense.id);
        }
        *data = snapshot;
        Ok(())
    }
}

fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}
