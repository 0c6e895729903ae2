//! Forecast model repository
//!
//! One trained model per user, stored in models.json. Retraining replaces the
//! previous model.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::forecast::ForecastModel;
use crate::models::UserId;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ModelData {
    models: Vec<ForecastModel>,
}

pub struct ModelRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, ForecastModel>>,
}

impl ModelRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> BudgetwiseResult<()> {
        let file_data: ModelData = read_json(&self.path)?;
        self.restore(file_data.models.into_iter().map(|m| (m.user_id, m)).collect())
    }

    pub fn save(&self) -> BudgetwiseResult<()> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut models: Vec<_> = data.values().cloned().collect();
        models.sort_by(|a, b| a.trained_at.cmp(&b.trained_at));

        write_json_atomic(&self.path, &ModelData { models })
    }

    pub fn get(&self, user: UserId) -> BudgetwiseResult<Option<ForecastModel>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(&user).cloned())
    }

    /// Store a model, returning the one it replaced
    pub fn upsert(&self, model: ForecastModel) -> BudgetwiseResult<Option<ForecastModel>> {
        let mut data = self.data.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        Ok(data.insert(model.user_id, model))
    }

    pub(crate) fn snapshot(&self) -> BudgetwiseResult<HashMap<UserId, ForecastModel>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    pub(crate) fn restore(&self, snapshot: HashMap<UserId, ForecastModel>) -> BudgetwiseResult<()> {
        let mut data = self.data.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = snapshot;
        Ok(())
    }
}
