//! User repository for JSON storage
//!
//! Manages loading and saving users to users.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> BudgetwiseResult<()> {
        let file_data: UserData = read_json(&self.path)?;
        self.restore(file_data.users.into_iter().map(|u| (u.id, u)).collect())
    }

    /// Save users to disk, oldest first
    pub fn save(&self) -> BudgetwiseResult<()> {
        let users = self.get_all()?;
        write_json_atomic(&self.path, &UserData { users })
    }

    pub fn get(&self, id: UserId) -> BudgetwiseResult<Option<User>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(&id).cloned())
    }

    /// Find a user by email (case-insensitive)
    pub fn get_by_email(&self, email: &str) -> BudgetwiseResult<Option<User>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let email = email.trim().to_lowercase();
        Ok(data.values().find(|u| u.email == email).cloned())
    }

    /// All users in registration order
    pub fn get_all(&self) -> BudgetwiseResult<Vec<User>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.email.cmp(&b.email)));
        Ok(users)
    }

    pub fn upsert(&self, user: User) -> BudgetwiseResult<()> {
        let mut data = self.data.write().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(user.id, user);
        Ok(())
    }

    pub fn count(&self) -> BudgetwiseResult<usize> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }

    pub(crate) fn snapshot(&self) -> BudgetwiseResult<HashMap<UserId, User>> {
        let data = self.data.read().map_err(|e| {
            BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    pub(crate) fn restore(&self, snapshot: HashMap<UserId, User>) -> BudgetwiseResult<()> {
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
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, UserRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_lookup() {
        let (_temp_dir, repo) = create_test_repo();
        let user = User::new("Ana", "Ana@Example.com", None);
        let id = user.id;
        repo.upsert(user).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().name, "Ana");
        assert_eq!(repo.get_by_email(" ANA@example.com ").unwrap().unwrap().id, id);
        assert!(repo.get_by_email("bo@example.com").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(User::new("Ana", "ana@example.com", Some("555-0100".into())))
            .unwrap();
        repo.upsert(User::new("Bo", "bo@example.com", None)).unwrap();
        repo.save().unwrap();

        let reloaded = UserRepository::new(temp_dir.path().join("users.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 2);
    }

    #[test]
    fn test_snapshot_restore() {
        let (_temp_dir, repo) = create_test_repo();
        let snapshot = repo.snapshot().unwrap();
        repo.upsert(User::new("Ana", "ana@example.com", None)).unwrap();

        repo.restore(snapshot).unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }
}
