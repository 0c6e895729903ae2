//! User service
//!
//! Registration and lookup. Users are identified on the command line by
//! email or by ID (full UUID or the short `usr-` form).

use crate::audit::EntityType;
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user
    pub fn register(&self, name: &str, email: &str, phone: Option<&str>) -> BudgetwiseResult<User> {
        let phone = phone.map(str::trim).filter(|p| !p.is_empty()).map(String::from);
        let user = User::new(name.trim(), email, phone);

        user.validate()
            .map_err(|e| BudgetwiseError::Validation(e.to_string()))?;

        if self.storage.users.get_by_email(&user.email)?.is_some() {
            return Err(BudgetwiseError::Duplicate {
                entity_type: "User",
                identifier: user.email.clone(),
            });
        }

        self.storage
            .transaction(|s| s.users.upsert(user.clone()))?;

        self.storage.log_create(
            EntityType::User,
            user.id.to_string(),
            Some(user.email.clone()),
            &user,
        )?;

        tracing::info!(user = %user.id, "user registered");
        Ok(user)
    }

    pub fn get(&self, id: UserId) -> BudgetwiseResult<Option<User>> {
        self.storage.users.get(id)
    }

    /// Find a user by email or ID string
    pub fn find(&self, identifier: &str) -> BudgetwiseResult<Option<User>> {
        let identifier = identifier.trim();

        if let Some(user) = self.storage.users.get_by_email(identifier)? {
            return Ok(Some(user));
        }

        if let Ok(id) = identifier.parse::<UserId>() {
            return self.storage.users.get(id);
        }

        // Short display form, e.g. "usr-1a2b3c4d"
        Ok(self
            .storage
            .users
            .get_all()?
            .into_iter()
            .find(|u| u.id.to_string() == identifier))
    }

    /// Like [`find`](Self::find), but a missing user is an error
    pub fn require(&self, identifier: &str) -> BudgetwiseResult<User> {
        self.find(identifier)?
            .ok_or_else(|| BudgetwiseError::user_not_found(identifier))
    }

    pub fn list(&self) -> BudgetwiseResult<Vec<User>> {
        self.storage.users.get_all()
    }
}
