//! User model
//!
//! Users own budgets, expenses and forecast models. There is no credential
//! handling; a user is identified by email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into().trim().to_lowercase(),
            phone,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if self.name.len() > 100 {
            return Err(UserValidationError::NameTooLong(self.name.len()));
        }
        let valid_email = match self.email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
            }
            None => false,
        };
        if !valid_email {
            return Err(UserValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidEmail(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "User name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "User name too long ({} chars, max 100)", len),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{}'", email),
        }
    }
}

impl std::error::Error for UserValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalised() {
        let user = User::new("Ana", "  Ana@Example.COM ", None);
        assert_eq!(user.email, "ana@example.com");
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            User::new(" ", "a@b.co", None).validate(),
            Err(UserValidationError::EmptyName)
        );
        assert!(matches!(
            User::new("Ana", "not-an-email", None).validate(),
            Err(UserValidationError::InvalidEmail(_))
        ));
        assert!(User::new("Ana", "ana@localhost", None).validate().is_err());
    }
}
