//! Strongly-typed ID wrappers
//!
//! Newtype wrappers keep user, expense and budget IDs from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Full, unabbreviated form (no prefix)
            pub fn full(&self) -> String {
                self.0.to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(UserId, "usr-");
define_id!(ExpenseId, "exp-");
define_id!(BudgetId, "bud-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_prefixed_and_short() {
        let id = UserId::new();
        let shown = id.to_string();
        assert!(shown.starts_with("usr-"));
        assert_eq!(shown.len(), 12);
    }

    #[test]
    fn test_parse_full_uuid_with_or_without_prefix() {
        let id = ExpenseId::new();
        assert_eq!(id.full().parse::<ExpenseId>().unwrap(), id);
        assert_eq!(format!("exp-{}", id.full()).parse::<ExpenseId>().unwrap(), id);
        assert!("exp-nope".parse::<ExpenseId>().is_err());
    }
}
