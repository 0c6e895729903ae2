//! Audit logging for Budgetwise
//!
//! Every create, update and delete made through the services is appended to
//! `audit.log` as one JSON line, with before/after snapshots of the record.
//!
//! ```rust,ignore
//! use budgetwise::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::User,
//!     user.id.to_string(),
//!     Some(user.email.clone()),
//!     &user,
//! ))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
