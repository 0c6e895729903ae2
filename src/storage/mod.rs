//! Storage layer for Budgetwise
//!
//! JSON files with atomic writes, one repository per entity, all owned by a
//! [`Storage`] opened once per process and passed by reference to the
//! services. Writes that touch several repositories go through
//! [`Storage::transaction`].

pub mod allocations;
pub mod budgets;
pub mod expenses;
pub mod file_io;
pub mod models;
pub mod retry;
pub mod users;

pub use allocations::AllocationRepository;
pub use budgets::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use models::ModelRepository;
pub use retry::RetryPolicy;
pub use users::UserRepository;

use std::collections::HashMap;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BudgetwisePaths;
use crate::error::BudgetwiseResult;
use crate::forecast::ForecastModel;
use crate::models::{Budget, BudgetId, Expense, ExpenseId, SavedAllocation, User, UserId};

/// In-memory copy of every repository, taken when a transaction begins
struct Snapshot {
    users: HashMap<UserId, User>,
    budgets: HashMap<BudgetId, Budget>,
    expenses: HashMap<ExpenseId, Expense>,
    models: HashMap<UserId, ForecastModel>,
    allocations: Vec<SavedAllocation>,
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetwisePaths,
    retry: RetryPolicy,
    audit: AuditLogger,
    pub users: UserRepository,
    pub budgets: BudgetRepository,
    pub expenses: ExpenseRepository,
    pub models: ModelRepository,
    pub allocations: AllocationRepository,
}

impl Storage {
    /// Create the directories and load every repository from disk
    pub fn open(paths: BudgetwisePaths, retry: RetryPolicy) -> BudgetwiseResult<Self> {
        paths.ensure_directories()?;

        let storage = Self {
            users: UserRepository::new(paths.users_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            models: ModelRepository::new(paths.models_file()),
            allocations: AllocationRepository::new(paths.allocations_file()),
            audit: AuditLogger::new(paths.audit_log()),
            retry,
            paths,
        };
        storage.load_all()?;

        tracing::debug!(base_dir = %storage.paths.base_dir().display(), "storage opened");
        Ok(storage)
    }

    /// Flush every repository and release the store
    pub fn close(self) -> BudgetwiseResult<()> {
        self.retry.run("close", || self.save_all())?;
        tracing::debug!("storage closed");
        Ok(())
    }

    pub fn paths(&self) -> &BudgetwisePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> BudgetwiseResult<()> {
        self.users.load()?;
        self.budgets.load()?;
        self.expenses.load()?;
        self.models.load()?;
        self.allocations.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> BudgetwiseResult<()> {
        self.users.save()?;
        self.budgets.save()?;
        self.expenses.save()?;
        self.models.save()?;
        self.allocations.save()?;
        Ok(())
    }

    /// Run `f` as one unit of work
    ///
    /// Begin snapshots every repository. If `f` fails the snapshot is
    /// restored and nothing is written. Otherwise every repository is
    /// committed to disk under the retry policy; if the commit still fails,
    /// the snapshot is restored in memory and written back.
    pub fn transaction<T, F>(&self, f: F) -> BudgetwiseResult<T>
    where
        F: FnOnce(&Storage) -> BudgetwiseResult<T>,
    {
        let snapshot = self.snapshot()?;

        let value = match f(self) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(error = %err, "transaction rolled back");
                self.restore(snapshot)?;
                return Err(err);
            }
        };

        if let Err(err) = self.retry.run("commit", || self.save_all()) {
            tracing::warn!(error = %err, "commit failed, rolling back");
            self.restore(snapshot)?;
            if let Err(revert) = self.save_all() {
                tracing::error!(error = %revert, "failed to write back rolled-back state");
            }
            return Err(err);
        }

        Ok(value)
    }

    fn snapshot(&self) -> BudgetwiseResult<Snapshot> {
        Ok(Snapshot {
            users: self.users.snapshot()?,
            budgets: self.budgets.snapshot()?,
            expenses: self.expenses.snapshot()?,
            models: self.models.snapshot()?,
            allocations: self.allocations.snapshot()?,
        })
    }

    fn restore(&self, snapshot: Snapshot) -> BudgetwiseResult<()> {
        self.users.restore(snapshot.users)?;
        self.budgets.restore(snapshot.budgets)?;
        self.expenses.restore(snapshot.expenses)?;
        self.models.restore(snapshot.models)?;
        self.allocations.restore(snapshot.allocations)?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetwiseResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> BudgetwiseResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetwiseResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_batch(&self, entries: &[AuditEntry]) -> BudgetwiseResult<()> {
        self.audit.log_batch(entries)
    }
}
