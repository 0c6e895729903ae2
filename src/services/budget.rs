//! Budget service
//!
//! One budget per user and period. Setting it again changes the amount.

use crate::audit::EntityType;
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{Budget, BudgetStatus, Money, Period, User};
use crate::storage::Storage;

pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the budget for a period, creating or updating it
    pub fn set(&self, user: &User, period: Period, amount: Money) -> BudgetwiseResult<Budget> {
        match self.storage.budgets.get_for_period(user.id, period)? {
            Some(before) => {
                let mut budget = before.clone();
                budget.amount = amount;
                budget
                    .validate()
                    .map_err(|e| BudgetwiseError::Validation(e.to_string()))?;

                self.storage
                    .transaction(|s| s.budgets.upsert(budget.clone()))?;

                self.storage.log_update(
                    EntityType::Budget,
                    budget.id.to_string(),
                    Some(format!("{} {}", user.email, period)),
                    &before,
                    &budget,
                    Some(format!("amount: {} -> {}", before.amount, budget.amount)),
                )?;
                Ok(budget)
            }
            None => {
                let budget = Budget::new(user.id, period, amount);
                budget
                    .validate()
                    .map_err(|e| BudgetwiseError::Validation(e.to_string()))?;

                self.storage
                    .transaction(|s| s.budgets.upsert(budget.clone()))?;

                self.storage.log_create(
                    EntityType::Budget,
                    budget.id.to_string(),
                    Some(format!("{} {}", user.email, period)),
                    &budget,
                )?;
                Ok(budget)
            }
        }
    }

    pub fn get(&self, user: &User, period: Period) -> BudgetwiseResult<Option<Budget>> {
        self.storage.budgets.get_for_period(user.id, period)
    }

    /// Every budget the user has set, newest period first
    pub fn history(&self, user: &User) -> BudgetwiseResult<Vec<Budget>> {
        self.storage.budgets.get_by_user(user.id)
    }

    /// Total spent by `user` on expenses dated inside `period`
    pub fn spent_in_period(&self, user: &User, period: Period) -> BudgetwiseResult<Money> {
        let expenses = self.storage.expenses.get_by_user_in_range(
            user.id,
            Some(period.start_date()),
            Some(period.end_date()),
        )?;
        Ok(expenses.iter().map(|e| e.amount).sum())
    }

    /// Budget, spent and remaining for a period
    pub fn status(&self, user: &User, period: Period) -> BudgetwiseResult<BudgetStatus> {
        let budget = self
            .get(user, period)?
            .ok_or_else(|| BudgetwiseError::budget_not_found(format!("{} {}", user.email, period)))?;
        let spent = self.spent_in_period(user, period)?;
        Ok(BudgetStatus::new(period, budget.amount, spent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::BudgetwisePaths;
    use crate::models::{Category, Expense};
    use crate::services::UserService;
    use crate::storage::RetryPolicy;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, User) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetwisePaths::with_base_dir(temp_dir.path());
        let storage = Storage::open(paths, RetryPolicy::once()).unwrap();
        let user = UserService::new(&storage)
            .register("Ana", "ana@example.com", None)
            .unwrap();
        (temp_dir, storage, user)
    }

    #[test]
    fn test_set_creates_then_updates() {
        let (_temp_dir, storage, user) = setup();
        let service = BudgetService::new(&storage);
        let period = Period::new(2025, 12).unwrap();

        let first = service.set(&user, period, Money::from_units(3000)).unwrap();
        let second = service.set(&user, period, Money::from_units(3500)).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(
            service.get(&user, period).unwrap().unwrap().amount,
            Money::from_units(3500)
        );
        assert_eq!(service.history(&user).unwrap().len(), 1);

        let last = storage.audit().read_recent(1).unwrap().remove(0);
        assert_eq!(last.operation, Operation::Update);
        assert_eq!(
            last.diff_summary.as_deref(),
            Some("amount: $3000.00 -> $3500.00")
        );
    }

    #[test]
    fn test_rejects_non_positive() {
        let (_temp_dir, storage, user) = setup();
        let service = BudgetService::new(&storage);
        let period = Period::new(2025, 12).unwrap();

        assert!(service.set(&user, period, Money::zero()).unwrap_err().is_validation());
        assert!(service.get(&user, period).unwrap().is_none());
    }

    #[test]
    fn test_status_counts_only_the_period() {
        let (_temp_dir, storage, user) = setup();
        let service = BudgetService::new(&storage);
        let period = Period::new(2025, 11).unwrap();
        service.set(&user, period, Money::from_units(1000)).unwrap();

        for (day, month, units) in [(3, 11, 200), (30, 11, 150), (1, 12, 999)] {
            storage
                .expenses
                .upsert(Expense::new(
                    user.id,
                    Category::FoodDining,
                    Money::from_units(units),
                    "",
                    NaiveDate::from_ymd_opt(2025, month, day).unwrap(),
                ))
                .unwrap();
        }

        let status = service.status(&user, period).unwrap();
        assert_eq!(status.spent, Money::from_units(350));
        assert_eq!(status.remaining, Money::from_units(650));
        assert!(!status.is_over());
    }

    #[test]
    fn test_status_without_budget() {
        let (_temp_dir, storage, user) = setup();
        let err = BudgetService::new(&storage)
            .status(&user, Period::new(2025, 11).unwrap())
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
