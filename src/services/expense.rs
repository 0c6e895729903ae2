//! Expense service
//!
//! Logging, listing and summarising a user's expenses. Adding an expense is
//! checked against the budget for the month it falls in.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::audit::EntityType;
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{Category, Expense, ExpenseId, Money, Period, User};
use crate::storage::Storage;

/// Filter options for listing expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the days of one period
    pub fn period(mut self, period: Period) -> Self {
        self.start_date = Some(period.start_date());
        self.end_date = Some(period.end_date());
        self
    }

    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Spending summary relative to a given day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseStats {
    pub today: Money,
    /// Everything dated on or after seven days ago
    pub last_7_days: Money,
    /// Everything dated on or after the first of the month
    pub month_to_date: Money,
    /// Largest single expense ever logged
    pub largest: Money,
    /// All-time totals per category
    pub by_category: BTreeMap<Category, Money>,
    pub count: usize,
}

pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Log a new expense
    ///
    /// When the user has a budget for the expense's month, the expense is
    /// rejected with [`BudgetwiseError::BudgetExceeded`] if it would take
    /// spending past the budget. Spending exactly up to the budget is allowed.
    pub fn add(
        &self,
        user: &User,
        category: Category,
        amount: Money,
        description: &str,
        date: NaiveDate,
    ) -> BudgetwiseResult<Expense> {
        let expense = Expense::new(user.id, category, amount, description.trim(), date);
        expense
            .validate()
            .map_err(|e| BudgetwiseError::Validation(e.to_string()))?;

        self.check_budget(user, &expense)?;

        self.storage
            .transaction(|s| s.expenses.upsert(expense.clone()))?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(format!("{} {}", expense.category, expense.amount)),
            &expense,
        )?;

        Ok(expense)
    }

    fn check_budget(&self, user: &User, expense: &Expense) -> BudgetwiseResult<()> {
        let period = Period::containing(expense.date);
        let Some(budget) = self.storage.budgets.get_for_period(user.id, period)? else {
            return Ok(());
        };

        let spent: Money = self
            .storage
            .expenses
            .get_by_user_in_range(user.id, Some(period.start_date()), Some(period.end_date()))?
            .iter()
            .map(|e| e.amount)
            .sum();

        let after = spent + expense.amount;
        if after > budget.amount {
            tracing::debug!(
                user = %user.id,
                period = %period,
                budget = %budget.amount,
                spent = %spent,
                attempted = %expense.amount,
                "expense rejected by budget"
            );
            return Err(BudgetwiseError::BudgetExceeded {
                period: period.to_string(),
                budget: budget.amount,
                spent,
                remaining: budget.amount - spent,
                attempted: expense.amount,
                would_exceed_by: after - budget.amount,
            });
        }
        Ok(())
    }

    /// A user's expenses matching `filter`, newest first
    pub fn list(&self, user: &User, filter: &ExpenseFilter) -> BudgetwiseResult<Vec<Expense>> {
        let mut expenses =
            self.storage
                .expenses
                .get_by_user_in_range(user.id, filter.start_date, filter.end_date)?;

        if let Some(category) = filter.category {
            expenses.retain(|e| e.category == category);
        }
        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }
        Ok(expenses)
    }

    /// Find one of the user's expenses by ID (full UUID or `exp-` short form)
    pub fn find(&self, user: &User, identifier: &str) -> BudgetwiseResult<Option<Expense>> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return Ok(self
                .storage
                .expenses
                .get(id)?
                .filter(|e| e.user_id == user.id));
        }

        Ok(self
            .storage
            .expenses
            .get_by_user(user.id)?
            .into_iter()
            .find(|e| e.id.to_string() == identifier))
    }

    /// Delete one of the user's expenses
    pub fn delete(&self, user: &User, identifier: &str) -> BudgetwiseResult<Expense> {
        let expense = self.find(user, identifier)?.ok_or_else(|| BudgetwiseError::NotFound {
            entity_type: "Expense",
            identifier: identifier.to_string(),
        })?;

        self.storage
            .transaction(|s| s.expenses.delete(expense.id))?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(format!("{} {}", expense.category, expense.amount)),
            &expense,
        )?;

        Ok(expense)
    }

    /// Summary of spending as seen from `today`
    pub fn stats(&self, user: &User, today: NaiveDate) -> BudgetwiseResult<ExpenseStats> {
        let expenses = self.storage.expenses.get_by_user(user.id)?;

        let week_start = today - Duration::days(7);
        let month_start = today.with_day(1).unwrap_or(today);

        let mut stats = ExpenseStats {
            today: Money::zero(),
            last_7_days: Money::zero(),
            month_to_date: Money::zero(),
            largest: Money::zero(),
            by_category: BTreeMap::new(),
            count: expenses.len(),
        };

        for expense in &expenses {
            if expense.date == today {
                stats.today += expense.amount;
            }
            if expense.date >= week_start {
                stats.last_7_days += expense.amount;
            }
            if expense.date >= month_start {
                stats.month_to_date += expense.amount;
            }
            if expense.amount > stats.largest {
                stats.largest = expense.amount;
            }
            *stats.by_category.entry(expense.category).or_default() += expense.amount;
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::BudgetwisePaths;
    use crate::services::{BudgetService, UserService};
    use crate::storage::RetryPolicy;
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

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_without_budget() {
        let (_temp_dir, storage, user) = setup();
        let service = ExpenseService::new(&storage);

        let expense = service
            .add(&user, Category::Transport, Money::from_units(45), " Gas ", day(2025, 11, 4))
            .unwrap();
        assert_eq!(expense.description, "Gas");
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_add_rejects_non_positive() {
        let (_temp_dir, storage, user) = setup();
        let err = ExpenseService::new(&storage)
            .add(&user, Category::Other, Money::from_cents(-100), "", day(2025, 11, 4))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_budget_allows_exact_and_rejects_over() {
        let (_temp_dir, storage, user) = setup();
        let period = Period::new(2025, 11).unwrap();
        BudgetService::new(&storage)
            .set(&user, period, Money::from_units(1000))
            .unwrap();
        let service = ExpenseService::new(&storage);

        service
            .add(&user, Category::FoodDining, Money::from_units(700), "", day(2025, 11, 2))
            .unwrap();
        service
            .add(&user, Category::FoodDining, Money::from_units(300), "", day(2025, 11, 3))
            .unwrap();

        let err = service
            .add(&user, Category::Shopping, Money::from_cents(1), "", day(2025, 11, 4))
            .unwrap_err();
        match err {
            BudgetwiseError::BudgetExceeded {
                budget,
                spent,
                remaining,
                attempted,
                would_exceed_by,
                ..
            } => {
                assert_eq!(budget, Money::from_units(1000));
                assert_eq!(spent, Money::from_units(1000));
                assert_eq!(remaining, Money::zero());
                assert_eq!(attempted, Money::from_cents(1));
                assert_eq!(would_exceed_by, Money::from_cents(1));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(storage.expenses.count().unwrap(), 2);

        // A different month has no budget
        service
            .add(&user, Category::Shopping, Money::from_units(5000), "", day(2025, 12, 1))
            .unwrap();
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, storage, user) = setup();
        let service = ExpenseService::new(&storage);
        service.add(&user, Category::FoodDining, Money::from_units(10), "a", day(2025, 10, 30)).unwrap();
        service.add(&user, Category::Transport, Money::from_units(20), "b", day(2025, 11, 2)).unwrap();
        service.add(&user, Category::FoodDining, Money::from_units(30), "c", day(2025, 11, 9)).unwrap();

        let all = service.list(&user, &ExpenseFilter::new()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].description, "c");

        let november = ExpenseFilter::new().period(Period::new(2025, 11).unwrap());
        assert_eq!(service.list(&user, &november).unwrap().len(), 2);

        let food = ExpenseFilter::new().category(Category::FoodDining).limit(1);
        let food = service.list(&user, &food).unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].description, "c");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage, user) = setup();
        let service = ExpenseService::new(&storage);
        let expense = service
            .add(&user, Category::Healthcare, Money::from_units(80), "", day(2025, 11, 2))
            .unwrap();

        let deleted = service.delete(&user, &expense.id.to_string()).unwrap();
        assert_eq!(deleted.id, expense.id);
        assert_eq!(storage.expenses.count().unwrap(), 0);
        assert!(service.delete(&user, &expense.id.to_string()).unwrap_err().is_not_found());

        let last = storage.audit().read_recent(1).unwrap().remove(0);
        assert_eq!(last.operation, Operation::Delete);
    }

    #[test]
    fn test_cannot_delete_other_users_expense() {
        let (_temp_dir, storage, user) = setup();
        let other = UserService::new(&storage)
            .register("Bo", "bo@example.com", None)
            .unwrap();
        let service = ExpenseService::new(&storage);
        let expense = service
            .add(&user, Category::Other, Money::from_units(5), "", day(2025, 11, 2))
            .unwrap();

        assert!(service.delete(&other, &expense.id.full()).unwrap_err().is_not_found());
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_stats() {
        let (_temp_dir, storage, user) = setup();
        let service = ExpenseService::new(&storage);
        let today = day(2025, 11, 12);

        for (date, category, units) in [
            (today, Category::FoodDining, 12),
            (day(2025, 11, 5), Category::Transport, 40),
            (day(2025, 11, 4), Category::FoodDining, 8),
            (day(2025, 10, 28), Category::Shopping, 150),
        ] {
            service.add(&user, category, Money::from_units(units), "", date).unwrap();
        }

        let stats = service.stats(&user, today).unwrap();
        assert_eq!(stats.today, Money::from_units(12));
        assert_eq!(stats.last_7_days, Money::from_units(52));
        assert_eq!(stats.month_to_date, Money::from_units(60));
        assert_eq!(stats.largest, Money::from_units(150));
        assert_eq!(stats.count, 4);
        assert_eq!(stats.by_category[&Category::FoodDining], Money::from_units(20));
        assert_eq!(stats.by_category[&Category::Shopping], Money::from_units(150));
        assert!(!stats.by_category.contains_key(&Category::Healthcare));
    }

    #[test]
    fn test_stats_empty() {
        let (_temp_dir, storage, user) = setup();
        let stats = ExpenseService::new(&storage)
            .stats(&user, day(2025, 11, 12))
            .unwrap();
        assert_eq!(stats.largest, Money::zero());
        assert!(stats.by_category.is_empty());
    }
}
