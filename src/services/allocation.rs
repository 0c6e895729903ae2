//! Allocation service
//!
//! Gathers a user's spending history and forecast, runs the allocator, and
//! records the outcome.

use chrono::NaiveDate;

use crate::allocator::{distribute_budget, AllocationInputs, AllocationPolicy, DistributionRequest};
use crate::audit::EntityType;
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::forecast::{ForecastProvider, StoredModelProvider};
use crate::models::{AllocationResult, Period, SavedAllocation, SpendRecord, User};
use crate::storage::Storage;

pub struct AllocationService<'a> {
    storage: &'a Storage,
    policy: AllocationPolicy,
}

impl<'a> AllocationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            policy: AllocationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Distribute `request.budget_amount` for `user`
    ///
    /// With `use_forecast` the user must have a trained model; there is no
    /// silent fallback to history. `today` anchors the historical lookback.
    /// When `save` is set the result is stored and later returned by
    /// [`latest`](Self::latest).
    pub fn distribute(
        &self,
        user: &User,
        request: &DistributionRequest,
        today: NaiveDate,
        save: bool,
    ) -> BudgetwiseResult<AllocationResult> {
        let history: Vec<SpendRecord> = self
            .storage
            .expenses
            .get_by_user(user.id)?
            .iter()
            .map(|e| e.spend_record())
            .collect();

        let forecast = if request.use_forecast {
            let points = StoredModelProvider::new(&self.storage.models)
                .forecast(user.id, request.period.start_date(), request.period.end_date())?
                .ok_or_else(|| {
                    BudgetwiseError::ForecastUnavailable(format!(
                        "no trained model for {}; run `forecast train` or pass --no-forecast",
                        user.email
                    ))
                })?;
            Some(points)
        } else {
            None
        };

        let mut inputs = AllocationInputs::historical(&history, today);
        if let Some(points) = &forecast {
            inputs = inputs.with_forecast(points);
        }

        let result = distribute_budget(request, &inputs, &self.policy)?;

        let entity_id = format!("{}:{}", user.id, result.period);
        let entity_name = Some(format!("{} {}", user.email, result.budget_amount));

        if save {
            let saved = SavedAllocation::new(user.id, result.clone());
            self.storage.transaction(|s| s.allocations.push(saved.clone()))?;
            self.storage
                .log_create(EntityType::Allocation, entity_id, entity_name, &saved)?;
        } else {
            self.storage
                .log_create(EntityType::Allocation, entity_id, entity_name, &result)?;
        }

        Ok(result)
    }

    /// Most recently saved allocation for a period
    pub fn latest(&self, user: &User, period: Period) -> BudgetwiseResult<SavedAllocation> {
        self.storage
            .allocations
            .latest(user.id, period)?
            .ok_or_else(|| {
                BudgetwiseError::allocation_not_found(format!("{} {}", user.email, period))
            })
    }
}
