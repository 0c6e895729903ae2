//! Forecast service
//!
//! Trains one spending model per user and predicts from it.

use chrono::{Duration, NaiveDate};

use crate::audit::EntityType;
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::forecast::{daily_series, ForecastModel, ForecastProvider, SpendModel, StoredModelProvider};
use crate::models::{ForecastPoint, Period, SpendRecord, User};
use crate::storage::Storage;

pub struct ForecastService<'a> {
    storage: &'a Storage,
}

impl<'a> ForecastService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Fit a model on the user's logged expenses and store it
    pub fn train(&self, user: &User) -> BudgetwiseResult<ForecastModel> {
        let records: Vec<SpendRecord> = self
            .storage
            .expenses
            .get_by_user(user.id)?
            .iter()
            .map(|e| e.spend_record())
            .collect();
        self.train_from_records(user, &records)
    }

    /// Fit a model on externally supplied spend and store it
    ///
    /// The records are not saved as expenses.
    pub fn train_from_records(
        &self,
        user: &User,
        records: &[SpendRecord],
    ) -> BudgetwiseResult<ForecastModel> {
        let series = daily_series(records);
        let model = SpendModel::fit(&series)?;
        let trained = ForecastModel::new(user.id, &series, model);

        let previous = self
            .storage
            .transaction(|s| s.models.upsert(trained.clone()))?;

        let name = Some(format!("{} ({} days)", user.email, trained.training_days));
        match previous {
            Some(before) => self.storage.log_update(
                EntityType::ForecastModel,
                user.id.to_string(),
                name,
                &before,
                &trained,
                Some(format!(
                    "trained through: {} -> {}",
                    before.trained_through, trained.trained_through
                )),
            )?,
            None => self.storage.log_create(
                EntityType::ForecastModel,
                user.id.to_string(),
                name,
                &trained,
            )?,
        }

        tracing::info!(
            user = %user.id,
            days = trained.training_days,
            slope = trained.model.slope,
            "forecast model trained"
        );
        Ok(trained)
    }

    pub fn model(&self, user: &User) -> BudgetwiseResult<Option<ForecastModel>> {
        self.storage.models.get(user.id)
    }

    /// Predict the `days` days after the model's training data ends
    pub fn predict(&self, user: &User, days: u32) -> BudgetwiseResult<Vec<ForecastPoint>> {
        if days == 0 {
            return Err(BudgetwiseError::InvalidInput(
                "forecast horizon must be at least one day".into(),
            ));
        }

        let stored = self.require_model(user)?;
        let start = next_day(stored.trained_through);
        let end = start + Duration::days(i64::from(days) - 1);
        Ok(stored.model.predict(start, end))
    }

    /// Predict every day of `period`
    pub fn forecast_period(&self, user: &User, period: Period) -> BudgetwiseResult<Vec<ForecastPoint>> {
        StoredModelProvider::new(&self.storage.models)
            .forecast(user.id, period.start_date(), period.end_date())?
            .ok_or_else(|| no_model(user))
    }

    fn require_model(&self, user: &User) -> BudgetwiseResult<ForecastModel> {
        self.model(user)?.ok_or_else(|| no_model(user))
    }
}

fn no_model(user: &User) -> BudgetwiseError {
    BudgetwiseError::ForecastUnavailable(format!("no trained model for {}", user.email))
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}
