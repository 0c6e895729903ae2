//! Spending forecasts
//!
//! A [`ForecastProvider`] answers "how much will this user spend each day in
//! this range". Absence of a trained model is `Ok(None)`, not an error; the
//! caller decides whether that is fatal.
//!
//! Fitting is the slow step. It runs in [`ForecastService::train`] on data
//! copied out of storage, never while a repository lock is held.
//!
//! [`ForecastService::train`]: crate::services::ForecastService::train

mod model;
mod provider;
mod series;

use chrono::NaiveDate;

use crate::error::BudgetwiseResult;
use crate::models::{ForecastPoint, UserId};

pub use model::{ForecastModel, SpendModel, MIN_TRAINING_DAYS};
pub use provider::StoredModelProvider;
pub use series::daily_series;

/// Source of per-day spend predictions
pub trait ForecastProvider {
    /// Predicted spend for each day from `start` to `end` inclusive
    ///
    /// Returns `Ok(None)` when no model exists for `user`.
    fn forecast(
        &self,
        user: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BudgetwiseResult<Option<Vec<ForecastPoint>>>;
}
