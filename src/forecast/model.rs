//! Daily spend model
//!
//! Fits `y = (intercept + slope * t) * weekday_factor` to a daily spend series,
//! where `t` counts days from the first observation. The trend is ordinary
//! least squares; each weekday factor is the ratio of observed spend to trend
//! on that weekday. Prediction intervals assume normal residuals.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{ForecastPoint, UserId};

/// Fewest days of history a model is fitted on
pub const MIN_TRAINING_DAYS: usize = 14;

/// z-score for a two-sided 80% interval
const INTERVAL_Z: f64 = 1.2816;

/// A fitted trend-plus-weekday model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendModel {
    /// Day `t = 0`
    pub start_date: NaiveDate,
    pub intercept: f64,
    /// Change in daily spend per day
    pub slope: f64,
    /// Multipliers indexed Monday = 0 .. Sunday = 6
    pub weekday_factors: [f64; 7],
    /// Standard deviation of the in-sample residuals
    pub residual_std: f64,
}

impl SpendModel {
    /// Fit a model to a contiguous daily series
    ///
    /// `series` must be ordered by date with no gaps; use
    /// [`daily_series`](super::daily_series) to build one from expenses.
    ///
    /// # Errors
    ///
    /// [`BudgetwiseError::ForecastUnavailable`] when the series covers fewer
    /// than [`MIN_TRAINING_DAYS`] days.
    pub fn fit(series: &[(NaiveDate, f64)]) -> BudgetwiseResult<Self> {
        if series.len() < MIN_TRAINING_DAYS {
            return Err(BudgetwiseError::ForecastUnavailable(format!(
                "need at least {} days of spending history, have {}",
                MIN_TRAINING_DAYS,
                series.len()
            )));
        }

        let start_date = series[0].0;
        let n = series.len() as f64;
        let ts: Vec<f64> = series
            .iter()
            .map(|(date, _)| (*date - start_date).num_days() as f64)
            .collect();

        let sum_t: f64 = ts.iter().sum();
        let sum_y: f64 = series.iter().map(|(_, y)| y).sum();
        let sum_t2: f64 = ts.iter().map(|t| t * t).sum();
        let sum_ty: f64 = ts.iter().zip(series).map(|(t, (_, y))| t * y).sum();

        let denominator = n * sum_t2 - sum_t * sum_t;
        let slope = if denominator.abs() < 1e-10 {
            0.0
        } else {
            (n * sum_ty - sum_t * sum_y) / denominator
        };
        let intercept = (sum_y - slope * sum_t) / n;

        let trend = |t: f64| (intercept + slope * t).max(0.0);

        let mut observed = [0.0; 7];
        let mut expected = [0.0; 7];
        for (t, (date, y)) in ts.iter().zip(series) {
            let day = weekday_index(*date);
            observed[day] += y;
            expected[day] += trend(*t);
        }
        let mut weekday_factors = [1.0; 7];
        for day in 0..7 {
            if expected[day] > 0.0 {
                weekday_factors[day] = observed[day] / expected[day];
            }
        }

        let sum_sq: f64 = ts
            .iter()
            .zip(series)
            .map(|(t, (date, y))| (y - trend(*t) * weekday_factors[weekday_index(*date)]).powi(2))
            .sum();
        let residual_std = (sum_sq / (n - 2.0)).sqrt();

        Ok(Self {
            start_date,
            intercept,
            slope,
            weekday_factors,
            residual_std,
        })
    }

    /// Expected spend on `date`, never negative
    pub fn predict_day(&self, date: NaiveDate) -> f64 {
        let t = (date - self.start_date).num_days() as f64;
        (self.intercept + self.slope * t).max(0.0) * self.weekday_factors[weekday_index(date)]
    }

    /// One point per day from `start` to `end` inclusive, with 80% bounds
    pub fn predict(&self, start: NaiveDate, end: NaiveDate) -> Vec<ForecastPoint> {
        let margin = INTERVAL_Z * self.residual_std;
        let mut points = Vec::new();
        let mut date = start;
        while date <= end {
            let estimate = self.predict_day(date);
            points.push(
                ForecastPoint::new(date, estimate)
                    .with_bounds((estimate - margin).max(0.0), estimate + margin),
            );
            date += Duration::days(1);
        }
        points
    }
}

/// A user's trained model, as persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastModel {
    pub user_id: UserId,
    pub trained_at: DateTime<Utc>,
    /// Length of the daily series the model was fitted on
    pub training_days: usize,
    /// Last day of training data
    pub trained_through: NaiveDate,
    pub model: SpendModel,
}

impl ForecastModel {
    pub fn new(user_id: UserId, series: &[(NaiveDate, f64)], model: SpendModel) -> Self {
        Self {
            user_id,
            trained_at: Utc::now(),
            training_days: series.len(),
            trained_through: series.last().map(|(d, _)| *d).unwrap_or(model.start_date),
            model,
        }
    }
}

fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-09-01 is a Monday
    fn series(values: impl IntoIterator<Item = f64>) -> Vec<(NaiveDate, f64)> {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        values
            .into_iter()
            .enumerate()
            .map(|(i, y)| (start + Duration::days(i as i64), y))
            .collect()
    }

    #[test]
    fn test_too_little_history() {
        let err = SpendModel::fit(&series(vec![10.0; 13])).unwrap_err();
        assert!(matches!(err, BudgetwiseError::ForecastUnavailable(_)));
    }

    #[test]
    fn test_constant_spend() {
        let data = series(vec![100.0; 28]);
        let model = SpendModel::fit(&data).unwrap();

        assert!(model.slope.abs() < 1e-9);
        assert!((model.intercept - 100.0).abs() < 1e-9);
        assert!(model.residual_std < 1e-9);

        let start = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
        let points = model.predict(start, end);
        assert_eq!(points.len(), 31);
        assert!(points.iter().all(|p| (p.point_estimate - 100.0).abs() < 1e-6));
    }

    #[test]
    fn test_linear_growth_is_extrapolated() {
        let data = series((0..20).map(|t| 10.0 + 2.0 * t as f64));
        let model = SpendModel::fit(&data).unwrap();

        assert!((model.slope - 2.0).abs() < 1e-9);
        let day_30 = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        assert!((model.predict_day(day_30) - 70.0).abs() < 1e-6);
    }

    #[test]
    fn test_weekend_pattern() {
        let data = series((0..28).map(|i| if i % 7 >= 5 { 150.0 } else { 50.0 }));
        let model = SpendModel::fit(&data).unwrap();

        let wednesday = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        assert!(model.predict_day(saturday) > 2.0 * model.predict_day(wednesday));

        for point in model.predict(wednesday, saturday) {
            let lower = point.lower_bound.unwrap();
            let upper = point.upper_bound.unwrap();
            assert!(lower >= 0.0);
            assert!(lower <= point.point_estimate && point.point_estimate <= upper);
        }
    }

    #[test]
    fn test_zero_spend_predicts_zero() {
        let model = SpendModel::fit(&series(vec![0.0; 14])).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        assert_eq!(model.predict_day(day), 0.0);
        assert_eq!(model.weekday_factors, [1.0; 7]);
    }

    #[test]
    fn test_empty_range() {
        let model = SpendModel::fit(&series(vec![5.0; 14])).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        assert!(model.predict(day, day - Duration::days(1)).is_empty());
    }
}
