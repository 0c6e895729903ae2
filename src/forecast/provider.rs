use chrono::NaiveDate;

use super::ForecastProvider;
use crate::error::BudgetwiseResult;
use crate::models::{ForecastPoint, UserId};
use crate::storage::ModelRepository;

/// Predicts from models previously trained and saved in storage
pub struct StoredModelProvider<'a> {
    models: &'a ModelRepository,
}

impl<'a> StoredModelProvider<'a> {
    pub fn new(models: &'a ModelRepository) -> Self {
        Self { models }
    }
}

impl ForecastProvider for StoredModelProvider<'_> {
    fn forecast(
        &self,
        user: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BudgetwiseResult<Option<Vec<ForecastPoint>>> {
        let Some(stored) = self.models.get(user)? else {
            tracing::debug!(user = %user, "no trained forecast model");
            return Ok(None);
        };
        Ok(Some(stored.model.predict(start, end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{ForecastModel, SpendModel};
    use tempfile::TempDir;

    #[test]
    fn test_missing_model_is_none() {
        let temp = TempDir::new().unwrap();
        let repo = ModelRepository::new(temp.path().join("models.json"));
        let provider = StoredModelProvider::new(&repo);

        let day = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert!(provider.forecast(UserId::new(), day, day).unwrap().is_none());
    }

    #[test]
    fn test_stored_model_predicts_range() {
        let temp = TempDir::new().unwrap();
        let repo = ModelRepository::new(temp.path().join("models.json"));
        let user = UserId::new();

        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let series: Vec<_> = (0..21)
            .map(|i| (start + chrono::Duration::days(i), 40.0))
            .collect();
        let model = SpendModel::fit(&series).unwrap();
        repo.upsert(ForecastModel::new(user, &series, model)).unwrap();

        let provider = StoredModelProvider::new(&repo);
        let december = crate::models::Period::new(2025, 12).unwrap();
        let points = provider
            .forecast(user, december.start_date(), december.end_date())
            .unwrap()
            .unwrap();

        assert_eq!(points.len(), 31);
        let total = crate::models::predicted_total(&points);
        assert!((total - 31.0 * 40.0).abs() < 1e-6);
    }
}
