//! Forecast output records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Predicted spend for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub point_estimate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, point_estimate: f64) -> Self {
        Self {
            date,
            point_estimate,
            lower_bound: None,
            upper_bound: None,
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = Some(lower);
        self.upper_bound = Some(upper);
        self
    }
}

/// Sum of point estimates; the only aggregate the allocator consumes
pub fn predicted_total(points: &[ForecastPoint]) -> f64 {
    points.iter().map(|p| p.point_estimate).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicted_total_ignores_bounds() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let points = vec![
            ForecastPoint::new(day, 100.0).with_bounds(50.0, 150.0),
            ForecastPoint::new(day.succ_opt().unwrap(), 50.5),
        ];
        assert!((predicted_total(&points) - 150.5).abs() < 1e-9);
        assert_eq!(predicted_total(&[]), 0.0);
    }
}
