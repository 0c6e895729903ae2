//! Forecast display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::forecast::ForecastModel;
use crate::models::{predicted_total, ForecastPoint};

#[derive(Tabled)]
struct ForecastRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    weekday: String,
    #[tabled(rename = "Expected")]
    expected: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "High")]
    high: String,
}

fn amount(value: Option<f64>, symbol: &str) -> String {
    value
        .map(|v| format!("{}{:.2}", symbol, v))
        .unwrap_or_else(|| "-".to_string())
}

/// Format predicted daily spend with a model summary and total
pub fn format_forecast(model: &ForecastModel, points: &[ForecastPoint], symbol: &str) -> String {
    let mut output = format!(
        "Model trained {} on {} days through {}\n",
        model.trained_at.format("%Y-%m-%d %H:%M UTC"),
        model.training_days,
        model.trained_through
    );

    if points.is_empty() {
        output.push_str("No days to forecast.\n");
        return output;
    }

    let rows = points.iter().map(|p| ForecastRow {
        date: p.date.format("%Y-%m-%d").to_string(),
        weekday: p.date.format("%a").to_string(),
        expected: amount(Some(p.point_estimate), symbol),
        low: amount(p.lower_bound, symbol),
        high: amount(p.upper_bound, symbol),
    });
    output.push_str(&Table::new(rows).with(Style::psql()).to_string());
    output.push('\n');
    output.push_str(&format!(
        "Expected total over {} day(s): {}\n",
        points.len(),
        amount(Some(predicted_total(points)), symbol)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::SpendModel;
    use crate::models::UserId;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_format_forecast() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let series: Vec<_> = (0..14).map(|i| (start + Duration::days(i), 10.0)).collect();
        let model = ForecastModel::new(UserId::new(), &series, SpendModel::fit(&series).unwrap());

        let day = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        let points = vec![
            ForecastPoint::new(day, 10.0).with_bounds(8.0, 12.0),
            ForecastPoint::new(day.succ_opt().unwrap(), 5.0),
        ];

        let output = format_forecast(&model, &points, "$");
        assert!(output.contains("on 14 days through 2025-09-14"));
        assert!(output.contains("$12.00"));
        assert!(output.contains("Expected total over 2 day(s): $15.00"));
    }
}
