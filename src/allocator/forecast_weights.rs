//! Forecast-derived category weights
//!
//! The forecast only contributes a total. It is turned into per-category
//! amounts by scaling a fixed prior table ([`Category::prior_weight`]). The
//! 0.8 headroom and 1.5 cap are policy constants carried unchanged from the
//! first version of this heuristic; they are not fitted.

use crate::models::{predicted_total, Allocation, AllocationReason, Category, ForecastPoint, Money};

/// Share of the remaining budget the forecast is compared against
pub const FORECAST_HEADROOM: f64 = 0.8;

/// Upper bound on the forecast scale factor
pub const FORECAST_SCALE_CAP: f64 = 1.5;

/// Split `remaining` across the non-savings categories using a forecast
///
/// A non-positive forecast total falls back to an equal split, tagged
/// [`AllocationReason::FallbackEqual`]. Only strictly positive amounts are
/// returned.
pub fn forecast_allocations(points: &[ForecastPoint], remaining: Money) -> Vec<Allocation> {
    if !remaining.is_positive() {
        return Vec::new();
    }

    let total = predicted_total(points);
    if !total.is_finite() || total <= 0.0 {
        tracing::debug!(total, "forecast total not positive, splitting equally");
        return equal_split(remaining);
    }

    let scale = (total / (remaining.as_f64() * FORECAST_HEADROOM)).min(FORECAST_SCALE_CAP);
    let scaled: Vec<(Category, f64)> = Category::variable()
        .map(|c| (c, c.prior_weight() * scale))
        .collect();
    let raw_sum: f64 = scaled.iter().map(|(_, w)| w).sum();

    let normalized: Vec<(Category, f64)> = if raw_sum > 0.0 {
        scaled.into_iter().map(|(c, w)| (c, w / raw_sum)).collect()
    } else {
        Category::variable().map(|c| (c, c.prior_weight())).collect()
    };

    tracing::debug!(total, scale, remaining = %remaining, "scaled forecast weights");

    normalized
        .into_iter()
        .map(|(category, weight)| {
            let amount = Money::from_f64_rounded(remaining.as_f64() * weight);
            Allocation::new(category, amount, AllocationReason::Forecast)
        })
        .filter(|a| a.amount.is_positive())
        .collect()
}

fn equal_split(remaining: Money) -> Vec<Allocation> {
    let count = Category::variable().count() as f64;
    let share = Money::from_f64_rounded(remaining.as_f64() / count);
    if !share.is_positive() {
        return Vec::new();
    }
    Category::variable()
        .map(|category| Allocation::new(category, share, AllocationReason::FallbackEqual))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn flat_forecast(days: u32, per_day: f64) -> Vec<ForecastPoint> {
        (1..=days)
            .map(|d| ForecastPoint::new(NaiveDate::from_ymd_opt(2025, 12, d).unwrap(), per_day))
            .collect()
    }

    fn amount_of(allocations: &[Allocation], category: Category) -> Money {
        allocations
            .iter()
            .find(|a| a.category == category)
            .map(|a| a.amount)
            .unwrap_or_default()
    }

    #[test]
    fn test_prior_weights_sum_to_one() {
        let sum: f64 = Category::variable().map(|c| c.prior_weight()).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_forecast_follows_prior_table() {
        // 30 days * 150 = 4500 predicted against 5000 remaining
        let allocations = forecast_allocations(&flat_forecast(30, 150.0), Money::from_units(5000));

        assert_eq!(allocations.len(), 7);
        assert!(allocations.iter().all(|a| a.reason == AllocationReason::Forecast));
        assert_eq!(amount_of(&allocations, Category::FoodDining), Money::from_units(1250));
        assert_eq!(amount_of(&allocations, Category::BillsUtilities), Money::from_units(1500));
        assert_eq!(amount_of(&allocations, Category::Transport), Money::from_units(750));
        assert_eq!(amount_of(&allocations, Category::Shopping), Money::from_units(500));
        assert_eq!(amount_of(&allocations, Category::Entertainment), Money::from_units(400));
        assert_eq!(amount_of(&allocations, Category::Healthcare), Money::from_units(350));
        assert_eq!(amount_of(&allocations, Category::Other), Money::from_units(250));
        assert!(allocations.iter().all(|a| a.category != Category::Savings));
    }

    #[test]
    fn test_heavy_forecast_is_capped() {
        // scale would be far above the cap; normalisation cancels it anyway
        let allocations =
            forecast_allocations(&flat_forecast(30, 10_000.0), Money::from_units(1000));
        assert_eq!(amount_of(&allocations, Category::BillsUtilities), Money::from_units(300));
    }

    #[test]
    fn test_zero_forecast_falls_back_to_equal_split() {
        let allocations = forecast_allocations(&flat_forecast(30, 0.0), Money::from_units(7000));

        assert_eq!(allocations.len(), 7);
        for allocation in &allocations {
            assert_eq!(allocation.amount, Money::from_units(1000));
            assert_eq!(allocation.reason, AllocationReason::FallbackEqual);
        }
    }

    #[test]
    fn test_empty_forecast_falls_back_to_equal_split() {
        let allocations = forecast_allocations(&[], Money::from_units(70));
        assert!(allocations
            .iter()
            .all(|a| a.reason == AllocationReason::FallbackEqual && a.amount == Money::from_units(10)));
    }

    #[test]
    fn test_nothing_remaining() {
        assert!(forecast_allocations(&flat_forecast(30, 100.0), Money::zero()).is_empty());
    }
}
