//! Fixed-bill detection
//!
//! A category whose monthly totals barely move (low coefficient of variation)
//! is treated as a recurring bill and passed through at its mean instead of
//! being weighted.

use std::collections::BTreeMap;

use crate::models::{Category, Money, Period, SpendRecord};

/// Default coefficient-of-variation threshold below which spend counts as fixed
pub const DEFAULT_FIXED_BILL_THRESHOLD: f64 = 0.15;

/// Sum spending per (category, calendar month)
pub fn monthly_totals(history: &[SpendRecord]) -> BTreeMap<Category, BTreeMap<Period, Money>> {
    let mut totals: BTreeMap<Category, BTreeMap<Period, Money>> = BTreeMap::new();
    for record in history {
        *totals
            .entry(record.category)
            .or_default()
            .entry(Period::containing(record.date))
            .or_default() += record.amount;
    }
    totals
}

/// Detect categories with consistent monthly spend
///
/// Needs at least two months of data per category. Returns the mean monthly
/// total, rounded to the cent, for every category whose CV is below
/// `threshold`.
pub fn detect_fixed_bills(history: &[SpendRecord], threshold: f64) -> BTreeMap<Category, Money> {
    let mut fixed = BTreeMap::new();

    for (category, months) in monthly_totals(history) {
        if months.len() < 2 {
            continue;
        }

        let totals: Vec<f64> = months.values().map(Money::as_f64).collect();
        let mean = totals.iter().sum::<f64>() / totals.len() as f64;
        if mean <= 0.0 {
            continue;
        }

        let cv = sample_std_dev(&totals, mean) / mean;
        if cv < threshold {
            fixed.insert(category, Money::from_f64_rounded(mean));
        }
    }

    fixed
}

/// Sample standard deviation (n - 1 denominator); needs at least two values
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}
