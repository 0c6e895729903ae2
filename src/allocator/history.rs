//! Historical average spend per category

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};

use crate::models::{Category, Money, Period, SpendRecord};

/// Default lookback window, in months
pub const DEFAULT_HISTORY_MONTHS: u32 = 3;

/// A "month" of lookback is a flat 30 days
const DAYS_PER_MONTH: i64 = 30;

/// Average monthly spend per category over the last `months` months
///
/// The window is anchored at `today`. The divisor is the number of distinct
/// calendar months that actually appear in the window (never less than one).
/// Every category is present in the result; categories with no spend map to
/// zero.
pub fn historical_averages(
    history: &[SpendRecord],
    months: u32,
    today: NaiveDate,
) -> BTreeMap<Category, Money> {
    let mut averages: BTreeMap<Category, Money> = Category::ALL
        .into_iter()
        .map(|category| (category, Money::zero()))
        .collect();

    let cutoff = today - Duration::days(i64::from(months) * DAYS_PER_MONTH);
    let recent: Vec<&SpendRecord> = history.iter().filter(|r| r.date >= cutoff).collect();
    if recent.is_empty() {
        return averages;
    }

    let distinct_months: BTreeSet<Period> =
        recent.iter().map(|r| Period::containing(r.date)).collect();
    let divisor = distinct_months.len().max(1) as f64;

    let mut totals: BTreeMap<Category, Money> = BTreeMap::new();
    for record in recent {
        *totals.entry(record.category).or_default() += record.amount;
    }

    for (category, total) in totals {
        averages.insert(category, Money::from_f64_rounded(total.as_f64() / divisor));
    }

    averages
}
