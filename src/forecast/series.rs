//! Expense history to daily series

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::SpendRecord;

/// Total spend per day, from the first to the last spending day
///
/// Days without spending are filled with 0 so the series has no gaps.
pub fn daily_series(records: &[SpendRecord]) -> Vec<(NaiveDate, f64)> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.date).or_default() += record.amount.as_f64();
    }

    let (first, last) = match (totals.keys().next(), totals.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut series = Vec::with_capacity((last - first).num_days() as usize + 1);
    let mut date = first;
    while date <= last {
        series.push((date, totals.get(&date).copied().unwrap_or(0.0)));
        date += Duration::days(1);
    }
    series
}
