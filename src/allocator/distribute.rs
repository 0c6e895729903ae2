//! Budget distribution
//!
//! [`distribute_budget`] turns a monthly budget into a list of category
//! allocations whose amounts sum to the budget exactly, to the cent.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::fixed_bills::{detect_fixed_bills, DEFAULT_FIXED_BILL_THRESHOLD};
use super::forecast_weights::forecast_allocations;
use super::history::{historical_averages, DEFAULT_HISTORY_MONTHS};
use super::rescale::{adjust_to_match_total, spread_drift};
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{
    Allocation, AllocationReason, AllocationResult, Category, ForecastPoint, Money, Period,
    SpendRecord,
};

/// Default savings reservation, in percent
pub const DEFAULT_SAVINGS_PERCENT: f64 = 10.0;

/// Default informational reserve
pub const DEFAULT_MIN_RESERVE: Money = Money::from_units(500);

/// Tunables for the historical path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationPolicy {
    pub fixed_bill_threshold: f64,
    pub history_months: u32,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            fixed_bill_threshold: DEFAULT_FIXED_BILL_THRESHOLD,
            history_months: DEFAULT_HISTORY_MONTHS,
        }
    }
}

/// What to distribute
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRequest {
    pub budget_amount: Money,
    pub period: Period,
    pub use_forecast: bool,
    /// 0-100
    pub savings_percent: f64,
    /// Logged when the spendable remainder falls under it; never enforced
    pub min_reserve: Money,
}

impl DistributionRequest {
    pub fn new(budget_amount: Money, period: Period) -> Self {
        Self {
            budget_amount,
            period,
            use_forecast: true,
            savings_percent: DEFAULT_SAVINGS_PERCENT,
            min_reserve: DEFAULT_MIN_RESERVE,
        }
    }

    pub fn with_forecast(mut self, use_forecast: bool) -> Self {
        self.use_forecast = use_forecast;
        self
    }

    pub fn with_savings_percent(mut self, percent: f64) -> Self {
        self.savings_percent = percent;
        self
    }

    pub fn with_min_reserve(mut self, min_reserve: Money) -> Self {
        self.min_reserve = min_reserve;
        self
    }

    fn validate(&self) -> BudgetwiseResult<()> {
        if !self.budget_amount.is_positive() {
            return Err(BudgetwiseError::InvalidInput(format!(
                "budget amount must be positive, got {}",
                self.budget_amount
            )));
        }
        if !self.savings_percent.is_finite() || !(0.0..=100.0).contains(&self.savings_percent) {
            return Err(BudgetwiseError::InvalidInput(format!(
                "savings percent must be between 0 and 100, got {}",
                self.savings_percent
            )));
        }
        Ok(())
    }
}

/// Data the allocator reads but never fetches itself
#[derive(Debug, Clone, Copy)]
pub struct AllocationInputs<'a> {
    pub history: &'a [SpendRecord],
    pub forecast: Option<&'a [ForecastPoint]>,
    /// Anchor for the historical lookback window
    pub today: NaiveDate,
}

impl<'a> AllocationInputs<'a> {
    pub fn historical(history: &'a [SpendRecord], today: NaiveDate) -> Self {
        Self {
            history,
            forecast: None,
            today,
        }
    }

    pub fn with_forecast(mut self, forecast: &'a [ForecastPoint]) -> Self {
        self.forecast = Some(forecast);
        self
    }
}

/// Distribute a budget across categories
///
/// Savings are reserved first. The remainder is split either by forecast
/// (when requested) or by fixed bills plus historical averages. Rounding drift
/// left over at the end is folded into the first allocation made, so the
/// amounts always sum to `budget_amount`. The result is sorted by amount,
/// largest first.
///
/// # Errors
///
/// [`BudgetwiseError::InvalidInput`] for a non-positive budget or a savings
/// percent outside 0-100, and [`BudgetwiseError::ForecastUnavailable`] when a
/// forecast was requested but none was supplied.
pub fn distribute_budget(
    request: &DistributionRequest,
    inputs: &AllocationInputs<'_>,
    policy: &AllocationPolicy,
) -> BudgetwiseResult<AllocationResult> {
    request.validate()?;

    let forecast = match (request.use_forecast, inputs.forecast) {
        (true, Some(points)) => Some(points),
        (true, None) => {
            return Err(BudgetwiseError::ForecastUnavailable(format!(
                "no forecast supplied for {}",
                request.period
            )))
        }
        (false, _) => None,
    };

    let budget = request.budget_amount;
    let mut remaining = budget;
    let mut allocations = Vec::new();

    if request.savings_percent > 0.0 {
        let savings = budget.percentage(request.savings_percent);
        allocations.push(Allocation::new(
            Category::Savings,
            savings,
            AllocationReason::Savings,
        ));
        remaining -= savings;
    }

    if remaining < request.min_reserve {
        tracing::debug!(
            remaining = %remaining,
            min_reserve = %request.min_reserve,
            "spendable budget below minimum reserve"
        );
    }

    match forecast {
        Some(points) => allocations.extend(forecast_allocations(points, remaining)),
        None => allocate_from_history(&mut allocations, &mut remaining, inputs, policy),
    }

    let drift = budget - allocations.iter().map(|a| a.amount).sum::<Money>();
    if !drift.is_zero() {
        if allocations.is_empty() {
            allocations.push(Allocation::new(
                Category::Other,
                budget,
                AllocationReason::FallbackEqual,
            ));
        } else {
            tracing::debug!(drift = %drift, "correcting rounding drift");
            spread_drift(allocations.iter_mut().map(|a| &mut a.amount), drift);
        }
    }

    for allocation in &mut allocations {
        allocation.percentage = allocation.amount.percent_of(budget);
    }
    allocations.sort_by(|a, b| b.amount.cmp(&a.amount));

    tracing::info!(
        period = %request.period,
        budget = %budget,
        categories = allocations.len(),
        "budget distributed"
    );

    Ok(AllocationResult {
        budget_amount: budget,
        period: request.period,
        allocations,
    })
}

fn allocate_from_history(
    allocations: &mut Vec<Allocation>,
    remaining: &mut Money,
    inputs: &AllocationInputs<'_>,
    policy: &AllocationPolicy,
) {
    let fixed_bills = detect_fixed_bills(inputs.history, policy.fixed_bill_threshold);

    let mut fixed_categories = Vec::new();
    for (category, amount) in fixed_bills {
        if category.is_savings() {
            continue;
        }
        if !remaining.is_positive() {
            break;
        }
        let amount = amount.min(*remaining);
        allocations.push(Allocation::new(category, amount, AllocationReason::Fixed));
        fixed_categories.push(category);
        *remaining -= amount;
    }

    if !remaining.is_positive() {
        return;
    }

    let averages = historical_averages(inputs.history, policy.history_months, inputs.today);
    let weights: BTreeMap<Category, f64> = Category::variable()
        .filter(|c| !fixed_categories.contains(c))
        .map(|c| (c, averages.get(&c).map(Money::as_f64).unwrap_or(0.0)))
        .collect();

    let reason = if weights.values().all(|w| *w <= 0.0) {
        AllocationReason::FallbackEqual
    } else {
        AllocationReason::Historical
    };

    let adjusted = adjust_to_match_total(&weights, *remaining);
    for (category, amount) in adjusted {
        if amount.is_positive() {
            allocations.push(Allocation::new(category, amount, reason));
            *remaining -= amount;
        }
    }
}
