//! Proportional rescaling to an exact cent total

use std::collections::BTreeMap;

use crate::models::{Category, Money};

/// Rescale `weights` so the resulting amounts sum exactly to `target`
///
/// Each share is rounded to the cent independently; the leftover drift goes
/// to the category with the largest adjusted amount (first in category order
/// on ties). An all-zero map is split equally. Negative weights count as
/// zero, and a negative target is treated as zero.
pub fn adjust_to_match_total(
    weights: &BTreeMap<Category, f64>,
    target: Money,
) -> BTreeMap<Category, Money> {
    if weights.is_empty() {
        return BTreeMap::new();
    }

    let target = target.max(Money::zero());
    let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let weight_sum: f64 = weights.values().copied().map(clean).sum();

    let mut adjusted: Vec<(Category, Money)> = if weight_sum <= 0.0 {
        let share = Money::from_f64_rounded(target.as_f64() / weights.len() as f64);
        weights.keys().map(|&category| (category, share)).collect()
    } else {
        let scale = target.as_f64() / weight_sum;
        weights
            .iter()
            .map(|(&category, &w)| (category, Money::from_f64_rounded(clean(w) * scale)))
            .collect()
    };

    let drift = target - adjusted.iter().map(|(_, amount)| *amount).sum::<Money>();
    if !drift.is_zero() {
        // Stable sort keeps category order among equal amounts
        adjusted.sort_by(|a, b| b.1.cmp(&a.1));
        spread_drift(adjusted.iter_mut().map(|(_, amount)| amount), drift);
    }

    adjusted.into_iter().collect()
}

/// Fold a rounding `drift` into a sequence of amounts
///
/// Positive drift lands entirely on the first slot. Negative drift is taken
/// from the first slot and, once that reaches zero, from the following ones,
/// so no amount goes below zero.
pub(crate) fn spread_drift<'a>(slots: impl IntoIterator<Item = &'a mut Money>, drift: Money) {
    let mut pending = drift;
    for slot in slots {
        if pending.is_zero() {
            break;
        }
        if pending.is_positive() {
            *slot += pending;
            pending = Money::zero();
        } else {
            let taken = (-pending).min(*slot);
            *slot -= taken;
            pending += taken;
        }
    }
}
