//! Zootechnical and financial metric formulas.
//!
//! Every formula is total: a zero denominator yields 0 instead of an error
//! or NaN, so any valid input produces a fully defined result.

use crate::app::models::BatchInput;

/// Divide, returning 0 when the denominator is zero
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Feed consumed across all four phases (kg)
pub fn total_feed_consumed(input: &BatchInput) -> f64 {
    input
        .feed_phases()
        .iter()
        .map(|(_, phase)| phase.consumption_kg)
        .sum()
}

/// Kilograms of feed per kilogram of live weight produced
pub fn feed_conversion_ratio(total_feed_kg: f64, total_weight_kg: f64) -> f64 {
    ratio(total_feed_kg, total_weight_kg)
}

/// Share of the initial flock that died, in percent
pub fn mortality_rate_percent(chicks_died: u64, initial_chicks: u64) -> f64 {
    ratio(100.0 * chicks_died as f64, initial_chicks as f64)
}

/// Complement of the mortality rate; 0 for an empty flock
pub fn viability_rate_percent(chicks_died: u64, initial_chicks: u64) -> f64 {
    if initial_chicks == 0 {
        0.0
    } else {
        100.0 - mortality_rate_percent(chicks_died, initial_chicks)
    }
}

/// Live weight gained per surviving bird per day (kg)
pub fn daily_weight_gain(
    total_weight_kg: f64,
    weighted_average_age: f64,
    surviving_chicks: u64,
) -> f64 {
    ratio(
        ratio(total_weight_kg, weighted_average_age),
        surviving_chicks as f64,
    )
}

/// Production cost net of ancillary revenue, per kilogram produced
pub fn net_cost_per_kg(total_cost: f64, total_revenue: f64, total_weight_kg: f64) -> f64 {
    ratio(total_cost - total_revenue, total_weight_kg)
}

/// Round for display. Only presentation code should call this.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
