//! Tests for handler aggregation and leaderboard ordering

use super::*;


/// Outcome with average gain and cost, varying only the scored metrics
fn outcome(handler: &str, fcr: f64, mortality: f64) -> BatchOutcome {
    BatchOutcome {
        handler_name: handler.to_string(),
        initial_chicks: 1000,
        feed_conversion_ratio: fcr,
        mortality_rate_percent: mortality,
        daily_weight_gain_kg: 0.055,
        net_cost_per_kg: 1.8,
    }
}
