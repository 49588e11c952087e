//! Handler ranking
//!
//! Aggregates the full batch history per handler and orders handlers by a
//! composite performance score. Nothing is cached: every call re-scans the
//! history it is given, and ranks are positions in the sorted output.

mod scoring;

#[cfg(test)]
mod tests;

use crate::app::models::{BatchInput, CalculationResult, HandlerPerformance};
use crate::config::ScoringPolicy;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The per-batch figures ranking needs
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub handler_name: String,
    pub initial_chicks: u64,
    pub feed_conversion_ratio: f64,
    pub mortality_rate_percent: f64,
    pub daily_weight_gain_kg: f64,
    pub net_cost_per_kg: f64,
}

impl BatchOutcome {
    pub fn from_calculation(input: &BatchInput, result: &CalculationResult) -> Self {
        Self {
            handler_name: input.handler_name.clone(),
            initial_chicks: input.initial_chicks,
            feed_conversion_ratio: result.feed_conversion_ratio,
            mortality_rate_percent: result.mortality_rate_percent,
            daily_weight_gain_kg: result.daily_weight_gain_kg,
            net_cost_per_kg: result.net_cost_per_kg,
        }
    }

    /// FCR is 0 when no feed or no live weight was recorded
    pub fn has_fcr(&self) -> bool {
        self.feed_conversion_ratio > 0.0
    }
}

fn mean(outcomes: &[&BatchOutcome], metric: impl Fn(&BatchOutcome) -> f64) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    outcomes.iter().map(|outcome| metric(*outcome)).sum::<f64>() / outcomes.len() as f64
}

/// Mean FCR over the batches that have one; 0 when none do
fn mean_fcr(outcomes: &[&BatchOutcome]) -> f64 {
    let measured: Vec<&BatchOutcome> = outcomes
        .iter()
        .copied()
        .filter(|outcome| outcome.has_fcr())
        .collect();
    mean(&measured, |o| o.feed_conversion_ratio)
}

/// Aggregate one handler's batches; `None` when the slice is empty
fn aggregate(
    handler_name: &str,
    outcomes: &[&BatchOutcome],
    policy: &ScoringPolicy,
) -> Option<HandlerPerformance> {
    if outcomes.is_empty() {
        return None;
    }

    let avg_fcr = mean_fcr(outcomes);
    let avg_mortality = mean(outcomes, |o| o.mortality_rate_percent);
    let avg_daily_gain = mean(outcomes, |o| o.daily_weight_gain_kg);

    Some(HandlerPerformance {
        handler_name: handler_name.to_string(),
        total_batches: outcomes.len(),
        avg_feed_conversion_ratio: avg_fcr,
        avg_mortality_rate: avg_mortality,
        avg_daily_weight_gain: avg_daily_gain,
        avg_cost_per_kg: mean(outcomes, |o| o.net_cost_per_kg),
        total_chicks_processed: outcomes
            .iter()
            .fold(0u64, |total, o| total.saturating_add(o.initial_chicks)),
        performance_score: policy.score(avg_fcr, avg_mortality, avg_daily_gain),
        scoring_policy: policy.version.clone(),
    })
}

/// Performance of a single handler, or `None` if they have no batches
pub fn handler_performance(
    handler_name: &str,
    outcomes: &[BatchOutcome],
    policy: &ScoringPolicy,
) -> Option<HandlerPerformance> {
    let own: Vec<&BatchOutcome> = outcomes
        .iter()
        .filter(|outcome| outcome.handler_name == handler_name)
        .collect();
    aggregate(handler_name, &own, policy)
}

/// Leaderboard order: score descending, then batch count descending, then name
pub fn leaderboard_order(a: &HandlerPerformance, b: &HandlerPerformance) -> Ordering {
    b.performance_score
        .total_cmp(&a.performance_score)
        .then_with(|| b.total_batches.cmp(&a.total_batches))
        .then_with(|| a.handler_name.cmp(&b.handler_name))
}

/// Aggregate every handler and sort them into leaderboard order
pub fn rank_handlers(outcomes: &[BatchOutcome], policy: &ScoringPolicy) -> Vec<HandlerPerformance> {
    let mut by_handler: BTreeMap<&str, Vec<&BatchOutcome>> = BTreeMap::new();
    for outcome in outcomes {
        by_handler
            .entry(outcome.handler_name.as_str())
            .or_default()
            .push(outcome);
    }

    let mut performances: Vec<HandlerPerformance> = by_handler
        .into_iter()
        .filter_map(|(name, own)| aggregate(name, &own, policy))
        .collect();
    performances.sort_by(leaderboard_order);
    performances
}

/// Pair each performance with its 1-based rank
pub fn with_ranks(
    performances: &[HandlerPerformance],
) -> impl Iterator<Item = (usize, &HandlerPerformance)> {
    performances
        .iter()
        .enumerate()
        .map(|(index, performance)| (index + 1, performance))
}
