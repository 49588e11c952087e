//! Batch calculation pipeline.
//!
//! Runs one input through aggregation, the metric formulas, the cost
//! breakdown and insight generation. The pipeline is a pure function of its
//! input: the same input always yields an identical result.

use crate::app::models::{BatchInput, CalculationResult};
use crate::app::services::insights::{self, InsightInputs};
use crate::app::services::{aggregator, cost_breakdown, metrics};

/// Compute every derived metric for one batch.
///
/// No validation happens here; division by zero resolves to 0, so the
/// result is defined even for inputs validation would reject.
pub fn calculate(input: &BatchInput) -> CalculationResult {
    let flock = aggregator::aggregate(input);
    let total_feed_consumed_kg = metrics::total_feed_consumed(input);
    let breakdown = cost_breakdown::breakdown(input);
    let total_revenue = cost_breakdown::total_revenue(input);

    let feed_conversion_ratio =
        metrics::feed_conversion_ratio(total_feed_consumed_kg, flock.total_weight_produced_kg);
    let mortality_rate_percent =
        metrics::mortality_rate_percent(input.chicks_died, input.initial_chicks);
    let daily_weight_gain_kg = metrics::daily_weight_gain(
        flock.total_weight_produced_kg,
        flock.weighted_average_age,
        flock.surviving_chicks,
    );
    let net_cost_per_kg = metrics::net_cost_per_kg(
        breakdown.total_cost,
        total_revenue,
        flock.total_weight_produced_kg,
    );

    let insights = insights::generate(&InsightInputs {
        feed_conversion_ratio,
        mortality_rate_percent,
        daily_weight_gain_kg,
        net_cost_per_kg,
        missing_chicks: flock.missing_chicks,
        initial_chicks: input.initial_chicks,
        weighted_average_age: flock.weighted_average_age,
    });

    CalculationResult {
        batch_id: input.batch_id.clone(),
        surviving_chicks: flock.surviving_chicks,
        removed_chicks: flock.removed_chicks,
        missing_chicks: flock.missing_chicks,
        total_weight_produced_kg: flock.total_weight_produced_kg,
        total_feed_consumed_kg,
        average_weight_per_chick_kg: flock.average_weight_per_chick_kg,
        feed_conversion_ratio,
        mortality_rate_percent,
        viability_rate_percent: metrics::viability_rate_percent(
            input.chicks_died,
            input.initial_chicks,
        ),
        weighted_average_age: flock.weighted_average_age,
        daily_weight_gain_kg,
        total_cost: breakdown.total_cost,
        total_revenue,
        net_cost_per_kg,
        cost_breakdown: breakdown,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{FeedPhase, InsightTopic, RemovalBatch};

    fn reference_batch() -> BatchInput {
        let mut input = BatchInput::new("B-1", "S1", "Ana", 1000);
        input.chicks_died = 50;
        input.removal_batches = vec![RemovalBatch::new(900, 1800.0, 42)];
        input
    }

    #[test]
    fn test_reference_batch_without_feed() {
        let result = calculate(&reference_batch());

        assert_eq!(result.surviving_chicks, 950);
        assert_eq!(result.missing_chicks, 50);
        assert_eq!(result.weighted_average_age, 42.0);
        assert_eq!(result.feed_conversion_ratio, 0.0);
        assert_eq!(result.mortality_rate_percent, 5.0);
        assert_eq!(result.viability_rate_percent, 95.0);
        assert_eq!(result.surviving_chicks + 50, 1000);
    }

    #[test]
    fn test_pre_starter_feed_sets_fcr() {
        let mut input = reference_batch();
        input.pre_starter_feed = FeedPhase::new(100.0, 1.0);
        let result = calculate(&input);

        assert_eq!(result.total_feed_consumed_kg, 100.0);
        assert!((result.feed_conversion_ratio - 100.0 / 1800.0).abs() < 1e-12);
        assert_eq!(metrics::round_to(result.feed_conversion_ratio, 4), 0.0556);
    }

    #[test]
    fn test_empty_flock_is_not_a_division_error() {
        let result = calculate(&BatchInput::new("B-0", "S1", "Ana", 0));

        assert_eq!(result.mortality_rate_percent, 0.0);
        assert_eq!(result.daily_weight_gain_kg, 0.0);
        assert_eq!(result.net_cost_per_kg, 0.0);
        assert!(
            !result
                .insights
                .iter()
                .any(|i| i.topic == InsightTopic::MissingChicks)
        );
    }

    #[test]
    fn test_bedding_revenue_lowers_cost_per_kg() {
        let mut input = reference_batch();
        input.chick_cost_per_unit = 3.0;
        input.chicken_bedding_sale_revenue = 600.0;
        let result = calculate(&input);

        assert_eq!(result.total_cost, 3000.0);
        assert!((result.net_cost_per_kg - 2400.0 / 1800.0).abs() < 1e-12);
        assert!(result.net_cost_per_kg < result.total_cost / result.total_weight_produced_kg);
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let mut input = reference_batch();
        input.growth_feed = FeedPhase::new(4000.0, 0.4);
        input.cost_variations = -12.5;

        assert_eq!(calculate(&input), calculate(&input));
    }

    #[test]
    fn test_unvalidated_extreme_counts_do_not_panic() {
        let mut input = BatchInput::new("B-X", "S1", "Ana", u64::MAX);
        input.removal_batches = vec![RemovalBatch::new(u64::MAX / 2 + 1, 1800.0, 42); 2];
        let result = calculate(&input);

        assert_eq!(result.removed_chicks, u64::MAX);
        assert_eq!(result.missing_chicks, 0);
        assert!(result.weighted_average_age.is_finite());
    }
}
