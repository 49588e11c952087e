//! Business insights derived from a batch's metrics.
//!
//! Each metric is rated against fixed agronomic bands. Insights are
//! structured values; turning them into sentences is a presentation concern.

use crate::app::models::{Insight, InsightTopic, Rating};
use crate::constants::{
    EARLY_HARVEST_AGE_DAYS, EXTENDED_CYCLE_AGE_DAYS, MISSING_CHICKS_WARNING_PERCENT, cost_bands,
    daily_gain_bands, fcr_bands, mortality_bands,
};

/// The metrics insights are drawn from
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs {
    pub feed_conversion_ratio: f64,
    pub mortality_rate_percent: f64,
    pub daily_weight_gain_kg: f64,
    pub net_cost_per_kg: f64,
    pub missing_chicks: i64,
    pub initial_chicks: u64,
    pub weighted_average_age: f64,
}

/// Rate a metric where lower values are better
fn rate_lower_better(value: f64, excellent: f64, good: f64, fair: f64) -> Rating {
    if value <= excellent {
        Rating::Excellent
    } else if value <= good {
        Rating::Good
    } else if value <= fair {
        Rating::Fair
    } else {
        Rating::Poor
    }
}

/// Rate a metric where higher values are better
fn rate_higher_better(value: f64, excellent: f64, good: f64, fair: f64) -> Rating {
    if value >= excellent {
        Rating::Excellent
    } else if value >= good {
        Rating::Good
    } else if value >= fair {
        Rating::Fair
    } else {
        Rating::Poor
    }
}

fn insight(topic: InsightTopic, rating: Rating, value: f64) -> Insight {
    Insight {
        topic,
        rating,
        value,
        share_percent: None,
    }
}

pub fn generate(inputs: &InsightInputs) -> Vec<Insight> {
    let mut insights = vec![
        insight(
            InsightTopic::FeedConversion,
            rate_lower_better(
                inputs.feed_conversion_ratio,
                fcr_bands::EXCELLENT,
                fcr_bands::GOOD,
                fcr_bands::FAIR,
            ),
            inputs.feed_conversion_ratio,
        ),
        insight(
            InsightTopic::Mortality,
            rate_lower_better(
                inputs.mortality_rate_percent,
                mortality_bands::EXCELLENT,
                mortality_bands::GOOD,
                mortality_bands::FAIR,
            ),
            inputs.mortality_rate_percent,
        ),
        insight(
            InsightTopic::DailyGain,
            rate_higher_better(
                inputs.daily_weight_gain_kg,
                daily_gain_bands::EXCELLENT,
                daily_gain_bands::GOOD,
                daily_gain_bands::FAIR,
            ),
            inputs.daily_weight_gain_kg,
        ),
        insight(
            InsightTopic::CostEfficiency,
            rate_lower_better(
                inputs.net_cost_per_kg,
                cost_bands::EXCELLENT,
                cost_bands::GOOD,
                cost_bands::FAIR,
            ),
            inputs.net_cost_per_kg,
        ),
    ];

    if inputs.missing_chicks != 0 && inputs.initial_chicks > 0 {
        let share = 100.0 * inputs.missing_chicks.unsigned_abs() as f64 / inputs.initial_chicks as f64;
        let (topic, rating) = if inputs.missing_chicks < 0 {
            (InsightTopic::SurplusRemovals, Rating::Warning)
        } else if share > MISSING_CHICKS_WARNING_PERCENT {
            (InsightTopic::MissingChicks, Rating::Warning)
        } else {
            (InsightTopic::MissingChicks, Rating::Info)
        };
        insights.push(Insight {
            topic,
            rating,
            value: inputs.missing_chicks.unsigned_abs() as f64,
            share_percent: Some(share),
        });
    }

    // No removals means no harvest age to judge
    if inputs.weighted_average_age > 0.0 && inputs.weighted_average_age < EARLY_HARVEST_AGE_DAYS {
        insights.push(insight(
            InsightTopic::EarlyHarvest,
            Rating::Info,
            inputs.weighted_average_age,
        ));
    } else if inputs.weighted_average_age > EXTENDED_CYCLE_AGE_DAYS {
        insights.push(insight(
            InsightTopic::ExtendedCycle,
            Rating::Info,
            inputs.weighted_average_age,
        ));
    }

    insights
}
