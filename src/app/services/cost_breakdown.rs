//! Cost allocation across categories.
//!
//! Percentages are derived from the absolute amounts, never the other way
//! round, so the amounts always add up to the total exactly.

use crate::app::models::{BatchInput, CostBreakdown, CostCategory, CostLine};

/// Absolute cost of one category
pub fn category_cost(input: &BatchInput, category: CostCategory) -> f64 {
    match category {
        CostCategory::Chicks => input.initial_chicks as f64 * input.chick_cost_per_unit,
        CostCategory::PreStarterFeed => input.pre_starter_feed.cost(),
        CostCategory::StarterFeed => input.starter_feed.cost(),
        CostCategory::GrowthFeed => input.growth_feed.cost(),
        CostCategory::FinalFeed => input.final_feed.cost(),
        CostCategory::Medicine => input.medicine_costs,
        CostCategory::Miscellaneous => input.miscellaneous_costs,
        CostCategory::Variations => input.cost_variations,
        CostCategory::SawdustBedding => input.sawdust_bedding_cost,
    }
}

/// Ancillary revenue; kept out of the cost categories
pub fn total_revenue(input: &BatchInput) -> f64 {
    input.chicken_bedding_sale_revenue
}

/// Break the batch cost down by category
pub fn breakdown(input: &BatchInput) -> CostBreakdown {
    let amounts: Vec<(CostCategory, f64)> = CostCategory::ALL
        .iter()
        .map(|&category| (category, category_cost(input, category)))
        .collect();

    let total_cost: f64 = amounts.iter().map(|(_, amount)| amount).sum();

    let lines = amounts
        .into_iter()
        .map(|(category, amount)| CostLine {
            category,
            amount,
            percent: if total_cost > 0.0 {
                100.0 * amount / total_cost
            } else {
                0.0
            },
        })
        .collect();

    CostBreakdown { lines, total_cost }
}
