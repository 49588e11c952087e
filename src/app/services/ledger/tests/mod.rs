//! Shared fixtures for ledger tests

use crate::app::models::{BatchInput, FeedPhase, RemovalBatch};
use crate::config::{ScoringPolicy, ValidationRules};

use super::BatchLedger;

pub mod book_tests;
pub mod store_tests;

/// A valid batch: 1000 chicks, 50 died, 900 removed weighing 1800 kg at 42 days
pub fn sample_input(batch_id: &str, shed: &str, handler: &str) -> BatchInput {
    let mut input = BatchInput::new(batch_id, shed, handler, 1000);
    input.chick_cost_per_unit = 0.5;
    input.pre_starter_feed = FeedPhase::new(100.0, 1.0);
    input.starter_feed = FeedPhase::new(500.0, 0.8);
    input.growth_feed = FeedPhase::new(1500.0, 0.7);
    input.final_feed = FeedPhase::new(1000.0, 0.6);
    input.medicine_costs = 800.0;
    input.miscellaneous_costs = 200.0;
    input.sawdust_bedding_cost = 275.0;
    input.chicken_bedding_sale_revenue = 100.0;
    input.chicks_died = 50;
    input.removal_batches = vec![RemovalBatch::new(900, 1800.0, 42)];
    input
}

pub fn empty_ledger() -> BatchLedger {
    BatchLedger::new(ValidationRules::default(), ScoringPolicy::default())
}
