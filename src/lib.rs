//! Broiler Ledger Library
//!
//! Cost accounting and performance ranking for broiler production batches.
//!
//! This library provides tools for:
//! - Validating batch inputs, typed or submitted as raw string forms
//! - Computing flock totals, feed conversion, mortality, daily gain and net
//!   cost per kilogram for one batch
//! - Breaking the batch cost down by category and rating the results
//! - Keeping the batch history and a handler and shed registry in a JSON
//!   ledger file
//! - Ranking handlers by a versioned composite performance score
//!
//! The calculation core is synchronous and pure; only the ledger store does I/O.

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod calculator;
        pub mod cost_breakdown;
        pub mod insights;
        pub mod ledger;
        pub mod metrics;
        pub mod ranking;
        pub mod validation;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    BatchForm, BatchInput, BatchRecord, BatchSummary, CalculationResult, FeedPhase, Handler,
    HandlerPerformance, RemovalBatch, Shed, ShedStatus,
};
pub use app::services::calculator::calculate;
pub use app::services::ledger::{BatchLedger, LedgerStore};
pub use config::{LedgerConfig, ScoringPolicy, ValidationRules};
pub use error::{LedgerError, Result, Violation};
