//! Application constants for the broiler ledger
//!
//! Agronomic thresholds, validation limits and scoring anchors used
//! throughout the calculation engine. Tunable values are mirrored into
//! [`crate::config::LedgerConfig`] where operators may want to override them.

// =============================================================================
// Input Validation Limits
// =============================================================================

/// Maximum number of removal batches recorded for one production cycle
pub const MAX_REMOVAL_BATCHES: usize = 15;

/// Shortest accepted production cycle between entry and exit dates (days)
pub const MIN_BATCH_DAYS: i64 = 30;

/// Longest accepted production cycle between entry and exit dates (days)
pub const MAX_BATCH_DAYS: i64 = 70;

/// Largest head count accepted for a flock or for the sum of its removals,
/// so signed head-count arithmetic cannot overflow
pub const MAX_HEAD_COUNT: u64 = i64::MAX as u64;

// =============================================================================
// Insight Thresholds
// =============================================================================

/// Feed conversion ratio bands (kg feed per kg live weight, lower is better)
pub mod fcr_bands {
    pub const EXCELLENT: f64 = 1.6;
    pub const GOOD: f64 = 1.8;
    pub const FAIR: f64 = 2.2;
}

/// Mortality bands in percent of initial chicks (lower is better)
pub mod mortality_bands {
    pub const EXCELLENT: f64 = 3.0;
    pub const GOOD: f64 = 7.0;
    pub const FAIR: f64 = 12.0;
}

/// Daily weight gain bands in kg per bird per day (higher is better)
pub mod daily_gain_bands {
    pub const EXCELLENT: f64 = 0.065;
    pub const GOOD: f64 = 0.055;
    pub const FAIR: f64 = 0.045;
}

/// Net cost per kg bands in currency units (lower is better)
pub mod cost_bands {
    pub const EXCELLENT: f64 = 1.5;
    pub const GOOD: f64 = 2.0;
    pub const FAIR: f64 = 2.5;
}

/// Missing chicks above this share of the initial flock are flagged as a warning
pub const MISSING_CHICKS_WARNING_PERCENT: f64 = 5.0;

/// Weighted removal age below which the harvest is considered early (days)
pub const EARLY_HARVEST_AGE_DAYS: f64 = 35.0;

/// Weighted removal age above which the cycle is considered extended (days)
pub const EXTENDED_CYCLE_AGE_DAYS: f64 = 50.0;

// =============================================================================
// Handler Scoring (policy v1)
// =============================================================================

/// Identifier of the default scoring policy
pub const SCORING_POLICY_VERSION: &str = "v1";

/// FCR at or below which the FCR component scores 100
pub const SCORE_FCR_BEST: f64 = 1.6;
/// FCR at or above which the FCR component scores 0
pub const SCORE_FCR_WORST: f64 = 2.8;

/// Mortality percent at or below which the mortality component scores 100
pub const SCORE_MORTALITY_BEST: f64 = 3.0;
/// Mortality percent at or above which the mortality component scores 0
pub const SCORE_MORTALITY_WORST: f64 = 12.0;

/// Daily gain (kg) at or above which the gain component scores 100
pub const SCORE_GAIN_BEST: f64 = 0.065;
/// Daily gain (kg) at or below which the gain component scores 0
pub const SCORE_GAIN_WORST: f64 = 0.045;

pub const SCORE_WEIGHT_FCR: f64 = 0.35;
pub const SCORE_WEIGHT_MORTALITY: f64 = 0.35;
pub const SCORE_WEIGHT_GAIN: f64 = 0.30;

// =============================================================================
// Storage
// =============================================================================

/// Directory name created under the platform data directory
pub const DATA_DIR_NAME: &str = "broiler-ledger";

/// Default ledger file name
pub const LEDGER_FILE_NAME: &str = "ledger.json";

/// Ledger file format version written by this build
pub const LEDGER_FORMAT_VERSION: u32 = 1;

/// Environment variable overriding the ledger file location
pub const DATA_FILE_ENV: &str = "BROILER_LEDGER_DATA_FILE";
