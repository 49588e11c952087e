//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional JSON config
//! file, then the environment, then command-line overrides applied by the
//! CLI. [`LedgerConfig::validate`] runs once all layers are applied.

use crate::constants::{
    DATA_DIR_NAME, DATA_FILE_ENV, LEDGER_FILE_NAME, MAX_BATCH_DAYS, MAX_REMOVAL_BATCHES,
    MIN_BATCH_DAYS, SCORE_FCR_BEST, SCORE_FCR_WORST, SCORE_GAIN_BEST, SCORE_GAIN_WORST,
    SCORE_MORTALITY_BEST, SCORE_MORTALITY_WORST, SCORE_WEIGHT_FCR, SCORE_WEIGHT_GAIN,
    SCORE_WEIGHT_MORTALITY, SCORING_POLICY_VERSION,
};
use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Limits applied to batch input before any calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Reject inputs without any removal batch
    pub require_removal_batch: bool,

    /// Maximum number of removal batches per production cycle
    pub max_removal_batches: usize,

    /// Shortest accepted cycle between entry and exit dates (days)
    pub min_batch_days: i64,

    /// Longest accepted cycle between entry and exit dates (days)
    pub max_batch_days: i64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            require_removal_batch: true,
            max_removal_batches: MAX_REMOVAL_BATCHES,
            min_batch_days: MIN_BATCH_DAYS,
            max_batch_days: MAX_BATCH_DAYS,
        }
    }
}

/// Anchors and weights of the composite handler score.
///
/// Each component maps its metric linearly onto [0, 100] between a "best"
/// and a "worst" anchor and is clamped outside that range. The score is the
/// weighted sum of the components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Recorded on every computed score
    pub version: String,

    pub fcr_best: f64,
    pub fcr_worst: f64,
    pub mortality_best: f64,
    pub mortality_worst: f64,
    pub gain_best: f64,
    pub gain_worst: f64,

    pub fcr_weight: f64,
    pub mortality_weight: f64,
    pub gain_weight: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            version: SCORING_POLICY_VERSION.to_string(),
            fcr_best: SCORE_FCR_BEST,
            fcr_worst: SCORE_FCR_WORST,
            mortality_best: SCORE_MORTALITY_BEST,
            mortality_worst: SCORE_MORTALITY_WORST,
            gain_best: SCORE_GAIN_BEST,
            gain_worst: SCORE_GAIN_WORST,
            fcr_weight: SCORE_WEIGHT_FCR,
            mortality_weight: SCORE_WEIGHT_MORTALITY,
            gain_weight: SCORE_WEIGHT_GAIN,
        }
    }
}

impl ScoringPolicy {
    fn validate(&self) -> Result<()> {
        let anchors = [
            ("fcr", self.fcr_best, self.fcr_worst),
            ("mortality", self.mortality_best, self.mortality_worst),
            ("gain", self.gain_best, self.gain_worst),
        ];
        for (name, best, worst) in anchors {
            if !best.is_finite() || !worst.is_finite() || best == worst {
                return Err(LedgerError::configuration(format!(
                    "scoring anchors for {} must be finite and distinct (best {}, worst {})",
                    name, best, worst
                )));
            }
        }

        let weights = [self.fcr_weight, self.mortality_weight, self.gain_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(LedgerError::configuration(
                "scoring weights must be finite and non-negative",
            ));
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(LedgerError::configuration(format!(
                "scoring weights must sum to 1.0, got {}",
                total
            )));
        }

        if self.version.trim().is_empty() {
            return Err(LedgerError::configuration(
                "scoring policy version must not be empty",
            ));
        }
        Ok(())
    }
}

/// Global configuration for the broiler ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON file holding the batch history
    pub data_file: PathBuf,

    pub validation: ValidationRules,

    pub scoring: ScoringPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_file: Self::default_data_file(),
            validation: ValidationRules::default(),
            scoring: ScoringPolicy::default(),
        }
    }
}

impl LedgerConfig {
    /// Ledger location under the platform data directory, falling back to
    /// the working directory when none is available
    pub fn default_data_file() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(DATA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(LEDGER_FILE_NAME)
    }

    /// Default location of the optional config file
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(DATA_DIR_NAME).join("config.json"))
    }

    /// Load defaults, overlay a config file when given, then the environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(data_file) = std::env::var(DATA_FILE_ENV) {
            if !data_file.trim().is_empty() {
                debug!("{} overrides data file: {}", DATA_FILE_ENV, data_file);
                config.data_file = PathBuf::from(data_file);
            }
        }

        Ok(config)
    }

    /// Read a JSON config file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::configuration(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            LedgerError::configuration(format!(
                "failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn with_data_file(mut self, data_file: impl Into<PathBuf>) -> Self {
        self.data_file = data_file.into();
        self
    }

    pub fn with_validation(mut self, validation: ValidationRules) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(LedgerError::configuration("data file path must not be empty"));
        }

        let rules = &self.validation;
        if rules.max_removal_batches == 0 {
            return Err(LedgerError::configuration(
                "max_removal_batches must be at least 1",
            ));
        }
        if rules.min_batch_days < 0 || rules.min_batch_days > rules.max_batch_days {
            return Err(LedgerError::configuration(format!(
                "invalid batch duration range {}..={} days",
                rules.min_batch_days, rules.max_batch_days
            )));
        }

        self.scoring.validate()
    }
}
