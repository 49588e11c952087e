//! Data models for broiler batch accounting
//!
//! This module contains the typed batch input submitted for one production
//! cycle, the derived calculation result, and the cross-batch handler
//! aggregates. Every structure is plain serializable data; behaviour lives in
//! the services.

pub mod form;

pub use form::{BatchForm, FeedPhaseForm, RemovalRowForm};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// Batch Input
// =============================================================================

/// Feed consumed during one growth phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedPhase {
    pub consumption_kg: f64,
    pub cost_per_kg: f64,
}

impl FeedPhase {
    pub fn new(consumption_kg: f64, cost_per_kg: f64) -> Self {
        Self {
            consumption_kg,
            cost_per_kg,
        }
    }

    /// Cost of the feed consumed in this phase
    pub fn cost(&self) -> f64 {
        self.consumption_kg * self.cost_per_kg
    }
}

/// The four feed phases of a broiler cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedPhaseKind {
    /// Days 0-10
    PreStarter,
    /// Days 10-24
    Starter,
    /// Days 24-35
    Growth,
    /// Day 35 onwards
    Final,
}

impl FeedPhaseKind {
    /// Name of the matching field on [`BatchInput`]
    pub fn field_name(&self) -> &'static str {
        match self {
            FeedPhaseKind::PreStarter => "pre_starter_feed",
            FeedPhaseKind::Starter => "starter_feed",
            FeedPhaseKind::Growth => "growth_feed",
            FeedPhaseKind::Final => "final_feed",
        }
    }
}

/// A group of birds removed from the shed in one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RemovalBatch {
    pub quantity: u64,
    pub total_weight_kg: f64,
    pub age_days: u32,
}

impl RemovalBatch {
    pub fn new(quantity: u64, total_weight_kg: f64, age_days: u32) -> Self {
        Self {
            quantity,
            total_weight_kg,
            age_days,
        }
    }
}

/// Production data for one batch, as submitted by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchInput {
    pub batch_id: String,
    pub shed_number: String,
    pub handler_name: String,

    #[serde(default, with = "flexible_date")]
    pub entry_date: Option<NaiveDate>,
    #[serde(default, with = "flexible_date")]
    pub exit_date: Option<NaiveDate>,

    pub initial_chicks: u64,
    pub chick_cost_per_unit: f64,

    #[serde(default, alias = "pre_starter")]
    pub pre_starter_feed: FeedPhase,
    #[serde(default, alias = "starter")]
    pub starter_feed: FeedPhase,
    #[serde(default, alias = "growth")]
    pub growth_feed: FeedPhase,
    #[serde(default, alias = "final")]
    pub final_feed: FeedPhase,

    #[serde(default)]
    pub medicine_costs: f64,
    #[serde(default)]
    pub miscellaneous_costs: f64,
    /// Adjustments to the batch cost; negative values reduce it
    #[serde(default)]
    pub cost_variations: f64,
    #[serde(default)]
    pub sawdust_bedding_cost: f64,
    #[serde(default)]
    pub chicken_bedding_sale_revenue: f64,

    pub chicks_died: u64,
    pub removal_batches: Vec<RemovalBatch>,
}

impl BatchInput {
    /// Create an input with identity and flock size set and every cost zeroed
    pub fn new(
        batch_id: impl Into<String>,
        shed_number: impl Into<String>,
        handler_name: impl Into<String>,
        initial_chicks: u64,
    ) -> Self {
        Self {
            batch_id: batch_id.into(),
            shed_number: shed_number.into(),
            handler_name: handler_name.into(),
            entry_date: None,
            exit_date: None,
            initial_chicks,
            chick_cost_per_unit: 0.0,
            pre_starter_feed: FeedPhase::default(),
            starter_feed: FeedPhase::default(),
            growth_feed: FeedPhase::default(),
            final_feed: FeedPhase::default(),
            medicine_costs: 0.0,
            miscellaneous_costs: 0.0,
            cost_variations: 0.0,
            sawdust_bedding_cost: 0.0,
            chicken_bedding_sale_revenue: 0.0,
            chicks_died: 0,
            removal_batches: Vec::new(),
        }
    }

    /// Feed phases in growth order
    pub fn feed_phases(&self) -> [(FeedPhaseKind, &FeedPhase); 4] {
        [
            (FeedPhaseKind::PreStarter, &self.pre_starter_feed),
            (FeedPhaseKind::Starter, &self.starter_feed),
            (FeedPhaseKind::Growth, &self.growth_feed),
            (FeedPhaseKind::Final, &self.final_feed),
        ]
    }

    /// Days between entry and exit, when both dates are known
    pub fn batch_duration_days(&self) -> Option<i64> {
        match (self.entry_date, self.exit_date) {
            (Some(entry), Some(exit)) => Some((exit - entry).num_days()),
            _ => None,
        }
    }
}

/// Serde adapter accepting plain dates (`2024-01-15`) as well as RFC 3339
/// timestamps (`2024-01-15T00:00:00Z`); always writes plain dates.
pub mod flexible_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Parse a date string, returning `None` when it matches neither format
    pub fn parse(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|timestamp| timestamp.date_naive())
            })
    }

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", value))),
        }
    }
}

// =============================================================================
// Calculation Result
// =============================================================================

/// Cost categories in breakdown order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Chicks,
    PreStarterFeed,
    StarterFeed,
    GrowthFeed,
    FinalFeed,
    Medicine,
    Miscellaneous,
    Variations,
    SawdustBedding,
}

impl CostCategory {
    pub const ALL: [CostCategory; 9] = [
        CostCategory::Chicks,
        CostCategory::PreStarterFeed,
        CostCategory::StarterFeed,
        CostCategory::GrowthFeed,
        CostCategory::FinalFeed,
        CostCategory::Medicine,
        CostCategory::Miscellaneous,
        CostCategory::Variations,
        CostCategory::SawdustBedding,
    ];

    /// The feed category matching a feed phase
    pub fn for_feed_phase(kind: FeedPhaseKind) -> Self {
        match kind {
            FeedPhaseKind::PreStarter => CostCategory::PreStarterFeed,
            FeedPhaseKind::Starter => CostCategory::StarterFeed,
            FeedPhaseKind::Growth => CostCategory::GrowthFeed,
            FeedPhaseKind::Final => CostCategory::FinalFeed,
        }
    }
}

/// One category's share of the batch cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub category: CostCategory,
    pub amount: f64,
    pub percent: f64,
}

/// Absolute and relative cost per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Every category in [`CostCategory::ALL`] order, including zero and negative amounts
    pub lines: Vec<CostLine>,
    pub total_cost: f64,
}

impl CostBreakdown {
    pub fn get(&self, category: CostCategory) -> Option<&CostLine> {
        self.lines.iter().find(|line| line.category == category)
    }

    /// Categories worth displaying: those with a positive cost
    pub fn rendered(&self) -> impl Iterator<Item = &CostLine> {
        self.lines.iter().filter(|line| line.amount > 0.0)
    }
}

/// How a metric compares with agronomic reference bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
    Info,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightTopic {
    FeedConversion,
    Mortality,
    DailyGain,
    CostEfficiency,
    /// Survivors not accounted for by any removal
    MissingChicks,
    /// More birds removed than survived
    SurplusRemovals,
    EarlyHarvest,
    ExtendedCycle,
}

/// A language-neutral observation about one batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub topic: InsightTopic,
    pub rating: Rating,
    /// The metric value the rating was derived from
    pub value: f64,
    /// Share of the initial flock, for head-count insights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_percent: Option<f64>,
}

/// Derived metrics for one batch. Values carry full precision; rounding is
/// left to whoever displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub batch_id: String,

    pub surviving_chicks: u64,
    pub removed_chicks: u64,
    /// Survivors minus removed birds; negative when more were removed than survived
    pub missing_chicks: i64,

    pub total_weight_produced_kg: f64,
    pub total_feed_consumed_kg: f64,
    pub average_weight_per_chick_kg: f64,

    pub feed_conversion_ratio: f64,
    pub mortality_rate_percent: f64,
    pub viability_rate_percent: f64,
    pub weighted_average_age: f64,
    pub daily_weight_gain_kg: f64,

    pub total_cost: f64,
    pub total_revenue: f64,
    pub net_cost_per_kg: f64,

    pub cost_breakdown: CostBreakdown,
    pub insights: Vec<Insight>,
}

// =============================================================================
// Handler and Shed Registry
// =============================================================================

/// A registered handler. Batches refer to handlers by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handler {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Handler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Partial handler edit; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShedStatus {
    #[default]
    Active,
    Maintenance,
    Inactive,
}

impl fmt::Display for ShedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Inactive => "inactive",
        };
        f.write_str(label)
    }
}

impl FromStr for ShedStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "maintenance" => Ok(Self::Maintenance),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!(
                "unknown shed status '{}' (expected active, maintenance or inactive)",
                other
            )),
        }
    }
}

/// A registered shed, identified by its number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shed {
    pub number: String,
    /// Bird capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub status: ShedStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Shed {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            capacity: None,
            location: None,
            status: ShedStatus::default(),
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Partial shed edit; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShedChanges {
    pub number: Option<String>,
    pub capacity: Option<u64>,
    pub location: Option<String>,
    pub status: Option<ShedStatus>,
    pub notes: Option<String>,
}

// =============================================================================
// Stored Records and Aggregates
// =============================================================================

/// A persisted batch. Only the input is stored; results are recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Stable record identifier, kept across edits
    pub id: Uuid,
    pub input: BatchInput,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One row of the batch history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch_id: String,
    pub shed_number: String,
    pub handler_name: String,
    pub created_at: DateTime<Utc>,
    pub initial_chicks: u64,
    pub fcr: f64,
    pub mortality_percent: f64,
    pub cost_per_kg: f64,
}

/// Aggregate performance of one handler across all of their batches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerPerformance {
    pub handler_name: String,
    pub total_batches: usize,
    pub avg_feed_conversion_ratio: f64,
    pub avg_mortality_rate: f64,
    pub avg_daily_weight_gain: f64,
    pub avg_cost_per_kg: f64,
    pub total_chicks_processed: u64,
    /// Composite score in [0, 100], higher is better
    pub performance_score: f64,
    /// Version of the scoring policy that produced the score
    pub scoring_policy: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_input_accepts_short_feed_names_and_timestamps() {
        let json = r#"{
            "batch_id": "B-1",
            "shed_number": "S1",
            "handler_name": "Ana",
            "entry_date": "2024-01-15T00:00:00Z",
            "exit_date": "2024-03-01",
            "initial_chicks": 1000,
            "chick_cost_per_unit": 0.5,
            "pre_starter": {"consumption_kg": 100.0, "cost_per_kg": 1.0},
            "chicks_died": 50,
            "removal_batches": [{"quantity": 900, "total_weight_kg": 1800.0, "age_days": 42}]
        }"#;

        let input: BatchInput = serde_json::from_str(json).unwrap();

        assert_eq!(input.pre_starter_feed, FeedPhase::new(100.0, 1.0));
        assert_eq!(input.final_feed, FeedPhase::default());
        assert_eq!(input.medicine_costs, 0.0);
        assert_eq!(input.entry_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(input.batch_duration_days(), Some(46));
    }

    #[test]
    fn test_blank_date_deserializes_as_absent() {
        let json = r#"{
            "batch_id": "B-2", "shed_number": "S1", "handler_name": "Ana",
            "entry_date": "", "initial_chicks": 10, "chick_cost_per_unit": 0.0,
            "chicks_died": 0, "removal_batches": []
        }"#;

        let input: BatchInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.entry_date, None);
        assert_eq!(input.batch_duration_days(), None);
    }

    #[test]
    fn test_dates_serialize_as_plain_dates() {
        let mut input = BatchInput::new("B-3", "S1", "Ana", 10);
        input.entry_date = NaiveDate::from_ymd_opt(2024, 2, 15);

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["entry_date"], "2024-02-15");
        assert!(value["exit_date"].is_null());
    }

    #[test]
    fn test_rendered_breakdown_skips_non_positive_lines() {
        let breakdown = CostBreakdown {
            lines: vec![
                CostLine {
                    category: CostCategory::Chicks,
                    amount: 500.0,
                    percent: 125.0,
                },
                CostLine {
                    category: CostCategory::Medicine,
                    amount: 0.0,
                    percent: 0.0,
                },
                CostLine {
                    category: CostCategory::Variations,
                    amount: -100.0,
                    percent: -25.0,
                },
            ],
            total_cost: 400.0,
        };

        let rendered: Vec<_> = breakdown.rendered().map(|line| line.category).collect();
        assert_eq!(rendered, vec![CostCategory::Chicks]);
        assert_eq!(breakdown.get(CostCategory::Variations).unwrap().amount, -100.0);
    }

    #[test]
    fn test_shed_status_parses_case_insensitively() {
        assert_eq!("Maintenance".parse::<ShedStatus>(), Ok(ShedStatus::Maintenance));
        assert_eq!(" active ".parse::<ShedStatus>(), Ok(ShedStatus::Active));
        assert!("closed".parse::<ShedStatus>().is_err());
        assert_eq!(ShedStatus::Inactive.to_string(), "inactive");
    }

    #[test]
    fn test_shed_defaults_to_active_when_status_is_absent() {
        let json = r#"{"number": "G3", "capacity": 12000, "created_at": "2024-01-15T08:00:00Z"}"#;

        let shed: Shed = serde_json::from_str(json).unwrap();
        assert_eq!(shed.status, ShedStatus::Active);
        assert_eq!(shed.capacity, Some(12000));
        assert_eq!(shed.location, None);
    }
}
