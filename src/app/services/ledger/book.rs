//! In-memory batch history

use super::store::LedgerContents;
use crate::app::models::{
    BatchInput, BatchRecord, BatchSummary, CalculationResult, Handler, HandlerPerformance, Shed,
};
use crate::app::services::ranking::{self, BatchOutcome};
use crate::app::services::{calculator, validation};
use crate::config::{LedgerConfig, ScoringPolicy, ValidationRules};
use crate::error::{LedgerError, Result};
use chrono::Utc;
use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;

/// Batch history keyed by `batch_id`, kept in creation order, plus the
/// handler and shed registry
#[derive(Debug, Clone)]
pub struct BatchLedger {
    records: Vec<BatchRecord>,
    /// Sorted by name
    pub(super) handlers: Vec<Handler>,
    /// Sorted by number
    pub(super) sheds: Vec<Shed>,
    rules: ValidationRules,
    scoring: ScoringPolicy,
}

impl BatchLedger {
    pub fn new(rules: ValidationRules, scoring: ScoringPolicy) -> Self {
        Self {
            records: Vec::new(),
            handlers: Vec::new(),
            sheds: Vec::new(),
            rules,
            scoring,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.validation.clone(), config.scoring.clone())
    }

    /// Replace the history and registry with what storage holds
    pub fn with_contents(mut self, contents: LedgerContents) -> Self {
        self.records = contents.batches;
        self.handlers = contents.handlers;
        self.sheds = contents.sheds;
        self.handlers.sort_by(|a, b| a.name.cmp(&b.name));
        self.sheds.sort_by(|a, b| a.number.cmp(&b.number));
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn scoring_policy(&self) -> &ScoringPolicy {
        &self.scoring
    }

    fn position(&self, batch_id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.input.batch_id == batch_id)
    }

    fn not_found(batch_id: &str) -> LedgerError {
        LedgerError::BatchNotFound {
            batch_id: batch_id.to_string(),
        }
    }

    /// Record a new batch. Fails on invalid input or an existing `batch_id`.
    pub fn create(&mut self, input: BatchInput) -> Result<&BatchRecord> {
        validation::validate(&input, &self.rules)?;
        if self.position(&input.batch_id).is_some() {
            return Err(LedgerError::DuplicateBatch {
                batch_id: input.batch_id,
            });
        }

        self.ensure_handler(&input.handler_name);
        let record = BatchRecord {
            id: Uuid::new_v4(),
            input,
            created_at: Utc::now(),
            updated_at: None,
        };
        info!(
            "Created batch {} for handler {} in shed {}",
            record.input.batch_id, record.input.handler_name, record.input.shed_number
        );

        let index = self.records.len();
        self.records.push(record);
        Ok(&self.records[index])
    }

    /// Overwrite an existing batch, keeping its record id and creation time
    pub fn update(&mut self, batch_id: &str, input: BatchInput) -> Result<&BatchRecord> {
        let index = self
            .position(batch_id)
            .ok_or_else(|| Self::not_found(batch_id))?;
        if input.batch_id != batch_id {
            return Err(LedgerError::invalid(
                "batch_id",
                format!("cannot be changed on update (expected '{}')", batch_id),
            ));
        }
        validation::validate(&input, &self.rules)?;
        self.ensure_handler(&input.handler_name);

        let record = &mut self.records[index];
        record.input = input;
        record.updated_at = Some(Utc::now());
        info!("Updated batch {}", batch_id);

        Ok(&self.records[index])
    }

    /// Remove a batch and return what was stored
    pub fn delete(&mut self, batch_id: &str) -> Result<BatchRecord> {
        let index = self
            .position(batch_id)
            .ok_or_else(|| Self::not_found(batch_id))?;
        let record = self.records.remove(index);
        info!("Deleted batch {}", batch_id);
        Ok(record)
    }

    pub fn get(&self, batch_id: &str) -> Result<&BatchRecord> {
        self.position(batch_id)
            .map(|index| &self.records[index])
            .ok_or_else(|| Self::not_found(batch_id))
    }

    /// Recompute the full result of one stored batch
    pub fn calculate(&self, batch_id: &str) -> Result<CalculationResult> {
        self.get(batch_id)
            .map(|record| calculator::calculate(&record.input))
    }

    /// Every record, oldest first
    pub fn records(&self) -> &[BatchRecord] {
        &self.records
    }

    /// History rows, newest first, optionally narrowed to one handler and/or shed
    pub fn summaries(&self, handler: Option<&str>, shed: Option<&str>) -> Vec<BatchSummary> {
        let summaries: Vec<BatchSummary> = self
            .records
            .iter()
            .rev()
            .filter(|record| handler.is_none_or(|name| record.input.handler_name == name))
            .filter(|record| shed.is_none_or(|number| record.input.shed_number == number))
            .map(|record| {
                let result = calculator::calculate(&record.input);
                BatchSummary {
                    batch_id: record.input.batch_id.clone(),
                    shed_number: record.input.shed_number.clone(),
                    handler_name: record.input.handler_name.clone(),
                    created_at: record.created_at,
                    initial_chicks: record.input.initial_chicks,
                    fcr: result.feed_conversion_ratio,
                    mortality_percent: result.mortality_rate_percent,
                    cost_per_kg: result.net_cost_per_kg,
                }
            })
            .collect();

        debug!(
            "Listed {} of {} batches (handler: {:?}, shed: {:?})",
            summaries.len(),
            self.records.len(),
            handler,
            shed
        );
        summaries
    }

    /// Distinct handler names from the registry and the history, sorted
    pub fn handler_names(&self) -> Vec<String> {
        self.handlers
            .iter()
            .map(|handler| handler.name.clone())
            .chain(
                self.records
                    .iter()
                    .map(|record| record.input.handler_name.clone()),
            )
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct shed numbers from the registry and the history, sorted
    pub fn shed_numbers(&self) -> Vec<String> {
        self.sheds
            .iter()
            .map(|shed| shed.number.clone())
            .chain(
                self.records
                    .iter()
                    .map(|record| record.input.shed_number.clone()),
            )
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of stored batches run by this handler
    pub fn batches_for_handler(&self, handler_name: &str) -> usize {
        self.records
            .iter()
            .filter(|record| record.input.handler_name == handler_name)
            .count()
    }

    /// Number of stored batches raised in this shed
    pub fn batches_in_shed(&self, shed_number: &str) -> usize {
        self.records
            .iter()
            .filter(|record| record.input.shed_number == shed_number)
            .count()
    }

    /// Snapshot of the ranking figures of every stored batch
    pub fn outcomes(&self) -> Vec<BatchOutcome> {
        self.records
            .iter()
            .map(|record| {
                let result = calculator::calculate(&record.input);
                BatchOutcome::from_calculation(&record.input, &result)
            })
            .collect()
    }

    /// Leaderboard over the whole history
    pub fn rank_handlers(&self) -> Vec<HandlerPerformance> {
        let ranked = ranking::rank_handlers(&self.outcomes(), &self.scoring);
        debug!(
            "Ranked {} handlers with scoring policy {}",
            ranked.len(),
            self.scoring.version
        );
        ranked
    }

    pub fn handler_performance(&self, handler_name: &str) -> Result<HandlerPerformance> {
        ranking::handler_performance(handler_name, &self.outcomes(), &self.scoring).ok_or_else(
            || LedgerError::HandlerNotFound {
                handler_name: handler_name.to_string(),
            },
        )
    }
}
