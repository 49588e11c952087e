//! Raw, string-typed batch form
//!
//! A form as a UI submits it: every field is text, blanks are common and
//! removal rows may be half-filled. [`BatchForm::into_input`] performs the
//! one-time coercion into a typed [`BatchInput`]; the calculation engine
//! never sees this representation.

use super::{BatchInput, FeedPhase, RemovalBatch, flexible_date};
use crate::error::{LedgerError, Result, Violation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedPhaseForm {
    pub consumption_kg: String,
    pub cost_per_kg: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemovalRowForm {
    pub quantity: String,
    pub total_weight_kg: String,
    pub age_days: String,
}

impl RemovalRowForm {
    /// Rows are only submitted once all three fields are filled in
    fn is_complete(&self) -> bool {
        [&self.quantity, &self.total_weight_kg, &self.age_days]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchForm {
    pub batch_id: String,
    pub shed_number: String,
    pub handler_name: String,
    pub entry_date: String,
    pub exit_date: String,
    pub initial_chicks: String,
    pub chick_cost_per_unit: String,
    pub pre_starter_feed: FeedPhaseForm,
    pub starter_feed: FeedPhaseForm,
    pub growth_feed: FeedPhaseForm,
    pub final_feed: FeedPhaseForm,
    pub medicine_costs: String,
    pub miscellaneous_costs: String,
    pub cost_variations: String,
    pub sawdust_bedding_cost: String,
    pub chicken_bedding_sale_revenue: String,
    pub chicks_died: String,
    pub removal_batches: Vec<RemovalRowForm>,
}

/// Collects coercion failures so every bad field is reported at once
struct Coercer {
    violations: Vec<Violation>,
}

impl Coercer {
    fn number<T>(&mut self, field: &str, raw: &str) -> T
    where
        T: FromStr + Default,
    {
        let raw = raw.trim();
        if raw.is_empty() {
            return T::default();
        }
        match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                self.violations
                    .push(Violation::new(field, format!("'{}' is not a valid number", raw)));
                T::default()
            }
        }
    }

    fn date(&mut self, field: &str, raw: &str) -> Option<chrono::NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = flexible_date::parse(raw);
        if parsed.is_none() {
            self.violations
                .push(Violation::new(field, format!("'{}' is not a valid date", raw)));
        }
        parsed
    }

    fn feed(&mut self, field: &str, form: &FeedPhaseForm) -> FeedPhase {
        FeedPhase {
            consumption_kg: self.number(&format!("{}.consumption_kg", field), &form.consumption_kg),
            cost_per_kg: self.number(&format!("{}.cost_per_kg", field), &form.cost_per_kg),
        }
    }
}

impl BatchForm {
    /// Coerce the form into a typed input.
    ///
    /// Blank numbers become zero, blank dates become absent and incomplete
    /// removal rows are dropped. Text that cannot be parsed is rejected.
    /// Range and consistency checks are left to validation.
    pub fn into_input(self) -> Result<BatchInput> {
        let mut coercer = Coercer {
            violations: Vec::new(),
        };

        let removal_batches: Vec<RemovalBatch> = self
            .removal_batches
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_complete())
            .map(|(index, row)| {
                let prefix = format!("removal_batches[{}]", index);
                RemovalBatch {
                    quantity: coercer.number(&format!("{}.quantity", prefix), &row.quantity),
                    total_weight_kg: coercer
                        .number(&format!("{}.total_weight_kg", prefix), &row.total_weight_kg),
                    age_days: coercer.number(&format!("{}.age_days", prefix), &row.age_days),
                }
            })
            .collect();

        let input = BatchInput {
            batch_id: self.batch_id.trim().to_string(),
            shed_number: self.shed_number.trim().to_string(),
            handler_name: self.handler_name.trim().to_string(),
            entry_date: coercer.date("entry_date", &self.entry_date),
            exit_date: coercer.date("exit_date", &self.exit_date),
            initial_chicks: coercer.number("initial_chicks", &self.initial_chicks),
            chick_cost_per_unit: coercer.number("chick_cost_per_unit", &self.chick_cost_per_unit),
            pre_starter_feed: coercer.feed("pre_starter_feed", &self.pre_starter_feed),
            starter_feed: coercer.feed("starter_feed", &self.starter_feed),
            growth_feed: coercer.feed("growth_feed", &self.growth_feed),
            final_feed: coercer.feed("final_feed", &self.final_feed),
            medicine_costs: coercer.number("medicine_costs", &self.medicine_costs),
            miscellaneous_costs: coercer.number("miscellaneous_costs", &self.miscellaneous_costs),
            cost_variations: coercer.number("cost_variations", &self.cost_variations),
            sawdust_bedding_cost: coercer.number("sawdust_bedding_cost", &self.sawdust_bedding_cost),
            chicken_bedding_sale_revenue: coercer.number(
                "chicken_bedding_sale_revenue",
                &self.chicken_bedding_sale_revenue,
            ),
            chicks_died: coercer.number("chicks_died", &self.chicks_died),
            removal_batches,
        };

        if coercer.violations.is_empty() {
            Ok(input)
        } else {
            Err(LedgerError::Validation {
                violations: coercer.violations,
            })
        }
    }
}
