//! Input validation.
//!
//! Every check runs and all violations are reported together, so a user can
//! fix a form in one pass. Nothing is computed for a rejected input.

use crate::app::models::BatchInput;
use crate::config::ValidationRules;
use crate::constants::MAX_HEAD_COUNT;
use crate::error::{LedgerError, Result, Violation};

/// Check a batch input against the configured rules
pub fn validate(input: &BatchInput, rules: &ValidationRules) -> Result<()> {
    let violations = violations(input, rules);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LedgerError::Validation { violations })
    }
}

/// All rule violations of one input, in field order
pub fn violations(input: &BatchInput, rules: &ValidationRules) -> Vec<Violation> {
    let mut found = Vec::new();

    for (field, value) in [
        ("batch_id", &input.batch_id),
        ("shed_number", &input.shed_number),
        ("handler_name", &input.handler_name),
    ] {
        if value.trim().is_empty() {
            found.push(Violation::new(field, "is required"));
        }
    }

    check_dates(input, rules, &mut found);

    if input.initial_chicks == 0 {
        found.push(Violation::new("initial_chicks", "must be greater than 0"));
    } else if input.initial_chicks > MAX_HEAD_COUNT {
        found.push(Violation::new(
            "initial_chicks",
            format!("cannot exceed {}", MAX_HEAD_COUNT),
        ));
    }
    check_amount("chick_cost_per_unit", input.chick_cost_per_unit, &mut found);

    for (kind, phase) in input.feed_phases() {
        let name = kind.field_name();
        check_amount(&format!("{}.consumption_kg", name), phase.consumption_kg, &mut found);
        check_amount(&format!("{}.cost_per_kg", name), phase.cost_per_kg, &mut found);
    }

    check_amount("medicine_costs", input.medicine_costs, &mut found);
    check_amount("miscellaneous_costs", input.miscellaneous_costs, &mut found);
    if !input.cost_variations.is_finite() {
        found.push(Violation::new("cost_variations", "must be a finite number"));
    }
    check_amount("sawdust_bedding_cost", input.sawdust_bedding_cost, &mut found);
    check_amount(
        "chicken_bedding_sale_revenue",
        input.chicken_bedding_sale_revenue,
        &mut found,
    );

    if input.chicks_died > input.initial_chicks {
        found.push(Violation::new(
            "chicks_died",
            format!(
                "cannot exceed initial chicks ({} > {})",
                input.chicks_died, input.initial_chicks
            ),
        ));
    }

    if input.removal_batches.is_empty() && rules.require_removal_batch {
        found.push(Violation::new(
            "removal_batches",
            "at least one removal batch is required",
        ));
    }
    if input.removal_batches.len() > rules.max_removal_batches {
        found.push(Violation::new(
            "removal_batches",
            format!(
                "at most {} removal batches are allowed, got {}",
                rules.max_removal_batches,
                input.removal_batches.len()
            ),
        ));
    }
    let removed = input
        .removal_batches
        .iter()
        .try_fold(0u64, |total, batch| total.checked_add(batch.quantity));
    if removed.is_none_or(|total| total > MAX_HEAD_COUNT) {
        found.push(Violation::new(
            "removal_batches",
            format!("total quantity cannot exceed {}", MAX_HEAD_COUNT),
        ));
    }
    for (index, batch) in input.removal_batches.iter().enumerate() {
        check_amount(
            &format!("removal_batches[{}].total_weight_kg", index),
            batch.total_weight_kg,
            &mut found,
        );
    }

    found
}

/// Amounts must be finite and non-negative
fn check_amount(field: &str, value: f64, found: &mut Vec<Violation>) {
    if !value.is_finite() {
        found.push(Violation::new(field, "must be a finite number"));
    } else if value < 0.0 {
        found.push(Violation::new(field, "must not be negative"));
    }
}

fn check_dates(input: &BatchInput, rules: &ValidationRules, found: &mut Vec<Violation>) {
    let Some(days) = input.batch_duration_days() else {
        return;
    };

    if days <= 0 {
        found.push(Violation::new("exit_date", "must be after the entry date"));
    } else if days < rules.min_batch_days {
        found.push(Violation::new(
            "exit_date",
            format!(
                "batch duration must be at least {} days, got {}",
                rules.min_batch_days, days
            ),
        ));
    } else if days > rules.max_batch_days {
        found.push(Violation::new(
            "exit_date",
            format!(
                "batch duration cannot exceed {} days, got {}",
                rules.max_batch_days, days
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{FeedPhase, RemovalBatch};
    use chrono::NaiveDate;

    fn valid_input() -> BatchInput {
        let mut input = BatchInput::new("B-1", "S1", "Ana", 1000);
        input.chick_cost_per_unit = 0.5;
        input.chicks_died = 50;
        input.entry_date = NaiveDate::from_ymd_opt(2024, 1, 15);
        input.exit_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        input.removal_batches = vec![RemovalBatch::new(900, 1800.0, 42)];
        input
    }

    fn fields(input: &BatchInput) -> Vec<String> {
        violations(input, &ValidationRules::default())
            .into_iter()
            .map(|v| v.field)
            .collect()
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate(&valid_input(), &ValidationRules::default()).is_ok());
    }

    #[test]
    fn test_dates_are_optional() {
        let mut input = valid_input();
        input.entry_date = None;
        assert!(fields(&input).is_empty());
    }

    #[test]
    fn test_identity_fields_required() {
        let mut input = valid_input();
        input.batch_id = "  ".to_string();
        input.handler_name.clear();

        assert_eq!(fields(&input), vec!["batch_id", "handler_name"]);
    }

    #[test]
    fn test_flock_consistency() {
        let mut input = valid_input();
        input.initial_chicks = 0;

        assert_eq!(fields(&input), vec!["initial_chicks", "chicks_died"]);
    }

    #[test]
    fn test_removal_list_bounds() {
        let mut input = valid_input();
        input.removal_batches.clear();
        assert_eq!(fields(&input), vec!["removal_batches"]);

        input.removal_batches = vec![RemovalBatch::new(10, 20.0, 40); 16];
        assert_eq!(fields(&input), vec!["removal_batches"]);

        input.removal_batches.truncate(15);
        assert!(fields(&input).is_empty());
    }

    #[test]
    fn test_empty_removal_list_allowed_when_not_required() {
        let mut input = valid_input();
        input.removal_batches.clear();
        let rules = ValidationRules {
            require_removal_batch: false,
            ..Default::default()
        };

        assert!(validate(&input, &rules).is_ok());
    }

    #[test]
    fn test_exit_must_follow_entry() {
        let mut input = valid_input();
        input.exit_date = input.entry_date;

        let found = violations(&input, &ValidationRules::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "must be after the entry date");
    }

    #[test]
    fn test_duration_range() {
        let mut input = valid_input();
        input.exit_date = NaiveDate::from_ymd_opt(2024, 2, 5);
        assert_eq!(fields(&input), vec!["exit_date"]);

        input.exit_date = NaiveDate::from_ymd_opt(2024, 4, 30);
        assert_eq!(fields(&input), vec!["exit_date"]);

        input.exit_date = NaiveDate::from_ymd_opt(2024, 2, 14);
        assert!(fields(&input).is_empty());

        // 70 days is the last accepted duration
        input.exit_date = NaiveDate::from_ymd_opt(2024, 3, 25);
        assert!(fields(&input).is_empty());

        input.exit_date = NaiveDate::from_ymd_opt(2024, 3, 26);
        let found = violations(&input, &ValidationRules::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "batch duration cannot exceed 70 days, got 71");
    }

    #[test]
    fn test_exit_before_entry_rejected() {
        let mut input = valid_input();
        input.exit_date = NaiveDate::from_ymd_opt(2024, 1, 10);

        let found = violations(&input, &ValidationRules::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field, "exit_date");
        assert_eq!(found[0].message, "must be after the entry date");
    }

    #[test]
    fn test_negative_amounts_rejected_except_variations() {
        let mut input = valid_input();
        input.cost_variations = -250.0;
        assert!(fields(&input).is_empty());

        input.medicine_costs = -1.0;
        input.final_feed = FeedPhase::new(f64::NAN, 0.3);
        input.removal_batches[0].total_weight_kg = -5.0;
        assert_eq!(
            fields(&input),
            vec![
                "final_feed.consumption_kg",
                "medicine_costs",
                "removal_batches[0].total_weight_kg"
            ]
        );
    }

    #[test]
    fn test_surplus_removals_are_not_rejected() {
        let mut input = valid_input();
        input.removal_batches = vec![RemovalBatch::new(990, 2000.0, 42)];
        assert!(fields(&input).is_empty());
    }

    #[test]
    fn test_head_counts_beyond_signed_range_rejected() {
        let mut input = valid_input();
        input.initial_chicks = u64::MAX;
        input.chicks_died = 0;
        input.removal_batches = vec![
            RemovalBatch::new(u64::MAX / 2 + 1, 1800.0, 42),
            RemovalBatch::new(u64::MAX / 2 + 1, 1800.0, 42),
        ];

        assert_eq!(fields(&input), vec!["initial_chicks", "removal_batches"]);

        input.initial_chicks = MAX_HEAD_COUNT;
        input.removal_batches = vec![RemovalBatch::new(MAX_HEAD_COUNT, 1800.0, 42)];
        assert!(fields(&input).is_empty());
    }
}
