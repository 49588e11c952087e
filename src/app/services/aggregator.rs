//! Removal batch aggregation
//!
//! Reduces the removal events of one production cycle into flock totals and
//! a single representative removal age.

use crate::app::models::{BatchInput, RemovalBatch};

/// Flock totals for one batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockTotals {
    pub surviving_chicks: u64,
    pub removed_chicks: u64,
    /// Survivors not covered by any removal; negative when removals exceed survivors
    pub missing_chicks: i64,
    pub total_weight_produced_kg: f64,
    /// Removal age weighted by removal quantity, 0 when nothing was removed
    pub weighted_average_age: f64,
    pub average_weight_per_chick_kg: f64,
}

/// Aggregate the removal batches of one input
pub fn aggregate(input: &BatchInput) -> FlockTotals {
    let surviving_chicks = input.initial_chicks.saturating_sub(input.chicks_died);
    let removed_chicks = removed_chicks(&input.removal_batches);
    let total_weight_produced_kg = total_weight(&input.removal_batches);

    let average_weight_per_chick_kg = if removed_chicks > 0 {
        total_weight_produced_kg / removed_chicks as f64
    } else {
        0.0
    };

    FlockTotals {
        surviving_chicks,
        removed_chicks,
        missing_chicks: missing_chicks(surviving_chicks, removed_chicks),
        total_weight_produced_kg,
        weighted_average_age: weighted_average_age(&input.removal_batches),
        average_weight_per_chick_kg,
    }
}

/// Total removed head count, saturating at `u64::MAX`
pub fn removed_chicks(batches: &[RemovalBatch]) -> u64 {
    batches
        .iter()
        .fold(0u64, |total, batch| total.saturating_add(batch.quantity))
}

/// Signed survivor surplus, saturating at the `i64` bounds
fn missing_chicks(surviving: u64, removed: u64) -> i64 {
    let missing = i128::from(surviving) - i128::from(removed);
    i64::try_from(missing).unwrap_or(if missing < 0 { i64::MIN } else { i64::MAX })
}

pub fn total_weight(batches: &[RemovalBatch]) -> f64 {
    batches.iter().map(|batch| batch.total_weight_kg).sum()
}

/// Quantity-weighted mean of the removal ages
pub fn weighted_average_age(batches: &[RemovalBatch]) -> f64 {
    let total_quantity = removed_chicks(batches);
    if total_quantity == 0 {
        return 0.0;
    }

    let age_weight: f64 = batches
        .iter()
        .map(|batch| batch.quantity as f64 * f64::from(batch.age_days))
        .sum();

    age_weight / total_quantity as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_with(initial: u64, died: u64, batches: Vec<RemovalBatch>) -> BatchInput {
        let mut input = BatchInput::new("B", "S", "H", initial);
        input.chicks_died = died;
        input.removal_batches = batches;
        input
    }

    #[test]
    fn test_single_removal_batch() {
        let totals = aggregate(&input_with(
            1000,
            50,
            vec![RemovalBatch::new(900, 1800.0, 42)],
        ));

        assert_eq!(totals.surviving_chicks, 950);
        assert_eq!(totals.removed_chicks, 900);
        assert_eq!(totals.missing_chicks, 50);
        assert_eq!(totals.total_weight_produced_kg, 1800.0);
        assert_eq!(totals.weighted_average_age, 42.0);
        assert_eq!(totals.average_weight_per_chick_kg, 2.0);
    }

    #[test]
    fn test_weighted_age_of_equal_groups_is_the_midpoint() {
        let batches = vec![
            RemovalBatch::new(500, 1000.0, 35),
            RemovalBatch::new(500, 1200.0, 45),
        ];
        assert_eq!(weighted_average_age(&batches), 40.0);
    }

    #[test]
    fn test_weighted_age_follows_quantities() {
        let batches = vec![
            RemovalBatch::new(3000, 6900.0, 35),
            RemovalBatch::new(6500, 18200.0, 50),
        ];
        let age = weighted_average_age(&batches);

        assert!((age - (3000.0 * 35.0 + 6500.0 * 50.0) / 9500.0).abs() < 1e-12);
        assert!((35.0..=50.0).contains(&age));
    }

    #[test]
    fn test_no_removed_birds_gives_zero_age_and_weight() {
        let totals = aggregate(&input_with(100, 0, vec![RemovalBatch::new(0, 0.0, 40)]));

        assert_eq!(totals.weighted_average_age, 0.0);
        assert_eq!(totals.average_weight_per_chick_kg, 0.0);
        assert_eq!(totals.missing_chicks, 100);
        assert_eq!(weighted_average_age(&[]), 0.0);
    }

    #[test]
    fn test_missing_chicks_is_negative_when_removals_exceed_survivors() {
        let totals = aggregate(&input_with(
            1000,
            100,
            vec![RemovalBatch::new(950, 2000.0, 42)],
        ));

        assert_eq!(totals.surviving_chicks, 900);
        assert_eq!(totals.missing_chicks, -50);
    }

    #[test]
    fn test_extreme_head_counts_saturate() {
        let half = u64::MAX / 2 + 1;
        let totals = aggregate(&input_with(
            u64::MAX,
            0,
            vec![
                RemovalBatch::new(half, 1800.0, 42),
                RemovalBatch::new(half, 1800.0, 42),
            ],
        ));

        assert_eq!(totals.removed_chicks, u64::MAX);
        assert_eq!(totals.missing_chicks, 0);

        assert_eq!(missing_chicks(u64::MAX, 0), i64::MAX);
        assert_eq!(missing_chicks(0, u64::MAX), i64::MIN);
        assert_eq!(missing_chicks(10, 25), -15);
    }
}
