//! Create, update, delete and query behaviour of the in-memory ledger

use super::*;
use crate::error::LedgerError;

#[test]
fn test_create_and_get() {
    let mut ledger = empty_ledger();
    let id = ledger.create(sample_input("B-1", "S1", "Ana")).unwrap().id;

    let record = ledger.get("B-1").unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.input.handler_name, "Ana");
    assert!(record.updated_at.is_none());
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_duplicate_batch_id_is_rejected() {
    let mut ledger = empty_ledger();
    ledger.create(sample_input("B-1", "S1", "Ana")).unwrap();

    let error = ledger.create(sample_input("B-1", "S2", "Eli")).unwrap_err();

    assert!(matches!(error, LedgerError::DuplicateBatch { ref batch_id } if batch_id == "B-1"));
    assert_eq!(ledger.get("B-1").unwrap().input.handler_name, "Ana");
}

#[test]
fn test_invalid_input_is_not_stored() {
    let mut ledger = empty_ledger();
    let mut input = sample_input("B-1", "S1", "Ana");
    input.chicks_died = 2000;

    let error = ledger.create(input).unwrap_err();

    assert!(matches!(error, LedgerError::Validation { .. }));
    assert!(ledger.is_empty());
}

#[test]
fn test_update_keeps_identity() {
    let mut ledger = empty_ledger();
    let original = ledger.create(sample_input("B-1", "S1", "Ana")).unwrap().clone();

    let mut edited = sample_input("B-1", "S1", "Ana");
    edited.chicks_died = 80;
    let updated = ledger.update("B-1", edited).unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at.is_some());
    assert_eq!(updated.input.chicks_died, 80);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_update_errors() {
    let mut ledger = empty_ledger();
    ledger.create(sample_input("B-1", "S1", "Ana")).unwrap();

    let missing = ledger.update("B-9", sample_input("B-9", "S1", "Ana"));
    assert!(matches!(missing, Err(LedgerError::BatchNotFound { .. })));

    let renamed = ledger.update("B-1", sample_input("B-2", "S1", "Ana"));
    assert!(matches!(renamed, Err(LedgerError::Validation { .. })));

    let mut invalid = sample_input("B-1", "S1", "Ana");
    invalid.initial_chicks = 0;
    assert!(ledger.update("B-1", invalid).is_err());
    assert_eq!(ledger.get("B-1").unwrap().input.initial_chicks, 1000);
}

#[test]
fn test_delete() {
    let mut ledger = empty_ledger();
    ledger.create(sample_input("B-1", "S1", "Ana")).unwrap();

    let removed = ledger.delete("B-1").unwrap();
    assert_eq!(removed.input.batch_id, "B-1");
    assert!(matches!(ledger.get("B-1"), Err(LedgerError::BatchNotFound { .. })));
    assert!(matches!(ledger.delete("B-1"), Err(LedgerError::BatchNotFound { .. })));
}

#[test]
fn test_calculate_stored_batch() {
    let mut ledger = empty_ledger();
    ledger.create(sample_input("B-1", "S1", "Ana")).unwrap();

    let result = ledger.calculate("B-1").unwrap();

    assert_eq!(result.batch_id, "B-1");
    assert!((result.total_cost - 3925.0).abs() < 1e-9);
    assert!((result.feed_conversion_ratio - 3100.0 / 1800.0).abs() < 1e-12);
    assert!(ledger.calculate("nope").is_err());
}

#[test]
fn test_summaries_filter_and_order() {
    let mut ledger = empty_ledger();
    ledger.create(sample_input("B-1", "S1", "Ana")).unwrap();
    ledger.create(sample_input("B-2", "S2", "Ana")).unwrap();
    ledger.create(sample_input("B-3", "S1", "Eli")).unwrap();

    let ids = |rows: Vec<crate::app::models::BatchSummary>| -> Vec<String> {
        rows.into_iter().map(|row| row.batch_id).collect()
    };

    assert_eq!(ids(ledger.summaries(None, None)), vec!["B-3", "B-2", "B-1"]);
    assert_eq!(ids(ledger.summaries(Some("Ana"), None)), vec!["B-2", "B-1"]);
    assert_eq!(ids(ledger.summaries(None, Some("S1"))), vec!["B-3", "B-1"]);
    assert_eq!(ids(ledger.summaries(Some("Ana"), Some("S1"))), vec!["B-1"]);
    assert!(ledger.summaries(Some("Zed"), None).is_empty());

    let row = &ledger.summaries(Some("Eli"), None)[0];
    assert!((row.mortality_percent - 5.0).abs() < 1e-12);
    assert_eq!(row.initial_chicks, 1000);
}

#[test]
fn test_handler_and_shed_names_are_distinct_and_sorted() {
    let mut ledger = empty_ledger();
    ledger.create(sample_input("B-1", "S2", "Eli")).unwrap();
    ledger.create(sample_input("B-2", "S1", "Ana")).unwrap();
    ledger.create(sample_input("B-3", "S2", "Ana")).unwrap();

    assert_eq!(ledger.handler_names(), vec!["Ana", "Eli"]);
    assert_eq!(ledger.shed_numbers(), vec!["S1", "S2"]);
}

#[test]
fn test_ranking_tracks_mutations() {
    let mut ledger = empty_ledger();
    ledger.create(sample_input("B-1", "S1", "Ana")).unwrap();

    let mut weak = sample_input("B-2", "S1", "Eli");
    weak.chicks_died = 150;
    ledger.create(weak).unwrap();

    let ranked = ledger.rank_handlers();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].handler_name, "Ana");

    ledger.delete("B-2").unwrap();
    assert!(matches!(
        ledger.handler_performance("Eli"),
        Err(LedgerError::HandlerNotFound { .. })
    ));

    let ana = ledger.handler_performance("Ana").unwrap();
    assert_eq!(ana.total_batches, 1);
    assert_eq!(ana.total_chicks_processed, 1000);
    assert_eq!(ana.scoring_policy, ledger.scoring_policy().version);
}
