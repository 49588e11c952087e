//! File persistence of the ledger

use super::*;
use crate::app::models::{Handler, Shed, ShedStatus};
use crate::app::services::ledger::LedgerStore;
use crate::error::LedgerError;
use tempfile::TempDir;

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = LedgerStore::new(dir.path().join("ledger.json"));

    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = LedgerStore::new(dir.path().join("nested").join("ledger.json"));

    let mut ledger = empty_ledger();
    ledger.create(sample_input("B-1", "S1", "Ana")).unwrap();
    ledger.create(sample_input("B-2", "S2", "Eli")).unwrap();
    store.save(&ledger).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.batches, ledger.records());
    assert_eq!(loaded.handlers, ledger.handlers());
    assert!(!dir.path().join("nested").join("ledger.json.tmp").exists());
}

#[tokio::test]
async fn test_file_holds_version_and_inputs_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    let store = LedgerStore::new(&path);

    let mut ledger = empty_ledger();
    ledger.create(sample_input("B-1", "S1", "Ana")).unwrap();
    store.save(&ledger).await.unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["batches"][0]["input"]["batch_id"], "B-1");
    assert!(json["batches"][0].get("feed_conversion_ratio").is_none());
}

#[tokio::test]
async fn test_unsupported_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, r#"{"version": 7, "batches": []}"#).unwrap();

    let error = LedgerStore::new(&path).load().await.unwrap_err();

    assert!(matches!(error, LedgerError::InvalidLedger { .. }));
    assert!(error.to_string().contains("version 7"));
}

#[tokio::test]
async fn test_malformed_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = LedgerStore::new(&path).load().await;
    assert!(matches!(result, Err(LedgerError::InvalidLedger { .. })));
}

#[tokio::test]
async fn test_duplicate_ids_in_file_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    let store = LedgerStore::new(&path);

    let mut ledger = empty_ledger();
    ledger.create(sample_input("B-1", "S1", "Ana")).unwrap();
    let record = serde_json::to_value(&ledger.records()[0]).unwrap();
    let content = serde_json::json!({"version": 1, "batches": [record.clone(), record]});
    std::fs::write(&path, content.to_string()).unwrap();

    assert!(matches!(
        store.load().await,
        Err(LedgerError::InvalidLedger { .. })
    ));
}

#[tokio::test]
async fn test_registry_survives_a_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    let store = LedgerStore::new(&path);

    let mut ledger = empty_ledger();
    let mut handler = Handler::new("Marta");
    handler.phone = Some("+351 912 000 111".to_string());
    ledger.register_handler(handler).unwrap();
    let mut shed = Shed::new("G3");
    shed.capacity = Some(12000);
    shed.status = ShedStatus::Maintenance;
    ledger.register_shed(shed).unwrap();
    store.save(&ledger).await.unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["handlers"][0]["name"], "Marta");
    assert_eq!(json["sheds"][0]["status"], "maintenance");

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.handlers, ledger.handlers());
    assert_eq!(loaded.sheds, ledger.sheds());
}

#[tokio::test]
async fn test_file_without_registry_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, r#"{"version": 1, "batches": []}"#).unwrap();

    let loaded = LedgerStore::new(&path).load().await.unwrap();
    assert!(loaded.handlers.is_empty());
    assert!(loaded.sheds.is_empty());
}

#[tokio::test]
async fn test_duplicate_sheds_in_file_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    let shed = r#"{"number": "G1", "created_at": "2024-01-15T08:00:00Z"}"#;
    std::fs::write(
        &path,
        format!(r#"{{"version": 1, "sheds": [{}, {}]}}"#, shed, shed),
    )
    .unwrap();

    let error = LedgerStore::new(&path).load().await.unwrap_err();
    assert!(error.to_string().contains("shed 'G1' appears more than once"));
}
