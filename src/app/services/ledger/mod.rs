//! Batch ledger
//!
//! The persistence side of the application. [`BatchLedger`] holds the batch
//! history and the handler and shed registry in memory and applies one
//! operation at a time; [`LedgerStore`] reads and writes both as a JSON
//! file. Only inputs are stored, every derived figure is recomputed when it
//! is read.

pub mod book;
pub mod registry;
pub mod store;

#[cfg(test)]
pub mod tests;

pub use book::BatchLedger;
pub use store::{LedgerContents, LedgerStore};

use crate::config::LedgerConfig;
use crate::error::Result;

/// Open the ledger file named by the configuration
pub async fn open(config: &LedgerConfig) -> Result<(LedgerStore, BatchLedger)> {
    let store = LedgerStore::new(config.data_file.clone());
    let contents = store.load().await?;
    let ledger = BatchLedger::from_config(config).with_contents(contents);
    Ok((store, ledger))
}
