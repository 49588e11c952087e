//! JSON file persistence for the batch history
//!
//! The file holds a format version, the stored records and the registry:
//!
//! ```json
//! {"version": 1, "batches": [{"id": "...", "input": {...}, "created_at": "..."}],
//!  "handlers": [{"name": "...", "created_at": "..."}], "sheds": [{"number": "...", ...}]}
//! ```
//!
//! Files written before the registry existed have no `handlers` or `sheds`
//! and load with both empty.
//!
//! Saving writes a sibling temporary file and renames it over the target, so
//! a crash mid-write leaves the previous ledger intact.

use super::book::BatchLedger;
use crate::app::models::{BatchRecord, Handler, Shed};
use crate::constants::LEDGER_FORMAT_VERSION;
use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything a ledger file holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerContents {
    pub batches: Vec<BatchRecord>,
    pub handlers: Vec<Handler>,
    pub sheds: Vec<Shed>,
}

impl LedgerContents {
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty() && self.handlers.is_empty() && self.sheds.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct LedgerFile {
    version: u32,
    #[serde(default)]
    batches: Vec<BatchRecord>,
    #[serde(default)]
    handlers: Vec<Handler>,
    #[serde(default)]
    sheds: Vec<Shed>,
}

#[derive(Debug, Serialize)]
struct LedgerFileRef<'a> {
    version: u32,
    batches: &'a [BatchRecord],
    handlers: &'a [Handler],
    sheds: &'a [Shed],
}

/// Reads and writes one ledger file
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn invalid(&self, reason: impl Into<String>) -> LedgerError {
        LedgerError::InvalidLedger {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("ledger"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Load every stored record. A missing or blank file is an empty ledger.
    pub async fn load(&self) -> Result<LedgerContents> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No ledger at {}, starting with an empty history",
                    self.path.display()
                );
                return Ok(LedgerContents::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            warn!("Ledger file {} is empty", self.path.display());
            return Ok(LedgerContents::default());
        }

        let file: LedgerFile =
            serde_json::from_str(&content).map_err(|e| self.invalid(e.to_string()))?;

        if file.version != LEDGER_FORMAT_VERSION {
            return Err(self.invalid(format!(
                "unsupported format version {} (expected {})",
                file.version, LEDGER_FORMAT_VERSION
            )));
        }

        self.check_unique("batch id", file.batches.iter().map(|r| r.input.batch_id.as_str()))?;
        self.check_unique("handler", file.handlers.iter().map(|h| h.name.as_str()))?;
        self.check_unique("shed", file.sheds.iter().map(|s| s.number.as_str()))?;

        debug!(
            "Loaded {} batches, {} handlers and {} sheds from {}",
            file.batches.len(),
            file.handlers.len(),
            file.sheds.len(),
            self.path.display()
        );
        Ok(LedgerContents {
            batches: file.batches,
            handlers: file.handlers,
            sheds: file.sheds,
        })
    }

    fn check_unique<'a>(&self, kind: &str, keys: impl Iterator<Item = &'a str>) -> Result<()> {
        let mut seen = HashSet::new();
        for key in keys {
            if !seen.insert(key) {
                return Err(self.invalid(format!("{} '{}' appears more than once", kind, key)));
            }
        }
        Ok(())
    }

    /// Replace the ledger file with the ledger's records and registry
    pub async fn save(&self, ledger: &BatchLedger) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(&LedgerFileRef {
            version: LEDGER_FORMAT_VERSION,
            batches: ledger.records(),
            handlers: ledger.handlers(),
            sheds: ledger.sheds(),
        })?;

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, content).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(
            "Saved {} batches to {}",
            ledger.records().len(),
            self.path.display()
        );
        Ok(())
    }
}
