//! Error handling for ledger operations.
//!
//! Rejected input and storage problems are kept as separate variants so
//! callers can tell a bad request apart from a broken ledger file.
//! Arithmetic edge cases never surface here.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Newline-free rendering of every violation, used in the error message
fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error types for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Filesystem errors while reading or writing the ledger or config
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failures
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Batch input that broke one or more rules, every violation included
    #[error("Invalid batch input: {}", join_violations(.violations))]
    Validation { violations: Vec<Violation> },

    /// No stored batch has this `batch_id`
    #[error("Batch not found: {batch_id}")]
    BatchNotFound { batch_id: String },

    /// A batch with this `batch_id` is already stored
    #[error("Batch ID '{batch_id}' already exists")]
    DuplicateBatch { batch_id: String },

    /// Unknown handler, or one with no batches to report on
    #[error("Handler not found or no batches recorded: {handler_name}")]
    HandlerNotFound { handler_name: String },

    /// A handler with this name is already registered
    #[error("Handler '{handler_name}' already exists")]
    DuplicateHandler { handler_name: String },

    /// The handler still has batches on record and cannot be removed or renamed
    #[error("Handler '{handler_name}' has {batch_count} batches recorded")]
    HandlerInUse {
        handler_name: String,
        batch_count: usize,
    },

    /// No registered shed has this number
    #[error("Shed not found: {shed_number}")]
    ShedNotFound { shed_number: String },

    /// A shed with this number is already registered
    #[error("Shed '{shed_number}' already exists")]
    DuplicateShed { shed_number: String },

    /// The shed still has batches on record and cannot be removed or renumbered
    #[error("Shed '{shed_number}' has {batch_count} batches recorded")]
    ShedInUse {
        shed_number: String,
        batch_count: usize,
    },

    /// Invalid or inconsistent configuration values
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A ledger file that cannot be trusted as stored
    #[error("Invalid ledger file: {path} - {reason}")]
    InvalidLedger { path: PathBuf, reason: String },
}

impl LedgerError {
    /// Rejection carrying a single violation
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            violations: vec![Violation::new(field, message)],
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the caller supplied bad input, as opposed to a storage failure
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::BatchNotFound { .. }
                | Self::DuplicateBatch { .. }
                | Self::HandlerNotFound { .. }
                | Self::DuplicateHandler { .. }
                | Self::HandlerInUse { .. }
                | Self::ShedNotFound { .. }
                | Self::DuplicateShed { .. }
                | Self::ShedInUse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
