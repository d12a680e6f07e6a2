//! Settlement domain errors
//!
//! Four classes, handled at the boundary of every operator operation:
//! validation (fixable input), not-found (missing records), conflict
//! (state guards), configuration (broken store invariants). An operation
//! either fully succeeds or aborts with one of these and no writes.

use core_kernel::CoreError;
use thiserror::Error;

/// Errors that can occur in the settlement domain
#[derive(Debug, Error)]
pub enum SettlementError {
    /// User-fixable input problem; the operation was aborted
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation clashes with existing state; state is untouched
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store violated an invariant; unrecoverable for this invocation
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SettlementError {
    pub fn validation(message: impl Into<String>) -> Self {
        SettlementError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        SettlementError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        SettlementError::Conflict(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        SettlementError::Configuration(message.into())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, SettlementError::Conflict(_))
    }
}

impl From<CoreError> for SettlementError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => SettlementError::Validation(msg),
            CoreError::NotFound(msg) => SettlementError::NotFound(msg),
            CoreError::Conflict(msg) => SettlementError::Conflict(msg),
            CoreError::Configuration(msg) => SettlementError::Configuration(msg),
            // Money/temporal failures inside an operation mean the stored
            // records disagree with each other, not that the user's input
            // was wrong.
            CoreError::Money(e) => SettlementError::Configuration(e.to_string()),
            CoreError::Temporal(e) => SettlementError::Validation(e.to_string()),
        }
    }
}

impl From<core_kernel::MoneyError> for SettlementError {
    fn from(err: core_kernel::MoneyError) -> Self {
        SettlementError::Configuration(err.to_string())
    }
}
