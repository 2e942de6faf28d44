//! Storage error types.

use thiserror::Error;

/// Errors raised by strict state writes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    /// The store refused the new state, e.g. because it failed validation
    #[error("State '{state}' rejected by storage: {reason}")]
    Rejected { state: String, reason: String },
}
