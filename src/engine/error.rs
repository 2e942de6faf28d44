//! Errors surfaced by firing an event.

use crate::core::HookError;
use crate::persistence::StorageError;
use thiserror::Error;

/// Errors that can occur while firing an event.
///
/// Only `NoMatchingTransition` and `StorageRejected` are recoverable: a
/// non-strict call turns them into `Ok(false)`. Everything else reaches the
/// caller in both modes.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Event '{event}' has no transition from state '{from}'")]
    NoMatchingTransition { event: String, from: String },

    #[error(transparent)]
    StorageRejected(#[from] StorageError),

    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    #[error("Callback failed: {0}")]
    Callback(#[from] HookError),
}

impl TransitionError {
    /// Whether a non-strict call converts this error to `false`.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoMatchingTransition { .. } | Self::StorageRejected(_)
        )
    }

    /// The host error behind a `Callback` failure.
    pub fn callback_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Callback(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}
