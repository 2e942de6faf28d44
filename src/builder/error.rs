//! Build errors for machine, event and transition builders.

use thiserror::Error;

/// Two rules of one event that share a source state and a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOverlap {
    pub from: String,
    pub to: String,
}

/// Errors that can occur when building a state machine definition.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No states declared. Call .state(state) or .initial(state) before .build()")]
    MissingInitialState,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("State '{0}' is referenced but was never declared")]
    UnknownState(String),

    #[error("Event '{0}' is already defined")]
    DuplicateEvent(String),

    #[error("Event '{event}' has {} ambiguous transition(s) sharing a from and to state", .overlaps.len())]
    OverlappingTransitions {
        event: String,
        overlaps: Vec<TransitionOverlap>,
    },
}
