//! State transition history tracking.
//!
//! Provides immutable tracking of fired transitions over time. Used by the
//! history logger to keep an audit trail per instance.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use lifecycle::core::StateTransition;
/// use lifecycle::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum TaskState {
///         Pending,
///         Running,
///     }
/// }
///
/// let transition = StateTransition {
///     event: "start".to_string(),
///     from: TaskState::Pending,
///     to: TaskState::Running,
///     args: vec![],
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "start");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The event that caused the transition
    pub event: String,
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Call arguments following the target state
    pub args: Vec<Value>,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// History is immutable - the `record` method returns a new history
/// with the transition added.
///
/// # Example
///
/// ```rust
/// use lifecycle::core::{StateHistory, StateTransition};
/// use lifecycle::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum WorkState {
///         Start,
///         Middle,
///         End,
///     }
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         event: "begin".to_string(),
///         from: WorkState::Start,
///         to: WorkState::Middle,
///         args: vec![],
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         event: "finish".to_string(),
///         from: WorkState::Middle,
///         to: WorkState::End,
///         args: vec![],
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&WorkState::Start, &WorkState::Middle, &WorkState::End]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut next = self.clone();
        next.push(transition);
        next
    }

    /// Append a transition in place.
    pub fn push(&mut self, transition: StateTransition<S>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the first transition's
    /// source, then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Names of the events fired, in order.
    pub fn events(&self) -> Vec<&str> {
        self.transitions.iter().map(|t| t.event.as_str()).collect()
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }
}
