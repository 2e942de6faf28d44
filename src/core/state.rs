//! Core State trait for lifecycle states.
//!
//! States are plain values. Everything attached to a state (enter/exit
//! actions, display labels) lives in the machine definition, so the same
//! state type can be shared by several definitions.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait for lifecycle states.
///
/// The state's name is its identity inside a machine: call arguments
/// select explicit targets by name, and stores and loggers record names.
///
/// # Required Traits
///
/// - `Clone`: the engine caches the current state per instance
/// - `PartialEq`: states are compared when resolving transition rules
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are written through stores and history
///
/// # Example
///
/// ```rust
/// use lifecycle::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum OrderState {
///     Received,
///     Shipped,
/// }
///
/// impl State for OrderState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Received => "received",
///             Self::Shipped => "shipped",
///         }
///     }
/// }
///
/// assert_eq!(OrderState::Shipped.name(), "shipped");
/// ```
pub trait State: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Unique name of the state within a machine.
    fn name(&self) -> &str;
}
