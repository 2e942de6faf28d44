//! The host object a state machine is attached to.

use super::state::State;
use serde_json::Value;
use thiserror::Error;

/// Error type returned by host actions, guards and hooks.
///
/// The engine never inspects or translates these; they reach the caller
/// wrapped in `TransitionError::Callback` with the host error as its source.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A named method reference could not be resolved against the host.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Host does not respond to '{0}'")]
pub struct MethodNotFound(pub String);

impl MethodNotFound {
    /// Check whether a hook error is a `MethodNotFound`.
    pub fn matches(error: &HookError) -> bool {
        error.downcast_ref::<MethodNotFound>().is_some()
    }

    /// Check whether a hook error reports `name` itself as missing, as
    /// opposed to a missing method called from inside `name`.
    pub fn is_for(error: &HookError, name: &str) -> bool {
        error
            .downcast_ref::<MethodNotFound>()
            .is_some_and(|missing| missing.0 == name)
    }
}

/// An object whose lifecycle is governed by a state machine.
///
/// Every method has a default, so a host only implements the parts it uses:
/// `call_method` when the definition refers to methods by name, and the
/// two lifecycle callbacks when it wants to observe firings.
///
/// # Example
///
/// ```rust
/// use lifecycle::core::{HookError, Host, MethodNotFound};
/// use lifecycle::state_enum;
/// use serde_json::Value;
///
/// state_enum! {
///     enum DoorState {
///         Open,
///         Closed,
///     }
/// }
///
/// struct Door {
///     slams: u32,
/// }
///
/// impl Host for Door {
///     type State = DoorState;
///
///     fn call_method(&mut self, name: &str, _args: &[Value]) -> Result<Value, HookError> {
///         match name {
///             "slam" => {
///                 self.slams += 1;
///                 Ok(Value::Null)
///             }
///             other => Err(MethodNotFound(other.to_string()).into()),
///         }
///     }
/// }
///
/// let mut door = Door { slams: 0 };
/// door.call_method("slam", &[]).unwrap();
/// assert_eq!(door.slams, 1);
/// assert!(door.call_method("paint", &[]).is_err());
/// ```
pub trait Host: Sized + 'static {
    /// The state type of this host's machine.
    type State: State;

    /// Invoke a host method by name.
    ///
    /// Named actions, guards and hooks all resolve through this method at
    /// call time. The returned value is ignored for actions and coerced to
    /// a boolean for guards (`null` and `false` are falsy).
    fn call_method(&mut self, name: &str, args: &[Value]) -> Result<Value, HookError> {
        let _ = args;
        Err(MethodNotFound(name.to_string()).into())
    }

    /// Called after the enter action of a resolved transition.
    fn on_event_fired(&mut self, from: &Self::State, to: &Self::State) -> Result<(), HookError> {
        let _ = (from, to);
        Ok(())
    }

    /// Called when every candidate rule's guard rejected the event.
    fn on_event_failed(&mut self, event: &str) -> Result<(), HookError> {
        let _ = event;
        Ok(())
    }

    /// Called by method-dispatch logging right before the log method, so
    /// the log method can see which transition it is recording.
    fn before_transition_log(
        &mut self,
        event: &str,
        from: &Self::State,
        to: &Self::State,
    ) -> Result<(), HookError> {
        let _ = (event, from, to);
        Ok(())
    }
}

/// Ruby-style truthiness used to coerce named-guard results.
pub(crate) fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}
