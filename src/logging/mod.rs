//! Transition logging collaborators.
//!
//! A logger is told about every persisted transition before the state is
//! written. Logging is best effort: the engine reports a logger's error
//! through `tracing` and carries on with the transition.

use crate::core::{HookError, Host};
use serde_json::Value;

mod history;
mod method;

pub use history::HistoryLog;
pub use method::MethodLog;

/// Records transitions of a host type.
pub trait TransitionLog<H: Host> {
    /// `args` are the call arguments that follow the target state.
    fn record_transition(
        &self,
        host: &mut H,
        event: &str,
        from: &H::State,
        to: &H::State,
        args: &[Value],
    ) -> Result<(), HookError>;
}
