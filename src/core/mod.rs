//! Core vocabulary shared by definitions and the firing engine.
//!
//! This module contains:
//! - State values via the `State` trait
//! - The `Host` trait objects implement to carry a machine
//! - Actions and guards, inline or resolved by name against the host
//! - Immutable transition history

mod action;
mod guard;
mod history;
mod host;
mod state;

pub use action::{Action, ActionFn};
pub use guard::{Guard, PredicateFn};
pub use history::{StateHistory, StateTransition};
pub use host::{HookError, Host, MethodNotFound};
pub use state::State;
