//! Side-effecting callbacks attached to states, rules and machines.

use super::host::{HookError, Host};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Type alias for inline action closures.
pub type ActionFn<H> = Arc<dyn Fn(&mut H, &[Value]) -> Result<(), HookError> + Send + Sync>;

/// A callback run by the firing engine.
///
/// Named methods are resolved against the host on every invocation, never
/// cached, so hosts may dispatch them dynamically.
pub enum Action<H: Host> {
    /// Does nothing.
    Noop,
    /// A closure receiving the host and the call arguments.
    Inline(ActionFn<H>),
    /// A host method invoked through [`Host::call_method`].
    Method(String),
}

impl<H: Host> Action<H> {
    /// Wrap a closure as an action.
    pub fn inline<F>(action: F) -> Self
    where
        F: Fn(&mut H, &[Value]) -> Result<(), HookError> + Send + Sync + 'static,
    {
        Action::Inline(Arc::new(action))
    }

    /// Refer to a host method by name.
    pub fn method(name: impl Into<String>) -> Self {
        Action::Method(name.into())
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Action::Noop)
    }

    /// Run the action. Errors propagate unmodified.
    pub fn run(&self, host: &mut H, args: &[Value]) -> Result<(), HookError> {
        match self {
            Action::Noop => Ok(()),
            Action::Inline(action) => action(host, args),
            Action::Method(name) => host.call_method(name, args).map(|_| ()),
        }
    }
}

impl<H: Host> Default for Action<H> {
    fn default() -> Self {
        Action::Noop
    }
}

impl<H: Host> Clone for Action<H> {
    fn clone(&self) -> Self {
        match self {
            Action::Noop => Action::Noop,
            Action::Inline(action) => Action::Inline(Arc::clone(action)),
            Action::Method(name) => Action::Method(name.clone()),
        }
    }
}

impl<H: Host> fmt::Debug for Action<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Noop => f.write_str("Noop"),
            Action::Inline(_) => f.write_str("Inline(<closure>)"),
            Action::Method(name) => f.debug_tuple("Method").field(name).finish(),
        }
    }
}
