//! Guarded transition rules owned by an event.

use crate::core::{Action, Guard, HookError, Host, State};
use serde_json::Value;

/// One source state, one or more candidate targets, a guard and an action.
///
/// Target order matters: the first target is used when the caller does not
/// request one explicitly.
pub struct TransitionRule<H: Host> {
    from: H::State,
    to: Vec<H::State>,
    guard: Guard<H>,
    action: Action<H>,
}

impl<H: Host> TransitionRule<H> {
    /// Create an unguarded rule. Returns `None` when `to` is empty.
    pub fn new(from: H::State, to: Vec<H::State>) -> Option<Self> {
        if to.is_empty() {
            return None;
        }
        Some(Self {
            from,
            to,
            guard: Guard::Always,
            action: Action::Noop,
        })
    }

    pub fn with_guard(mut self, guard: Guard<H>) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_action(mut self, action: Action<H>) -> Self {
        self.action = action;
        self
    }

    pub fn from(&self) -> &H::State {
        &self.from
    }

    pub fn to(&self) -> &[H::State] {
        &self.to
    }

    /// The target used when no explicit target is requested.
    pub fn default_target(&self) -> &H::State {
        &self.to[0]
    }

    /// The candidate target with the given name, if this rule has one.
    pub fn target_named(&self, name: &str) -> Option<&H::State> {
        self.to.iter().find(|state| state.name() == name)
    }

    /// Check whether this rule applies to the current state (pure).
    pub fn applies_from(&self, current: &H::State) -> bool {
        self.from == *current
    }

    pub fn leads_to(&self, state: &H::State) -> bool {
        self.to.contains(state)
    }

    /// Evaluate the guard once. A rule without a guard always passes.
    pub fn evaluate_guard(&self, host: &mut H, args: &[Value]) -> Result<bool, HookError> {
        self.guard.evaluate(host, args)
    }

    /// Run the post-guard action.
    pub fn run_action(&self, host: &mut H, args: &[Value]) -> Result<(), HookError> {
        self.action.run(host, args)
    }
}

impl<H: Host> Clone for TransitionRule<H> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
            action: self.action.clone(),
        }
    }
}

impl<H: Host> std::fmt::Debug for TransitionRule<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionRule")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guard", &self.guard)
            .field("action", &self.action)
            .finish()
    }
}
