//! Builder for transition rules.

use crate::builder::error::BuildError;
use crate::core::{Action, Guard, HookError, Host};
use crate::definition::TransitionRule;
use serde_json::Value;

/// Builder for one declared transition with a fluent API.
///
/// A transition may list several source states; it expands into one rule
/// per source, all sharing the same targets, guard and action.
pub struct TransitionBuilder<H: Host> {
    from: Vec<H::State>,
    to: Vec<H::State>,
    guard: Guard<H>,
    action: Action<H>,
}

impl<H: Host> TransitionBuilder<H> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: Vec::new(),
            to: Vec::new(),
            guard: Guard::Always,
            action: Action::Noop,
        }
    }

    /// Add a source state (at least one is required).
    pub fn from(mut self, state: H::State) -> Self {
        self.from.push(state);
        self
    }

    /// Add a target state (at least one is required). The first target is
    /// the default.
    pub fn to(mut self, state: H::State) -> Self {
        self.to.push(state);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<H>) -> Self {
        self.guard = guard;
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&H, &[Value]) -> bool + Send + Sync + 'static,
    {
        self.guard = Guard::new(predicate);
        self
    }

    /// Action run after the guard passes (optional).
    pub fn on_transition(mut self, action: Action<H>) -> Self {
        self.action = action;
        self
    }

    /// Action closure run after the guard passes (optional).
    pub fn on_transition_fn<F>(self, action: F) -> Self
    where
        F: Fn(&mut H, &[Value]) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.on_transition(Action::inline(action))
    }

    /// Build one rule per source state.
    pub fn build(self) -> Result<Vec<TransitionRule<H>>, BuildError> {
        if self.from.is_empty() {
            return Err(BuildError::MissingFromState);
        }

        let mut rules = Vec::with_capacity(self.from.len());
        for from in self.from {
            let rule = TransitionRule::new(from, self.to.clone())
                .ok_or(BuildError::MissingToState)?
                .with_guard(self.guard.clone())
                .with_action(self.action.clone());
            rules.push(rule);
        }
        Ok(rules)
    }
}

impl<H: Host> Default for TransitionBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
