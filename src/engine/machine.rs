//! Instance-level firing engine.

use crate::core::{Host, State};
use crate::definition::{EventDefinition, StateMachineDefinition};
use crate::engine::error::TransitionError;
use crate::logging::TransitionLog;
use crate::persistence::{StateStore, Transactional};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// How an event is fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FireOptions {
    /// Write the new state through the store instead of only caching it.
    pub persist: bool,
    /// Raise recoverable errors instead of returning `false`.
    pub strict: bool,
}

impl FireOptions {
    /// Persisted, non-strict.
    pub const PERSIST: Self = Self {
        persist: true,
        strict: false,
    };

    /// Persisted, strict.
    pub const STRICT: Self = Self {
        persist: true,
        strict: true,
    };

    /// In-memory only, non-strict.
    pub const TRANSIENT: Self = Self {
        persist: false,
        strict: false,
    };
}

/// A host instance with its state machine attached.
///
/// The machine caches the current state. On first access the cache is
/// filled from the store, falling back to the definition's initial state.
/// Only a successful transition replaces the cached value.
///
/// Firing is synchronous and not reentrant-safe across threads; callers
/// must not fire events on the same machine concurrently.
pub struct Machine<H: Host> {
    host: H,
    definition: Arc<StateMachineDefinition<H>>,
    current: Option<H::State>,
    store: Option<Arc<dyn StateStore<H>>>,
    transactions: Option<Arc<dyn Transactional>>,
    logger: Option<Arc<dyn TransitionLog<H>>>,
    log_transitions: bool,
}

impl<H: Host> Machine<H> {
    pub fn new(host: H, definition: Arc<StateMachineDefinition<H>>) -> Self {
        Self {
            host,
            definition,
            current: None,
            store: None,
            transactions: None,
            logger: None,
            log_transitions: true,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn StateStore<H>>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_transactions(mut self, transactions: Arc<dyn Transactional>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn TransitionLog<H>>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enable or disable the logging collaborator for this instance.
    pub fn set_log_transitions(&mut self, enabled: bool) {
        self.log_transitions = enabled;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn definition(&self) -> &StateMachineDefinition<H> {
        &self.definition
    }

    /// The current state, loading it from the store on first access.
    pub fn current_state(&mut self) -> H::State {
        if let Some(state) = &self.current {
            return state.clone();
        }
        if let Some(stored) = self.store.as_ref().and_then(|store| store.read_state(&self.host)) {
            self.current = Some(stored.clone());
            return stored;
        }
        self.definition.initial_state().clone()
    }

    pub fn is_in(&mut self, state: &H::State) -> bool {
        self.current_state() == *state
    }

    /// Names of the events that have a rule leaving the current state.
    pub fn events_for_current_state(&mut self) -> Vec<String> {
        let current = self.current_state();
        self.definition
            .events_for_state(&current)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Fire an event, persisting the new state. Returns `false` on failure.
    pub fn fire(&mut self, event: &str, args: Vec<Value>) -> Result<bool, TransitionError> {
        self.fire_with(event, FireOptions::PERSIST, args)
    }

    /// Fire an event, persisting the new state and raising on failure.
    pub fn fire_strict(&mut self, event: &str, args: Vec<Value>) -> Result<bool, TransitionError> {
        self.fire_with(event, FireOptions::STRICT, args)
    }

    /// Fire an event, updating only the cached state.
    pub fn fire_transient(
        &mut self,
        event: &str,
        args: Vec<Value>,
    ) -> Result<bool, TransitionError> {
        self.fire_with(event, FireOptions::TRANSIENT, args)
    }

    /// Fire an event.
    ///
    /// Non-strict calls turn `NoMatchingTransition` and `StorageRejected`
    /// into `Ok(false)`; errors raised by host callbacks always propagate.
    /// A transition whose guards all reject is `Ok(false)` in both modes.
    pub fn fire_with(
        &mut self,
        event: &str,
        options: FireOptions,
        args: Vec<Value>,
    ) -> Result<bool, TransitionError> {
        let definition = Arc::clone(&self.definition);
        let event = definition
            .event(event)
            .ok_or_else(|| TransitionError::UnknownEvent(event.to_string()))?;

        let outcome = self
            .normalize_args(event, args)
            .and_then(|args| self.run_scoped(&definition, event, options, &args));

        match outcome {
            Err(error) if !options.strict && error.is_recoverable() => {
                debug!(event = event.name(), %error, "event not fired");
                Ok(false)
            }
            other => other,
        }
    }

    /// Resolve the target-state argument before anything runs.
    fn normalize_args(
        &mut self,
        event: &EventDefinition<H>,
        mut args: Vec<Value>,
    ) -> Result<Vec<Value>, TransitionError> {
        let current = self.current_state();
        let destinations = event.possible_destinations(&current);

        if destinations.is_empty() {
            return Err(TransitionError::NoMatchingTransition {
                event: event.name().to_string(),
                from: current.name().to_string(),
            });
        }

        let Some(candidate) = args.first().and_then(target_candidate) else {
            return Ok(args);
        };
        if destinations.iter().any(|state| state.name() == candidate) {
            return Ok(args);
        }

        if let [only] = destinations.as_slice() {
            args.insert(0, Value::String(only.name().to_string()));
        } else {
            warn!(
                event = event.name(),
                from = current.name(),
                candidate = %candidate,
                "ambiguous event fired without an explicit target"
            );
        }
        Ok(args)
    }

    fn run_scoped(
        &mut self,
        definition: &StateMachineDefinition<H>,
        event: &EventDefinition<H>,
        options: FireOptions,
        args: &[Value],
    ) -> Result<bool, TransitionError> {
        let scope = if options.persist {
            self.transactions.clone()
        } else {
            None
        };
        let Some(transactions) = scope else {
            return self.run_protocol(definition, event, options, args);
        };

        let snapshot = self.current.clone();
        let result = transactions
            .run_atomically(&mut || self.run_protocol(definition, event, options, args));
        if result.is_err() {
            self.current = snapshot;
        }
        result
    }

    fn run_protocol(
        &mut self,
        definition: &StateMachineDefinition<H>,
        event: &EventDefinition<H>,
        options: FireOptions,
        args: &[Value],
    ) -> Result<bool, TransitionError> {
        let from = self.current_state();

        definition.before_all().run(&mut self.host, &[])?;
        if let Some(node) = definition.state(&from) {
            node.run_exit(&mut self.host, args)?;
        }

        let (requested, rest) = split_target(args);
        let result = match event.resolve(&mut self.host, &from, requested.as_deref(), rest)? {
            Some(to) => self.complete(definition, event, options, &from, to, args, rest)?,
            None => {
                debug!(event = event.name(), from = from.name(), "all guards rejected");
                self.host.on_event_failed(event.name())?;
                false
            }
        };

        definition.after_all().run(&mut self.host, &[])?;
        Ok(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn complete(
        &mut self,
        definition: &StateMachineDefinition<H>,
        event: &EventDefinition<H>,
        options: FireOptions,
        from: &H::State,
        to: H::State,
        args: &[Value],
        rest: &[Value],
    ) -> Result<bool, TransitionError> {
        if let Some(node) = definition.state(&to) {
            node.run_enter(&mut self.host, args)?;
        }
        self.host.on_event_fired(from, &to)?;

        debug!(
            event = event.name(),
            from = from.name(),
            to = to.name(),
            persist = options.persist,
            strict = options.strict,
            "transition fired"
        );

        if !options.persist {
            self.set_current(to);
            return Ok(true);
        }

        self.mirror(&to);
        self.log_transition(event.name(), from, &to, rest);
        let written = match self.persist(&to, options.strict) {
            Ok(written) => written,
            Err(error) => {
                self.mirror(from);
                return Err(error);
            }
        };
        if written {
            self.current = Some(to);
        } else {
            self.mirror(from);
        }

        if let Some(hook) = event.success_hook() {
            self.host.call_method(hook, &[])?;
        }
        Ok(written)
    }

    /// Best-effort logging; errors never reach the caller.
    fn log_transition(&mut self, event: &str, from: &H::State, to: &H::State, args: &[Value]) {
        if !self.log_transitions {
            return;
        }
        let Some(logger) = self.logger.clone() else {
            return;
        };
        if let Err(err) = logger.record_transition(&mut self.host, event, from, to, args) {
            error!(event = event, from = from.name(), to = to.name(), error = %err, "transition logging failed");
        }
    }

    fn persist(&mut self, state: &H::State, strict: bool) -> Result<bool, TransitionError> {
        let Some(store) = self.store.clone() else {
            return Ok(true);
        };
        if strict {
            store.write_state_strict(&mut self.host, state)?;
            Ok(true)
        } else {
            Ok(store.write_state(&mut self.host, state))
        }
    }

    fn set_current(&mut self, state: H::State) {
        self.mirror(&state);
        self.current = Some(state);
    }

    /// Stage `state` on the host without persisting it.
    fn mirror(&mut self, state: &H::State) {
        if let Some(store) = self.store.clone() {
            store.write_state_in_memory(&mut self.host, state);
        }
    }
}

impl<H: Host + std::fmt::Debug> std::fmt::Debug for Machine<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("host", &self.host)
            .field("current", &self.current)
            .field("log_transitions", &self.log_transitions)
            .finish_non_exhaustive()
    }
}

/// The target-state name carried by a call argument.
///
/// Blank values (`null`, `false`, empty strings, arrays and objects) carry
/// none. Other non-string values are compared by their JSON text.
fn target_candidate(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(name) if name.trim().is_empty() => None,
        Value::String(name) => Some(name.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Split normalized arguments into the requested target and the rest.
fn split_target(args: &[Value]) -> (Option<String>, &[Value]) {
    match args.split_first() {
        Some((first, rest)) => (target_candidate(first), rest),
        None => (None, args),
    }
}
