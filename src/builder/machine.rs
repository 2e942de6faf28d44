//! Builder for complete machine definitions.

use crate::builder::error::BuildError;
use crate::builder::event::EventBuilder;
use crate::core::{Action, Host};
use crate::definition::{StateDefinition, StateMachineDefinition};

/// Builder for a state declaration.
pub struct StateBuilder<H: Host> {
    node: StateDefinition<H>,
}

impl<H: Host> StateBuilder<H> {
    pub fn new(state: H::State) -> Self {
        Self {
            node: StateDefinition::new(state),
        }
    }

    /// Action run when the state is entered.
    pub fn enter(mut self, action: Action<H>) -> Self {
        self.node = self.node.with_enter(action);
        self
    }

    /// Action run when the state is left.
    pub fn exit(mut self, action: Action<H>) -> Self {
        self.node = self.node.with_exit(action);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.node = self.node.with_label(label);
        self
    }

    pub fn build(self) -> StateDefinition<H> {
        self.node
    }
}

/// Builder for constructing machine definitions with a fluent API.
///
/// # Example
///
/// ```
/// use lifecycle::builder::{EventBuilder, MachineBuilder};
/// use lifecycle::core::Host;
/// use lifecycle::state_enum;
///
/// state_enum! {
///     enum OrderState {
///         Received = "received",
///         Processed = "processed",
///         Shipped = "shipped",
///     }
/// }
///
/// struct Order;
///
/// impl Host for Order {
///     type State = OrderState;
/// }
///
/// let definition = MachineBuilder::<Order>::new()
///     .initial(OrderState::Received)
///     .state(OrderState::Processed)
///     .state(OrderState::Shipped)
///     .event(EventBuilder::new("process").transitions(
///         [OrderState::Received, OrderState::Processed],
///         [OrderState::Processed],
///     ))
///     .event(EventBuilder::new("ship").transitions([OrderState::Processed], [OrderState::Shipped]))
///     .build()
///     .unwrap();
///
/// assert_eq!(definition.initial_state(), &OrderState::Received);
/// assert_eq!(definition.events_for_state(&OrderState::Processed), vec!["process", "ship"]);
/// ```
pub struct MachineBuilder<H: Host> {
    base: Option<StateMachineDefinition<H>>,
    initial: Option<H::State>,
    states: Vec<StateDefinition<H>>,
    events: Vec<EventBuilder<H>>,
    before_all: Option<Action<H>>,
    after_all: Option<Action<H>>,
}

impl<H: Host> MachineBuilder<H> {
    pub fn new() -> Self {
        Self {
            base: None,
            initial: None,
            states: Vec::new(),
            events: Vec::new(),
            before_all: None,
            after_all: None,
        }
    }

    /// Start from an independent copy of a parent definition.
    pub fn derive_from(parent: &StateMachineDefinition<H>) -> Self {
        Self {
            base: Some(parent.derive()),
            ..Self::new()
        }
    }

    /// Set and declare the initial state. Defaults to the first declared state.
    pub fn initial(mut self, state: H::State) -> Self {
        self.initial = Some(state.clone());
        self.state(state)
    }

    /// Declare a state without actions.
    pub fn state(self, state: H::State) -> Self {
        self.state_with(StateBuilder::new(state))
    }

    /// Declare a state configured with a [`StateBuilder`].
    pub fn state_with(mut self, builder: StateBuilder<H>) -> Self {
        self.states.push(builder.build());
        self
    }

    pub fn event(mut self, builder: EventBuilder<H>) -> Self {
        self.events.push(builder);
        self
    }

    /// Hook run at the start of every firing.
    pub fn before_all(mut self, action: Action<H>) -> Self {
        self.before_all = Some(action);
        self
    }

    /// Hook run at the end of every firing that did not raise.
    pub fn after_all(mut self, action: Action<H>) -> Self {
        self.after_all = Some(action);
        self
    }

    /// Build the definition.
    /// Returns an error if no initial state can be determined, an event is
    /// invalid or duplicated, or a rule refers to an undeclared state.
    pub fn build(self) -> Result<StateMachineDefinition<H>, BuildError> {
        let mut definition = match self.base {
            Some(mut base) => {
                if let Some(initial) = self.initial {
                    base.set_initial_state(initial);
                }
                base
            }
            None => {
                let initial = self
                    .initial
                    .or_else(|| self.states.first().map(|node| node.state().clone()))
                    .ok_or(BuildError::MissingInitialState)?;
                StateMachineDefinition::new(initial)
            }
        };

        for node in self.states {
            definition.add_state(node);
        }
        for event in self.events {
            definition.add_event(event.build()?)?;
        }
        if let Some(action) = self.before_all {
            definition.set_before_all(action);
        }
        if let Some(action) = self.after_all {
            definition.set_after_all(action);
        }

        definition.validate()?;
        Ok(definition)
    }
}

impl<H: Host> Default for MachineBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
