//! Per-type registry of states, events and global hooks.

use crate::builder::error::BuildError;
use crate::core::{Action, Host, State};
use crate::definition::event::EventDefinition;
use crate::definition::state::StateDefinition;

/// The complete state machine of one host type.
///
/// Built incrementally while the type is being set up and treated as
/// read-only afterwards; the engine shares it between instances behind an
/// `Arc`. Deriving a subtype copies the whole definition, so later changes
/// to either side never leak into the other.
pub struct StateMachineDefinition<H: Host> {
    initial_state: H::State,
    states: Vec<StateDefinition<H>>,
    events: Vec<EventDefinition<H>>,
    before_all: Action<H>,
    after_all: Action<H>,
}

impl<H: Host> StateMachineDefinition<H> {
    /// Create an empty definition starting in `initial_state`.
    pub fn new(initial_state: H::State) -> Self {
        Self {
            initial_state,
            states: Vec::new(),
            events: Vec::new(),
            before_all: Action::Noop,
            after_all: Action::Noop,
        }
    }

    /// Independent copy for a derived type.
    pub fn derive(&self) -> Self {
        self.clone()
    }

    pub fn initial_state(&self) -> &H::State {
        &self.initial_state
    }

    pub fn set_initial_state(&mut self, state: H::State) {
        self.initial_state = state;
    }

    /// Declare a state. Returns `false` if a state with that name exists;
    /// the first declaration wins.
    pub fn add_state(&mut self, state: StateDefinition<H>) -> bool {
        if self.state_named(state.name()).is_some() {
            return false;
        }
        self.states.push(state);
        true
    }

    /// Register an event. Event names are unique.
    pub fn add_event(&mut self, event: EventDefinition<H>) -> Result<(), BuildError> {
        if self.event(event.name()).is_some() {
            return Err(BuildError::DuplicateEvent(event.name().to_string()));
        }
        self.events.push(event);
        Ok(())
    }

    pub fn set_before_all(&mut self, action: Action<H>) {
        self.before_all = action;
    }

    pub fn set_after_all(&mut self, action: Action<H>) {
        self.after_all = action;
    }

    pub fn before_all(&self) -> &Action<H> {
        &self.before_all
    }

    pub fn after_all(&self) -> &Action<H> {
        &self.after_all
    }

    pub fn states(&self) -> &[StateDefinition<H>] {
        &self.states
    }

    pub fn state(&self, state: &H::State) -> Option<&StateDefinition<H>> {
        self.states.iter().find(|node| node.state() == state)
    }

    pub fn state_named(&self, name: &str) -> Option<&StateDefinition<H>> {
        self.states.iter().find(|node| node.name() == name)
    }

    pub fn events(&self) -> &[EventDefinition<H>] {
        &self.events
    }

    pub fn event(&self, name: &str) -> Option<&EventDefinition<H>> {
        self.events.iter().find(|event| event.name() == name)
    }

    /// Names of the events with at least one rule leaving `state`.
    pub fn events_for_state(&self, state: &H::State) -> Vec<&str> {
        self.events
            .iter()
            .filter(|event| event.transitions_from_state(state))
            .map(|event| event.name())
            .collect()
    }

    /// Check that the initial state and every state a rule mentions
    /// were declared.
    pub fn validate(&self) -> Result<(), BuildError> {
        let referenced = std::iter::once(&self.initial_state).chain(
            self.events
                .iter()
                .flat_map(|event| event.rules())
                .flat_map(|rule| std::iter::once(rule.from()).chain(rule.to())),
        );

        for state in referenced {
            if self.state(state).is_none() {
                return Err(BuildError::UnknownState(state.name().to_string()));
            }
        }
        Ok(())
    }
}

impl<H: Host> Clone for StateMachineDefinition<H> {
    fn clone(&self) -> Self {
        Self {
            initial_state: self.initial_state.clone(),
            states: self.states.clone(),
            events: self.events.clone(),
            before_all: self.before_all.clone(),
            after_all: self.after_all.clone(),
        }
    }
}

impl<H: Host> std::fmt::Debug for StateMachineDefinition<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachineDefinition")
            .field("initial_state", &self.initial_state)
            .field("states", &self.states)
            .field("events", &self.events)
            .field("before_all", &self.before_all)
            .field("after_all", &self.after_all)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::transition::TransitionRule;
    use crate::state_enum;

    state_enum! {
        enum Stage {
            Draft = "draft",
            Review = "review",
            Published = "published",
        }
    }

    struct Article;

    impl Host for Article {
        type State = Stage;
    }

    fn event(name: &str, from: Stage, to: Stage) -> EventDefinition<Article> {
        EventDefinition::new(name, None, vec![TransitionRule::new(from, vec![to]).unwrap()])
            .unwrap()
    }

    fn base() -> StateMachineDefinition<Article> {
        let mut definition = StateMachineDefinition::new(Stage::Draft);
        definition.add_state(StateDefinition::new(Stage::Draft));
        definition.add_state(StateDefinition::new(Stage::Review));
        definition
            .add_event(event("submit", Stage::Draft, Stage::Review))
            .unwrap();
        definition
    }

    #[test]
    fn first_state_declaration_wins() {
        let mut definition = base();
        let added =
            definition.add_state(StateDefinition::new(Stage::Review).with_label("Second"));

        assert!(!added);
        assert_eq!(definition.states().len(), 2);
        assert_eq!(
            definition.state(&Stage::Review).unwrap().display_label(),
            "review"
        );
    }

    #[test]
    fn event_names_are_unique() {
        let mut definition = base();
        let result = definition.add_event(event("submit", Stage::Review, Stage::Draft));

        assert!(matches!(result, Err(BuildError::DuplicateEvent(name)) if name == "submit"));
        assert_eq!(definition.events().len(), 1);
    }

    #[test]
    fn events_for_state_lists_available_events() {
        let mut definition = base();
        definition.add_state(StateDefinition::new(Stage::Published));
        definition
            .add_event(event("publish", Stage::Review, Stage::Published))
            .unwrap();
        definition
            .add_event(event("reject", Stage::Review, Stage::Draft))
            .unwrap();

        assert_eq!(definition.events_for_state(&Stage::Draft), vec!["submit"]);
        assert_eq!(
            definition.events_for_state(&Stage::Review),
            vec!["publish", "reject"]
        );
        assert!(definition.events_for_state(&Stage::Published).is_empty());
    }

    #[test]
    fn derived_definition_is_independent() {
        let mut parent = base();
        let mut child = parent.derive();

        child.add_state(StateDefinition::new(Stage::Published));
        child
            .add_event(event("publish", Stage::Review, Stage::Published))
            .unwrap();
        parent.set_initial_state(Stage::Review);

        assert!(parent.state(&Stage::Published).is_none());
        assert!(parent.event("publish").is_none());
        assert!(child.state(&Stage::Published).is_some());
        assert_eq!(child.initial_state(), &Stage::Draft);
    }

    #[test]
    fn validate_reports_undeclared_states() {
        let mut definition = base();
        assert!(definition.validate().is_ok());

        definition
            .add_event(event("publish", Stage::Review, Stage::Published))
            .unwrap();
        assert!(matches!(
            definition.validate(),
            Err(BuildError::UnknownState(name)) if name == "published"
        ));
    }
}
