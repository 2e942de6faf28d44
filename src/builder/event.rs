//! Builder for events.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::Host;
use crate::definition::EventDefinition;

/// Builder for a named event and its transitions.
pub struct EventBuilder<H: Host> {
    name: String,
    success: Option<String>,
    transitions: Vec<TransitionBuilder<H>>,
}

impl<H: Host> EventBuilder<H> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: None,
            transitions: Vec::new(),
        }
    }

    /// Host method run after a persisted transition of this event.
    pub fn success(mut self, hook: impl Into<String>) -> Self {
        self.success = Some(hook.into());
        self
    }

    /// Add an unguarded transition from each of `from` to the `to` targets.
    pub fn transitions<F, T>(self, from: F, to: T) -> Self
    where
        F: IntoIterator<Item = H::State>,
        T: IntoIterator<Item = H::State>,
    {
        let builder = from
            .into_iter()
            .fold(TransitionBuilder::<H>::new(), |builder, state| builder.from(state));
        let builder = to
            .into_iter()
            .fold(builder, |builder, state| builder.to(state));
        self.transition(builder)
    }

    /// Add a transition configured with a [`TransitionBuilder`].
    pub fn transition(mut self, builder: TransitionBuilder<H>) -> Self {
        self.transitions.push(builder);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the event, validating its rules.
    pub fn build(self) -> Result<EventDefinition<H>, BuildError> {
        let mut rules = Vec::new();
        for builder in self.transitions {
            rules.extend(builder.build()?);
        }
        EventDefinition::new(self.name, self.success, rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum TestState {
            Received = "received",
            Processed = "processed",
            Error = "error",
        }
    }

    struct Order;

    impl Host for Order {
        type State = TestState;
    }

    #[test]
    fn transitions_expand_sources() {
        let event = EventBuilder::<Order>::new("donot")
            .transitions(
                [TestState::Received, TestState::Processed],
                [TestState::Error],
            )
            .build()
            .unwrap();

        assert_eq!(event.name(), "donot");
        assert_eq!(event.rules().len(), 2);
        assert_eq!(
            event.possible_destinations(&TestState::Processed),
            vec![TestState::Error]
        );
    }

    #[test]
    fn success_hook_is_recorded() {
        let event = EventBuilder::<Order>::new("process")
            .success("notify_warehouse")
            .transitions([TestState::Received], [TestState::Processed])
            .build()
            .unwrap();

        assert_eq!(event.success_hook(), Some("notify_warehouse"));
    }

    #[test]
    fn invalid_transitions_fail_the_event() {
        let result = EventBuilder::<Order>::new("process")
            .transitions([TestState::Received], Vec::new())
            .build();
        assert!(matches!(result, Err(BuildError::MissingToState)));

        let result = EventBuilder::<Order>::new("process")
            .transitions([TestState::Received], [TestState::Processed])
            .transitions([TestState::Received], [TestState::Processed])
            .build();
        assert!(matches!(
            result,
            Err(BuildError::OverlappingTransitions { .. })
        ));
    }
}
