//! A declared state and its enter/exit actions.

use crate::core::{Action, HookError, Host, State};
use serde_json::Value;

/// A state node of a machine definition.
///
/// Created once when the state is declared and never changed afterwards.
pub struct StateDefinition<H: Host> {
    state: H::State,
    enter: Action<H>,
    exit: Action<H>,
    label: Option<String>,
}

impl<H: Host> StateDefinition<H> {
    /// Declare a state without actions.
    pub fn new(state: H::State) -> Self {
        Self {
            state,
            enter: Action::Noop,
            exit: Action::Noop,
            label: None,
        }
    }

    pub fn with_enter(mut self, action: Action<H>) -> Self {
        self.enter = action;
        self
    }

    pub fn with_exit(mut self, action: Action<H>) -> Self {
        self.exit = action;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn state(&self) -> &H::State {
        &self.state
    }

    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// Human-readable label, falling back to the state name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.state.name())
    }

    /// Run the enter action, if any.
    pub fn run_enter(&self, host: &mut H, args: &[Value]) -> Result<(), HookError> {
        self.enter.run(host, args)
    }

    /// Run the exit action, if any.
    pub fn run_exit(&self, host: &mut H, args: &[Value]) -> Result<(), HookError> {
        self.exit.run(host, args)
    }
}

impl<H: Host> Clone for StateDefinition<H> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            enter: self.enter.clone(),
            exit: self.exit.clone(),
            label: self.label.clone(),
        }
    }
}

impl<H: Host> std::fmt::Debug for StateDefinition<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateDefinition")
            .field("state", &self.state)
            .field("enter", &self.enter)
            .field("exit", &self.exit)
            .field("label", &self.label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;
    use serde_json::json;

    state_enum! {
        enum Phase {
            Idle,
            Running,
        }
    }

    #[derive(Default)]
    struct Job {
        log: Vec<String>,
    }

    impl Host for Job {
        type State = Phase;
    }

    #[test]
    fn actions_default_to_noop() {
        let mut job = Job::default();
        let node: StateDefinition<Job> = StateDefinition::new(Phase::Idle);

        node.run_enter(&mut job, &[]).unwrap();
        node.run_exit(&mut job, &[]).unwrap();
        assert!(job.log.is_empty());
    }

    #[test]
    fn enter_and_exit_receive_args() {
        let mut job = Job::default();
        let node = StateDefinition::new(Phase::Running)
            .with_enter(Action::inline(|job: &mut Job, args| {
                job.log.push(format!("enter {}", args.len()));
                Ok(())
            }))
            .with_exit(Action::inline(|job: &mut Job, _| {
                job.log.push("exit".to_string());
                Ok(())
            }));

        node.run_enter(&mut job, &[json!(1), json!(2)]).unwrap();
        node.run_exit(&mut job, &[]).unwrap();
        assert_eq!(job.log, vec!["enter 2", "exit"]);
    }

    #[test]
    fn display_label_falls_back_to_name() {
        let plain: StateDefinition<Job> = StateDefinition::new(Phase::Idle);
        let labelled: StateDefinition<Job> =
            StateDefinition::new(Phase::Running).with_label("In progress");

        assert_eq!(plain.display_label(), "Idle");
        assert_eq!(labelled.display_label(), "In progress");
        assert_eq!(labelled.name(), "Running");
    }

    #[test]
    fn action_errors_are_not_translated() {
        let mut job = Job::default();
        let node = StateDefinition::new(Phase::Idle)
            .with_exit(Action::inline(|_: &mut Job, _| Err("stuck".into())));

        assert_eq!(node.run_exit(&mut job, &[]).unwrap_err().to_string(), "stuck");
    }
}
