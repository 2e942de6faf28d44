//! Logger keeping an in-memory audit trail.

use super::TransitionLog;
use crate::core::{HookError, Host, State, StateHistory, StateTransition};
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;

/// Appends every logged transition to a [`StateHistory`].
#[derive(Debug)]
pub struct HistoryLog<S: State> {
    history: Mutex<StateHistory<S>>,
}

impl<S: State> HistoryLog<S> {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(StateHistory::new()),
        }
    }

    /// Snapshot of the transitions recorded so far.
    pub fn history(&self) -> StateHistory<S> {
        self.history.lock().clone()
    }
}

impl<S: State> Default for HistoryLog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> TransitionLog<H> for HistoryLog<H::State> {
    fn record_transition(
        &self,
        _host: &mut H,
        event: &str,
        from: &H::State,
        to: &H::State,
        args: &[Value],
    ) -> Result<(), HookError> {
        let transition = StateTransition {
            event: event.to_string(),
            from: from.clone(),
            to: to.clone(),
            args: args.to_vec(),
            timestamp: Utc::now(),
        };
        self.history.lock().push(transition);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;
    use serde_json::json;

    state_enum! {
        enum Light {
            Red,
            Green,
        }
    }

    struct Signal;

    impl Host for Signal {
        type State = Light;
    }

    #[test]
    fn records_transitions_in_order() {
        let log: HistoryLog<Light> = HistoryLog::new();
        let mut signal = Signal;

        log.record_transition(&mut signal, "go", &Light::Red, &Light::Green, &[json!(5)])
            .unwrap();
        log.record_transition(&mut signal, "stop", &Light::Green, &Light::Red, &[])
            .unwrap();

        let history = log.history();
        assert_eq!(history.events(), vec!["go", "stop"]);
        assert_eq!(
            history.get_path(),
            vec![&Light::Red, &Light::Green, &Light::Red]
        );
        assert_eq!(history.transitions()[0].args, vec![json!(5)]);
    }

    #[test]
    fn snapshots_do_not_see_later_transitions() {
        let log: HistoryLog<Light> = HistoryLog::new();
        let mut signal = Signal;

        log.record_transition(&mut signal, "go", &Light::Red, &Light::Green, &[])
            .unwrap();
        let snapshot = log.history();
        log.record_transition(&mut signal, "stop", &Light::Green, &Light::Red, &[])
            .unwrap();

        assert_eq!(snapshot.events(), vec!["go"]);
        assert_eq!(log.history().events(), vec!["go", "stop"]);
    }
}
