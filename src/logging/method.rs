//! Logger that dispatches to host methods.

use super::TransitionLog;
use crate::core::{HookError, Host, MethodNotFound};
use serde_json::Value;

/// Default generic log method name.
pub const DEFAULT_LOG_METHOD: &str = "log_transition";

/// Records a transition by calling a method on the host.
///
/// The event-specific method `"{event}_log"` is preferred; if the host does
/// not respond to it, the generic method is tried. A host responding to
/// neither simply logs nothing. [`Host::before_transition_log`] runs first
/// with the event and both states.
#[derive(Debug, Clone)]
pub struct MethodLog {
    generic_method: String,
}

impl MethodLog {
    pub fn new() -> Self {
        Self {
            generic_method: DEFAULT_LOG_METHOD.to_string(),
        }
    }

    /// Use a different generic log method.
    pub fn with_method(name: impl Into<String>) -> Self {
        Self {
            generic_method: name.into(),
        }
    }

    pub fn generic_method(&self) -> &str {
        &self.generic_method
    }

    pub fn event_method(event: &str) -> String {
        format!("{event}_log")
    }
}

impl Default for MethodLog {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> TransitionLog<H> for MethodLog {
    fn record_transition(
        &self,
        host: &mut H,
        event: &str,
        from: &H::State,
        to: &H::State,
        args: &[Value],
    ) -> Result<(), HookError> {
        host.before_transition_log(event, from, to)?;
        for method in [Self::event_method(event), self.generic_method.clone()] {
            match host.call_method(&method, args) {
                Ok(_) => return Ok(()),
                Err(error) if MethodNotFound::is_for(&error, &method) => continue,
                Err(error) => return Err(error),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use crate::state_enum;
    use serde_json::json;

    state_enum! {
        enum Parcel {
            Packed,
            Shipped,
        }
    }

    #[derive(Default)]
    struct Shipment {
        logged: Vec<(String, Vec<Value>)>,
        respond_to_ship_log: bool,
        staged: Option<(String, String, String)>,
    }

    impl Host for Shipment {
        type State = Parcel;

        fn call_method(&mut self, name: &str, args: &[Value]) -> Result<Value, HookError> {
            match name {
                "ship_log" if self.respond_to_ship_log => {
                    self.logged.push((name.to_string(), args.to_vec()));
                    Ok(Value::Null)
                }
                "audit" => {
                    self.logged.push((name.to_string(), args.to_vec()));
                    Ok(Value::Null)
                }
                "cancel_log" => Err("audit table locked".into()),
                "return_log" => self.call_method("archive_return", args),
                other => Err(MethodNotFound(other.to_string()).into()),
            }
        }

        fn before_transition_log(
            &mut self,
            event: &str,
            from: &Parcel,
            to: &Parcel,
        ) -> Result<(), HookError> {
            self.staged = Some((
                event.to_string(),
                from.name().to_string(),
                to.name().to_string(),
            ));
            Ok(())
        }
    }

    fn log(logger: &MethodLog, shipment: &mut Shipment, event: &str) -> Result<(), HookError> {
        logger.record_transition(shipment, event, &Parcel::Packed, &Parcel::Shipped, &[json!(true)])
    }

    #[test]
    fn event_specific_method_is_preferred() {
        let mut shipment = Shipment {
            respond_to_ship_log: true,
            ..Shipment::default()
        };

        log(&MethodLog::with_method("audit"), &mut shipment, "ship").unwrap();
        assert_eq!(
            shipment.logged,
            vec![("ship_log".to_string(), vec![json!(true)])]
        );
    }

    #[test]
    fn generic_method_is_the_fallback() {
        let mut shipment = Shipment::default();

        log(&MethodLog::with_method("audit"), &mut shipment, "ship").unwrap();
        assert_eq!(shipment.logged[0].0, "audit");
    }

    #[test]
    fn missing_methods_log_nothing() {
        let mut shipment = Shipment::default();
        let logger = MethodLog::new();

        assert_eq!(logger.generic_method(), DEFAULT_LOG_METHOD);
        log(&logger, &mut shipment, "ship").unwrap();
        assert!(shipment.logged.is_empty());
    }

    #[test]
    fn log_method_errors_are_returned() {
        let mut shipment = Shipment::default();

        let error = log(&MethodLog::new(), &mut shipment, "cancel").unwrap_err();
        assert_eq!(error.to_string(), "audit table locked");
    }

    #[test]
    fn transition_is_staged_before_the_log_method() {
        let mut shipment = Shipment::default();

        log(&MethodLog::with_method("audit"), &mut shipment, "ship").unwrap();
        assert_eq!(
            shipment.staged,
            Some(("ship".to_string(), "Packed".to_string(), "Shipped".to_string()))
        );
    }

    #[test]
    fn missing_method_inside_event_log_is_an_error() {
        let mut shipment = Shipment::default();

        let error = log(&MethodLog::with_method("audit"), &mut shipment, "return").unwrap_err();
        assert!(MethodNotFound::is_for(&error, "archive_return"));
        assert!(shipment.logged.is_empty());
    }
}
