//! Guard predicates for controlling state transitions.
//!
//! Guards decide whether a transition rule may fire. They see the host
//! instance and the call arguments that follow the target state.

use super::host::{is_truthy, HookError, Host};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Type alias for predicate closures.
pub type PredicateFn<H> = Arc<dyn Fn(&H, &[Value]) -> Result<bool, HookError> + Send + Sync>;

/// Predicate that determines if a transition rule can fire.
///
/// A missing guard always passes. A guard is evaluated exactly once per
/// candidate rule; errors it raises are never caught by the engine.
///
/// # Example
///
/// ```rust
/// use lifecycle::core::{Guard, Host};
/// use lifecycle::state_enum;
/// use serde_json::json;
///
/// state_enum! {
///     enum PaymentState {
///         Pending,
///         Settled,
///     }
/// }
///
/// struct Payment {
///     amount: u64,
/// }
///
/// impl Host for Payment {
///     type State = PaymentState;
/// }
///
/// let large = Guard::new(|payment: &Payment, _args| payment.amount > 100);
///
/// let mut payment = Payment { amount: 250 };
/// assert!(large.evaluate(&mut payment, &[]).unwrap());
///
/// payment.amount = 10;
/// assert!(!large.evaluate(&mut payment, &[json!(1)]).unwrap());
/// ```
pub enum Guard<H: Host> {
    /// No guard configured.
    Always,
    /// A closure over the host and the call arguments.
    Predicate(PredicateFn<H>),
    /// A host method whose result is coerced to a boolean.
    Method(String),
}

impl<H: Host> Guard<H> {
    /// Create a guard from an infallible predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&H, &[Value]) -> bool + Send + Sync + 'static,
    {
        Guard::Predicate(Arc::new(
            move |host: &H, args: &[Value]| -> Result<bool, HookError> {
                Ok(predicate(host, args))
            },
        ))
    }

    /// Create a guard from a predicate that may fail.
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn(&H, &[Value]) -> Result<bool, HookError> + Send + Sync + 'static,
    {
        Guard::Predicate(Arc::new(predicate))
    }

    /// Refer to a host method by name.
    pub fn method(name: impl Into<String>) -> Self {
        Guard::Method(name.into())
    }

    /// Evaluate the guard.
    ///
    /// Named guards go through [`Host::call_method`], which may mutate the
    /// host, hence the mutable borrow.
    pub fn evaluate(&self, host: &mut H, args: &[Value]) -> Result<bool, HookError> {
        match self {
            Guard::Always => Ok(true),
            Guard::Predicate(predicate) => predicate(host, args),
            Guard::Method(name) => host.call_method(name, args).map(|value| is_truthy(&value)),
        }
    }
}

impl<H: Host> Default for Guard<H> {
    fn default() -> Self {
        Guard::Always
    }
}

impl<H: Host> Clone for Guard<H> {
    fn clone(&self) -> Self {
        match self {
            Guard::Always => Guard::Always,
            Guard::Predicate(predicate) => Guard::Predicate(Arc::clone(predicate)),
            Guard::Method(name) => Guard::Method(name.clone()),
        }
    }
}

impl<H: Host> fmt::Debug for Guard<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Always => f.write_str("Always"),
            Guard::Predicate(_) => f.write_str("Predicate(<closure>)"),
            Guard::Method(name) => f.debug_tuple("Method").field(name).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MethodNotFound;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Stage {
        Draft,
    }

    impl crate::core::State for Stage {
        fn name(&self) -> &str {
            "draft"
        }
    }

    #[derive(Default)]
    struct Document {
        approvals: u32,
        checks: u32,
    }

    impl Host for Document {
        type State = Stage;

        fn call_method(&mut self, name: &str, _args: &[Value]) -> Result<Value, HookError> {
            self.checks += 1;
            match name {
                "approved" => Ok(json!(self.approvals > 0)),
                "reviewer" => Ok(Value::Null),
                "score" => Ok(json!(0)),
                other => Err(MethodNotFound(other.to_string()).into()),
            }
        }
    }

    #[test]
    fn missing_guard_always_passes() {
        let mut doc = Document::default();
        let guard: Guard<Document> = Guard::default();
        assert!(guard.evaluate(&mut doc, &[]).unwrap());
    }

    #[test]
    fn predicate_sees_host_and_args() {
        let mut doc = Document::default();
        let guard = Guard::new(|_: &Document, args| args.first() == Some(&json!("force")));

        assert!(guard.evaluate(&mut doc, &[json!("force")]).unwrap());
        assert!(!guard.evaluate(&mut doc, &[]).unwrap());
    }

    #[test]
    fn named_guard_is_evaluated_exactly_once() {
        let mut doc = Document {
            approvals: 1,
            checks: 0,
        };
        let guard: Guard<Document> = Guard::method("approved");

        assert!(guard.evaluate(&mut doc, &[]).unwrap());
        assert_eq!(doc.checks, 1);
    }

    #[test]
    fn named_guard_result_is_coerced_to_bool() {
        let mut doc = Document::default();

        assert!(!Guard::<Document>::method("approved")
            .evaluate(&mut doc, &[])
            .unwrap());
        assert!(!Guard::<Document>::method("reviewer")
            .evaluate(&mut doc, &[])
            .unwrap());
        assert!(Guard::<Document>::method("score")
            .evaluate(&mut doc, &[])
            .unwrap());
    }

    #[test]
    fn fallible_guard_errors_propagate() {
        let mut doc = Document::default();
        let guard = Guard::fallible(|_: &Document, _| Err("ledger offline".into()));

        let error = guard.evaluate(&mut doc, &[]).unwrap_err();
        assert_eq!(error.to_string(), "ledger offline");
    }

    #[test]
    fn unknown_named_guard_is_an_error() {
        let mut doc = Document::default();
        let error = Guard::<Document>::method("missing")
            .evaluate(&mut doc, &[])
            .unwrap_err();
        assert!(MethodNotFound::matches(&error));
    }
}
