//! Lifecycle: a finite-state-machine behavior engine for host objects
//!
//! A host type declares a fixed set of states and events once, as a
//! [`StateMachineDefinition`]. Each host instance is then wrapped in a
//! [`Machine`] that caches its current state and fires events through a
//! fixed protocol: hooks, exit action, guard evaluation, transition action,
//! enter action, durable write, hooks.
//!
//! # Core Concepts
//!
//! - **State**: Named values via the `State` trait (see [`state_enum!`])
//! - **Host**: The object a machine governs; resolves named actions and guards
//! - **Event**: A named trigger owning ordered, guarded transition rules
//! - **Store**: Optional collaborator that persists the current state
//!
//! # Example
//!
//! ```rust
//! use lifecycle::builder::{EventBuilder, MachineBuilder};
//! use lifecycle::core::Host;
//! use lifecycle::engine::{Machine, TransitionError};
//! use lifecycle::state_enum;
//! use std::sync::Arc;
//!
//! state_enum! {
//!     enum OrderState {
//!         Received = "received",
//!         Processed = "processed",
//!         Shipped = "shipped",
//!     }
//! }
//!
//! struct Order;
//!
//! impl Host for Order {
//!     type State = OrderState;
//! }
//!
//! let definition = MachineBuilder::<Order>::new()
//!     .initial(OrderState::Received)
//!     .state(OrderState::Processed)
//!     .state(OrderState::Shipped)
//!     .event(EventBuilder::new("process").transitions(
//!         [OrderState::Received, OrderState::Processed],
//!         [OrderState::Processed],
//!     ))
//!     .event(EventBuilder::new("ship").transitions([OrderState::Processed], [OrderState::Shipped]))
//!     .build()
//!     .unwrap();
//!
//! let mut order = Machine::new(Order, Arc::new(definition));
//!
//! assert!(matches!(
//!     order.fire_strict("ship", vec![]),
//!     Err(TransitionError::NoMatchingTransition { .. })
//! ));
//! assert!(order.fire("process", vec![]).unwrap());
//! assert!(order.fire_strict("ship", vec![]).unwrap());
//! assert!(order.is_in(&OrderState::Shipped));
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod engine;
pub mod logging;
pub mod persistence;

// Re-export commonly used types
pub use builder::{BuildError, EventBuilder, MachineBuilder, StateBuilder, TransitionBuilder};
pub use crate::core::{Action, Guard, HookError, Host, State};
pub use definition::{EventDefinition, StateMachineDefinition};
pub use engine::{FireOptions, Machine, TransitionError};
