//! Builder API for declaring state machine definitions.
//!
//! This module provides fluent builders and a macro for declaring states,
//! events and transitions with minimal boilerplate. Builders validate
//! everything once, at definition time; a definition that builds never
//! fails resolution because of ambiguous rules.

pub mod error;
pub mod event;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, TransitionOverlap};
pub use event::EventBuilder;
pub use machine::{MachineBuilder, StateBuilder};
pub use transition::TransitionBuilder;
