//! Class-level machine definitions.
//!
//! A definition is assembled once per host type: states with their
//! enter/exit actions, events with their guarded transition rules, and the
//! hooks run around every firing. Event resolution lives here; sequencing
//! the full firing protocol is the engine's job.

mod event;
mod machine;
mod state;
mod transition;

pub use event::EventDefinition;
pub use machine::StateMachineDefinition;
pub use state::StateDefinition;
pub use transition::TransitionRule;
