//! The firing engine: runs the full protocol of one event on one instance.
//!
//! # Protocol
//!
//! 1. Normalize arguments: find the target state the caller asked for, or
//!    insert the only possible one. An event with no rule from the current
//!    state fails here, before anything runs.
//! 2. Open the store's atomic scope when persisting.
//! 3. Run the `before_all` hook and the current state's exit action.
//! 4. Resolve a rule (guards, then the winning rule's action).
//! 5. On success run the enter action and `on_event_fired`. When persisting,
//!    stage the new state on the host, log it, write it and run the event's
//!    success hook; the cache only moves if the write was accepted. Otherwise
//!    just cache it. If every guard rejected, call `on_event_failed`.
//! 6. Run the `after_all` hook and return the outcome.

mod error;
mod machine;

pub use error::TransitionError;
pub use machine::{FireOptions, Machine};
