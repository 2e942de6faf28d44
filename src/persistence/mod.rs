//! Durable storage of the current state.
//!
//! The engine never talks to a database directly. A host type registers a
//! [`StateStore`] (and optionally a [`Transactional`] scope) once at setup;
//! without one, transitions only update the in-memory cache.

use crate::core::Host;
use crate::engine::TransitionError;

pub mod error;
mod memory;

pub use error::StorageError;
pub use memory::MemoryStore;

/// Reads and writes the persisted state of a host instance.
pub trait StateStore<H: Host> {
    /// The stored state, if one was ever written.
    fn read_state(&self, host: &H) -> Option<H::State>;

    /// Tolerant write. `false` means the store rejected the state.
    fn write_state(&self, host: &mut H, state: &H::State) -> bool;

    /// Strict write. Rejection is reported as an error.
    fn write_state_strict(&self, host: &mut H, state: &H::State) -> Result<(), StorageError>;

    /// Mirror a cached state change without persisting it.
    fn write_state_in_memory(&self, host: &mut H, state: &H::State) {
        let _ = (host, state);
    }
}

/// Body run inside an atomic scope.
pub type AtomicBody<'a> = &'a mut dyn FnMut() -> Result<bool, TransitionError>;

/// An atomic scope around a single firing.
///
/// If `body` returns an error, every durable write it made must be undone
/// before the error is handed back.
pub trait Transactional {
    fn run_atomically(&self, body: AtomicBody<'_>) -> Result<bool, TransitionError>;
}
