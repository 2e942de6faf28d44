//! In-process reference store.

use super::{AtomicBody, StateStore, StorageError, Transactional};
use crate::core::{Host, State};
use crate::engine::TransitionError;
use parking_lot::Mutex;
use std::fmt;

type Validator<S> = Box<dyn Fn(&S) -> Result<(), String> + Send + Sync>;

/// Holds the persisted state of one record in memory.
///
/// An optional validator plays the role of model validation: rejected
/// states make tolerant writes return `false` and strict writes fail with
/// [`StorageError::Rejected`]. As a [`Transactional`] scope it restores the
/// committed state when the body fails.
///
/// # Example
///
/// ```rust
/// use lifecycle::core::Host;
/// use lifecycle::persistence::{MemoryStore, StateStore};
/// use lifecycle::state_enum;
///
/// state_enum! {
///     enum Status {
///         Active,
///         Banned,
///     }
/// }
///
/// struct Account;
///
/// impl Host for Account {
///     type State = Status;
/// }
///
/// let store = MemoryStore::new().with_validator(|s: &Status| match s {
///     Status::Banned => Err("appeal pending".to_string()),
///     _ => Ok(()),
/// });
///
/// let mut account = Account;
/// assert!(StateStore::<Account>::write_state(&store, &mut account, &Status::Active));
/// assert!(!StateStore::<Account>::write_state(&store, &mut account, &Status::Banned));
/// assert_eq!(store.persisted(), Some(Status::Active));
/// ```
pub struct MemoryStore<S: State> {
    committed: Mutex<Option<S>>,
    writes: Mutex<usize>,
    validator: Option<Validator<S>>,
}

impl<S: State> MemoryStore<S> {
    pub fn new() -> Self {
        Self {
            committed: Mutex::new(None),
            writes: Mutex::new(0),
            validator: None,
        }
    }

    /// Start with an already persisted state.
    pub fn with_state(self, state: S) -> Self {
        *self.committed.lock() = Some(state);
        self
    }

    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&S) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn persisted(&self) -> Option<S> {
        self.committed.lock().clone()
    }

    /// Number of accepted durable writes.
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }

    /// Write directly, bypassing validation.
    pub fn put(&self, state: S) {
        *self.committed.lock() = Some(state);
        *self.writes.lock() += 1;
    }

    fn validate(&self, state: &S) -> Result<(), StorageError> {
        match &self.validator {
            Some(validator) => validator(state).map_err(|reason| StorageError::Rejected {
                state: state.name().to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

impl<S: State> Default for MemoryStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> fmt::Debug for MemoryStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("committed", &*self.committed.lock())
            .field("writes", &*self.writes.lock())
            .field("validated", &self.validator.is_some())
            .finish()
    }
}

impl<H: Host> StateStore<H> for MemoryStore<H::State> {
    fn read_state(&self, _host: &H) -> Option<H::State> {
        self.persisted()
    }

    fn write_state(&self, host: &mut H, state: &H::State) -> bool {
        self.write_state_strict(host, state).is_ok()
    }

    fn write_state_strict(&self, _host: &mut H, state: &H::State) -> Result<(), StorageError> {
        self.validate(state)?;
        self.put(state.clone());
        Ok(())
    }
}

impl<S: State> Transactional for MemoryStore<S> {
    fn run_atomically(&self, body: AtomicBody<'_>) -> Result<bool, TransitionError> {
        let snapshot = self.persisted();
        let writes = self.write_count();

        let result = body();
        if let Err(error) = &result {
            tracing::debug!(%error, "rolling back memory store");
            *self.committed.lock() = snapshot;
            *self.writes.lock() = writes;
        }
        result
    }
}
