//! Shape identifiers
//!
//! IDs are positive integers handed out by an [`IdGenerator`]. The generator
//! is an explicit component owned by whoever builds the repository, so tests
//! can inject their own.
//!
//! ID Format: a plain decimal number starting at `1` (e.g. `7`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid shape ID: expected a positive integer, got '{0}'")]
    Invalid(String),

    #[error("Shape IDs exhausted: no ID above {0} is available")]
    Exhausted(u64),
}

/// Identifier of a stored shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ShapeId(NonZeroU64);

impl ShapeId {
    /// Creates an ID, rejecting zero
    pub fn new(value: u64) -> Result<Self, IdError> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or_else(|| IdError::Invalid(value.to_string()))
    }

    /// Returns the numeric value
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ShapeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = s
            .parse::<u64>()
            .map_err(|_| IdError::Invalid(s.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<u64> for ShapeId {
    type Error = IdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShapeId> for u64 {
    fn from(id: ShapeId) -> Self {
        id.get()
    }
}

/// Source of unique shape IDs
///
/// All operations must be atomic with respect to each other.
pub trait IdGenerator: Send + Sync {
    /// Increments the counter and returns the new value (first call returns 1)
    ///
    /// Fails once the counter has reached `u64::MAX`; IDs are never reused.
    fn next_id(&self) -> Result<ShapeId, IdError>;

    /// Moves the counter up to `id` if it is ahead of the current value
    fn advance_if_greater(&self, id: ShapeId);

    /// Sets the counter back to zero
    fn reset(&self);

    /// Returns the last issued value (0 if none)
    fn current(&self) -> u64;
}

/// Monotonic counter backed by an atomic integer
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Result<ShapeId, IdError> {
        let previous = self
            .counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(IdError::Exhausted)?;
        Ok(ShapeId(NonZeroU64::MIN.saturating_add(previous)))
    }

    fn advance_if_greater(&self, id: ShapeId) {
        self.counter.fetch_max(id.get(), Ordering::SeqCst);
    }

    fn reset(&self) {
        self.counter.store(0, Ordering::SeqCst);
    }

    fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}
