//! State identifiers.
//!
//! A state is an opaque token: two states are the same state when their
//! names are equal. No ordering between states is implied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, comparable, hashable name of a single state.
///
/// # Example
///
/// ```rust
/// use record_fsm::core::StateId;
///
/// let pending = StateId::from("pending");
/// assert_eq!(pending.as_str(), "pending");
/// assert_eq!(pending, StateId::new("pending"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    /// Create a state identifier from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the state's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&StateId> for StateId {
    fn from(state: &StateId) -> Self {
        state.clone()
    }
}
