//! Transition history tracking.
//!
//! Records every transition applied to a record, including recovery
//! transitions, following functional programming principles.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use record_fsm::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     transition: "confirm".to_string(),
///     from: "pending".into(),
///     to: "confirmed".into(),
///     timestamp: Utc::now(),
///     recovery: false,
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// Name of the transition taken
    pub transition: String,
    /// The state being transitioned from
    pub from: StateId,
    /// The state being transitioned to
    pub to: StateId,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
    /// Whether this was a recovery into the error state
    pub recovery: bool,
}

/// Ordered history of applied transitions.
///
/// History is immutable - the `record` method returns a new history
/// with the transition added.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the first transition's source, then the `to` state of each
    /// transition.
    pub fn get_path(&self) -> Vec<&StateId> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.last()
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }
}
