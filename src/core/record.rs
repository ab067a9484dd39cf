//! Per-record runtime state.
//!
//! A [`Record`] carries its current state, free-form attributes written by
//! host operations, and the history of transitions applied to it.
//!
//! The current state is changed only by the transition executor. Host code
//! can read it but has no API to set it; keeping it that way is a contract
//! between this crate and the host, since the record is plain data once it
//! leaves the executor (it can be deserialized or rebuilt from storage).

use super::definition::StateMachineDefinition;
use super::history::{StateHistory, StateTransition};
use super::state::StateId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Attribute holding the serialized error of a failed transition.
pub const ERROR_ATTRIBUTE: &str = "error";

/// Attribute holding the state a failed transition was heading to.
pub const ERROR_STATE_ATTRIBUTE: &str = "error_state";

/// Creation requested a state that is not an initial state.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("State '{state}' is not an initial state (allowed: {})", list(.allowed))]
pub struct InvalidInitialState {
    pub state: StateId,
    pub allowed: Vec<StateId>,
}

fn list(states: &[StateId]) -> String {
    states
        .iter()
        .map(StateId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A record governed by a state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: Uuid,
    state: StateId,
    attributes: BTreeMap<String, String>,
    history: StateHistory,
    version: u64,
}

impl Record {
    /// Create a record in the definition's default initial state.
    pub fn new(definition: &StateMachineDefinition) -> Self {
        Self::in_state(definition.default_initial_state().clone())
    }

    /// Create a record in a chosen initial state.
    pub fn with_initial_state(
        definition: &StateMachineDefinition,
        state: impl Into<StateId>,
    ) -> Result<Self, InvalidInitialState> {
        let state = state.into();
        if !definition.is_initial_state(&state) {
            return Err(InvalidInitialState {
                state,
                allowed: definition.initial_states().to_vec(),
            });
        }
        Ok(Self::in_state(state))
    }

    fn in_state(state: StateId) -> Self {
        Self {
            id: Uuid::new_v4(),
            state,
            attributes: BTreeMap::new(),
            history: StateHistory::new(),
            version: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current state.
    pub fn state(&self) -> &StateId {
        &self.state
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Serialized error left by the last recovery, if any.
    pub fn error(&self) -> Option<&str> {
        self.attribute(ERROR_ATTRIBUTE)
    }

    /// Target of the transition that failed before the last recovery.
    pub fn error_state(&self) -> Option<StateId> {
        self.attribute(ERROR_STATE_ATTRIBUTE).map(StateId::from)
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Storage version, used by stores for optimistic locking.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Move to `to` and append the move to the history.
    pub(crate) fn apply_transition(&mut self, transition: &str, to: StateId, recovery: bool) {
        let entry = StateTransition {
            transition: transition.to_string(),
            from: self.state.clone(),
            to: to.clone(),
            timestamp: Utc::now(),
            recovery,
        };
        self.history = self.history.record(entry);
        self.state = to;
    }

    pub(crate) fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{StateMachineBuilder, TransitionBuilder};

    fn definition() -> StateMachineDefinition {
        StateMachineBuilder::new()
            .initial_states(["pending", "confirmed"])
            .default_initial_state("pending")
            .transition(TransitionBuilder::new("confirm").from("pending").to("confirmed"))
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn new_record_starts_in_default_initial_state() {
        let record = Record::new(&definition());

        assert_eq!(record.state().as_str(), "pending");
        assert_eq!(record.version(), 0);
        assert!(record.history().transitions().is_empty());
    }

    #[test]
    fn record_can_start_in_any_initial_state() {
        let record = Record::with_initial_state(&definition(), "confirmed").unwrap();
        assert_eq!(record.state().as_str(), "confirmed");
    }

    #[test]
    fn non_initial_state_is_rejected() {
        let error = Record::with_initial_state(&definition(), "arrived").unwrap_err();

        assert_eq!(error.state.as_str(), "arrived");
        assert_eq!(
            error.to_string(),
            "State 'arrived' is not an initial state (allowed: pending, confirmed)"
        );
    }

    #[test]
    fn records_get_distinct_ids() {
        let definition = definition();
        assert_ne!(Record::new(&definition).id(), Record::new(&definition).id());
    }

    #[test]
    fn attributes_round_trip() {
        let record = Record::new(&definition()).with_attribute("carrier", "ups");

        assert_eq!(record.attribute("carrier"), Some("ups"));
        assert_eq!(record.attribute("missing"), None);
        assert!(record.error().is_none());
        assert!(record.error_state().is_none());
    }

    #[test]
    fn apply_transition_updates_state_and_history() {
        let mut record = Record::new(&definition());
        record.apply_transition("confirm", "confirmed".into(), false);

        assert_eq!(record.state().as_str(), "confirmed");
        let last = record.history().last().unwrap();
        assert_eq!(last.from.as_str(), "pending");
        assert!(!last.recovery);
    }
}
