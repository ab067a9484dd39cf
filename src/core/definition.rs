//! Immutable state machine definitions.

use super::state::StateId;
use super::transition::TransitionDefinition;
use crate::builder::{BuildError, StateMachineBuilder};

/// Name of the transition used to divert a record into the error state.
pub const RECOVERY_TRANSITION: &str = "error";

/// Validated, immutable description of a record type's states and edges.
///
/// Definitions are only produced by [`StateMachineBuilder::build`], which
/// rejects malformed machines, so every definition upholds:
///
/// - `default_initial_state ∈ initial_states ⊆ states`
/// - every transition's `from`/`to` states are in `states`
/// - `error_state`, when set, is in `states`
/// - no two transitions share a name with overlapping sources
///
/// A definition is read-only after construction and can be shared across
/// threads behind an `Arc` without locking.
#[derive(Clone, Debug, PartialEq)]
pub struct StateMachineDefinition {
    states: Vec<StateId>,
    initial_states: Vec<StateId>,
    default_initial_state: StateId,
    error_state: Option<StateId>,
    transitions: Vec<TransitionDefinition>,
}

impl StateMachineDefinition {
    /// Start building a definition.
    pub fn builder() -> StateMachineBuilder {
        StateMachineBuilder::new()
    }

    /// Build and validate a definition from its parts in one call.
    ///
    /// `states: None` infers the state set from every other part.
    pub fn build<I, T>(
        states: Option<Vec<StateId>>,
        initial_states: I,
        default_initial_state: Option<StateId>,
        error_state: Option<StateId>,
        transitions: T,
    ) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = StateId>,
        T: IntoIterator<Item = TransitionDefinition>,
    {
        let mut builder = StateMachineBuilder::new().initial_states(initial_states);
        if let Some(states) = states {
            builder = builder.states(states);
        }
        if let Some(default) = default_initial_state {
            builder = builder.default_initial_state(default);
        }
        if let Some(error) = error_state {
            builder = builder.error_state(error);
        }
        builder.add_transitions(transitions).build()
    }

    pub(crate) fn from_validated_parts(
        states: Vec<StateId>,
        initial_states: Vec<StateId>,
        default_initial_state: StateId,
        error_state: Option<StateId>,
        transitions: Vec<TransitionDefinition>,
    ) -> Self {
        Self {
            states,
            initial_states,
            default_initial_state,
            error_state,
            transitions,
        }
    }

    /// All states, in declaration order.
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn initial_states(&self) -> &[StateId] {
        &self.initial_states
    }

    pub fn default_initial_state(&self) -> &StateId {
        &self.default_initial_state
    }

    /// The designated recovery target, if configured.
    pub fn error_state(&self) -> Option<&StateId> {
        self.error_state.as_ref()
    }

    /// All transitions, in declaration order. Includes the implicit
    /// recovery transition when one was synthesized.
    pub fn transitions(&self) -> &[TransitionDefinition] {
        &self.transitions
    }

    pub fn has_state(&self, state: &StateId) -> bool {
        self.states.contains(state)
    }

    pub fn is_initial_state(&self, state: &StateId) -> bool {
        self.initial_states.contains(state)
    }

    /// Check if any transition carries this name.
    pub fn has_transition(&self, name: &str) -> bool {
        self.transitions.iter().any(|t| t.name == name)
    }
}
