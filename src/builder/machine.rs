//! Builder for constructing state machine definitions.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{
    Source, StateId, StateMachineDefinition, TransitionDefinition, RECOVERY_TRANSITION,
};
use crate::validation::{into_result, validate, DefinitionParts, ValidationError};

/// Builder for constructing state machine definitions with a fluent API.
///
/// Validation happens once, in [`build`](Self::build), and reports every
/// defect at the same time.
pub struct StateMachineBuilder {
    states: Option<Vec<StateId>>,
    extra_states: Vec<StateId>,
    initial_states: Vec<StateId>,
    default_initial_state: Option<StateId>,
    error_state: Option<StateId>,
    error_self_loop: bool,
    transitions: Vec<TransitionDefinition>,
}

impl StateMachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: None,
            extra_states: Vec::new(),
            initial_states: Vec::new(),
            default_initial_state: None,
            error_state: None,
            error_self_loop: true,
            transitions: Vec::new(),
        }
    }

    /// Declare the full state set explicitly.
    /// Without this, states are inferred from everything else.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.states = Some(states.into_iter().map(Into::into).collect());
        self
    }

    /// Declare states that no transition mentions.
    pub fn extra_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.extra_states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Add an initial state (at least one is required).
    pub fn initial_state(mut self, state: impl Into<StateId>) -> Self {
        self.initial_states.push(state.into());
        self
    }

    /// Add several initial states.
    pub fn initial_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.initial_states
            .extend(states.into_iter().map(Into::into));
        self
    }

    /// Set the state used when creation does not choose one.
    /// Optional when exactly one initial state is declared.
    pub fn default_initial_state(mut self, state: impl Into<StateId>) -> Self {
        self.default_initial_state = Some(state.into());
        self
    }

    /// Set the recovery target for failed transitions.
    pub fn error_state(mut self, state: impl Into<StateId>) -> Self {
        self.error_state = Some(state.into());
        self
    }

    /// Whether the implicit recovery transition may start from the error
    /// state itself. Defaults to `true`.
    pub fn error_self_loop(mut self, allowed: bool) -> Self {
        self.error_self_loop = allowed;
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: TransitionDefinition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn add_transitions<I>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = TransitionDefinition>,
    {
        self.transitions.extend(transitions);
        self
    }

    /// Build the definition.
    /// Returns every validation problem found if the machine is malformed.
    pub fn build(self) -> Result<StateMachineDefinition, BuildError> {
        let states = match &self.states {
            Some(states) => dedup(states.clone()),
            None => self.inferred_states(),
        };

        let default_initial_state = self.default_initial_state.or_else(|| {
            match self.initial_states.as_slice() {
                [only] => Some(only.clone()),
                _ => None,
            }
        });

        let mut transitions = self.transitions;
        if let Some(error_state) = &self.error_state {
            let declared = transitions.iter().any(|t| t.name == RECOVERY_TRANSITION);
            if !declared {
                transitions.push(recovery_transition(
                    &states,
                    error_state,
                    self.error_self_loop,
                ));
            }
        }

        let parts = DefinitionParts {
            states,
            initial_states: dedup(self.initial_states),
            default_initial_state,
            error_state: self.error_state,
            transitions,
        };

        into_result(validate(&parts)).map_err(BuildError::Invalid)?;

        let DefinitionParts {
            states,
            initial_states,
            default_initial_state,
            error_state,
            transitions,
        } = parts;

        // Validated: a default exists whenever initial states do.
        let Some(default_initial_state) = default_initial_state else {
            return Err(BuildError::Invalid(vec![
                ValidationError::MissingDefaultInitialState,
            ]));
        };

        Ok(StateMachineDefinition::from_validated_parts(
            states,
            initial_states,
            default_initial_state,
            error_state,
            transitions,
        ))
    }

    fn inferred_states(&self) -> Vec<StateId> {
        let mut states: Vec<StateId> = Vec::new();
        let mut add = |state: &StateId| {
            if !states.contains(state) {
                states.push(state.clone());
            }
        };

        self.initial_states.iter().for_each(&mut add);
        self.extra_states.iter().for_each(&mut add);
        self.error_state.iter().for_each(&mut add);
        for transition in &self.transitions {
            if let Source::States(from) = &transition.from {
                from.iter().for_each(&mut add);
            }
            add(&transition.to);
        }

        states
    }
}

impl Default for StateMachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn recovery_transition(
    states: &[StateId],
    error_state: &StateId,
    self_loop: bool,
) -> TransitionDefinition {
    let from = if self_loop {
        Source::Any
    } else {
        Source::States(
            states
                .iter()
                .filter(|state| *state != error_state)
                .cloned()
                .collect(),
        )
    };
    TransitionDefinition::new(RECOVERY_TRANSITION, from, error_state.clone())
}

fn dedup(states: Vec<StateId>) -> Vec<StateId> {
    let mut unique: Vec<StateId> = Vec::with_capacity(states.len());
    for state in states {
        if !unique.contains(&state) {
            unique.push(state);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirm() -> TransitionBuilder {
        TransitionBuilder::new("confirm").from("pending").to("confirmed")
    }

    #[test]
    fn builder_requires_initial_state() {
        let result = StateMachineBuilder::new()
            .transition(confirm())
            .unwrap()
            .build();

        let error = result.unwrap_err();
        assert_eq!(
            error.validation_errors(),
            &[ValidationError::NoInitialStates]
        );
    }

    #[test]
    fn fluent_api_builds_machine() {
        let definition = StateMachineBuilder::new()
            .initial_state("pending")
            .transition(confirm())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(definition.default_initial_state().as_str(), "pending");
        assert_eq!(definition.transitions().len(), 1);
        assert!(definition.error_state().is_none());
    }

    #[test]
    fn explicit_states_must_cover_transitions() {
        let result = StateMachineBuilder::new()
            .states(["pending"])
            .initial_state("pending")
            .transition(confirm())
            .unwrap()
            .build();

        assert!(matches!(
            result.unwrap_err().validation_errors(),
            [ValidationError::UndeclaredState { state, .. }] if state.as_str() == "confirmed"
        ));
    }

    #[test]
    fn extra_states_are_included() {
        let definition = StateMachineBuilder::new()
            .initial_state("pending")
            .extra_states(["archived"])
            .transition(confirm())
            .unwrap()
            .build()
            .unwrap();

        assert!(definition.has_state(&"archived".into()));
    }

    #[test]
    fn multiple_initial_states_need_a_default() {
        let result = StateMachineBuilder::new()
            .initial_states(["pending", "confirmed"])
            .transition(confirm())
            .unwrap()
            .build();

        assert!(result.is_err());

        let definition = StateMachineBuilder::new()
            .initial_states(["pending", "confirmed"])
            .default_initial_state("confirmed")
            .transition(confirm())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(definition.default_initial_state().as_str(), "confirmed");
    }

    #[test]
    fn ambiguous_transitions_are_rejected() {
        let result = StateMachineBuilder::new()
            .initial_state("pending")
            .transition(confirm())
            .unwrap()
            .transition(TransitionBuilder::new("confirm").from_any().to("confirmed"))
            .unwrap()
            .build();

        assert!(matches!(
            result.unwrap_err().validation_errors(),
            [ValidationError::AmbiguousTransition { .. }]
        ));
    }

    #[test]
    fn recovery_transition_is_wildcard_by_default() {
        let definition = StateMachineBuilder::new()
            .initial_state("pending")
            .error_state("error")
            .transition(confirm())
            .unwrap()
            .build()
            .unwrap();

        assert!(definition.is_reachable(&"error".into(), RECOVERY_TRANSITION));
        assert!(definition.is_reachable(&"confirmed".into(), RECOVERY_TRANSITION));
    }

    #[test]
    fn recovery_self_loop_can_be_disabled() {
        let definition = StateMachineBuilder::new()
            .initial_state("pending")
            .error_state("error")
            .error_self_loop(false)
            .transition(confirm())
            .unwrap()
            .build()
            .unwrap();

        assert!(!definition.is_reachable(&"error".into(), RECOVERY_TRANSITION));
        assert!(definition.is_reachable(&"pending".into(), RECOVERY_TRANSITION));
    }

    #[test]
    fn declared_recovery_transition_is_kept() {
        let definition = StateMachineBuilder::new()
            .initial_state("pending")
            .error_state("error")
            .transition(confirm())
            .unwrap()
            .transition(
                TransitionBuilder::new(RECOVERY_TRANSITION)
                    .from_states(["pending", "confirmed"])
                    .to("error"),
            )
            .unwrap()
            .build()
            .unwrap();

        let recovery: Vec<_> = definition
            .transitions()
            .iter()
            .filter(|t| t.name == RECOVERY_TRANSITION)
            .collect();
        assert_eq!(recovery.len(), 1);
        assert!(!recovery[0].from.is_wildcard());
    }

    #[test]
    fn build_error_lists_every_problem() {
        let error = StateMachineBuilder::new()
            .states(["pending"])
            .error_state("error")
            .transition(confirm())
            .unwrap()
            .build()
            .unwrap_err();

        let codes: Vec<&str> = error.validation_errors().iter().map(|e| e.code()).collect();
        assert!(codes.contains(&"NO_INITIAL_STATES"));
        assert!(codes.contains(&"UNDECLARED_ERROR_STATE"));
        assert!(codes.contains(&"UNDECLARED_STATE"));
        assert!(error.to_string().starts_with("Invalid state machine definition"));
    }
}
