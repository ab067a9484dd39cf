//! Structural rules for state machine definitions, checked with Validation.

use crate::core::{Source, StateId, TransitionDefinition, RECOVERY_TRANSITION};
use crate::validation::violations::ValidationError;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single rule.
pub type RuleCheck = Validation<(), NonEmptyVec<ValidationError>>;

/// Unvalidated parts of a definition, as assembled by the builder.
#[derive(Clone, Debug, Default)]
pub struct DefinitionParts {
    pub states: Vec<StateId>,
    pub initial_states: Vec<StateId>,
    pub default_initial_state: Option<StateId>,
    pub error_state: Option<StateId>,
    pub transitions: Vec<TransitionDefinition>,
}

/// Check every rule, accumulating ALL violations.
/// Returns Validation::Success(()) if the definition is well formed.
pub fn validate(parts: &DefinitionParts) -> RuleCheck {
    let mut checks: Vec<RuleCheck> = Vec::new();

    checks.extend(check_initial_states(parts));
    checks.push(check_default_initial_state(parts));
    checks.push(check_error_state(parts));
    checks.extend(check_transition_states(parts));
    checks.extend(check_ambiguity(&parts.transitions));
    checks.extend(check_recovery_targets(parts));

    Validation::all_vec(checks).map(|_| ())
}

/// Collapse a Validation into a Result carrying every violation.
pub fn into_result(validation: RuleCheck) -> Result<(), Vec<ValidationError>> {
    match validation {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
    }
}

fn require(condition: bool, error: impl FnOnce() -> ValidationError) -> RuleCheck {
    if condition {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

fn check_initial_states(parts: &DefinitionParts) -> Vec<RuleCheck> {
    let mut checks = vec![require(!parts.initial_states.is_empty(), || {
        ValidationError::NoInitialStates
    })];

    for state in &parts.initial_states {
        checks.push(require(parts.states.contains(state), || {
            ValidationError::UndeclaredInitialState {
                state: state.clone(),
            }
        }));
    }

    checks
}

fn check_default_initial_state(parts: &DefinitionParts) -> RuleCheck {
    match &parts.default_initial_state {
        Some(state) => require(parts.initial_states.contains(state), || {
            ValidationError::DefaultNotInitial {
                state: state.clone(),
            }
        }),
        // An empty initial set is already reported on its own.
        None => require(parts.initial_states.is_empty(), || {
            ValidationError::MissingDefaultInitialState
        }),
    }
}

fn check_error_state(parts: &DefinitionParts) -> RuleCheck {
    match &parts.error_state {
        Some(state) => require(parts.states.contains(state), || {
            ValidationError::UndeclaredErrorState {
                state: state.clone(),
            }
        }),
        None => Validation::success(()),
    }
}

fn check_transition_states(parts: &DefinitionParts) -> Vec<RuleCheck> {
    let mut checks = Vec::new();

    for transition in &parts.transitions {
        checks.push(require(!transition.name.is_empty(), || {
            ValidationError::EmptyTransitionName
        }));

        let mut referenced: Vec<&StateId> = Vec::new();
        if let Source::States(states) = &transition.from {
            checks.push(require(!states.is_empty(), || ValidationError::EmptySource {
                transition: transition.name.clone(),
            }));
            referenced.extend(states);
        }
        referenced.push(&transition.to);

        for state in referenced {
            checks.push(require(parts.states.contains(state), || {
                ValidationError::UndeclaredState {
                    transition: transition.name.clone(),
                    state: state.clone(),
                }
            }));
        }
    }

    checks
}

fn check_ambiguity(transitions: &[TransitionDefinition]) -> Vec<RuleCheck> {
    let mut checks = Vec::new();

    for (index, left) in transitions.iter().enumerate() {
        for right in &transitions[index + 1..] {
            if left.name != right.name {
                continue;
            }
            if let Some(overlap) = left.from.intersection(&right.from) {
                checks.push(Validation::fail(ValidationError::AmbiguousTransition {
                    transition: left.name.clone(),
                    overlap,
                }));
            }
        }
    }

    checks
}

fn check_recovery_targets(parts: &DefinitionParts) -> Vec<RuleCheck> {
    let Some(error_state) = &parts.error_state else {
        return Vec::new();
    };

    parts
        .transitions
        .iter()
        .filter(|t| t.name == RECOVERY_TRANSITION)
        .map(|t| {
            require(&t.to == error_state, || ValidationError::RecoveryTargetMismatch {
                transition: t.name.clone(),
                expected: error_state.clone(),
                found: t.to.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(names: &[&str]) -> Vec<StateId> {
        names.iter().map(|n| StateId::from(*n)).collect()
    }

    fn edge(name: &str, from: &[&str], to: &str) -> TransitionDefinition {
        TransitionDefinition::new(name, Source::States(states(from)), to)
    }

    fn valid_parts() -> DefinitionParts {
        DefinitionParts {
            states: states(&["pending", "confirmed", "error"]),
            initial_states: states(&["pending"]),
            default_initial_state: Some("pending".into()),
            error_state: Some("error".into()),
            transitions: vec![edge("confirm", &["pending"], "confirmed")],
        }
    }

    fn violations(parts: &DefinitionParts) -> Vec<ValidationError> {
        into_result(validate(parts)).unwrap_err()
    }

    #[test]
    fn well_formed_definition_passes() {
        assert!(validate(&valid_parts()).is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let parts = DefinitionParts {
            states: states(&["a"]),
            initial_states: Vec::new(),
            default_initial_state: None,
            error_state: Some("broken".into()),
            transitions: vec![edge("go", &["a"], "nowhere")],
        };

        let errors = violations(&parts);
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::NoInitialStates));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UndeclaredErrorState { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UndeclaredState { state, .. } if state.as_str() == "nowhere")));
    }

    #[test]
    fn default_must_be_an_initial_state() {
        let mut parts = valid_parts();
        parts.default_initial_state = Some("confirmed".into());

        assert_eq!(
            violations(&parts),
            vec![ValidationError::DefaultNotInitial {
                state: "confirmed".into()
            }]
        );
    }

    #[test]
    fn missing_default_with_several_initial_states_fails() {
        let mut parts = valid_parts();
        parts.initial_states = states(&["pending", "confirmed"]);
        parts.default_initial_state = None;

        assert_eq!(
            violations(&parts),
            vec![ValidationError::MissingDefaultInitialState]
        );
    }

    #[test]
    fn initial_states_must_be_declared() {
        let mut parts = valid_parts();
        parts.initial_states.push("ghost".into());

        assert_eq!(
            violations(&parts),
            vec![ValidationError::UndeclaredInitialState {
                state: "ghost".into()
            }]
        );
    }

    #[test]
    fn overlapping_sources_with_same_name_are_ambiguous() {
        let mut parts = valid_parts();
        parts
            .transitions
            .push(edge("confirm", &["pending", "error"], "error"));

        let errors = violations(&parts);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), "AMBIGUOUS_TRANSITION");
    }

    #[test]
    fn wildcard_overlaps_explicit_source() {
        let mut parts = valid_parts();
        parts.transitions.push(TransitionDefinition::new(
            "confirm",
            Source::Any,
            "confirmed",
        ));

        assert!(matches!(
            violations(&parts).as_slice(),
            [ValidationError::AmbiguousTransition { .. }]
        ));
    }

    #[test]
    fn disjoint_sources_with_same_name_are_allowed() {
        let mut parts = valid_parts();
        parts
            .transitions
            .push(edge("confirm", &["error"], "confirmed"));

        assert!(validate(&parts).is_success());
    }

    #[test]
    fn empty_source_and_name_are_rejected() {
        let mut parts = valid_parts();
        parts.transitions.push(edge("", &["pending"], "confirmed"));
        parts.transitions.push(edge("stuck", &[], "confirmed"));

        let codes: Vec<&str> = violations(&parts).iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["EMPTY_TRANSITION_NAME", "EMPTY_SOURCE"]);
    }

    #[test]
    fn recovery_transition_must_target_error_state() {
        let mut parts = valid_parts();
        parts
            .transitions
            .push(TransitionDefinition::new("error", Source::Any, "pending"));

        assert!(matches!(
            violations(&parts).as_slice(),
            [ValidationError::RecoveryTargetMismatch { .. }]
        ));
    }
}
