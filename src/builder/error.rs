//! Build errors for state machine and transition builders.

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur when building state machines and transitions.
///
/// A definition that fails to build must never run: callers are expected to
/// treat these as fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Transition '{transition}' source not specified. Call .from(state) or .from_any()")]
    MissingFromState { transition: String },

    #[error("Transition '{transition}' target state not specified. Call .to(state)")]
    MissingToState { transition: String },

    #[error("Invalid state machine definition: {}", describe(.0))]
    Invalid(Vec<ValidationError>),
}

impl BuildError {
    /// Every validation problem found, empty for builder misuse errors.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
