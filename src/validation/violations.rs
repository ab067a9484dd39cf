//! Definition defects found at build time.

use crate::core::{Source, StateId};
use thiserror::Error;

/// A single defect in a state machine definition.
///
/// Each variant names the offending state or transition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("No initial states declared")]
    NoInitialStates,

    #[error("Initial state '{state}' is not a declared state")]
    UndeclaredInitialState { state: StateId },

    #[error("A default initial state is required when several initial states are declared")]
    MissingDefaultInitialState,

    #[error("Default initial state '{state}' is not one of the initial states")]
    DefaultNotInitial { state: StateId },

    #[error("Error state '{state}' is not a declared state")]
    UndeclaredErrorState { state: StateId },

    #[error("Transition name cannot be empty")]
    EmptyTransitionName,

    #[error("Transition '{transition}' has no source states")]
    EmptySource { transition: String },

    #[error("Transition '{transition}' references undeclared state '{state}'")]
    UndeclaredState { transition: String, state: StateId },

    #[error("Transitions named '{transition}' overlap on source states [{overlap}]")]
    AmbiguousTransition { transition: String, overlap: Source },

    #[error("Recovery transition '{transition}' must lead to error state '{expected}', not '{found}'")]
    RecoveryTargetMismatch {
        transition: String,
        expected: StateId,
        found: StateId,
    },
}

impl ValidationError {
    /// Stable tag naming the kind of defect.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoInitialStates => "NO_INITIAL_STATES",
            Self::UndeclaredInitialState { .. } => "UNDECLARED_INITIAL_STATE",
            Self::MissingDefaultInitialState => "MISSING_DEFAULT_INITIAL_STATE",
            Self::DefaultNotInitial { .. } => "DEFAULT_NOT_INITIAL",
            Self::UndeclaredErrorState { .. } => "UNDECLARED_ERROR_STATE",
            Self::EmptyTransitionName => "EMPTY_TRANSITION_NAME",
            Self::EmptySource { .. } => "EMPTY_SOURCE",
            Self::UndeclaredState { .. } => "UNDECLARED_STATE",
            Self::AmbiguousTransition { .. } => "AMBIGUOUS_TRANSITION",
            Self::RecoveryTargetMismatch { .. } => "RECOVERY_TARGET_MISMATCH",
        }
    }
}
