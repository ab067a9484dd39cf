//! Errors surfaced by transition execution.

use crate::core::StateId;
use thiserror::Error;

/// The requested transition has no matching edge from the current state,
/// or its edge leads somewhere other than the requested target.
///
/// Raised before the operation runs, so nothing has been changed.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Cannot apply transition '{transition}' from '{from}' to '{attempted_to}'")]
pub struct InvalidTransition {
    pub from: StateId,
    pub attempted_to: StateId,
    pub transition: String,
}

/// Errors returned by [`TransitionExecutor::execute`](super::TransitionExecutor::execute).
#[derive(Debug, Error)]
pub enum ExecutionError<E> {
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// The wrapped operation failed. `source` is the operation's own error,
    /// unchanged.
    #[error("Transition '{transition}' failed: {source}")]
    OperationFailure {
        transition: String,
        #[source]
        source: E,
    },
}

impl<E> ExecutionError<E> {
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition(_))
    }

    /// The operation's error, if the operation ran and failed.
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            Self::OperationFailure { source, .. } => Some(source),
            Self::InvalidTransition(_) => None,
        }
    }

    pub fn into_operation_error(self) -> Option<E> {
        match self {
            Self::OperationFailure { source, .. } => Some(source),
            Self::InvalidTransition(_) => None,
        }
    }
}
