//! Builder API for constructing state machine definitions.
//!
//! Definitions are assembled with fluent builders and validated eagerly in
//! `build()`; there is no runtime code generation.

pub mod error;
pub mod machine;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Source, StateId, TransitionDefinition};

/// Create a transition from a single state.
///
/// # Example
///
/// ```
/// use record_fsm::builder::simple_transition;
///
/// let confirm = simple_transition("confirm", "pending", "confirmed");
/// assert!(confirm.matches(&"pending".into(), "confirm"));
/// ```
pub fn simple_transition(
    name: impl Into<String>,
    from: impl Into<StateId>,
    to: impl Into<StateId>,
) -> TransitionDefinition {
    TransitionDefinition::new(name, Source::States(vec![from.into()]), to)
}

/// Create a transition legal from any state.
///
/// # Example
///
/// ```
/// use record_fsm::builder::wildcard_transition;
///
/// let error = wildcard_transition("error", "error");
/// assert!(error.matches(&"anything".into(), "error"));
/// ```
pub fn wildcard_transition(name: impl Into<String>, to: impl Into<StateId>) -> TransitionDefinition {
    TransitionDefinition::new(name, Source::Any, to)
}
