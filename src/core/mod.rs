//! Core state machine types and logic.
//!
//! This module contains the pure core of the engine:
//! - State identifiers and transition definitions
//! - Validated, immutable state machine definitions
//! - Transition resolution
//! - Records and their transition history
//!
//! Nothing here performs I/O; the effectful shell lives in `effects`.

mod definition;
mod history;
mod record;
mod resolve;
mod state;
mod transition;

pub use definition::{StateMachineDefinition, RECOVERY_TRANSITION};
pub use history::{StateHistory, StateTransition};
pub use record::{InvalidInitialState, Record, ERROR_ATTRIBUTE, ERROR_STATE_ATTRIBUTE};
pub use resolve::Resolution;
pub use state::StateId;
pub use transition::{Source, TransitionDefinition};
