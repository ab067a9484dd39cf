//! Load-time validation of state machine definitions.
//!
//! Every rule is checked and ALL violations are reported together using
//! Stillwater's `Validation`, so a broken definition is fixed in one pass
//! instead of one error at a time. A definition that fails validation is
//! never built.
//!
//! # Example
//!
//! ```rust
//! use record_fsm::core::{Source, StateId, TransitionDefinition};
//! use record_fsm::validation::{into_result, validate, DefinitionParts};
//!
//! let parts = DefinitionParts {
//!     states: vec![StateId::from("pending")],
//!     initial_states: vec![],
//!     default_initial_state: None,
//!     error_state: None,
//!     transitions: vec![TransitionDefinition::new(
//!         "confirm",
//!         Source::States(vec![StateId::from("pending")]),
//!         "confirmed",
//!     )],
//! };
//!
//! let errors = into_result(validate(&parts)).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

pub mod rules;
pub mod violations;

pub use rules::{into_result, validate, DefinitionParts, RuleCheck};
pub use violations::ValidationError;
