//! record-fsm: a flat state machine engine for stored records
//!
//! Built on Stillwater's "pure core, imperative shell" philosophy. The
//! definition, resolution and pre-flight checks are pure functions over an
//! immutable, validated definition; running an operation, committing the new
//! state and recovering from failures happen in Stillwater effects.
//!
//! # Core Concepts
//!
//! - **Definition**: States, initial states and named transitions, validated once at load time
//! - **Resolution**: Which edge, if any, a named transition takes from a state
//! - **Execution**: Guard a transition, run the host's operation, commit or recover
//! - **Recovery**: Divert a record whose operation failed into the error state, at most once
//! - **Pre-flight**: Cheap reachability checks for authorization and UI
//!
//! # Example
//!
//! ```rust
//! use record_fsm::builder::{StateMachineBuilder, TransitionBuilder};
//! use record_fsm::core::Record;
//!
//! let definition = StateMachineBuilder::new()
//!     .initial_state("pending")
//!     .error_state("error")
//!     .transition(TransitionBuilder::new("confirm").from("pending").to("confirmed"))
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let record = Record::new(&definition);
//! assert!(definition.is_reachable(record.state(), "confirm"));
//! assert!(definition.is_reachable(record.state(), "error"));
//! assert!(!definition.is_reachable(&"confirmed".into(), "confirm"));
//! ```

pub mod authorization;
pub mod builder;
pub mod config;
pub mod core;
pub mod diagram;
pub mod effects;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use authorization::{Action, Check, TransitionCheck};
pub use builder::{BuildError, StateMachineBuilder, TransitionBuilder};
pub use config::{ConfigError, StateMachineConfig};
pub use core::{Record, Resolution, Source, StateId, StateMachineDefinition, TransitionDefinition};
pub use effects::{ExecutionError, InvalidTransition, TransitionExecutor};
pub use store::{MemoryStore, RecordStore, StoreError};
pub use validation::ValidationError;
