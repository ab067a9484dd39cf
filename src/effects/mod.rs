//! Effectful transition execution using Stillwater 0.11.0.
//!
//! This module is the "imperative shell" around the pure core: it runs a
//! host operation alongside a state change and diverts failed records into
//! the error state.
//!
//! # Key Concepts
//!
//! - **Executor**: Guards a transition, runs the operation, then commits its result
//! - **Recovery**: Moves a record whose operation failed into the error state
//! - **Context**: Execution-scoped flag that bounds recovery to one attempt
//!
//! Operations are Stillwater effects over a host environment that provides a
//! [`RecordStore`](crate::store::RecordStore). Build them with the
//! free-standing constructors `pure()`, `fail()` and `from_fn()`, and box
//! them with `.boxed()`. An operation returns the changed pending record
//! and leaves saving it to the executor.

mod context;
mod error;
mod executor;
mod recovery;

pub use context::ExecutionContext;
pub use error::{ExecutionError, InvalidTransition};
pub use executor::{unchanged, TransitionExecutor};
pub use recovery::{ErrorReport, RecoveryOutcome};
