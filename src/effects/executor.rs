//! Transition executor.
//!
//! Wraps a host operation with the state machine's pass/fail semantics:
//! reject illegal transitions before anything runs, commit the new state
//! only after the operation succeeds, and hand failures to the recovery hook.
//!
//! Operations change the pending record and return it; they never save.
//! The executor owns the commit, so a failed operation leaves the stored
//! record exactly as it was.

use crate::core::{Record, StateId, StateMachineDefinition};
use crate::effects::context::ExecutionContext;
use crate::effects::error::{ExecutionError, InvalidTransition};
use crate::store::{RecordStore, StoreError};
use std::sync::Arc;
use stillwater::effect::{BoxedEffect, Effect};
use stillwater::prelude::*;

/// Executes named transitions against records.
///
/// The executor holds a shared, read-only definition and no per-record
/// state, so one executor serves any number of concurrent executions.
/// Executions on the same stored record must be serialized by the store
/// (see [`RecordStore`]).
#[derive(Clone, Debug)]
pub struct TransitionExecutor {
    definition: Arc<StateMachineDefinition>,
}

impl TransitionExecutor {
    pub fn new(definition: Arc<StateMachineDefinition>) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &StateMachineDefinition {
        &self.definition
    }

    /// Check that `transition` leads from the record's state to `target`
    /// and return the pending record: the state already moved to `target`
    /// and the move appended to its history.
    ///
    /// Nothing is committed; this is the guard half of [`execute`](Self::execute)
    /// for hosts that drive their own operation.
    pub fn prepare(
        &self,
        record: &Record,
        transition: &str,
        target: &StateId,
    ) -> Result<Record, InvalidTransition> {
        self.prepare_with(record, transition, target, false)
    }

    pub(crate) fn prepare_with(
        &self,
        record: &Record,
        transition: &str,
        target: &StateId,
        recovery: bool,
    ) -> Result<Record, InvalidTransition> {
        match self.definition.resolve(record.state(), transition).to() {
            Some(to) if to == target => {
                let mut pending = record.clone();
                pending.apply_transition(transition, target.clone(), recovery);
                Ok(pending)
            }
            _ => Err(InvalidTransition {
                from: record.state().clone(),
                attempted_to: target.clone(),
                transition: transition.to_string(),
            }),
        }
    }

    /// Execute a transition.
    ///
    /// `operation` receives the pending record (already in `target`),
    /// applies its changes and returns it. The executor then saves it and
    /// returns the stored copy. If the operation or the save fails, the
    /// state change is not committed, the recovery hook runs, and the error
    /// is returned unchanged.
    pub async fn execute<E, Env, F>(
        &self,
        record: Record,
        transition: &str,
        target: &StateId,
        operation: F,
        env: &Env,
    ) -> Result<Record, ExecutionError<E>>
    where
        F: FnOnce(Record) -> BoxedEffect<Record, E, Env>,
        E: std::error::Error + From<StoreError> + Send + 'static,
        Env: RecordStore + Clone + Send + Sync + 'static,
    {
        self.execute_in(
            &ExecutionContext::new(),
            record,
            transition,
            target,
            operation,
            env,
        )
        .await
    }

    /// Execute a transition inside an existing execution context.
    ///
    /// Operations that start nested executions pass their context along so
    /// the recovery flag is honoured.
    pub async fn execute_in<E, Env, F>(
        &self,
        context: &ExecutionContext,
        record: Record,
        transition: &str,
        target: &StateId,
        operation: F,
        env: &Env,
    ) -> Result<Record, ExecutionError<E>>
    where
        F: FnOnce(Record) -> BoxedEffect<Record, E, Env>,
        E: std::error::Error + From<StoreError> + Send + 'static,
        Env: RecordStore + Clone + Send + Sync + 'static,
    {
        let result = self
            .attempt(&record, transition, target, false, operation, env)
            .await;

        match result {
            Ok(updated) => {
                tracing::debug!(
                    record = %updated.id(),
                    transition = transition,
                    from = %record.state(),
                    to = %target,
                    elapsed_ms = u64::try_from(context.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "Transition applied"
                );
                Ok(updated)
            }
            Err(ExecutionError::InvalidTransition(rejected)) => {
                tracing::warn!(
                    record = %record.id(),
                    transition = transition,
                    from = %rejected.from,
                    to = %rejected.attempted_to,
                    "Transition rejected"
                );
                Err(rejected.into())
            }
            Err(ExecutionError::OperationFailure { transition, source }) => {
                tracing::warn!(
                    record = %record.id(),
                    transition = %transition,
                    from = %record.state(),
                    to = %target,
                    error = %source,
                    "Transition operation failed"
                );
                self.on_failure(context, &record, target, &source, env)
                    .await;
                Err(ExecutionError::OperationFailure { transition, source })
            }
        }
    }

    /// Guard, run the operation, then commit. No recovery.
    pub(crate) async fn attempt<E, Env, F>(
        &self,
        record: &Record,
        transition: &str,
        target: &StateId,
        recovery: bool,
        operation: F,
        env: &Env,
    ) -> Result<Record, ExecutionError<E>>
    where
        F: FnOnce(Record) -> BoxedEffect<Record, E, Env>,
        E: From<StoreError> + Send + 'static,
        Env: RecordStore + Clone + Send + Sync + 'static,
    {
        let failure = |source: E| ExecutionError::OperationFailure {
            transition: transition.to_string(),
            source,
        };

        let pending = self.prepare_with(record, transition, target, recovery)?;
        let changed = operation(pending).run(env).await.map_err(failure)?;

        env.save(changed).map_err(|error| failure(E::from(error)))
    }
}

/// Operation that makes no changes of its own.
///
/// Hosts with nothing to add to a transition can pass this directly to
/// [`TransitionExecutor::execute`]; recovery uses it too.
pub fn unchanged<Env>(record: Record) -> BoxedEffect<Record, StoreError, Env>
where
    Env: Clone + Send + Sync + 'static,
{
    pure(record).boxed()
}
