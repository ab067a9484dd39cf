//! Failure recovery.
//!
//! When a transition's operation fails and the definition has an error
//! state, the record is diverted into that state through the recovery
//! transition, with the failed target and the serialized error recorded as
//! attributes. Recovery is a best-effort side channel: the caller always
//! sees the original error, and a recovery that itself fails is logged and
//! dropped after one attempt.

use crate::core::{
    Record, StateId, ERROR_ATTRIBUTE, ERROR_STATE_ATTRIBUTE, RECOVERY_TRANSITION,
};
use crate::effects::context::ExecutionContext;
use crate::effects::executor::{unchanged, TransitionExecutor};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Serializable description of an error and its source chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,
    pub causes: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: error.to_string(),
            causes,
        }
    }

    /// Read the report left on a recovered record.
    pub fn from_record(record: &Record) -> Option<Self> {
        serde_json::from_str(record.error()?).ok()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

/// What the recovery hook did.
#[derive(Clone, Debug, PartialEq)]
pub enum RecoveryOutcome {
    /// No error state is configured; the failure just propagates
    NotConfigured,

    /// The execution was already recovering; nothing was attempted
    AlreadyRecovering,

    /// The record was moved into the error state and persisted
    Recovered(Record),

    /// The recovery transition itself failed; the record is left as it was
    Failed { reason: String },
}

impl TransitionExecutor {
    /// Divert a record whose transition failed into the error state.
    ///
    /// Runs the recovery transition under the same contract as
    /// [`execute`](Self::execute), at most once, with the context's
    /// recovery flag set.
    pub async fn on_failure<E, Env>(
        &self,
        context: &ExecutionContext,
        record: &Record,
        failed_target: &StateId,
        error: &E,
        env: &Env,
    ) -> RecoveryOutcome
    where
        E: Error + 'static,
        Env: RecordStore + Clone + Send + Sync + 'static,
    {
        let Some(error_state) = self.definition().error_state() else {
            return RecoveryOutcome::NotConfigured;
        };

        if context.is_recovering() {
            tracing::debug!(
                record = %record.id(),
                "Already recovering, skipping nested recovery"
            );
            return RecoveryOutcome::AlreadyRecovering;
        }
        let context = context.recovering();

        let report = ErrorReport::from_error(error);
        let mut failed = record.clone();
        failed.set_attribute(ERROR_ATTRIBUTE, report.to_json());
        failed.set_attribute(ERROR_STATE_ATTRIBUTE, failed_target.as_str());

        let result = self
            .attempt(
                &failed,
                RECOVERY_TRANSITION,
                error_state,
                true,
                unchanged::<Env>,
                env,
            )
            .await;

        match result {
            Ok(recovered) => {
                tracing::info!(
                    record = %recovered.id(),
                    from = %record.state(),
                    failed_target = %failed_target,
                    error_state = %error_state,
                    elapsed_ms = u64::try_from(context.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "Record recovered into error state"
                );
                RecoveryOutcome::Recovered(recovered)
            }
            Err(recovery_error) => {
                tracing::error!(
                    record = %record.id(),
                    state = %record.state(),
                    failed_target = %failed_target,
                    original_error = %report.message,
                    recovery_error = %recovery_error,
                    "Recovery transition failed; record is outside the normal state graph"
                );
                RecoveryOutcome::Failed {
                    reason: recovery_error.to_string(),
                }
            }
        }
    }
}
