//! Execution-scoped context.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Context carried through a single execution call stack.
///
/// It is never persisted. The recovery flag marks an execution that is
/// already diverting a record into the error state, so a failure inside
/// recovery (or inside a nested execution started from it) does not
/// trigger recovery again.
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    recovering: bool,
    started_at: DateTime<Utc>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self {
            recovering: false,
            started_at: Utc::now(),
        }
    }

    pub fn is_recovering(&self) -> bool {
        self.recovering
    }

    /// Same context with the recovery flag set.
    pub fn recovering(&self) -> Self {
        Self {
            recovering: true,
            started_at: self.started_at,
        }
    }

    /// Calculate elapsed time since the execution started (pure)
    pub fn elapsed(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_not_recovering() {
        assert!(!ExecutionContext::new().is_recovering());
    }

    #[test]
    fn recovering_keeps_start_time() {
        let context = ExecutionContext::new();
        let recovering = context.recovering();

        assert!(recovering.is_recovering());
        assert!(!context.is_recovering());
        assert_eq!(recovering.started_at, context.started_at);
    }
}
