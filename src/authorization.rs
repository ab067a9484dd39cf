//! Pre-flight authorization checks.
//!
//! A [`Check`] answers "may this actor attempt this action on this record"
//! before anything runs. [`TransitionCheck`] plugs the state machine into
//! that question: it only asks whether the action's transition has an edge
//! from the record's current state. Business-rule guards are deliberately
//! not consulted here; execution re-validates fully and may still reject.
//!
//! # Example
//!
//! ```rust
//! use record_fsm::authorization::{Action, Check, TransitionCheck};
//! use record_fsm::builder::{StateMachineBuilder, TransitionBuilder};
//! use record_fsm::core::Record;
//! use std::sync::Arc;
//!
//! let definition = StateMachineBuilder::new()
//!     .initial_state("pending")
//!     .transition(TransitionBuilder::new("confirm").from("pending").to("confirmed"))
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! let record = Record::new(&definition);
//! let check = TransitionCheck::new(Arc::new(definition));
//!
//! assert!(check.check(&record, &Action::transition("confirm")));
//! assert!(check.check(&record, &Action::new("read")));
//! ```

use crate::core::{Record, StateMachineDefinition};
use std::fmt;
use std::sync::Arc;

/// An action a host may be asked to authorize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    /// The state machine transition this action drives, if any.
    pub transition: Option<String>,
}

impl Action {
    /// An action unrelated to the state machine.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transition: None,
        }
    }

    /// An action that drives the transition of the same name.
    pub fn transition(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            transition: Some(name.clone()),
            name,
        }
    }

    /// Attach a transition to an action whose name differs from it.
    pub fn with_transition(mut self, transition: impl Into<String>) -> Self {
        self.transition = Some(transition.into());
        self
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.transition {
            Some(transition) if *transition != self.name => {
                write!(f, "{} ({})", self.name, transition)
            }
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Capability interface for pre-flight policy evaluation.
///
/// Checks must be pure: no I/O, no mutation, the same answer for the same
/// inputs.
pub trait Check: Send + Sync {
    /// Human-readable description, used in policy listings and logs.
    fn describe(&self) -> String;

    fn check(&self, record: &Record, action: &Action) -> bool;
}

/// Reachability check backed by a state machine definition.
///
/// Returns `true` for actions with no transition so it never interferes
/// with unrelated authorization logic.
#[derive(Clone, Debug)]
pub struct TransitionCheck {
    definition: Arc<StateMachineDefinition>,
}

impl TransitionCheck {
    pub fn new(definition: Arc<StateMachineDefinition>) -> Self {
        Self { definition }
    }
}

impl Check for TransitionCheck {
    fn describe(&self) -> String {
        "record state allows the action's transition".to_string()
    }

    fn check(&self, record: &Record, action: &Action) -> bool {
        let Some(transition) = action.transition.as_deref() else {
            return true;
        };

        let reachable = self.definition.is_reachable(record.state(), transition);
        tracing::debug!(
            record = %record.id(),
            action = %action.name,
            transition = transition,
            state = %record.state(),
            reachable = reachable,
            "Pre-flight transition check"
        );
        reachable
    }
}

/// Check built from a pure predicate.
///
/// Lets hosts combine ad-hoc policies with [`TransitionCheck`] behind the
/// same interface.
pub struct FnCheck {
    description: String,
    predicate: Box<dyn Fn(&Record, &Action) -> bool + Send + Sync>,
}

impl FnCheck {
    pub fn new<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Record, &Action) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl Check for FnCheck {
    fn describe(&self) -> String {
        self.description.clone()
    }

    fn check(&self, record: &Record, action: &Action) -> bool {
        (self.predicate)(record, action)
    }
}

impl fmt::Debug for FnCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCheck")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Allow an action only if every check allows it.
pub fn all_allow(checks: &[&dyn Check], record: &Record, action: &Action) -> bool {
    checks.iter().all(|check| check.check(record, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{StateMachineBuilder, TransitionBuilder};
    use crate::core::StateId;

    fn delivery() -> Arc<StateMachineDefinition> {
        let definition = StateMachineBuilder::new()
            .initial_state("pending")
            .error_state("error")
            .transition(TransitionBuilder::new("confirm").from("pending").to("confirmed"))
            .unwrap()
            .transition(
                TransitionBuilder::new("begin_delivery")
                    .from("confirmed")
                    .to("on_its_way"),
            )
            .unwrap()
            .transition(
                TransitionBuilder::new("package_arrived")
                    .from("on_its_way")
                    .to("arrived"),
            )
            .unwrap()
            .build()
            .unwrap();
        Arc::new(definition)
    }

    fn record_in(definition: &StateMachineDefinition, state: &str) -> Record {
        let mut record = Record::new(definition);
        let path = [
            ("confirm", "confirmed"),
            ("begin_delivery", "on_its_way"),
            ("package_arrived", "arrived"),
        ];
        for (transition, to) in path {
            if record.state().as_str() == state {
                break;
            }
            record.apply_transition(transition, StateId::from(to), false);
        }
        assert_eq!(record.state().as_str(), state);
        record
    }

    #[test]
    fn unrelated_actions_pass_through() {
        let definition = delivery();
        let check = TransitionCheck::new(Arc::clone(&definition));

        for state in ["pending", "on_its_way", "arrived"] {
            let record = record_in(&definition, state);
            assert!(check.check(&record, &Action::new("read")));
        }
    }

    #[test]
    fn package_arrived_only_from_on_its_way() {
        let definition = delivery();
        let check = TransitionCheck::new(Arc::clone(&definition));
        let action = Action::transition("package_arrived");

        assert!(!check.check(&record_in(&definition, "pending"), &action));
        assert!(check.check(&record_in(&definition, "on_its_way"), &action));
    }

    #[test]
    fn wildcard_recovery_is_reachable_everywhere() {
        let definition = delivery();
        let check = TransitionCheck::new(Arc::clone(&definition));
        let action = Action::new("flag_problem").with_transition("error");

        for state in ["pending", "confirmed", "arrived"] {
            assert!(check.check(&record_in(&definition, state), &action));
        }
    }

    #[test]
    fn unknown_transition_is_denied() {
        let definition = delivery();
        let check = TransitionCheck::new(Arc::clone(&definition));

        assert!(!check.check(
            &record_in(&definition, "pending"),
            &Action::transition("teleport")
        ));
    }

    #[test]
    fn combined_checks_require_every_check() {
        let definition = delivery();
        let transitions = TransitionCheck::new(Arc::clone(&definition));
        let no_cancel = FnCheck::new("no cancellations", |_: &Record, action: &Action| {
            action.name != "cancel"
        });
        let record = record_in(&definition, "pending");

        assert!(all_allow(
            &[&transitions, &no_cancel],
            &record,
            &Action::transition("confirm")
        ));
        assert!(!all_allow(
            &[&transitions, &no_cancel],
            &record,
            &Action::new("cancel")
        ));
        assert!(!all_allow(
            &[&transitions, &no_cancel],
            &record,
            &Action::transition("package_arrived")
        ));
        assert_eq!(no_cancel.describe(), "no cancellations");
    }

    #[test]
    fn action_display_shows_distinct_transition() {
        assert_eq!(Action::transition("confirm").to_string(), "confirm");
        assert_eq!(
            Action::new("flag_problem")
                .with_transition("error")
                .to_string(),
            "flag_problem (error)"
        );
    }
}
