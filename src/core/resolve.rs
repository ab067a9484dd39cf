//! Transition resolution.
//!
//! Pure lookups over a [`StateMachineDefinition`]: which edge, if any, a
//! named transition takes from the current state. Nothing here runs guards,
//! touches records, or has side effects, so these are safe to call from
//! pre-flight checks and speculative UI logic.

use super::definition::StateMachineDefinition;
use super::state::StateId;
use super::transition::TransitionDefinition;

/// Outcome of resolving a transition name from a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The unique edge that applies
    Resolved(&'a TransitionDefinition),

    /// No transition with that name starts from the state
    NotApplicable,
}

impl<'a> Resolution<'a> {
    /// Destination state when resolved.
    pub fn to(&self) -> Option<&'a StateId> {
        match self {
            Self::Resolved(transition) => Some(&transition.to),
            Self::NotApplicable => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl StateMachineDefinition {
    /// Find the edge named `transition` that starts from `current`.
    ///
    /// Build-time validation guarantees at most one edge matches, so the
    /// result is deterministic.
    ///
    /// # Example
    ///
    /// ```rust
    /// use record_fsm::builder::{StateMachineBuilder, TransitionBuilder};
    /// use record_fsm::core::{Resolution, StateId};
    ///
    /// let definition = StateMachineBuilder::new()
    ///     .initial_state("pending")
    ///     .transition(TransitionBuilder::new("confirm").from("pending").to("confirmed"))
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let pending = StateId::from("pending");
    /// assert_eq!(
    ///     definition.resolve(&pending, "confirm").to(),
    ///     Some(&StateId::from("confirmed"))
    /// );
    /// assert_eq!(
    ///     definition.resolve(&StateId::from("confirmed"), "confirm"),
    ///     Resolution::NotApplicable
    /// );
    /// ```
    pub fn resolve(&self, current: &StateId, transition: &str) -> Resolution<'_> {
        self.transitions()
            .iter()
            .find(|t| t.matches(current, transition))
            .map_or(Resolution::NotApplicable, Resolution::Resolved)
    }

    /// Check if `transition` has a legal edge from `current`.
    ///
    /// Answers "could this edge exist" only; business-rule validation
    /// layered on by the host during execution is not consulted.
    pub fn is_reachable(&self, current: &StateId, transition: &str) -> bool {
        self.resolve(current, transition).is_resolved()
    }

    /// Every transition that may start from `current`, in declaration order.
    pub fn available_transitions<'a, 'c>(
        &'a self,
        current: &'c StateId,
    ) -> impl Iterator<Item = &'a TransitionDefinition> + 'c
    where
        'a: 'c,
    {
        self.transitions()
            .iter()
            .filter(move |t| t.from.contains(current))
    }

    /// Distinct states reachable from `current` in a single transition.
    pub fn possible_next_states(&self, current: &StateId) -> Vec<&StateId> {
        let mut next: Vec<&StateId> = Vec::new();
        for transition in self.transitions().iter().filter(|t| t.from.contains(current)) {
            if !next.contains(&&transition.to) {
                next.push(&transition.to);
            }
        }
        next
    }
}
