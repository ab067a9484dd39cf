//! Transition definitions.
//!
//! A transition is a named, directed edge from a set of source states (or
//! from any state) to exactly one destination state.

use super::state::StateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source side of a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Legal from every state, including states not otherwise declared.
    Any,

    /// Legal only from the listed states.
    States(Vec<StateId>),
}

impl Source {
    /// Check if `state` is a legal starting point (pure).
    pub fn contains(&self, state: &StateId) -> bool {
        match self {
            Self::Any => true,
            Self::States(states) => states.contains(state),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// States shared by both sources, or `None` when they are disjoint.
    ///
    /// A wildcard overlaps every non-empty source. An empty explicit set
    /// matches nothing and so overlaps nothing.
    pub fn intersection(&self, other: &Source) -> Option<Source> {
        let overlap = match (self, other) {
            (Self::Any, Self::Any) => return Some(Self::Any),
            (Self::Any, Self::States(states)) | (Self::States(states), Self::Any) => {
                states.clone()
            }
            (Self::States(left), Self::States(right)) => left
                .iter()
                .filter(|state| right.contains(state))
                .cloned()
                .collect(),
        };

        if overlap.is_empty() {
            None
        } else {
            Some(Self::States(overlap))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::States(states) => {
                let names: Vec<&str> = states.iter().map(StateId::as_str).collect();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}

/// A named edge of the state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    /// Name of the operation this edge belongs to
    pub name: String,
    /// States the edge may start from
    pub from: Source,
    /// Resulting state
    pub to: StateId,
}

impl TransitionDefinition {
    pub fn new(name: impl Into<String>, from: Source, to: impl Into<StateId>) -> Self {
        Self {
            name: name.into(),
            from,
            to: to.into(),
        }
    }

    /// Check if this edge is named `name` and starts from `current` (pure).
    pub fn matches(&self, current: &StateId, name: &str) -> bool {
        self.name == name && self.from.contains(current)
    }
}

impl fmt::Display for TransitionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}] -> {}", self.name, self.from, self.to)
    }
}
