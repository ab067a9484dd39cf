//! Builder for constructing transition definitions.

use crate::builder::error::BuildError;
use crate::core::{Source, StateId, TransitionDefinition};

/// Builder for constructing transitions with a fluent API.
///
/// Calling `.from()` several times accumulates source states; `.from_any()`
/// makes the transition legal from every state.
pub struct TransitionBuilder {
    name: String,
    from: Option<Source>,
    to: Option<StateId>,
}

impl TransitionBuilder {
    /// Create a new transition builder for the named operation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: None,
            to: None,
        }
    }

    /// Add a source state.
    pub fn from(self, state: impl Into<StateId>) -> Self {
        self.from_states([state])
    }

    /// Add several source states.
    pub fn from_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        let added = states.into_iter().map(Into::into);
        self.from = Some(match self.from.take() {
            Some(Source::Any) => Source::Any,
            Some(Source::States(mut existing)) => {
                for state in added {
                    if !existing.contains(&state) {
                        existing.push(state);
                    }
                }
                Source::States(existing)
            }
            None => {
                let mut collected: Vec<StateId> = Vec::new();
                for state in added {
                    if !collected.contains(&state) {
                        collected.push(state);
                    }
                }
                Source::States(collected)
            }
        });
        self
    }

    /// Allow the transition from any state.
    pub fn from_any(mut self) -> Self {
        self.from = Some(Source::Any);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<TransitionDefinition, BuildError> {
        let from = self.from.ok_or_else(|| BuildError::MissingFromState {
            transition: self.name.clone(),
        })?;
        let to = self.to.ok_or_else(|| BuildError::MissingToState {
            transition: self.name.clone(),
        })?;

        Ok(TransitionDefinition {
            name: self.name,
            from,
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_missing_source() {
        let result = TransitionBuilder::new("confirm").to("confirmed").build();

        assert!(matches!(
            result,
            Err(BuildError::MissingFromState { transition }) if transition == "confirm"
        ));
    }

    #[test]
    fn builder_validates_missing_target() {
        let result = TransitionBuilder::new("confirm").from("pending").build();

        assert!(matches!(result, Err(BuildError::MissingToState { .. })));
    }

    #[test]
    fn repeated_from_accumulates_sources() {
        let transition = TransitionBuilder::new("cancel")
            .from("pending")
            .from("confirmed")
            .from("pending")
            .to("cancelled")
            .build()
            .unwrap();

        assert_eq!(
            transition.from,
            Source::States(vec!["pending".into(), "confirmed".into()])
        );
    }

    #[test]
    fn from_any_builds_wildcard() {
        let transition = TransitionBuilder::new("error")
            .from("pending")
            .from_any()
            .to("error")
            .build()
            .unwrap();

        assert!(transition.from.is_wildcard());
        assert!(transition.matches(&"whatever".into(), "error"));
    }

    #[test]
    fn fluent_api_builds_transition() {
        let transition = TransitionBuilder::new("begin_delivery")
            .from_states(["confirmed"])
            .to("on_its_way")
            .build()
            .unwrap();

        assert_eq!(transition.name, "begin_delivery");
        assert_eq!(transition.to, StateId::from("on_its_way"));
    }
}
