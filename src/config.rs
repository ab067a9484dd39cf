//! Loading definitions from configuration data.
//!
//! A [`StateMachineConfig`] is plain serde data, so a machine can live in a
//! JSON file next to the rest of a host's settings. Building it goes through
//! [`StateMachineBuilder`] and the same validation as the builder API.
//!
//! ```json
//! {
//!   "initial_states": ["pending"],
//!   "error_state": "error",
//!   "transitions": [
//!     { "name": "confirm", "from": "pending", "to": "confirmed" },
//!     { "name": "cancel", "from": ["pending", "confirmed"], "to": "cancelled" },
//!     { "name": "archive", "from": "*", "to": "archived" }
//!   ]
//! }
//! ```

use crate::builder::{BuildError, StateMachineBuilder};
use crate::core::{Source, StateId, StateMachineDefinition, TransitionDefinition};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const WILDCARD: &str = "*";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse state machine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Serializable state machine description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateMachineConfig {
    /// Explicit state list. Inferred from the rest when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    /// States no transition mentions, added to the inferred list.
    pub extra_states: Vec<String>,
    pub initial_states: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_initial_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_state: Option<String>,
    /// Whether the implicit recovery transition may leave the error state.
    pub error_self_loop: bool,
    pub transitions: Vec<TransitionConfig>,
}

impl Default for StateMachineConfig {
    fn default() -> Self {
        Self {
            states: None,
            extra_states: Vec::new(),
            initial_states: Vec::new(),
            default_initial_state: None,
            error_state: None,
            error_self_loop: true,
            transitions: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub name: String,
    pub from: SourceConfig,
    pub to: String,
}

/// A transition source: one state, several, or `"*"` for any state.
///
/// A `"*"` anywhere in a list also means any state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceConfig {
    One(String),
    Many(Vec<String>),
}

impl From<&SourceConfig> for Source {
    fn from(config: &SourceConfig) -> Self {
        match config {
            SourceConfig::One(state) if state == WILDCARD => Source::Any,
            SourceConfig::One(state) => Source::States(vec![StateId::from(state.as_str())]),
            SourceConfig::Many(states) if states.iter().any(|s| s == WILDCARD) => Source::Any,
            SourceConfig::Many(states) => {
                Source::States(states.iter().map(|s| StateId::from(s.as_str())).collect())
            }
        }
    }
}

impl From<&TransitionConfig> for TransitionDefinition {
    fn from(config: &TransitionConfig) -> Self {
        TransitionDefinition::new(config.name.clone(), Source::from(&config.from), config.to.as_str())
    }
}

impl StateMachineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and build the definition.
    pub fn build(&self) -> Result<StateMachineDefinition, ConfigError> {
        let mut builder = StateMachineBuilder::new()
            .extra_states(self.extra_states.iter().map(String::as_str))
            .initial_states(self.initial_states.iter().map(String::as_str))
            .error_self_loop(self.error_self_loop)
            .add_transitions(self.transitions.iter().map(TransitionDefinition::from));

        if let Some(states) = &self.states {
            builder = builder.states(states.iter().map(String::as_str));
        }
        if let Some(default) = &self.default_initial_state {
            builder = builder.default_initial_state(default.as_str());
        }
        if let Some(error_state) = &self.error_state {
            builder = builder.error_state(error_state.as_str());
        }

        Ok(builder.build()?)
    }
}

/// Parse and build a definition from JSON in one step.
pub fn load_definition(json: &str) -> Result<StateMachineDefinition, ConfigError> {
    StateMachineConfig::from_json(json)?.build()
}
