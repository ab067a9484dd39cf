//! Diagram generation from a definition.
//!
//! Output is derived, read-only text: nodes are states, edges are
//! transitions labelled by name. Wildcard sources are expanded to every
//! declared state so the diagram shows every legal move.

use crate::core::{Source, StateId, StateMachineDefinition};
use std::fmt::Write;

/// One drawn edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge<'a> {
    pub from: &'a StateId,
    pub to: &'a StateId,
    pub transition: &'a str,
}

/// Every edge of the definition, wildcards expanded, in declaration order.
pub fn edges(definition: &StateMachineDefinition) -> Vec<Edge<'_>> {
    let mut edges = Vec::new();
    for transition in definition.transitions() {
        let sources: &[StateId] = match &transition.from {
            Source::Any => definition.states(),
            Source::States(states) => states,
        };
        for from in sources {
            edges.push(Edge {
                from,
                to: &transition.to,
                transition: &transition.name,
            });
        }
    }
    edges
}

/// Render a Mermaid `stateDiagram-v2`.
///
/// # Example
///
/// ```rust
/// use record_fsm::builder::{StateMachineBuilder, TransitionBuilder};
/// use record_fsm::diagram::mermaid_state_diagram;
///
/// let definition = StateMachineBuilder::new()
///     .initial_state("pending")
///     .transition(TransitionBuilder::new("confirm").from("pending").to("confirmed"))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let diagram = mermaid_state_diagram(&definition);
/// assert!(diagram.contains("[*] --> pending"));
/// assert!(diagram.contains("pending --> confirmed: confirm"));
/// ```
pub fn mermaid_state_diagram(definition: &StateMachineDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "stateDiagram-v2");

    for state in definition.initial_states() {
        let _ = writeln!(out, "    [*] --> {}", node_id(state));
    }
    for edge in edges(definition) {
        let _ = writeln!(
            out,
            "    {} --> {}: {}",
            node_id(edge.from),
            node_id(edge.to),
            escape_label(edge.transition)
        );
    }
    out
}

/// Render a Mermaid `flowchart LR`, one node per declared state.
///
/// The default initial state gets a stadium shape and the error state a
/// hexagon.
pub fn mermaid_flowchart(definition: &StateMachineDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "flowchart LR");

    for state in definition.states() {
        let id = node_id(state);
        let label = escape_label(state.as_str());
        if state == definition.default_initial_state() {
            let _ = writeln!(out, "    {id}([\"{label}\"])");
        } else if Some(state) == definition.error_state() {
            let _ = writeln!(out, "    {id}{{{{\"{label}\"}}}}");
        } else {
            let _ = writeln!(out, "    {id}[\"{label}\"]");
        }
    }
    for edge in edges(definition) {
        let _ = writeln!(
            out,
            "    {} -->|{}| {}",
            node_id(edge.from),
            escape_label(edge.transition),
            node_id(edge.to)
        );
    }
    out
}

/// Mermaid node ids accept ASCII alphanumerics and underscores.
fn node_id(state: &StateId) -> String {
    state
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Label text with Mermaid syntax characters replaced by `#code;` entities.
fn escape_label(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '#' | '"' | '|' | ':' | ';' | '<' | '>' | '[' | ']' | '(' | ')' | '{' | '}' | '%' => {
                let _ = write!(escaped, "#{};", u32::from(c));
            }
            c if c.is_control() => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    escaped
}
