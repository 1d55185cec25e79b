//! Structural validation.
//!
//! Never fails: an invalid graph is still a displayable graph, so every
//! problem found is returned as data.

pub mod node_rules;
pub mod structural;

use serde::Serialize;

use crate::error::CompilerError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{GraphSnapshot, WorkflowNode};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<CompilerError>,
}

pub fn validate(snapshot: &GraphSnapshot) -> ValidationReport {
    let graph = WorkflowGraph::build(snapshot);
    let errors = validate_graph(snapshot, &graph);
    tracing::debug!(
        nodes = snapshot.nodes.len(),
        connections = snapshot.connections.len(),
        errors = errors.len(),
        "validated workflow"
    );
    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Validate the entire workflow graph (structural + node configs).
pub fn validate_graph(snapshot: &GraphSnapshot, graph: &WorkflowGraph) -> Vec<CompilerError> {
    let mut errors = structural::validate_structural(snapshot, graph);

    for node in &snapshot.nodes {
        errors.extend(validate_node(node));
    }

    errors
}

/// Validate a single node's configuration.
pub fn validate_node(node: &WorkflowNode) -> Vec<CompilerError> {
    node_rules::validate_node_config(node)
}
