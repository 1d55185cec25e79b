//! Parse phase: JSON → graph snapshot + graph view.

pub mod graph;
pub mod types;

pub use graph::WorkflowGraph;
pub use types::*;

use serde::Deserialize;

use crate::error::CompilerError;

/// Snapshot shape before node data is typed.
#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    connections: Vec<NodeConnection>,
}

/// Deserialize an editor snapshot. Malformed JSON is a single `P001`; every
/// node whose `type` or `data` does not fit gets its own `P002`.
pub fn parse(json: &str) -> Result<GraphSnapshot, Vec<CompilerError>> {
    let raw = serde_json::from_str::<RawSnapshot>(json).map_err(|e| {
        vec![CompilerError::parse(
            "P001",
            format!("Failed to parse workflow JSON: {}", e),
        )]
    })?;

    let mut nodes = Vec::with_capacity(raw.nodes.len());
    let mut errors = Vec::new();
    for raw_node in raw.nodes {
        let id = raw_node.id.clone();
        match WorkflowNode::try_from(raw_node) {
            Ok(node) => nodes.push(node),
            Err(message) => {
                let mut err = CompilerError::parse("P002", message);
                err.node_id = Some(id);
                errors.push(err);
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    tracing::debug!(
        nodes = nodes.len(),
        connections = raw.connections.len(),
        "parsed workflow snapshot"
    );
    Ok(GraphSnapshot::new(nodes, raw.connections))
}

/// Parse JSON and build the graph view in one step.
pub fn parse_and_build(json: &str) -> Result<(GraphSnapshot, WorkflowGraph), Vec<CompilerError>> {
    let snapshot = parse(json)?;
    let graph = WorkflowGraph::build(&snapshot);
    Ok((snapshot, graph))
}
