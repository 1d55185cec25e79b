//! Graph-level structural validation rules (V001–V008, V010).

use std::collections::HashSet;

use crate::error::CompilerError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{GraphSnapshot, NodeKind};

/// Run all structural validation rules. Returns all errors found.
pub fn validate_structural(snapshot: &GraphSnapshot, graph: &WorkflowGraph) -> Vec<CompilerError> {
    let mut errors = Vec::new();

    v001_exactly_one_start_and_end(snapshot, &mut errors);
    v002_terminal_degrees(snapshot, graph, &mut errors);
    v003_no_orphaned_nodes(snapshot, graph, &mut errors);
    v004_all_reachable_from_start(snapshot, graph, &mut errors);
    v005_connections_reference_existing_nodes(graph, &mut errors);
    v006_no_self_loops(snapshot, &mut errors);
    v007_no_duplicate_connections(snapshot, &mut errors);
    v008_no_cycles(graph, &mut errors);
    v010_unique_node_ids(snapshot, &mut errors);

    errors
}

fn count_kind(snapshot: &GraphSnapshot, kind: NodeKind) -> usize {
    snapshot.nodes.iter().filter(|n| n.kind() == kind).count()
}

fn v001_exactly_one_start_and_end(snapshot: &GraphSnapshot, errors: &mut Vec<CompilerError>) {
    for kind in [NodeKind::Start, NodeKind::End] {
        let count = count_kind(snapshot, kind);
        if count != 1 {
            errors.push(CompilerError::validate(
                "V001",
                format!("Workflow must have exactly 1 {} node, found {}", kind, count),
                None,
            ));
        }
    }
}

fn v002_terminal_degrees(
    snapshot: &GraphSnapshot,
    graph: &WorkflowGraph,
    errors: &mut Vec<CompilerError>,
) {
    for node in &snapshot.nodes {
        match node.kind() {
            NodeKind::Start if graph.incoming_count(node.id()) > 0 => {
                errors.push(CompilerError::validate(
                    "V002",
                    "Start node must not have incoming connections",
                    Some(node.id().to_string()),
                ));
            }
            NodeKind::End if graph.outgoing_count(node.id()) > 0 => {
                errors.push(CompilerError::validate(
                    "V002",
                    "End node must not have outgoing connections",
                    Some(node.id().to_string()),
                ));
            }
            _ => {}
        }
    }
}

fn v003_no_orphaned_nodes(
    snapshot: &GraphSnapshot,
    graph: &WorkflowGraph,
    errors: &mut Vec<CompilerError>,
) {
    for node in snapshot.nodes.iter().filter(|n| !n.kind().is_terminal()) {
        if graph.incoming_count(node.id()) == 0 {
            errors.push(CompilerError::validate(
                "V003",
                format!("Node '{}' has no incoming connection", node.label()),
                Some(node.id().to_string()),
            ));
        }
        if graph.outgoing_count(node.id()) == 0 {
            errors.push(CompilerError::validate(
                "V003",
                format!("Node '{}' has no outgoing connection", node.label()),
                Some(node.id().to_string()),
            ));
        }
    }
}

/// Nodes with no incoming connection at all are already V003; this only
/// flags nodes fed exclusively from islands that `start` never reaches.
fn v004_all_reachable_from_start(
    snapshot: &GraphSnapshot,
    graph: &WorkflowGraph,
    errors: &mut Vec<CompilerError>,
) {
    let mut starts = snapshot.nodes.iter().filter(|n| n.kind() == NodeKind::Start);
    let (Some(start), None) = (starts.next(), starts.next()) else {
        return;
    };

    let reachable = graph.reachable_from(start.id());
    for node in &snapshot.nodes {
        if node.kind() == NodeKind::Start || graph.incoming_count(node.id()) == 0 {
            continue;
        }
        if !reachable.contains(node.id()) {
            errors.push(CompilerError::validate(
                "V004",
                format!("Node '{}' is not reachable from the start node", node.label()),
                Some(node.id().to_string()),
            ));
        }
    }
}

fn v005_connections_reference_existing_nodes(
    graph: &WorkflowGraph,
    errors: &mut Vec<CompilerError>,
) {
    for conn in &graph.dangling {
        for id in [&conn.source_id, &conn.target_id] {
            if !graph.contains(id) {
                errors.push(CompilerError::validate(
                    "V005",
                    format!(
                        "Connection '{}' -> '{}' references unknown node '{}'",
                        conn.source_id, conn.target_id, id
                    ),
                    None,
                ));
            }
        }
    }
}

fn v006_no_self_loops(snapshot: &GraphSnapshot, errors: &mut Vec<CompilerError>) {
    for conn in &snapshot.connections {
        if conn.source_id == conn.target_id {
            errors.push(CompilerError::validate(
                "V006",
                format!("Node '{}' is connected to itself", conn.source_id),
                Some(conn.source_id.clone()),
            ));
        }
    }
}

fn v007_no_duplicate_connections(snapshot: &GraphSnapshot, errors: &mut Vec<CompilerError>) {
    let mut seen = HashSet::new();
    for conn in &snapshot.connections {
        if !seen.insert((conn.source_id.as_str(), conn.target_id.as_str())) {
            errors.push(CompilerError::validate(
                "V007",
                format!(
                    "Duplicate connection from '{}' to '{}'",
                    conn.source_id, conn.target_id
                ),
                Some(conn.source_id.clone()),
            ));
        }
    }
}

fn v008_no_cycles(graph: &WorkflowGraph, errors: &mut Vec<CompilerError>) {
    if graph.is_cyclic() {
        errors.push(CompilerError::validate(
            "V008",
            "Workflow contains a cycle",
            None,
        ));
    }
}

fn v010_unique_node_ids(snapshot: &GraphSnapshot, errors: &mut Vec<CompilerError>) {
    let mut seen = HashSet::new();
    for node in &snapshot.nodes {
        if !seen.insert(node.id()) {
            errors.push(CompilerError::validate(
                "V010",
                format!("Node id '{}' is used more than once", node.id()),
                Some(node.id().to_string()),
            ));
        }
    }
}
