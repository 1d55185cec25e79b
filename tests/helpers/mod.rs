use serde_json::{Value, json};
use workflow_compiler::parse::types::*;

// =============================================================================
// Node builders
// =============================================================================

/// Build a node from its wire `type` and a JSON data bag.
pub fn node(id: &str, kind: &str, data: Value) -> WorkflowNode {
    let kind: NodeKind = kind.parse().expect("known node kind");
    WorkflowNode::new(id, NodeData::from_value(kind, data).expect("valid node data"))
}

pub fn start(id: &str) -> WorkflowNode {
    node(id, "start", json!({}))
}

pub fn end(id: &str) -> WorkflowNode {
    node(id, "end", json!({}))
}

pub fn read_file(id: &str, path: &str) -> WorkflowNode {
    node(id, "read-file", json!({ "path": path }))
}

pub fn write_file(id: &str, path: &str) -> WorkflowNode {
    node(id, "write-file", json!({ "path": path }))
}

pub fn filter(id: &str, data: Value) -> WorkflowNode {
    node(id, "filter", data)
}

pub fn copy_file(id: &str, destination: &str) -> WorkflowNode {
    node(id, "copy-file", json!({ "destination_path": destination }))
}

// =============================================================================
// Graph builders
// =============================================================================

pub fn conn(source: &str, target: &str) -> NodeConnection {
    NodeConnection::new(source, target)
}

/// Connections linking `ids` in order.
pub fn chain(ids: &[&str]) -> Vec<NodeConnection> {
    ids.windows(2).map(|w| conn(w[0], w[1])).collect()
}

pub fn snapshot(nodes: Vec<WorkflowNode>, connections: Vec<NodeConnection>) -> GraphSnapshot {
    GraphSnapshot::new(nodes, connections)
}

/// `start -> read -> write -> end`, csv in, json out.
pub fn read_write_snapshot() -> GraphSnapshot {
    snapshot(
        vec![
            start("start"),
            read_file("readA", "/data/in/orders.csv"),
            write_file("writeB", "/data/out/orders.json"),
            end("end"),
        ],
        chain(&["start", "readA", "writeB", "end"]),
    )
}

/// `start -> read -> filter -> write -> end`.
pub fn filtered_snapshot(filter_data: Value) -> GraphSnapshot {
    snapshot(
        vec![
            start("start"),
            read_file("readA", "/data/in/orders.csv"),
            filter("filterF", filter_data),
            write_file("writeB", "/data/out/orders.json"),
            end("end"),
        ],
        chain(&["start", "readA", "filterF", "writeB", "end"]),
    )
}

pub fn codes(errors: &[workflow_compiler::error::CompilerError]) -> Vec<&str> {
    errors.iter().map(|e| e.code.as_str()).collect()
}
