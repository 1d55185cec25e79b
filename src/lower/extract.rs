//! Sequence extractor: recognizes source -> (filter?) -> sink chains.
//!
//! Only two shapes are accepted, `source -> sink` and `source -> filter -> sink`.
//! A source or filter with more than one outgoing connection is ambiguous and
//! is skipped rather than guessed at.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::parse::types::{DatabaseAccess, GraphSnapshot, NodeData, WorkflowNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    pub read_node: String,
    pub write_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_node: Option<String>,
}

pub fn is_source(node: &WorkflowNode) -> bool {
    match &node.data {
        NodeData::ReadFile(_) | NodeData::InlineInput(_) => true,
        NodeData::Database(d) => d.access == DatabaseAccess::Read,
        _ => false,
    }
}

pub fn is_sink(node: &WorkflowNode) -> bool {
    match &node.data {
        NodeData::WriteFile(_) | NodeData::InlineOutput(_) => true,
        NodeData::Database(d) => d.access == DatabaseAccess::Write,
        _ => false,
    }
}

/// Sequences in the order their source nodes appear in the snapshot.
pub fn find_file_conversion_sequences(snapshot: &GraphSnapshot) -> Vec<Sequence> {
    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    for conn in &snapshot.connections {
        outgoing
            .entry(conn.source_id.as_str())
            .or_default()
            .push(conn.target_id.as_str());
    }

    let mut sequences = Vec::new();
    for read in snapshot.nodes.iter().filter(|n| is_source(n)) {
        let Some(next) = only_successor(snapshot, &outgoing, read.id()) else {
            continue;
        };

        let sequence = if is_sink(next) {
            Some(Sequence {
                read_node: read.id().to_string(),
                write_node: next.id().to_string(),
                filter_node: None,
            })
        } else if matches!(next.data, NodeData::Filter(_)) {
            only_successor(snapshot, &outgoing, next.id())
                .filter(|write| is_sink(write))
                .map(|write| Sequence {
                    read_node: read.id().to_string(),
                    write_node: write.id().to_string(),
                    filter_node: Some(next.id().to_string()),
                })
        } else {
            None
        };

        if let Some(sequence) = sequence {
            sequences.push(sequence);
        }
    }

    tracing::debug!(count = sequences.len(), "extracted file conversion sequences");
    sequences
}

/// The single successor of `id`, if it has exactly one and it exists.
fn only_successor<'a>(
    snapshot: &'a GraphSnapshot,
    outgoing: &HashMap<&str, Vec<&str>>,
    id: &str,
) -> Option<&'a WorkflowNode> {
    match outgoing.get(id).map(Vec::as_slice) {
        Some([target]) => snapshot.node(target),
        _ => None,
    }
}
