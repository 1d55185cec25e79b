//! DAG sequencer: one entry per node, ordering carried by `next` pointers.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::CompileOptions;
use crate::parse::types::{GraphSnapshot, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dag {
    pub dag_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    pub active: bool,
    pub dag_sequence: Vec<DagEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeKind,
    pub config_id: Option<String>,
    pub next: Vec<String>,
}

impl Dag {
    pub fn entry(&self, id: &str) -> Option<&DagEntry> {
        self.dag_sequence.iter().find(|e| e.id == id)
    }
}

/// Entries follow snapshot node order; no topological sort is performed.
/// Connections to unknown nodes are left out of `next`, and a repeated
/// connection contributes its target once.
pub fn convert_workflow_to_dag(snapshot: &GraphSnapshot, options: &CompileOptions) -> Dag {
    let known: HashSet<&str> = snapshot.nodes.iter().map(|n| n.id()).collect();

    let mut adjacency: HashMap<&str, Vec<String>> = HashMap::new();
    for conn in &snapshot.connections {
        if !known.contains(conn.target_id.as_str()) {
            continue;
        }
        let next = adjacency.entry(conn.source_id.as_str()).or_default();
        if !next.contains(&conn.target_id) {
            next.push(conn.target_id.clone());
        }
    }

    let mut emitted = HashSet::new();
    let dag_sequence = snapshot
        .nodes
        .iter()
        .filter(|n| emitted.insert(n.id()))
        .map(|n| DagEntry {
            id: n.id().to_string(),
            node_type: n.kind(),
            config_id: n.config_id.clone(),
            next: adjacency.remove(n.id()).unwrap_or_default(),
        })
        .collect();

    Dag {
        dag_id: options.dag_id(),
        name: options.name.clone(),
        schedule: options.schedule.clone(),
        active: options.active,
        dag_sequence,
    }
}
