//! Editable node/connection model.
//!
//! Every mutation either applies completely or returns a `GraphError` and
//! leaves the workflow untouched. Compilation never reads a `Workflow`
//! directly; callers hand it a `snapshot()`.

use serde_json::Value;

use crate::error::GraphError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{GraphSnapshot, NodeConnection, NodeData, NodeStatus, WorkflowNode};
use crate::schema::propagate;

#[derive(Debug, Clone, Default)]
pub struct Workflow {
    nodes: Vec<WorkflowNode>,
    connections: Vec<NodeConnection>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a snapshot as-is. An invalid graph is still editable.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        Workflow {
            nodes: snapshot.nodes,
            connections: snapshot.connections,
        }
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::new(self.nodes.clone(), self.connections.clone())
    }

    pub fn into_snapshot(self) -> GraphSnapshot {
        GraphSnapshot::new(self.nodes, self.connections)
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    pub fn connections(&self) -> &[NodeConnection] {
        &self.connections
    }

    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, GraphError> {
        self.nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| GraphError::InvalidReference(id.to_string()))
    }

    pub fn add_node(&mut self, node: WorkflowNode) -> Result<(), GraphError> {
        if self.node(node.id()).is_some() {
            return Err(GraphError::DuplicateNode(node.id));
        }
        tracing::debug!(node = %node.id, kind = %node.kind(), "add node");
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a node together with every connection touching it.
    pub fn remove_node(&mut self, id: &str) -> Result<WorkflowNode, GraphError> {
        let idx = self.position(id)?;
        let node = self.nodes.remove(idx);
        let before = self.connections.len();
        self.connections
            .retain(|c| c.source_id != id && c.target_id != id);
        tracing::debug!(
            node = %id,
            dropped_connections = before - self.connections.len(),
            "remove node"
        );
        Ok(node)
    }

    /// Connect two existing nodes. Rejects self-loops, duplicates, and any
    /// edge whose target already reaches its source. On success, the target
    /// may inherit a path from the source (see `schema::auto_fill`).
    pub fn add_connection(&mut self, source_id: &str, target_id: &str) -> Result<(), GraphError> {
        let source_idx = self.position(source_id)?;
        let target_idx = self.position(target_id)?;

        if source_id == target_id {
            return Err(GraphError::SelfLoop(source_id.to_string()));
        }
        if self
            .connections
            .iter()
            .any(|c| c.source_id == source_id && c.target_id == target_id)
        {
            return Err(GraphError::DuplicateEdge {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
            });
        }

        let graph = WorkflowGraph::from_parts(&self.nodes, &self.connections);
        if graph.has_path(target_id, source_id) {
            return Err(GraphError::CycleDetected {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
            });
        }

        self.connections
            .push(NodeConnection::new(source_id, target_id));

        let source = self.nodes[source_idx].clone();
        if let Some(field) = propagate::auto_fill(&source, &mut self.nodes[target_idx]) {
            tracing::debug!(source = %source_id, target = %target_id, field, "auto-filled field");
        }
        Ok(())
    }

    pub fn remove_connection(&mut self, source_id: &str, target_id: &str) -> Result<(), GraphError> {
        let before = self.connections.len();
        self.connections
            .retain(|c| !(c.source_id == source_id && c.target_id == target_id));
        if self.connections.len() == before {
            return Err(GraphError::MissingEdge {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
            });
        }
        Ok(())
    }

    /// Merge a JSON object into the node's data bag. Keys absent from the
    /// patch keep their values; patched keys are marked as user-edited.
    pub fn update_node_data(&mut self, id: &str, patch: Value) -> Result<(), GraphError> {
        let idx = self.position(id)?;
        let Value::Object(patch) = patch else {
            return Err(GraphError::InvalidData {
                node_id: id.to_string(),
                message: "patch must be a JSON object".into(),
            });
        };

        let node = &self.nodes[idx];
        let mut merged = match node.data.to_value() {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        let keys: Vec<String> = patch.keys().cloned().collect();
        merged.extend(patch);

        let data = NodeData::from_value(node.kind(), Value::Object(merged)).map_err(|e| {
            GraphError::InvalidData {
                node_id: id.to_string(),
                message: e.to_string(),
            }
        })?;

        let node = &mut self.nodes[idx];
        node.data = data;
        node.edited_fields.extend(keys);
        Ok(())
    }

    /// Store run feedback from the orchestration engine. Last write wins.
    pub fn apply_run_status(
        &mut self,
        id: &str,
        status: NodeStatus,
        output: Option<Value>,
        error: Option<String>,
    ) -> Result<(), GraphError> {
        let idx = self.position(id)?;
        let node = &mut self.nodes[idx];
        node.status = status;
        node.output = output;
        node.error = error;
        Ok(())
    }

    /// Record the id under which the caller persisted this node's config.
    pub fn set_config_id(&mut self, id: &str, config_id: impl Into<String>) -> Result<(), GraphError> {
        let idx = self.position(id)?;
        self.nodes[idx].config_id = Some(config_id.into());
        Ok(())
    }
}
