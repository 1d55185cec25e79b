//! petgraph-based directed graph view over a snapshot.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::{has_path_connecting, is_cyclic_directed};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;

use super::types::{GraphSnapshot, NodeConnection, WorkflowNode};

/// Read-only graph built from a snapshot. Connections that name a missing
/// node are kept aside in `dangling` instead of failing the build, so the
/// validator can report them alongside everything else.
pub struct WorkflowGraph {
    pub graph: DiGraph<String, ()>,
    pub node_indices: HashMap<String, NodeIndex>,
    pub dangling: Vec<NodeConnection>,
}

impl WorkflowGraph {
    pub fn build(snapshot: &GraphSnapshot) -> Self {
        Self::from_parts(&snapshot.nodes, &snapshot.connections)
    }

    pub fn from_parts(nodes: &[WorkflowNode], connections: &[NodeConnection]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut dangling = Vec::new();

        for node in nodes {
            let id = node.id().to_string();
            if node_indices.contains_key(&id) {
                continue;
            }
            let idx = graph.add_node(id.clone());
            node_indices.insert(id, idx);
        }

        for conn in connections {
            let source = node_indices.get(&conn.source_id);
            let target = node_indices.get(&conn.target_id);
            match (source, target) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(s, t, ());
                }
                _ => dangling.push(conn.clone()),
            }
        }

        WorkflowGraph {
            graph,
            node_indices,
            dangling,
        }
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.node_indices.contains_key(node_id)
    }

    pub fn successors(&self, node_id: &str) -> Vec<&str> {
        self.neighbors(node_id, Direction::Outgoing)
    }

    pub fn predecessors(&self, node_id: &str) -> Vec<&str> {
        self.neighbors(node_id, Direction::Incoming)
    }

    fn neighbors(&self, node_id: &str, dir: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, dir)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.predecessors(node_id).len()
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.successors(node_id).len()
    }

    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// True when `to` can be reached from `from` by following connections.
    pub fn has_path(&self, from: &str, to: &str) -> bool {
        match (self.node_indices.get(from), self.node_indices.get(to)) {
            (Some(&f), Some(&t)) => has_path_connecting(&self.graph, f, t, None),
            _ => false,
        }
    }

    /// Ids of every node reachable from `start`, `start` included.
    pub fn reachable_from(&self, start: &str) -> HashSet<&str> {
        let mut reachable = HashSet::new();
        let Some(&idx) = self.node_indices.get(start) else {
            return reachable;
        };
        let mut bfs = Bfs::new(&self.graph, idx);
        while let Some(nx) = bfs.next(&self.graph) {
            reachable.insert(self.graph[nx].as_str());
        }
        reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::{NodeData, TerminalData};

    fn terminal(id: &str) -> WorkflowNode {
        WorkflowNode::new(id, NodeData::Start(TerminalData::default()))
    }

    #[test]
    fn dangling_connections_are_set_aside() {
        let snapshot = GraphSnapshot::new(
            vec![terminal("a"), terminal("b")],
            vec![NodeConnection::new("a", "b"), NodeConnection::new("a", "ghost")],
        );
        let graph = WorkflowGraph::build(&snapshot);
        assert_eq!(graph.outgoing_count("a"), 1);
        assert_eq!(graph.dangling, vec![NodeConnection::new("a", "ghost")]);
    }

    #[test]
    fn path_queries() {
        let snapshot = GraphSnapshot::new(
            vec![terminal("a"), terminal("b"), terminal("c")],
            vec![NodeConnection::new("a", "b"), NodeConnection::new("b", "c")],
        );
        let graph = WorkflowGraph::build(&snapshot);
        assert!(graph.has_path("a", "c"));
        assert!(!graph.has_path("c", "a"));
        assert_eq!(graph.reachable_from("b").len(), 2);
        assert!(!graph.is_cyclic());
    }
}
