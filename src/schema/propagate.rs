//! Upstream field propagation.
//!
//! For a target node, collects the output fields of every node connected
//! into it, tagged with where each field came from. Propagation is advisory:
//! unknown ids and dangling connections simply contribute nothing.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::output_schema;
use crate::parse::types::{GraphSnapshot, NodeData, NodeKind, WorkflowNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSource {
    pub source_node_id: String,
    pub source_node_type: NodeKind,
    pub source_node_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableField {
    pub name: String,
    pub field_type: String,
    pub source: FieldSource,
}

/// Fields available to `node_id` from its direct upstream neighbours, in
/// connection order. Declared source columns follow the kind's static fields.
pub fn available_inputs(snapshot: &GraphSnapshot, node_id: &str) -> Vec<AvailableField> {
    let mut fields = Vec::new();
    let mut seen = HashSet::new();

    for conn in snapshot.connections.iter().filter(|c| c.target_id == node_id) {
        let Some(source) = snapshot.node(&conn.source_id) else {
            continue;
        };
        let provenance = FieldSource {
            source_node_id: source.id().to_string(),
            source_node_type: source.kind(),
            source_node_label: source.label().to_string(),
        };

        let static_fields = output_schema(source.kind())
            .iter()
            .map(|f| (f.name.to_string(), f.field_type.as_str().to_string()));
        let declared = source
            .data
            .declared_columns()
            .iter()
            .map(|c| (c.name.clone(), c.field_type.clone()));

        for (name, field_type) in static_fields.chain(declared) {
            if !seen.insert((source.id().to_string(), name.clone())) {
                continue;
            }
            fields.push(AvailableField {
                name,
                field_type,
                source: provenance.clone(),
            });
        }
    }

    fields
}

/// `available_inputs` for every node in the snapshot.
pub fn propagate_all(snapshot: &GraphSnapshot) -> BTreeMap<String, Vec<AvailableField>> {
    snapshot
        .nodes
        .iter()
        .map(|n| (n.id().to_string(), available_inputs(snapshot, n.id())))
        .collect()
}

/// The data field a kind inherits from its upstream node's output path.
fn auto_fill_field(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::WriteSalesforce => Some("file_path"),
        NodeKind::CopyFile | NodeKind::RenameFile | NodeKind::DeleteFile | NodeKind::Code => {
            Some("source_path")
        }
        _ => None,
    }
}

/// Copy `source`'s output path into `target` when a connection is made.
///
/// First write wins: the field is only filled while it is empty, and never
/// once the user has edited it by hand. Returns the field that was filled.
pub fn auto_fill(source: &WorkflowNode, target: &mut WorkflowNode) -> Option<&'static str> {
    let field = auto_fill_field(target.kind())?;
    if target.edited_fields.contains(field) {
        return None;
    }
    let path = source.data.output_path()?;

    let slot = match &mut target.data {
        NodeData::WriteSalesforce(d) => &mut d.file_path,
        NodeData::CopyFile(d) | NodeData::RenameFile(d) | NodeData::DeleteFile(d) | NodeData::Code(d) => {
            &mut d.source_path
        }
        _ => return None,
    };
    if slot.as_deref().is_some_and(|v| !v.trim().is_empty()) {
        return None;
    }
    *slot = Some(path.to_string());
    Some(field)
}
