//! Per-node configuration rules (V009).
//!
//! The static input schema covers most of it; a few kinds have fields whose
//! required-ness depends on another field and are checked by hand.

use crate::error::CompilerError;
use crate::parse::types::{DatabaseAccess, NodeData, WorkflowNode};
use crate::schema;

pub fn validate_node_config(node: &WorkflowNode) -> Vec<CompilerError> {
    let mut missing: Vec<&str> = schema::missing_required(node.kind(), &node.data.to_value());

    match &node.data {
        NodeData::Database(d) => {
            let blank_table = is_blank(&d.table);
            if d.access == DatabaseAccess::Write && blank_table {
                missing.push("table");
            }
            if d.access == DatabaseAccess::Read && blank_table && is_blank(&d.query) {
                missing.push("table or query");
            }
        }
        NodeData::SalesforceCloud(d) => {
            if is_blank(&d.soql_query) && d.fields.iter().all(|f| f.trim().is_empty()) {
                missing.push("soql_query or fields");
            }
        }
        NodeData::WriteSalesforce(d) => {
            let upsert = d
                .operation
                .as_deref()
                .is_some_and(|op| op.trim().eq_ignore_ascii_case("upsert"));
            if upsert && is_blank(&d.external_id_field) {
                missing.push("external_id_field");
            }
        }
        NodeData::Code(d) => {
            let delete = d
                .operation
                .as_deref()
                .is_some_and(|op| op.trim().eq_ignore_ascii_case("delete"));
            if !delete && is_blank(&d.destination_path) {
                missing.push("destination_path");
            }
        }
        _ => {}
    }

    missing
        .into_iter()
        .map(|field| {
            CompilerError::validate(
                "V009",
                format!(
                    "{} node '{}' is missing required field '{}'",
                    node.kind().display_name(),
                    node.label(),
                    field
                ),
                Some(node.id().to_string()),
            )
        })
        .collect()
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}
