//! CLI file operator mapper (`copy-file`, `rename-file`, `delete-file`, `code`).

use super::MapResult;
use super::io::{optional, required};
use super::types::{CliOperation, CliOperatorConfig};
use crate::error::MappingError;
use crate::parse::types::{NodeData, WorkflowNode};

pub fn map_cli_operator_config(
    node: &WorkflowNode,
    default_executed_by: &str,
) -> MapResult<CliOperatorConfig> {
    let node_id = node.id();
    let (operation, d) = match &node.data {
        NodeData::CopyFile(d) => (CliOperation::Copy, d),
        NodeData::RenameFile(d) => (CliOperation::Rename, d),
        NodeData::DeleteFile(d) => (CliOperation::Delete, d),
        NodeData::Code(d) => {
            let raw = required(node_id, "operation", &d.operation)?;
            let op = CliOperation::parse(&raw).ok_or_else(|| {
                MappingError::invalid(node_id, "operation", raw, "expected copy, move, rename or delete")
            })?;
            (op, d)
        }
        _ => return Ok(None),
    };

    let source_path = required(node_id, "source_path", &d.source_path)?;
    let destination_path = if operation.needs_destination() {
        Some(required(node_id, "destination_path", &d.destination_path)?)
    } else {
        None
    };

    Ok(Some(CliOperatorConfig {
        operation,
        source_path,
        destination_path,
        options: d.options.clone(),
        executed_by: optional(&d.executed_by).unwrap_or_else(|| default_executed_by.to_string()),
    }))
}
