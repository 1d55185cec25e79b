//! Salesforce read/write mappers.

use super::MapResult;
use super::io::{optional, required};
use super::types::{SalesforceOperation, SalesforceReadConfig, SalesforceWriteConfig};
use crate::error::MappingError;
use crate::parse::types::{NodeData, WorkflowNode};

pub const MIN_BATCH_SIZE: i64 = 1;
pub const MAX_BATCH_SIZE: i64 = 10_000;
pub const DEFAULT_BATCH_SIZE: u32 = 2_000;

pub fn map_salesforce_read_config(node: &WorkflowNode) -> MapResult<SalesforceReadConfig> {
    let NodeData::SalesforceCloud(d) = &node.data else {
        return Ok(None);
    };
    let node_id = node.id();

    let object_name = required(node_id, "object_name", &d.object_name)?;
    let query = optional(&d.soql_query);
    let fields = clean_fields(&d.fields);
    if query.is_none() && fields.is_empty() {
        return Err(MappingError::missing(node_id, "soql_query"));
    }

    Ok(Some(SalesforceReadConfig {
        file_path: optional(&d.file_path)
            .unwrap_or_else(|| format!("salesforce/{}.csv", object_name)),
        object_name,
        query,
        fields,
        use_bulk_api: d.use_bulk_api.unwrap_or(false),
        bulk_batch_size: batch_size(node_id, d.bulk_batch_size)?,
    }))
}

pub fn map_salesforce_write_config(node: &WorkflowNode) -> MapResult<SalesforceWriteConfig> {
    let NodeData::WriteSalesforce(d) = &node.data else {
        return Ok(None);
    };
    let node_id = node.id();

    let object_name = required(node_id, "object_name", &d.object_name)?;
    let file_path = required(node_id, "file_path", &d.file_path)?;
    let operation = match optional(&d.operation) {
        None => SalesforceOperation::Insert,
        Some(op) => parse_operation(&op)
            .ok_or_else(|| MappingError::invalid(node_id, "operation", op, "unknown write operation"))?,
    };
    let external_id_field = optional(&d.external_id_field);
    if operation == SalesforceOperation::Upsert && external_id_field.is_none() {
        return Err(MappingError::missing(node_id, "external_id_field"));
    }

    Ok(Some(SalesforceWriteConfig {
        object_name,
        operation,
        external_id_field,
        fields: clean_fields(&d.fields),
        use_bulk_api: d.use_bulk_api.unwrap_or(true),
        bulk_batch_size: batch_size(node_id, d.bulk_batch_size)?,
        file_path,
    }))
}

fn parse_operation(op: &str) -> Option<SalesforceOperation> {
    match op.to_ascii_lowercase().as_str() {
        "insert" => Some(SalesforceOperation::Insert),
        "update" => Some(SalesforceOperation::Update),
        "upsert" => Some(SalesforceOperation::Upsert),
        "delete" => Some(SalesforceOperation::Delete),
        _ => None,
    }
}

fn clean_fields(fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Bulk batch size, defaulted and bounds-checked. Checked even when the
/// bulk API is off.
fn batch_size(node_id: &str, value: Option<i64>) -> Result<u32, MappingError> {
    let Some(value) = value else {
        return Ok(DEFAULT_BATCH_SIZE);
    };
    if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&value) {
        return Err(MappingError::OutOfBounds {
            node_id: node_id.to_string(),
            field: "bulk_batch_size".into(),
            min: MIN_BATCH_SIZE,
            max: MAX_BATCH_SIZE,
            value,
        });
    }
    Ok(value as u32)
}
