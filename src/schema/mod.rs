//! Static input/output schemas per node kind.
//!
//! Input schemas name the `data` fields a kind consumes; `required` fields
//! must be present before the node can be compiled. Output schemas name the
//! fields a kind produces for its downstream neighbours.

pub mod propagate;

pub use propagate::{AvailableField, FieldSource, auto_fill, available_inputs, propagate_all};

use serde::Serialize;
use serde_json::Value;

use crate::parse::types::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Object,
    Array,
    Path,
    Datetime,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Path => "path",
            FieldType::Datetime => "datetime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

const fn req(name: &'static str, field_type: FieldType) -> SchemaField {
    SchemaField {
        name,
        field_type,
        required: true,
    }
}

const fn opt(name: &'static str, field_type: FieldType) -> SchemaField {
    SchemaField {
        name,
        field_type,
        required: false,
    }
}

// =============================================================================
// INPUT SCHEMAS
// =============================================================================

const READ_FILE_IN: &[SchemaField] = &[
    req("path", FieldType::Path),
    opt("format", FieldType::String),
    opt("provider", FieldType::String),
    opt("options", FieldType::Object),
    opt("schema", FieldType::Array),
];

const WRITE_FILE_IN: &[SchemaField] = &[
    req("path", FieldType::Path),
    opt("format", FieldType::String),
    opt("provider", FieldType::String),
    opt("mode", FieldType::String),
    opt("options", FieldType::Object),
];

const MOVE_FILE_IN: &[SchemaField] = &[
    req("source_path", FieldType::Path),
    req("destination_path", FieldType::Path),
    opt("options", FieldType::Object),
    opt("executed_by", FieldType::String),
];

const DELETE_FILE_IN: &[SchemaField] = &[
    req("source_path", FieldType::Path),
    opt("options", FieldType::Object),
    opt("executed_by", FieldType::String),
];

const INLINE_INPUT_IN: &[SchemaField] = &[
    opt("rows", FieldType::Array),
    opt("format", FieldType::String),
    opt("path", FieldType::Path),
    opt("schema", FieldType::Array),
];

const INLINE_OUTPUT_IN: &[SchemaField] = &[
    opt("path", FieldType::Path),
    opt("format", FieldType::String),
    opt("provider", FieldType::String),
    opt("mode", FieldType::String),
];

const DATABASE_IN: &[SchemaField] = &[
    req("connection_url", FieldType::String),
    opt("access", FieldType::String),
    opt("table", FieldType::String),
    opt("query", FieldType::String),
    opt("driver", FieldType::String),
    opt("username", FieldType::String),
    opt("secret_name", FieldType::String),
    opt("mode", FieldType::String),
];

const SALESFORCE_READ_IN: &[SchemaField] = &[
    req("object_name", FieldType::String),
    opt("soql_query", FieldType::String),
    opt("fields", FieldType::Array),
    opt("use_bulk_api", FieldType::Boolean),
    opt("bulk_batch_size", FieldType::Integer),
    opt("file_path", FieldType::Path),
];

const SALESFORCE_WRITE_IN: &[SchemaField] = &[
    req("object_name", FieldType::String),
    req("file_path", FieldType::Path),
    opt("operation", FieldType::String),
    opt("external_id_field", FieldType::String),
    opt("fields", FieldType::Array),
    opt("use_bulk_api", FieldType::Boolean),
    opt("bulk_batch_size", FieldType::Integer),
];

const FILTER_IN: &[SchemaField] = &[
    opt("operator", FieldType::String),
    opt("conditions", FieldType::Array),
    opt("order_by", FieldType::Array),
    opt("aggregation", FieldType::Object),
];

const SCHEDULER_IN: &[SchemaField] = &[
    req("start_time", FieldType::Datetime),
    opt("target_dag_id", FieldType::String),
    opt("interval", FieldType::Integer),
    opt("unit", FieldType::String),
    opt("occurrence_limit", FieldType::Integer),
    opt("active", FieldType::Boolean),
];

const CODE_IN: &[SchemaField] = &[
    req("operation", FieldType::String),
    req("source_path", FieldType::Path),
    opt("destination_path", FieldType::Path),
    opt("options", FieldType::Object),
    opt("executed_by", FieldType::String),
];

pub fn input_schema(kind: NodeKind) -> &'static [SchemaField] {
    match kind {
        NodeKind::Start | NodeKind::End => &[],
        NodeKind::ReadFile => READ_FILE_IN,
        NodeKind::WriteFile => WRITE_FILE_IN,
        NodeKind::CopyFile | NodeKind::RenameFile => MOVE_FILE_IN,
        NodeKind::DeleteFile => DELETE_FILE_IN,
        NodeKind::InlineInput => INLINE_INPUT_IN,
        NodeKind::InlineOutput => INLINE_OUTPUT_IN,
        NodeKind::Database => DATABASE_IN,
        NodeKind::SalesforceCloud => SALESFORCE_READ_IN,
        NodeKind::WriteSalesforce => SALESFORCE_WRITE_IN,
        NodeKind::Filter => FILTER_IN,
        NodeKind::Scheduler => SCHEDULER_IN,
        NodeKind::Code => CODE_IN,
    }
}

// =============================================================================
// OUTPUT SCHEMAS
// =============================================================================

const FILE_SOURCE_OUT: &[SchemaField] = &[
    opt("file_path", FieldType::Path),
    opt("format", FieldType::String),
    opt("records", FieldType::Array),
];

const FILE_SINK_OUT: &[SchemaField] = &[
    opt("file_path", FieldType::Path),
    opt("format", FieldType::String),
    opt("rows_written", FieldType::Integer),
];

const FILE_OPERATION_OUT: &[SchemaField] = &[
    opt("destination_path", FieldType::Path),
    opt("exit_code", FieldType::Integer),
];

const DELETE_FILE_OUT: &[SchemaField] = &[
    opt("deleted_path", FieldType::Path),
    opt("exit_code", FieldType::Integer),
];

const RECORDS_OUT: &[SchemaField] = &[opt("records", FieldType::Array)];

const DATABASE_OUT: &[SchemaField] = &[
    opt("table", FieldType::String),
    opt("records", FieldType::Array),
    opt("rows_written", FieldType::Integer),
];

const SALESFORCE_READ_OUT: &[SchemaField] = &[
    opt("file_path", FieldType::Path),
    opt("records", FieldType::Array),
    opt("record_count", FieldType::Integer),
];

const SALESFORCE_WRITE_OUT: &[SchemaField] = &[
    opt("job_id", FieldType::String),
    opt("records_processed", FieldType::Integer),
    opt("records_failed", FieldType::Integer),
];

const SCHEDULER_OUT: &[SchemaField] = &[
    opt("dag_id", FieldType::String),
    opt("next_run_time", FieldType::Datetime),
];

const CODE_OUT: &[SchemaField] = &[
    opt("destination_path", FieldType::Path),
    opt("exit_code", FieldType::Integer),
    opt("stdout", FieldType::String),
];

pub fn output_schema(kind: NodeKind) -> &'static [SchemaField] {
    match kind {
        NodeKind::Start | NodeKind::End => &[],
        NodeKind::ReadFile => FILE_SOURCE_OUT,
        NodeKind::WriteFile | NodeKind::InlineOutput => FILE_SINK_OUT,
        NodeKind::CopyFile | NodeKind::RenameFile => FILE_OPERATION_OUT,
        NodeKind::DeleteFile => DELETE_FILE_OUT,
        NodeKind::InlineInput | NodeKind::Filter => RECORDS_OUT,
        NodeKind::Database => DATABASE_OUT,
        NodeKind::SalesforceCloud => SALESFORCE_READ_OUT,
        NodeKind::WriteSalesforce => SALESFORCE_WRITE_OUT,
        NodeKind::Scheduler => SCHEDULER_OUT,
        NodeKind::Code => CODE_OUT,
    }
}

/// Names of required input fields that `data` leaves empty.
pub fn missing_required(kind: NodeKind, data: &Value) -> Vec<&'static str> {
    input_schema(kind)
        .iter()
        .filter(|f| f.required && !is_present(data.get(f.name)))
        .map(|f| f.name)
        .collect()
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}
