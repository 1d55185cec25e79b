//! Rust types for the editor's graph snapshot.
//!
//! These types are the serde target for the workflow JSON the canvas hands us.
//! A node's `data` bag is parsed into one concrete record per `NodeKind`; every
//! record field is optional or defaulted so a half-edited node still parses.
//! Required fields are enforced later by the validator and the config mappers.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form format/writer options. Ordered so mapped configs serialize identically.
pub type OptionMap = BTreeMap<String, Value>;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Immutable input to every compilation-core function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub connections: Vec<NodeConnection>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<WorkflowNode>, connections: Vec<NodeConnection>) -> Self {
        GraphSnapshot { nodes, connections }
    }

    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConnection {
    pub source_id: String,
    pub target_id: String,
}

impl NodeConnection {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        NodeConnection {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }
}

/// Canvas position. Carried through untouched; compilation ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Idle,
    Running,
    Success,
    Error,
}

// =============================================================================
// NODE KIND
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Start,
    End,
    ReadFile,
    WriteFile,
    CopyFile,
    RenameFile,
    DeleteFile,
    InlineInput,
    InlineOutput,
    Database,
    SalesforceCloud,
    WriteSalesforce,
    Filter,
    Scheduler,
    Code,
}

impl NodeKind {
    pub const ALL: [NodeKind; 15] = [
        NodeKind::Start,
        NodeKind::End,
        NodeKind::ReadFile,
        NodeKind::WriteFile,
        NodeKind::CopyFile,
        NodeKind::RenameFile,
        NodeKind::DeleteFile,
        NodeKind::InlineInput,
        NodeKind::InlineOutput,
        NodeKind::Database,
        NodeKind::SalesforceCloud,
        NodeKind::WriteSalesforce,
        NodeKind::Filter,
        NodeKind::Scheduler,
        NodeKind::Code,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::ReadFile => "read-file",
            NodeKind::WriteFile => "write-file",
            NodeKind::CopyFile => "copy-file",
            NodeKind::RenameFile => "rename-file",
            NodeKind::DeleteFile => "delete-file",
            NodeKind::InlineInput => "inline-input",
            NodeKind::InlineOutput => "inline-output",
            NodeKind::Database => "database",
            NodeKind::SalesforceCloud => "salesforce-cloud",
            NodeKind::WriteSalesforce => "write-salesforce",
            NodeKind::Filter => "filter",
            NodeKind::Scheduler => "scheduler",
            NodeKind::Code => "code",
        }
    }

    /// Label shown when the user never named the node.
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::End => "End",
            NodeKind::ReadFile => "Read File",
            NodeKind::WriteFile => "Write File",
            NodeKind::CopyFile => "Copy File",
            NodeKind::RenameFile => "Rename File",
            NodeKind::DeleteFile => "Delete File",
            NodeKind::InlineInput => "Inline Input",
            NodeKind::InlineOutput => "Inline Output",
            NodeKind::Database => "Database",
            NodeKind::SalesforceCloud => "Salesforce Read",
            NodeKind::WriteSalesforce => "Salesforce Write",
            NodeKind::Filter => "Filter",
            NodeKind::Scheduler => "Scheduler",
            NodeKind::Code => "Code",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::Start | NodeKind::End)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown node type '{}'", s))
    }
}

// =============================================================================
// WORKFLOW NODE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct WorkflowNode {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
    pub status: NodeStatus,
    /// Last execution result, as reported by the orchestration engine.
    pub output: Option<Value>,
    /// Last failure message, as reported by the orchestration engine.
    pub error: Option<String>,
    /// Id of the persisted backend config for this node, assigned by the caller.
    pub config_id: Option<String>,
    /// Data keys the user has edited by hand. Auto-fill never touches these.
    pub edited_fields: BTreeSet<String>,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>, data: NodeData) -> Self {
        WorkflowNode {
            id: id.into(),
            position: Position::default(),
            data,
            status: NodeStatus::Idle,
            output: None,
            error: None,
            config_id: None,
            edited_fields: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn label(&self) -> &str {
        self.data.label().unwrap_or(self.kind().display_name())
    }
}

/// Wire shape of a node: `data` stays untyped until `type` is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub edited_fields: BTreeSet<String>,
}

impl TryFrom<RawNode> for WorkflowNode {
    type Error = String;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let kind = NodeKind::from_str(&raw.kind)?;
        let data = NodeData::from_value(kind, raw.data)
            .map_err(|e| format!("invalid data for {} node '{}': {}", kind, raw.id, e))?;
        Ok(WorkflowNode {
            id: raw.id,
            position: raw.position,
            data,
            status: raw.status,
            output: raw.output,
            error: raw.error,
            config_id: raw.config_id,
            edited_fields: raw.edited_fields,
        })
    }
}

impl From<WorkflowNode> for RawNode {
    fn from(node: WorkflowNode) -> Self {
        RawNode {
            kind: node.kind().as_str().to_string(),
            data: node.data.to_value(),
            id: node.id,
            position: node.position,
            status: node.status,
            output: node.output,
            error: node.error,
            config_id: node.config_id,
            edited_fields: node.edited_fields,
        }
    }
}

// =============================================================================
// NODE DATA: one record per node kind
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Start(TerminalData),
    End(TerminalData),
    ReadFile(ReadFileData),
    WriteFile(WriteFileData),
    CopyFile(FileOperationData),
    RenameFile(FileOperationData),
    DeleteFile(FileOperationData),
    InlineInput(InlineInputData),
    InlineOutput(InlineOutputData),
    Database(DatabaseData),
    SalesforceCloud(SalesforceReadData),
    WriteSalesforce(SalesforceWriteData),
    Filter(FilterData),
    Scheduler(SchedulerData),
    Code(FileOperationData),
}

impl NodeData {
    /// Parse an untyped data bag as the record for `kind`. `null` reads as `{}`.
    pub fn from_value(kind: NodeKind, value: Value) -> Result<Self, serde_json::Error> {
        let value = match value {
            Value::Null => Value::Object(serde_json::Map::new()),
            v => v,
        };
        Ok(match kind {
            NodeKind::Start => NodeData::Start(serde_json::from_value(value)?),
            NodeKind::End => NodeData::End(serde_json::from_value(value)?),
            NodeKind::ReadFile => NodeData::ReadFile(serde_json::from_value(value)?),
            NodeKind::WriteFile => NodeData::WriteFile(serde_json::from_value(value)?),
            NodeKind::CopyFile => NodeData::CopyFile(serde_json::from_value(value)?),
            NodeKind::RenameFile => NodeData::RenameFile(serde_json::from_value(value)?),
            NodeKind::DeleteFile => NodeData::DeleteFile(serde_json::from_value(value)?),
            NodeKind::InlineInput => NodeData::InlineInput(serde_json::from_value(value)?),
            NodeKind::InlineOutput => NodeData::InlineOutput(serde_json::from_value(value)?),
            NodeKind::Database => NodeData::Database(serde_json::from_value(value)?),
            NodeKind::SalesforceCloud => NodeData::SalesforceCloud(serde_json::from_value(value)?),
            NodeKind::WriteSalesforce => NodeData::WriteSalesforce(serde_json::from_value(value)?),
            NodeKind::Filter => NodeData::Filter(serde_json::from_value(value)?),
            NodeKind::Scheduler => NodeData::Scheduler(serde_json::from_value(value)?),
            NodeKind::Code => NodeData::Code(serde_json::from_value(value)?),
        })
    }

    /// The data bag as the editor sees it.
    pub fn to_value(&self) -> Value {
        let value = match self {
            NodeData::Start(d) | NodeData::End(d) => serde_json::to_value(d),
            NodeData::ReadFile(d) => serde_json::to_value(d),
            NodeData::WriteFile(d) => serde_json::to_value(d),
            NodeData::CopyFile(d)
            | NodeData::RenameFile(d)
            | NodeData::DeleteFile(d)
            | NodeData::Code(d) => serde_json::to_value(d),
            NodeData::InlineInput(d) => serde_json::to_value(d),
            NodeData::InlineOutput(d) => serde_json::to_value(d),
            NodeData::Database(d) => serde_json::to_value(d),
            NodeData::SalesforceCloud(d) => serde_json::to_value(d),
            NodeData::WriteSalesforce(d) => serde_json::to_value(d),
            NodeData::Filter(d) => serde_json::to_value(d),
            NodeData::Scheduler(d) => serde_json::to_value(d),
        };
        value.unwrap_or_default()
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Start(_) => NodeKind::Start,
            NodeData::End(_) => NodeKind::End,
            NodeData::ReadFile(_) => NodeKind::ReadFile,
            NodeData::WriteFile(_) => NodeKind::WriteFile,
            NodeData::CopyFile(_) => NodeKind::CopyFile,
            NodeData::RenameFile(_) => NodeKind::RenameFile,
            NodeData::DeleteFile(_) => NodeKind::DeleteFile,
            NodeData::InlineInput(_) => NodeKind::InlineInput,
            NodeData::InlineOutput(_) => NodeKind::InlineOutput,
            NodeData::Database(_) => NodeKind::Database,
            NodeData::SalesforceCloud(_) => NodeKind::SalesforceCloud,
            NodeData::WriteSalesforce(_) => NodeKind::WriteSalesforce,
            NodeData::Filter(_) => NodeKind::Filter,
            NodeData::Scheduler(_) => NodeKind::Scheduler,
            NodeData::Code(_) => NodeKind::Code,
        }
    }

    pub fn label(&self) -> Option<&str> {
        let label = match self {
            NodeData::Start(d) | NodeData::End(d) => &d.label,
            NodeData::ReadFile(d) => &d.label,
            NodeData::WriteFile(d) => &d.label,
            NodeData::CopyFile(d)
            | NodeData::RenameFile(d)
            | NodeData::DeleteFile(d)
            | NodeData::Code(d) => &d.label,
            NodeData::InlineInput(d) => &d.label,
            NodeData::InlineOutput(d) => &d.label,
            NodeData::Database(d) => &d.label,
            NodeData::SalesforceCloud(d) => &d.label,
            NodeData::WriteSalesforce(d) => &d.label,
            NodeData::Filter(d) => &d.label,
            NodeData::Scheduler(d) => &d.label,
        };
        label.as_deref().filter(|l| !l.trim().is_empty())
    }

    /// Path of the file this node leaves behind, if it produces one.
    pub fn output_path(&self) -> Option<&str> {
        let path = match self {
            NodeData::ReadFile(d) => d.path.as_deref(),
            NodeData::WriteFile(d) => d.path.as_deref(),
            NodeData::InlineOutput(d) => d.path.as_deref(),
            NodeData::SalesforceCloud(d) => d.file_path.as_deref(),
            NodeData::CopyFile(d) | NodeData::RenameFile(d) | NodeData::Code(d) => {
                d.destination_path.as_deref()
            }
            _ => None,
        };
        path.filter(|p| !p.trim().is_empty())
    }

    /// Columns the user declared on a source node.
    pub fn declared_columns(&self) -> &[FieldSpec] {
        match self {
            NodeData::ReadFile(d) => d.schema.as_slice(),
            NodeData::InlineInput(d) => d.schema.as_slice(),
            NodeData::Database(d) if d.access == DatabaseAccess::Read => d.schema.as_slice(),
            _ => &[],
        }
    }
}

// =============================================================================
// DATA RECORDS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Keys this record does not model, kept so edits round-trip them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A column declaration attached to a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default = "default_true")]
    pub nullable: bool,
}

fn default_field_type() -> String {
    "string".into()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadFileData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "OptionMap::is_empty")]
    pub options: OptionMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<FieldSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteFileData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "OptionMap::is_empty")]
    pub options: OptionMap,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shared by the CLI file operators (`copy-file`, `rename-file`, `delete-file`)
/// and the generic `code` node. Only `code` reads `operation`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOperationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_path: Option<String>,
    #[serde(skip_serializing_if = "OptionMap::is_empty")]
    pub options: OptionMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_by: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineInputData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<FieldSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineOutputData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "OptionMap::is_empty")]
    pub options: OptionMap,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseAccess {
    #[default]
    Read,
    Write,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub access: DatabaseAccess,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_url: Option<String>,
    /// Mapped configs carry the table as `path`.
    #[serde(skip_serializing_if = "Option::is_none", alias = "path")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Name of the secret holding the password. Passwords never live in node data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "OptionMap::is_empty")]
    pub options: OptionMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<FieldSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesforceReadData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soql_query: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_bulk_api: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_batch_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesforceWriteData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id_field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_bulk_api: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_batch_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ASC")]
    Asc,
    #[serde(rename = "desc", alias = "DESC")]
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCondition {
    pub field: String,
    pub operator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderByClause {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationClause {
    pub field: String,
    pub function: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aggregations: Vec<AggregationClause>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<LogicalOperator>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<FilterCondition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderByClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dag_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_strings_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_str(kind.as_str()), Ok(kind));
            let encoded = serde_json::to_value(kind).unwrap();
            assert_eq!(encoded, json!(kind.as_str()));
        }
    }

    #[test]
    fn null_data_reads_as_empty_record() {
        let data = NodeData::from_value(NodeKind::WriteFile, Value::Null).unwrap();
        assert_eq!(data, NodeData::WriteFile(WriteFileData::default()));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let raw = json!({ "id": "n1", "type": "teleport", "data": {} });
        let err = serde_json::from_value::<WorkflowNode>(raw).unwrap_err();
        assert!(err.to_string().contains("unknown node type 'teleport'"));
    }

    #[test]
    fn label_falls_back_to_display_name() {
        let node = WorkflowNode::new("r1", NodeData::ReadFile(ReadFileData::default()));
        assert_eq!(node.label(), "Read File");
    }

    #[test]
    fn declared_columns_ignore_database_sinks() {
        let data = NodeData::Database(DatabaseData {
            access: DatabaseAccess::Write,
            schema: vec![FieldSpec {
                name: "id".into(),
                field_type: "integer".into(),
                nullable: false,
            }],
            ..Default::default()
        });
        assert!(data.declared_columns().is_empty());
    }
}
