//! Backend wire records, one per config kind.
//!
//! The orchestration engine accepts these shapes verbatim, so field names
//! and optional-key omission are part of the contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SparkConfig;
use crate::parse::types::{
    AggregationClause, FieldSpec, FilterCondition, LogicalOperator, OptionMap, OrderByClause,
};

// =============================================================================
// FILE CONVERSION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub provider: String,
    pub format: String,
    pub path: String,
    pub options: OptionMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Vec<FieldSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub provider: String,
    pub format: String,
    pub path: String,
    pub mode: String,
    pub options: OptionMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    pub operator: LogicalOperator,
    pub conditions: Vec<FilterCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationSpec {
    pub group_by: Vec<String>,
    pub aggregations: Vec<AggregationClause>,
}

/// Optional clauses taken from a filter node. An absent clause is omitted
/// from the wire, never sent as an empty object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationClauses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderByClause>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationSpec>,
}

impl TransformationClauses {
    pub fn is_empty(&self) -> bool {
        self.filter.is_none() && self.order_by.is_none() && self.aggregation.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConversionConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderByClause>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationSpec>,
    pub spark_config: SparkConfig,
    pub dag_id: String,
}

// =============================================================================
// CLI OPERATORS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliOperation {
    Copy,
    Move,
    Rename,
    Delete,
}

impl CliOperation {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copy" => Some(CliOperation::Copy),
            "move" => Some(CliOperation::Move),
            "rename" => Some(CliOperation::Rename),
            "delete" => Some(CliOperation::Delete),
            _ => None,
        }
    }

    pub fn needs_destination(&self) -> bool {
        !matches!(self, CliOperation::Delete)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliOperatorConfig {
    pub operation: CliOperation,
    pub source_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_path: Option<String>,
    pub options: OptionMap,
    pub executed_by: String,
}

// =============================================================================
// SALESFORCE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesforceReadConfig {
    pub object_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    pub use_bulk_api: bool,
    pub bulk_batch_size: u32,
    pub file_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesforceOperation {
    Insert,
    Update,
    Upsert,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesforceWriteConfig {
    pub object_name: String,
    pub operation: SalesforceOperation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id_field: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    pub use_bulk_api: bool,
    pub bulk_batch_size: u32,
    pub file_path: String,
}

// =============================================================================
// SCHEDULER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerTimerConfig {
    pub dag_id: String,
    pub start_time: String,
    pub interval: u32,
    pub unit: TimerUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_limit: Option<u32>,
    pub active: bool,
}

// =============================================================================
// CONFIG ITEM
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKind {
    FileConversion,
    CliOperator,
    SalesforceRead,
    SalesforceWrite,
    SchedulerTimer,
}

impl ConfigKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKind::FileConversion => "file_conversion",
            ConfigKind::CliOperator => "cli_operator",
            ConfigKind::SalesforceRead => "salesforce_read",
            ConfigKind::SalesforceWrite => "salesforce_write",
            ConfigKind::SchedulerTimer => "scheduler_timer",
        }
    }
}

/// One backend configuration. Serializes as the bare record; the kind
/// travels separately in the `ConfigKey`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigItem {
    FileConversion(FileConversionConfig),
    CliOperator(CliOperatorConfig),
    SalesforceRead(SalesforceReadConfig),
    SalesforceWrite(SalesforceWriteConfig),
    SchedulerTimer(SchedulerTimerConfig),
}

impl ConfigItem {
    pub fn kind(&self) -> ConfigKind {
        match self {
            ConfigItem::FileConversion(_) => ConfigKind::FileConversion,
            ConfigItem::CliOperator(_) => ConfigKind::CliOperator,
            ConfigItem::SalesforceRead(_) => ConfigKind::SalesforceRead,
            ConfigItem::SalesforceWrite(_) => ConfigKind::SalesforceWrite,
            ConfigItem::SchedulerTimer(_) => ConfigKind::SchedulerTimer,
        }
    }
}

/// How the external transport addresses a persisted config.
/// `config_id` is `None` for a config that has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigKey {
    pub client_id: String,
    pub config_kind: ConfigKind,
    pub config_id: Option<String>,
}

/// A mapped config together with the node it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeConfig {
    pub node_id: String,
    pub config_id: Option<String>,
    pub config_kind: ConfigKind,
    pub config: ConfigItem,
}

impl NodeConfig {
    pub fn new(node_id: impl Into<String>, config_id: Option<String>, config: ConfigItem) -> Self {
        NodeConfig {
            node_id: node_id.into(),
            config_id,
            config_kind: config.kind(),
            config,
        }
    }

    pub fn key(&self, client_id: impl Into<String>) -> ConfigKey {
        ConfigKey {
            client_id: client_id.into(),
            config_kind: self.config_kind,
            config_id: self.config_id.clone(),
        }
    }
}
