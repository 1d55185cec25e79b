//! Config mappers: node data -> backend configuration records.
//!
//! Every mapper returns `Ok(None)` for a node kind it does not handle, so
//! callers can tell "not applicable" apart from "malformed".

pub mod cli;
pub mod io;
pub mod salesforce;
pub mod scheduler;
pub mod transform;
pub mod types;

pub use cli::map_cli_operator_config;
pub use io::{map_input_config, map_output_config};
pub use salesforce::{map_salesforce_read_config, map_salesforce_write_config};
pub use scheduler::map_scheduler_config;
pub use transform::map_transformations;
pub use types::*;

use crate::config::{CompileOptions, SparkConfig};
use crate::error::MappingError;
use crate::parse::types::WorkflowNode;

pub type MapResult<T> = Result<Option<T>, MappingError>;

/// Map a node that owns a standalone config (CLI, Salesforce, scheduler).
/// Sources, sinks, and filters only produce config as part of a file
/// conversion and map to `None` here.
pub fn map_node_config(
    node: &WorkflowNode,
    options: &CompileOptions,
    dag_id: &str,
) -> MapResult<ConfigItem> {
    if let Some(c) = map_cli_operator_config(node, &options.executed_by)? {
        return Ok(Some(ConfigItem::CliOperator(c)));
    }
    if let Some(c) = map_salesforce_read_config(node)? {
        return Ok(Some(ConfigItem::SalesforceRead(c)));
    }
    if let Some(c) = map_salesforce_write_config(node)? {
        return Ok(Some(ConfigItem::SalesforceWrite(c)));
    }
    if let Some(c) = map_scheduler_config(node, dag_id)? {
        return Ok(Some(ConfigItem::SchedulerTimer(c)));
    }
    Ok(None)
}

/// Assemble a file conversion from a source, a sink, and an optional filter.
/// `None` when either end is not a source/sink kind.
pub fn build_file_conversion_config(
    read: &WorkflowNode,
    write: &WorkflowNode,
    filter: Option<&WorkflowNode>,
    spark: &SparkConfig,
    dag_id: &str,
) -> MapResult<FileConversionConfig> {
    let Some(input) = map_input_config(read)? else {
        return Ok(None);
    };
    let Some(output) = map_output_config(write)? else {
        return Ok(None);
    };
    let clauses = map_transformations(filter)?;

    Ok(Some(FileConversionConfig {
        input,
        output,
        filter: clauses.filter,
        order_by: clauses.order_by,
        aggregation: clauses.aggregation,
        spark_config: spark.clone(),
        dag_id: dag_id.to_string(),
    }))
}
