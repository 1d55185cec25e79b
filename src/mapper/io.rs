//! Input/output mappers for file, inline, and database nodes.

use serde_json::{Value, json};

use super::MapResult;
use super::types::{InputConfig, OutputConfig};
use crate::error::MappingError;
use crate::parse::types::{
    DatabaseAccess, DatabaseData, InlineInputData, InlineOutputData, NodeData, OptionMap,
    ReadFileData, WorkflowNode, WriteFileData,
};

const KNOWN_FORMATS: [&str; 8] = ["csv", "json", "parquet", "avro", "orc", "text", "xml", "delta"];
const WRITE_MODES: [&str; 4] = ["overwrite", "append", "ignore", "error"];

/// Map a source node to the `input` half of a file conversion.
pub fn map_input_config(node: &WorkflowNode) -> MapResult<InputConfig> {
    match &node.data {
        NodeData::ReadFile(d) => read_file_input(node.id(), d).map(Some),
        NodeData::InlineInput(d) => inline_input(node.id(), d).map(Some),
        NodeData::Database(d) if d.access == DatabaseAccess::Read => {
            database_input(node.id(), d).map(Some)
        }
        _ => Ok(None),
    }
}

/// Map a sink node to the `output` half of a file conversion.
pub fn map_output_config(node: &WorkflowNode) -> MapResult<OutputConfig> {
    match &node.data {
        NodeData::WriteFile(d) => write_file_output(node.id(), d).map(Some),
        NodeData::InlineOutput(d) => inline_output(node.id(), d).map(Some),
        NodeData::Database(d) if d.access == DatabaseAccess::Write => {
            database_output(node.id(), d).map(Some)
        }
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

fn read_file_input(node_id: &str, d: &ReadFileData) -> Result<InputConfig, MappingError> {
    let path = required(node_id, "path", &d.path)?;
    let format = resolve_format(node_id, d.format.as_deref(), &path)?;
    let provider = resolve_provider(d.provider.as_deref(), &path);

    let mut options = d.options.clone();
    apply_input_defaults(&format, &mut options);

    Ok(InputConfig {
        provider,
        format,
        path,
        options,
        schema: non_empty(&d.schema),
        inline_data: None,
    })
}

fn write_file_output(node_id: &str, d: &WriteFileData) -> Result<OutputConfig, MappingError> {
    let path = required(node_id, "path", &d.path)?;
    let format = resolve_format(node_id, d.format.as_deref(), &path)?;
    let provider = resolve_provider(d.provider.as_deref(), &path);
    let mode = resolve_mode(node_id, d.mode.as_deref(), "overwrite")?;

    let mut options = d.options.clone();
    apply_output_defaults(&format, &mut options);

    Ok(OutputConfig {
        provider,
        format,
        path,
        mode,
        options,
    })
}

// ---------------------------------------------------------------------------
// Inline data
// ---------------------------------------------------------------------------

fn inline_path(node_id: &str, path: &Option<String>) -> String {
    optional(path).unwrap_or_else(|| format!("inline/{}.json", node_id))
}

fn inline_input(node_id: &str, d: &InlineInputData) -> Result<InputConfig, MappingError> {
    let format = match optional(&d.format) {
        Some(f) => check_format(node_id, &f)?,
        None => "json".to_string(),
    };
    let mut options = OptionMap::new();
    apply_input_defaults(&format, &mut options);

    Ok(InputConfig {
        provider: "inline".into(),
        format,
        path: inline_path(node_id, &d.path),
        options,
        schema: non_empty(&d.schema),
        inline_data: Some(d.rows.clone()),
    })
}

fn inline_output(node_id: &str, d: &InlineOutputData) -> Result<OutputConfig, MappingError> {
    let format = match optional(&d.format) {
        Some(f) => check_format(node_id, &f)?,
        None => "json".to_string(),
    };
    let mut options = d.options.clone();
    apply_output_defaults(&format, &mut options);

    Ok(OutputConfig {
        provider: optional(&d.provider).unwrap_or_else(|| "local".into()),
        format,
        path: inline_path(node_id, &d.path),
        mode: resolve_mode(node_id, d.mode.as_deref(), "overwrite")?,
        options,
    })
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

/// JDBC driver class for well-known URL schemes.
fn infer_driver(url: &str) -> Option<&'static str> {
    let rest = url.strip_prefix("jdbc:").unwrap_or(url);
    let scheme = rest.split(':').next().unwrap_or_default();
    match scheme {
        "postgresql" | "postgres" => Some("org.postgresql.Driver"),
        "mysql" => Some("com.mysql.cj.jdbc.Driver"),
        "sqlserver" => Some("com.microsoft.sqlserver.jdbc.SQLServerDriver"),
        "oracle" => Some("oracle.jdbc.OracleDriver"),
        _ => None,
    }
}

fn database_options(url: &str, d: &DatabaseData) -> OptionMap {
    let mut options = d.options.clone();
    options.insert("url".into(), json!(url));
    let driver = optional(&d.driver).or_else(|| infer_driver(url).map(str::to_string));
    if let Some(driver) = driver {
        options.insert("driver".into(), json!(driver));
    }
    if let Some(user) = optional(&d.username) {
        options.insert("user".into(), json!(user));
    }
    if let Some(secret) = optional(&d.secret_name) {
        options.insert("password_secret".into(), json!(secret));
    }
    options
}

/// `connection_url`, or the `url` option a previously mapped config carries.
fn connection_url(node_id: &str, d: &DatabaseData) -> Result<String, MappingError> {
    let from_options = d
        .options
        .get("url")
        .and_then(Value::as_str)
        .map(str::to_string);
    required(node_id, "connection_url", &d.connection_url.clone().or(from_options))
}

fn database_input(node_id: &str, d: &DatabaseData) -> Result<InputConfig, MappingError> {
    let url = connection_url(node_id, d)?;
    let table = optional(&d.table);
    let query = optional(&d.query);

    let mut options = database_options(&url, d);
    let path = match (table, query) {
        (_, Some(query)) => {
            options.insert("query".into(), json!(query));
            optional(&d.table).unwrap_or_else(|| "query".into())
        }
        (Some(table), None) => {
            options.insert("dbtable".into(), json!(table));
            table
        }
        (None, None) => return Err(MappingError::missing(node_id, "table")),
    };

    Ok(InputConfig {
        provider: "jdbc".into(),
        format: "jdbc".into(),
        path,
        options,
        schema: non_empty(&d.schema),
        inline_data: None,
    })
}

fn database_output(node_id: &str, d: &DatabaseData) -> Result<OutputConfig, MappingError> {
    let url = connection_url(node_id, d)?;
    let table = required(node_id, "table", &d.table)?;

    let mut options = database_options(&url, d);
    options.insert("dbtable".into(), json!(table));

    Ok(OutputConfig {
        provider: "jdbc".into(),
        format: "jdbc".into(),
        path: table,
        mode: resolve_mode(node_id, d.mode.as_deref(), "append")?,
        options,
    })
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

pub(crate) fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn required(
    node_id: &str,
    field: &str,
    value: &Option<String>,
) -> Result<String, MappingError> {
    optional(value).ok_or_else(|| MappingError::missing(node_id, field))
}

fn non_empty<T: Clone>(items: &[T]) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items.to_vec())
    }
}

/// Storage provider implied by a path's scheme.
pub fn infer_provider(path: &str) -> &'static str {
    let scheme = path.split_once("://").map(|(s, _)| s).unwrap_or_default();
    match scheme {
        "s3" | "s3a" => "s3",
        "gs" => "gcs",
        "abfss" | "wasbs" => "azure",
        "hdfs" => "hdfs",
        _ => "local",
    }
}

fn resolve_provider(provider: Option<&str>, path: &str) -> String {
    match provider.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => p.to_ascii_lowercase(),
        None => infer_provider(path).to_string(),
    }
}

fn check_format(node_id: &str, format: &str) -> Result<String, MappingError> {
    let normalized = format.trim().to_ascii_lowercase();
    if KNOWN_FORMATS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(MappingError::invalid(
            node_id,
            "format",
            format,
            "unsupported file format",
        ))
    }
}

/// Explicit format, or the path's extension when none was picked.
fn resolve_format(node_id: &str, format: Option<&str>, path: &str) -> Result<String, MappingError> {
    if let Some(f) = format.map(str::trim).filter(|f| !f.is_empty()) {
        return check_format(node_id, f);
    }
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => check_format(node_id, ext),
        _ => Err(MappingError::missing(node_id, "format")),
    }
}

fn resolve_mode(node_id: &str, mode: Option<&str>, default: &str) -> Result<String, MappingError> {
    match mode.map(str::trim).filter(|m| !m.is_empty()) {
        None => Ok(default.to_string()),
        Some(m) => {
            let normalized = m.to_ascii_lowercase();
            if WRITE_MODES.contains(&normalized.as_str()) {
                Ok(normalized)
            } else {
                Err(MappingError::invalid(node_id, "mode", m, "unknown write mode"))
            }
        }
    }
}

fn set_default(options: &mut OptionMap, key: &str, value: Value) {
    options.entry(key.to_string()).or_insert(value);
}

fn apply_input_defaults(format: &str, options: &mut OptionMap) {
    match format {
        "csv" => {
            set_default(options, "header", json!(true));
            set_default(options, "inferSchema", json!(false));
            set_default(options, "delimiter", json!(","));
        }
        "json" => set_default(options, "multiLine", json!(false)),
        _ => {}
    }
}

fn apply_output_defaults(format: &str, options: &mut OptionMap) {
    match format {
        "csv" => set_default(options, "header", json!(true)),
        "parquet" => set_default(options, "compression", json!("snappy")),
        _ => {}
    }
}
