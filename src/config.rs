//! Compile-time options.
//!
//! Everything here has a default so an empty JSON object is a valid
//! configuration. The CLI reads these from `--options`, the browser passes
//! them through `compile_workflow`.

use serde::{Deserialize, Serialize};

use crate::error::CompilerError;
use crate::parse::types::OptionMap;

/// Execution-resource hints forwarded with every file conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkConfig {
    pub driver_memory: String,
    pub executor_memory: String,
    pub executor_cores: u32,
    pub num_executors: u32,
    #[serde(skip_serializing_if = "OptionMap::is_empty")]
    pub extra: OptionMap,
}

impl Default for SparkConfig {
    fn default() -> Self {
        SparkConfig {
            driver_memory: "1g".into(),
            executor_memory: "1g".into(),
            executor_cores: 1,
            num_executors: 1,
            extra: OptionMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Explicit DAG id. Derived from `name` when absent.
    pub dag_id: Option<String>,
    pub name: String,
    pub schedule: Option<String>,
    pub active: bool,
    /// Default runner recorded on CLI operator configs.
    pub executed_by: String,
    pub spark: SparkConfig,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            dag_id: None,
            name: "workflow".into(),
            schedule: None,
            active: true,
            executed_by: "cli".into(),
            spark: SparkConfig::default(),
        }
    }
}

impl CompileOptions {
    pub fn from_json(json: &str) -> Result<Self, CompilerError> {
        serde_json::from_str(json).map_err(|e| {
            CompilerError::parse("P003", format!("Failed to parse compile options: {}", e))
        })
    }

    pub fn dag_id(&self) -> String {
        match &self.dag_id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => format!("dag_{}", slugify(&self.name)),
        }
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "workflow".into()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let opts = CompileOptions::from_json("{}").unwrap();
        assert_eq!(opts, CompileOptions::default());
        assert_eq!(opts.spark.executor_cores, 1);
    }

    #[test]
    fn dag_id_derived_from_name() {
        let opts = CompileOptions {
            name: "  Nightly Sales -> Lake ".into(),
            ..Default::default()
        };
        assert_eq!(opts.dag_id(), "dag_nightly_sales_lake");
    }

    #[test]
    fn explicit_dag_id_wins() {
        let opts = CompileOptions {
            dag_id: Some("dag_42".into()),
            ..Default::default()
        };
        assert_eq!(opts.dag_id(), "dag_42");
    }

    #[test]
    fn unnamed_workflow_still_gets_an_id() {
        let opts = CompileOptions {
            name: "***".into(),
            ..Default::default()
        };
        assert_eq!(opts.dag_id(), "dag_workflow");
    }
}
