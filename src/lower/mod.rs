//! Lowering phase: GraphSnapshot → DAG + per-node configs.
//!
//! All-or-nothing: either every node maps and validation passes, or the
//! caller gets every error found and no DAG.

pub mod dag;
pub mod extract;

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::config::CompileOptions;
use crate::error::CompilerError;
use crate::mapper::{self, ConfigItem, NodeConfig};
use crate::parse::types::{GraphSnapshot, WorkflowNode};
use crate::validate;

pub use dag::{Dag, DagEntry, convert_workflow_to_dag};
pub use extract::{Sequence, find_file_conversion_sequences};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledWorkflow {
    pub dag: Dag,
    pub configs: Vec<NodeConfig>,
}

impl CompiledWorkflow {
    pub fn config_for(&self, node_id: &str) -> Option<&NodeConfig> {
        self.configs.iter().find(|c| c.node_id == node_id)
    }
}

/// Compile a snapshot. Configs come out in snapshot node order; a file
/// conversion is attributed to its source node.
#[tracing::instrument(skip_all, fields(nodes = snapshot.nodes.len(), connections = snapshot.connections.len()))]
pub fn compile(
    snapshot: &GraphSnapshot,
    options: &CompileOptions,
) -> Result<CompiledWorkflow, Vec<CompilerError>> {
    // 1. Structural gate
    let report = validate::validate(snapshot);
    if !report.is_valid {
        tracing::warn!(errors = report.errors.len(), "workflow failed validation");
        return Err(report.errors);
    }

    // 2. Sequences, keyed by their source node
    let dag_id = options.dag_id();
    let sequences = extract::find_file_conversion_sequences(snapshot);
    let by_source: HashMap<&str, &Sequence> = sequences
        .iter()
        .map(|s| (s.read_node.as_str(), s))
        .collect();
    let in_sequence: HashSet<&str> = sequences
        .iter()
        .flat_map(|s| {
            [Some(s.read_node.as_str()), Some(s.write_node.as_str()), s.filter_node.as_deref()]
        })
        .flatten()
        .collect();

    // 3. Map every node
    let mut configs = Vec::new();
    let mut errors = Vec::new();
    for node in &snapshot.nodes {
        if let Some(sequence) = by_source.get(node.id()) {
            match file_conversion(snapshot, sequence, options, &dag_id) {
                Ok(config) => configs.push(NodeConfig::new(
                    node.id(),
                    node.config_id.clone(),
                    ConfigItem::FileConversion(config),
                )),
                Err(e) => errors.push(e),
            }
        } else if in_sequence.contains(node.id()) {
            continue;
        } else {
            match mapper::map_node_config(node, options, &dag_id) {
                Ok(Some(config)) => {
                    configs.push(NodeConfig::new(node.id(), node.config_id.clone(), config))
                }
                Ok(None) => errors.extend(check_standalone(node)),
                Err(e) => errors.push(e.into()),
            }
        }
    }

    if !errors.is_empty() {
        tracing::warn!(errors = errors.len(), "workflow failed to map");
        return Err(errors);
    }

    // 4. Sequence
    let dag = dag::convert_workflow_to_dag(snapshot, options);
    tracing::info!(
        dag_id = %dag.dag_id,
        entries = dag.dag_sequence.len(),
        configs = configs.len(),
        "compiled workflow"
    );

    Ok(CompiledWorkflow { dag, configs })
}

fn file_conversion(
    snapshot: &GraphSnapshot,
    sequence: &Sequence,
    options: &CompileOptions,
    dag_id: &str,
) -> Result<mapper::FileConversionConfig, CompilerError> {
    let lookup = |id: &str| {
        snapshot.node(id).ok_or_else(|| {
            CompilerError::lower("L001", format!("Sequence references unknown node '{}'", id), None)
        })
    };
    let read = lookup(sequence.read_node.as_str())?;
    let write = lookup(sequence.write_node.as_str())?;
    let filter = sequence.filter_node.as_deref().map(lookup).transpose()?;

    mapper::build_file_conversion_config(read, write, filter, &options.spark, dag_id)?.ok_or_else(
        || {
            CompilerError::lower(
                "L001",
                "Sequence endpoints do not map to an input and an output",
                Some(sequence.read_node.clone()),
            )
        },
    )
}

/// A source, sink, or filter outside any sequence produces no config of its
/// own. Malformed data is still reported, and a source or sink that no
/// sequence claims cannot run at all.
fn check_standalone(node: &WorkflowNode) -> Vec<CompilerError> {
    let mut errors = Vec::new();
    if let Err(e) = mapper::map_input_config(node) {
        errors.push(e.into());
    }
    if let Err(e) = mapper::map_output_config(node) {
        errors.push(e.into());
    }
    if let Err(e) = mapper::map_transformations(Some(node)) {
        errors.push(e.into());
    }
    if extract::is_source(node) || extract::is_sink(node) {
        errors.push(CompilerError::lower(
            "L002",
            format!(
                "{} node '{}' is not part of a read -> (filter) -> write chain",
                node.kind().display_name(),
                node.label()
            ),
            Some(node.id().to_string()),
        ));
    }
    errors
}
