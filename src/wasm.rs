//! WASM entry points for the browser editor.
//!
//! Every function takes JSON strings and returns a plain JS value; nothing
//! here throws across the boundary.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::CompileOptions;
use crate::error::{CompilerError, GraphError, MappingError};
use crate::lower::{Dag, Sequence};
use crate::mapper::{
    self, ConfigItem, ConfigKind, InputConfig, NodeConfig, OutputConfig, TransformationClauses,
};
use crate::model::Workflow;
use crate::parse::types::{GraphSnapshot, WorkflowNode};
use crate::schema::AvailableField;

fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

fn parse_errors(errors: Vec<CompilerError>) -> Vec<ErrorDto> {
    errors.into_iter().map(ErrorDto::from).collect()
}

/// Parse + structural validation.
/// Returns `{isValid, errors}`.
#[wasm_bindgen]
pub fn validate_workflow(json: &str) -> JsValue {
    to_js(&validate_workflow_inner(json))
}

fn validate_workflow_inner(json: &str) -> ValidationDto {
    let errors = match crate::parse::parse(json) {
        Ok(snapshot) => crate::validate::validate(&snapshot).errors,
        Err(errors) => errors,
    };
    ValidationDto {
        is_valid: errors.is_empty(),
        errors: parse_errors(errors),
    }
}

/// Validate a single node JSON against its kind's required fields.
/// Returns a JSON array of CompilerError objects.
#[wasm_bindgen]
pub fn validate_node(node_json: &str) -> JsValue {
    to_js(&validate_node_inner(node_json))
}

fn validate_node_inner(node_json: &str) -> Vec<ErrorDto> {
    match parse_node(node_json) {
        Ok(node) => parse_errors(crate::validate::validate_node(&node)),
        Err(e) => vec![e.into()],
    }
}

/// Full pipeline: parse → validate → map → sequence.
/// Returns `{status: "success", dag, configs}` or `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn compile_workflow(json: &str, options_json: &str) -> JsValue {
    to_js(&compile_workflow_inner(json, options_json))
}

fn compile_workflow_inner(json: &str, options_json: &str) -> CompileResult {
    // 1. Options
    let options = match parse_options(options_json) {
        Ok(o) => o,
        Err(e) => return CompileResult::Errors { errors: vec![e.into()] },
    };

    // 2. Parse
    let snapshot = match crate::parse::parse(json) {
        Ok(s) => s,
        Err(errors) => return CompileResult::Errors { errors: parse_errors(errors) },
    };

    // 3. Validate, map, sequence
    match crate::lower::compile(&snapshot, &options) {
        Ok(compiled) => CompileResult::Success {
            dag: compiled.dag,
            configs: compiled.configs,
        },
        Err(errors) => CompileResult::Errors { errors: parse_errors(errors) },
    }
}

/// Recognized source → (filter?) → sink chains, for previews.
#[wasm_bindgen]
pub fn find_sequences(json: &str) -> JsValue {
    match crate::parse::parse(json) {
        Ok(snapshot) => to_js(&crate::lower::find_file_conversion_sequences(&snapshot)),
        Err(_) => to_js(&Vec::<Sequence>::new()),
    }
}

/// Upstream fields available to `node_id`. Advisory: any failure yields `[]`.
#[wasm_bindgen]
pub fn available_inputs(json: &str, node_id: &str) -> JsValue {
    let fields = match crate::parse::parse(json) {
        Ok(snapshot) => crate::schema::available_inputs(&snapshot, node_id),
        Err(_) => Vec::<AvailableField>::new(),
    };
    to_js(&fields)
}

/// Map one node on its own, for per-node config previews.
#[wasm_bindgen]
pub fn map_node(node_json: &str, options_json: &str) -> JsValue {
    to_js(&map_node_inner(node_json, options_json))
}

fn map_node_inner(node_json: &str, options_json: &str) -> MapNodeResult {
    let (node, options) = match (parse_node(node_json), parse_options(options_json)) {
        (Ok(n), Ok(o)) => (n, o),
        (Err(e), _) | (_, Err(e)) => return MapNodeResult::Errors { errors: vec![e.into()] },
    };

    match map_node_result(&node, &options) {
        Ok(result) => result,
        Err(e) => MapNodeResult::Errors {
            errors: vec![CompilerError::from(e).into()],
        },
    }
}

fn map_node_result(
    node: &WorkflowNode,
    options: &CompileOptions,
) -> Result<MapNodeResult, MappingError> {
    if let Some(config) = mapper::map_node_config(node, options, &options.dag_id())? {
        return Ok(MapNodeResult::Config {
            config_kind: config.kind(),
            config,
        });
    }
    if let Some(config) = mapper::map_input_config(node)? {
        return Ok(MapNodeResult::Input { config });
    }
    if let Some(config) = mapper::map_output_config(node)? {
        return Ok(MapNodeResult::Output { config });
    }
    let clauses = mapper::map_transformations(Some(node))?;
    if clauses.is_empty() {
        Ok(MapNodeResult::Unsupported)
    } else {
        Ok(MapNodeResult::Transformations { clauses })
    }
}

/// Connect two nodes in a snapshot. Returns the updated snapshot (with any
/// auto-filled fields) or the rejected edit.
#[wasm_bindgen]
pub fn add_connection(json: &str, source_id: &str, target_id: &str) -> JsValue {
    to_js(&edit(json, |w| w.add_connection(source_id, target_id)))
}

/// Remove a node and every connection touching it.
#[wasm_bindgen]
pub fn remove_node(json: &str, node_id: &str) -> JsValue {
    to_js(&edit(json, |w| w.remove_node(node_id).map(|_| ())))
}

/// Merge a JSON object into a node's data.
#[wasm_bindgen]
pub fn update_node_data(json: &str, node_id: &str, patch_json: &str) -> JsValue {
    let patch = match serde_json::from_str::<serde_json::Value>(patch_json) {
        Ok(p) => p,
        Err(e) => {
            let error = CompilerError::parse("P001", format!("Failed to parse patch JSON: {}", e));
            return to_js(&EditResult::Errors { errors: vec![error.into()] });
        }
    };
    to_js(&edit(json, |w| w.update_node_data(node_id, patch)))
}

fn edit<F>(json: &str, apply: F) -> EditResult
where
    F: FnOnce(&mut Workflow) -> Result<(), GraphError>,
{
    let snapshot = match crate::parse::parse(json) {
        Ok(s) => s,
        Err(errors) => return EditResult::Errors { errors: parse_errors(errors) },
    };
    let mut workflow = Workflow::from_snapshot(snapshot);
    match apply(&mut workflow) {
        Ok(()) => EditResult::Success {
            snapshot: workflow.into_snapshot(),
        },
        Err(e) => EditResult::Errors {
            errors: vec![CompilerError::from(e).into()],
        },
    }
}

fn parse_node(node_json: &str) -> Result<WorkflowNode, CompilerError> {
    serde_json::from_str(node_json)
        .map_err(|e| CompilerError::parse("P002", format!("Failed to parse node JSON: {}", e)))
}

fn parse_options(options_json: &str) -> Result<CompileOptions, CompilerError> {
    if options_json.trim().is_empty() {
        return Ok(CompileOptions::default());
    }
    CompileOptions::from_json(options_json)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    node_id: Option<String>,
}

impl From<CompilerError> for ErrorDto {
    fn from(e: CompilerError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            node_id: e.node_id,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationDto {
    is_valid: bool,
    errors: Vec<ErrorDto>,
}

#[derive(Serialize)]
#[serde(tag = "status")]
enum CompileResult {
    #[serde(rename = "success")]
    Success { dag: Dag, configs: Vec<NodeConfig> },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum MapNodeResult {
    Config {
        config_kind: ConfigKind,
        config: ConfigItem,
    },
    Input {
        config: InputConfig,
    },
    Output {
        config: OutputConfig,
    },
    Transformations {
        clauses: TransformationClauses,
    },
    Unsupported,
    Errors {
        errors: Vec<ErrorDto>,
    },
}

#[derive(Serialize)]
#[serde(tag = "status")]
enum EditResult {
    #[serde(rename = "success")]
    Success { snapshot: GraphSnapshot },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
