//! Unified compiler error type used across all phases.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Parse,
    Edit,
    Validate,
    Map,
    Lower,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Edit => write!(f, "Edit"),
            Phase::Validate => write!(f, "Validate"),
            Phase::Map => write!(f, "Map"),
            Phase::Lower => write!(f, "Lower"),
        }
    }
}

/// A coded diagnostic. Validation and compilation report lists of these
/// instead of failing on the first problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub node_id: Option<String>,
}

impl std::fmt::Display for CompilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(
                f,
                "[{}:{}] {} (node '{}')",
                self.phase, self.code, self.message, id
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.code, self.message),
        }
    }
}

impl std::error::Error for CompilerError {}

impl CompilerError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn validate(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Validate,
            message: message.into(),
            node_id,
        }
    }

    pub fn map(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Map,
            message: message.into(),
            node_id,
        }
    }

    pub fn lower(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Lower,
            message: message.into(),
            node_id,
        }
    }
}

/// Rejected edit on the node/connection model. The model is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node '{0}' does not exist")]
    InvalidReference(String),

    #[error("Node '{0}' already exists")]
    DuplicateNode(String),

    #[error("Connection from '{source_id}' to '{target_id}' already exists")]
    DuplicateEdge { source_id: String, target_id: String },

    #[error("Connection from '{source_id}' to '{target_id}' would create a cycle")]
    CycleDetected { source_id: String, target_id: String },

    #[error("Node '{0}' cannot connect to itself")]
    SelfLoop(String),

    #[error("No connection from '{source_id}' to '{target_id}'")]
    MissingEdge { source_id: String, target_id: String },

    #[error("Data patch for node '{node_id}' is invalid: {message}")]
    InvalidData { node_id: String, message: String },
}

impl GraphError {
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::InvalidReference(_) => "G001",
            GraphError::DuplicateNode(_) => "G002",
            GraphError::DuplicateEdge { .. } => "G003",
            GraphError::CycleDetected { .. } => "G004",
            GraphError::SelfLoop(_) => "G005",
            GraphError::MissingEdge { .. } => "G006",
            GraphError::InvalidData { .. } => "G007",
        }
    }
}

impl From<GraphError> for CompilerError {
    fn from(e: GraphError) -> Self {
        let node_id = match &e {
            GraphError::InvalidReference(id)
            | GraphError::DuplicateNode(id)
            | GraphError::SelfLoop(id) => Some(id.clone()),
            GraphError::DuplicateEdge { source_id, .. }
            | GraphError::CycleDetected { source_id, .. }
            | GraphError::MissingEdge { source_id, .. } => Some(source_id.clone()),
            GraphError::InvalidData { node_id, .. } => Some(node_id.clone()),
        };
        CompilerError {
            code: e.code().to_string(),
            phase: Phase::Edit,
            message: e.to_string(),
            node_id,
        }
    }
}

/// A node's data cannot be turned into its backend configuration.
/// Raised per node at mapping time; the editor is expected to let the user fix it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Node '{node_id}' is missing required field '{field}'")]
    MissingField { node_id: String, field: String },

    #[error("Node '{node_id}' field '{field}' must be between {min} and {max}, got {value}")]
    OutOfBounds {
        node_id: String,
        field: String,
        min: i64,
        max: i64,
        value: i64,
    },

    #[error("Node '{node_id}' field '{field}' has invalid value '{value}': {reason}")]
    InvalidValue {
        node_id: String,
        field: String,
        value: String,
        reason: String,
    },
}

impl MappingError {
    pub fn code(&self) -> &'static str {
        match self {
            MappingError::MissingField { .. } => "M001",
            MappingError::OutOfBounds { .. } => "M002",
            MappingError::InvalidValue { .. } => "M003",
        }
    }

    pub fn node_id(&self) -> &str {
        match self {
            MappingError::MissingField { node_id, .. }
            | MappingError::OutOfBounds { node_id, .. }
            | MappingError::InvalidValue { node_id, .. } => node_id,
        }
    }

    pub fn missing(node_id: &str, field: &str) -> Self {
        MappingError::MissingField {
            node_id: node_id.to_string(),
            field: field.to_string(),
        }
    }

    pub fn invalid(node_id: &str, field: &str, value: impl Into<String>, reason: &str) -> Self {
        MappingError::InvalidValue {
            node_id: node_id.to_string(),
            field: field.to_string(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<MappingError> for CompilerError {
    fn from(e: MappingError) -> Self {
        CompilerError::map(e.code(), e.to_string(), Some(e.node_id().to_string()))
    }
}
