use crate::diff::OperationKind;
use thiserror::Error;

/// Errors that make a single diff operation fail.
///
/// These never abort a batch; the diff engine renders them into
/// [`ApplyResult::errors`](crate::diff::ApplyResult) and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("{operation}: node '{target}' not found")]
    NodeNotFound {
        operation: OperationKind,
        target: String,
    },

    #[error("connect: source node '{0}' not found")]
    SourceNotFound(String),

    #[error("connect: target node '{0}' not found")]
    TargetNotFound(String),

    #[error("{operation}: unknown component type '{type_name}'")]
    UnknownComponentType {
        operation: OperationKind,
        type_name: String,
    },

    #[error("add: {anchor} node '{target}' not found")]
    AnchorNotFound {
        anchor: &'static str,
        target: String,
    },
}

/// Errors raised while loading or validating a specification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("Failed to parse specification JSON: {0}")]
    JsonParseError(String),

    #[error("Failed to parse operation JSON: {0}")]
    OperationParseError(String),

    #[error("Node id '{0}' is used by more than one node")]
    DuplicateNodeId(String),

    #[error("Connection '{source_id}' -> '{target_id}' references missing node '{missing}'")]
    DanglingConnection {
        source_id: String,
        target_id: String,
        missing: String,
    },
}

/// Errors raised by an invalid layout configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutConfigError {
    #[error("Failed to parse layout configuration JSON: {0}")]
    JsonParseError(String),

    #[error("Layout value '{key}' is out of range, got {value}")]
    InvalidValue { key: &'static str, value: f64 },
}
