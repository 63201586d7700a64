use crate::error::SpecError;
use crate::spec::{FlowType, Tier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One edit instruction, as proposed by a reasoning service or synthesized from a
/// direct UI action.
///
/// JSON shape: `{ "type": "<kind>", "target": "...", "data": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    /// Swap a node for a fresh node of another type.
    Replace { target: String, data: ReplaceData },
    /// Create a node; `target` is the new node's component type.
    Add {
        target: String,
        #[serde(default)]
        data: AddData,
    },
    /// Delete a node and every connection touching it.
    Remove { target: String },
    /// Patch label, description or tier of a node.
    Modify { target: String, data: ModifyData },
    Connect { data: ConnectData },
    Disconnect { data: DisconnectData },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceData {
    pub new_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_preserve_connections")]
    pub preserve_connections: bool,
}

fn default_preserve_connections() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub between_nodes: Option<[String; 2]>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectData {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_type: Option<FlowType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisconnectData {
    pub source: String,
    pub target: String,
}

/// Discriminant of an [`Operation`], used in error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Replace,
    Add,
    Remove,
    Modify,
    Connect,
    Disconnect,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Replace => "replace",
            OperationKind::Add => "add",
            OperationKind::Remove => "remove",
            OperationKind::Modify => "modify",
            OperationKind::Connect => "connect",
            OperationKind::Disconnect => "disconnect",
        };
        f.write_str(name)
    }
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Replace { .. } => OperationKind::Replace,
            Operation::Add { .. } => OperationKind::Add,
            Operation::Remove { .. } => OperationKind::Remove,
            Operation::Modify { .. } => OperationKind::Modify,
            Operation::Connect { .. } => OperationKind::Connect,
            Operation::Disconnect { .. } => OperationKind::Disconnect,
        }
    }

    /// Parses a JSON array of operations.
    pub fn batch_from_json(json: &str) -> Result<Vec<Operation>, SpecError> {
        serde_json::from_str(json).map_err(|e| SpecError::OperationParseError(e.to_string()))
    }

    pub fn replace(target: impl Into<String>, new_type: impl Into<String>) -> Self {
        Operation::Replace {
            target: target.into(),
            data: ReplaceData {
                new_type: new_type.into(),
                label: None,
                description: None,
                preserve_connections: true,
            },
        }
    }

    pub fn add(component_type: impl Into<String>, data: AddData) -> Self {
        Operation::Add {
            target: component_type.into(),
            data,
        }
    }

    pub fn remove(target: impl Into<String>) -> Self {
        Operation::Remove {
            target: target.into(),
        }
    }

    pub fn modify(target: impl Into<String>, data: ModifyData) -> Self {
        Operation::Modify {
            target: target.into(),
            data,
        }
    }

    pub fn connect(source: impl Into<String>, target: impl Into<String>) -> Self {
        Operation::Connect {
            data: ConnectData {
                source: source.into(),
                target: target.into(),
                flow_type: None,
                label: None,
            },
        }
    }

    pub fn disconnect(source: impl Into<String>, target: impl Into<String>) -> Self {
        Operation::Disconnect {
            data: DisconnectData {
                source: source.into(),
                target: target.into(),
            },
        }
    }
}
