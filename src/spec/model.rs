use crate::error::SpecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placement band of a component, ordered left to right in the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    External,
    Dmz,
    Internal,
    Data,
}

impl Tier {
    /// All tiers in layout order.
    pub const ALL: [Tier; 4] = [Tier::External, Tier::Dmz, Tier::Internal, Tier::Data];

    /// Column index of the tier, `0` for `External` through `3` for `Data`.
    pub fn index(self) -> usize {
        match self {
            Tier::External => 0,
            Tier::Dmz => 1,
            Tier::Internal => 2,
            Tier::Data => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::External => "external",
            Tier::Dmz => "dmz",
            Tier::Internal => "internal",
            Tier::Data => "data",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "external" => Ok(Tier::External),
            "dmz" => Ok(Tier::Dmz),
            "internal" => Ok(Tier::Internal),
            "data" => Ok(Tier::Data),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

/// Semantic kind of a connection, carried through to rendering unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowType {
    #[default]
    Request,
    Response,
    Sync,
    Blocked,
    Encrypted,
    WanLink,
    Wireless,
    Tunnel,
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowType::Request => "request",
            FlowType::Response => "response",
            FlowType::Sync => "sync",
            FlowType::Blocked => "blocked",
            FlowType::Encrypted => "encrypted",
            FlowType::WanLink => "wan-link",
            FlowType::Wireless => "wireless",
            FlowType::Tunnel => "tunnel",
        };
        f.write_str(name)
    }
}

/// A single infrastructure component in a specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            label: label.into(),
            description: None,
            tier: None,
            zone: None,
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A directed link between two nodes, identified by its `(source, target)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub source: String,
    pub target: String,
    #[serde(
        default,
        rename = "flowType",
        skip_serializing_if = "Option::is_none"
    )]
    pub flow_type: Option<FlowType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            flow_type: None,
            label: None,
        }
    }

    pub fn with_flow_type(mut self, flow_type: FlowType) -> Self {
        self.flow_type = Some(flow_type);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// True when this connection runs from `source` to `target`, ignoring flow type.
    pub fn links(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }

    /// True when either endpoint is `node_id`.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// The topology graph: an ordered node list plus its connections.
///
/// Node order carries no meaning but is preserved so that successive versions of
/// a specification diff cleanly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Specification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Specification {
    pub fn new(nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        Self {
            name: None,
            description: None,
            nodes,
            connections,
        }
    }

    /// Parses a specification from its JSON form.
    ///
    /// Dangling connections are accepted here; use [`Specification::validate`]
    /// to reject them.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        serde_json::from_str(json).map_err(|e| SpecError::JsonParseError(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        serde_json::to_string_pretty(self).map_err(|e| SpecError::JsonParseError(e.to_string()))
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn has_connection(&self, source: &str, target: &str) -> bool {
        self.connections.iter().any(|c| c.links(source, target))
    }

    /// Connections that touch `node_id` as either endpoint.
    pub fn connections_of<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.touches(node_id))
    }
}
