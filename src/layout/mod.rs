//! Deterministic tiered placement of a specification for rendering.
//!
//! Tiers become columns from left to right (`external`, `dmz`, `internal`, `data`).
//! Inside a column the most connected nodes come first, and every column is
//! centred vertically against the tallest one.

use crate::spec::{FlowType, Node, Specification, Tier};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

mod config;
mod tier;

pub use config::*;
pub use tier::{resolve_tier, zone_tier};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A node with its resolved tier and canvas position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tier: Tier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    pub position: Position,
}

impl PositionedNode {
    fn unplaced(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            node_type: node.node_type.clone(),
            label: node.label.clone(),
            description: node.description.clone(),
            tier: resolve_tier(node),
            zone: node.zone.clone(),
            position: Position::default(),
        }
    }

    /// Drops the position and turns the resolved tier into an explicit one.
    pub fn to_node(&self) -> Node {
        Node {
            id: self.id.clone(),
            node_type: self.node_type.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
            tier: Some(self.tier),
            zone: self.zone.clone(),
        }
    }
}

/// One drawable edge per specification connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub id: String,
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

/// Drawing extent of a laid out graph.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<RenderEdge>,
}

impl FlowGraph {
    /// Smallest box holding every node, padded on the right and bottom by the gaps.
    pub fn bounds(&self, config: &LayoutConfig) -> Bounds {
        if self.nodes.is_empty() {
            return Bounds::default();
        }
        let (min_x, max_x) = self
            .nodes
            .iter()
            .map(|n| n.position.x)
            .minmax()
            .into_option()
            .unwrap_or((0.0, 0.0));
        let (min_y, max_y) = self
            .nodes
            .iter()
            .map(|n| n.position.y)
            .minmax()
            .into_option()
            .unwrap_or((0.0, 0.0));

        Bounds {
            x: min_x,
            y: min_y,
            width: max_x - min_x + config.node_width + config.horizontal_gap,
            height: max_y - min_y + config.node_height + config.vertical_gap,
        }
    }
}

/// Lays out `spec`: resolves every node's tier, places it, and emits one edge per
/// connection. Output nodes keep the specification's node order.
pub fn spec_to_flow(spec: &Specification, config: &LayoutConfig) -> FlowGraph {
    let mut nodes: Vec<PositionedNode> = spec.nodes.iter().map(PositionedNode::unplaced).collect();
    let links: Vec<(&str, &str)> = spec
        .connections
        .iter()
        .map(|c| (c.source.as_str(), c.target.as_str()))
        .collect();
    assign_positions(&mut nodes, &links, config);

    let edges = spec
        .connections
        .iter()
        .enumerate()
        .map(|(i, c)| RenderEdge {
            id: format!("e-{}-{}-{}", c.source, c.target, i),
            source: c.source.clone(),
            target: c.target.clone(),
            flow_type: c.flow_type,
            label: c.label.clone(),
        })
        .collect();

    FlowGraph { nodes, edges }
}

/// Recomputes positions for already rendered nodes with the default configuration.
pub fn relayout_nodes(nodes: &[PositionedNode], edges: &[RenderEdge]) -> Vec<PositionedNode> {
    relayout_nodes_with(nodes, edges, &LayoutConfig::default())
}

/// Recomputes positions only; every other field of every node is kept as is.
pub fn relayout_nodes_with(
    nodes: &[PositionedNode],
    edges: &[RenderEdge],
    config: &LayoutConfig,
) -> Vec<PositionedNode> {
    let mut nodes = nodes.to_vec();
    let links: Vec<(&str, &str)> = edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assign_positions(&mut nodes, &links, config);
    nodes
}

fn assign_positions(nodes: &mut [PositionedNode], links: &[(&str, &str)], config: &LayoutConfig) {
    let mut degree: AHashMap<&str, usize> = AHashMap::new();
    for &(source, target) in links {
        *degree.entry(source).or_insert(0) += 1;
        *degree.entry(target).or_insert(0) += 1;
    }
    let degree_of = |node: &PositionedNode| degree.get(node.id.as_str()).copied().unwrap_or(0);

    // Per tier, node indices ordered by descending degree; the sort is stable so
    // ties keep input order.
    let columns: Vec<(Tier, Vec<usize>)> = Tier::ALL
        .iter()
        .map(|&tier| {
            let members = (0..nodes.len())
                .filter(|&i| nodes[i].tier == tier)
                .sorted_by_key(|&i| Reverse(degree_of(&nodes[i])))
                .collect();
            (tier, members)
        })
        .collect();

    let tallest = columns.iter().map(|(_, m)| m.len()).max().unwrap_or(0);

    for (tier, members) in &columns {
        let x = config.start_x + tier.index() as f64 * config.tier_gap;
        let offset = (tallest - members.len()) as f64 * config.vertical_gap / 2.0;
        for (row, &i) in members.iter().enumerate() {
            nodes[i].position = Position {
                x,
                y: config.start_y + offset + row as f64 * config.vertical_gap,
            };
        }
    }
}
