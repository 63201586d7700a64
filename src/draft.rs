//! Initial specification from a piece of free text.

use crate::detect::PatternDetector;
use crate::diff::IdGenerator;
use crate::spec::{Connection, FlowType, Node, Specification};
use itertools::Itertools;

/// Builds a first specification from the component types mentioned in `text`.
///
/// One node is created per detected type, in mention order. Nodes are then chained
/// left to right by default tier (`external` → `dmz` → `internal` → `data`, mention
/// order inside a tier) with `request` connections. Text mentioning no known
/// component yields an empty specification.
pub fn draft_specification(
    detector: &PatternDetector,
    text: &str,
    ids: &mut dyn IdGenerator,
) -> Specification {
    let patterns = detector.detect_all_node_types_cached(text);

    let mut nodes: Vec<Node> = Vec::with_capacity(patterns.len());
    for pattern in &patterns {
        let mut id = ids.generate(&pattern.component_type);
        let mut n = 2;
        while id.is_empty() || nodes.iter().any(|node| node.id == id) {
            id = format!("{}-{}", pattern.component_type, n);
            n += 1;
        }
        nodes.push(
            Node::new(id, pattern.component_type.clone(), pattern.label.clone())
                .with_tier(pattern.default_tier),
        );
    }

    let connections = nodes
        .iter()
        .sorted_by_key(|node| node.tier)
        .tuple_windows()
        .map(|(from, to)| {
            Connection::new(from.id.clone(), to.id.clone()).with_flow_type(FlowType::Request)
        })
        .collect();

    Specification::new(nodes, connections)
}
