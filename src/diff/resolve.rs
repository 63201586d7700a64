use crate::spec::{Connection, Node};

/// Finds the node an operation refers to.
///
/// Tried in order, first match wins: exact id, exact component type, then an id
/// containing `target`. An empty target never resolves.
pub(crate) fn resolve_index(nodes: &[Node], target: &str) -> Option<usize> {
    if target.is_empty() {
        return None;
    }
    nodes
        .iter()
        .position(|n| n.id == target)
        .or_else(|| nodes.iter().position(|n| n.node_type == target))
        .or_else(|| nodes.iter().position(|n| n.id.contains(target)))
}

pub(crate) fn resolve_id(nodes: &[Node], target: &str) -> Option<String> {
    resolve_index(nodes, target).map(|idx| nodes[idx].id.clone())
}

/// Adds `connection` unless its `(source, target)` pair is already present.
/// Returns whether anything was added.
pub(crate) fn push_unique(connections: &mut Vec<Connection>, connection: Connection) -> bool {
    if connections
        .iter()
        .any(|c| c.links(&connection.source, &connection.target))
    {
        return false;
    }
    connections.push(connection);
    true
}
