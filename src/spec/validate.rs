use super::model::{Connection, Specification};
use crate::error::SpecError;
use ahash::AHashSet;

impl Specification {
    /// Checks the referential invariants of the specification.
    ///
    /// Returns the first problem found: a node id used twice, or a connection whose
    /// source or target is not in the node list.
    pub fn validate(&self) -> Result<(), SpecError> {
        let mut seen: AHashSet<&str> = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(SpecError::DuplicateNodeId(node.id.clone()));
            }
        }

        for connection in &self.connections {
            for endpoint in [&connection.source, &connection.target] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(SpecError::DanglingConnection {
                        source_id: connection.source.clone(),
                        target_id: connection.target.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Connections whose source or target does not name a node in this specification.
    pub fn dangling_connections(&self) -> Vec<&Connection> {
        let ids: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.connections
            .iter()
            .filter(|c| !ids.contains(c.source.as_str()) || !ids.contains(c.target.as_str()))
            .collect()
    }

    /// Returns a copy of the specification without dangling connections.
    pub fn prune_dangling_connections(&self) -> Specification {
        let ids: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let connections = self
            .connections
            .iter()
            .filter(|c| ids.contains(c.source.as_str()) && ids.contains(c.target.as_str()))
            .cloned()
            .collect();
        Specification {
            connections,
            ..self.clone()
        }
    }
}
