//! Common test utilities for building specifications and engines.
use infraflow::prelude::*;

/// A three-tier web stack used by most tests.
///
/// `firewall-1 (dmz) -> web-server-1 (internal) -> db-server-1 (data)`
#[allow(dead_code)]
pub fn create_base_spec() -> Specification {
    Specification::new(
        vec![
            Node::new("firewall-1", "firewall", "Firewall").with_tier(Tier::Dmz),
            Node::new("web-server-1", "web-server", "Web Server").with_tier(Tier::Internal),
            Node::new("db-server-1", "db-server", "Database").with_tier(Tier::Data),
        ],
        vec![
            Connection::new("firewall-1", "web-server-1").with_flow_type(FlowType::Request),
            Connection::new("web-server-1", "db-server-1").with_flow_type(FlowType::Request),
        ],
    )
}

/// JSON form of [`create_base_spec`] as a reasoning service would send it.
#[allow(dead_code)]
pub const BASE_SPEC_JSON: &str = r#"{
    "nodes": [
        { "id": "firewall-1", "type": "firewall", "label": "Firewall", "tier": "dmz" },
        { "id": "web-server-1", "type": "web-server", "label": "Web Server", "tier": "internal" },
        { "id": "db-server-1", "type": "db-server", "label": "Database", "tier": "data" }
    ],
    "connections": [
        { "source": "firewall-1", "target": "web-server-1", "flowType": "request" },
        { "source": "web-server-1", "target": "db-server-1", "flowType": "request" }
    ]
}"#;

/// An engine that mints `<type>-<n>` ids, so new ids are predictable.
///
/// Counters start at 1 and collide with the ids of [`create_base_spec`]; the engine
/// then draws again, so the first new `firewall` is `firewall-2`.
#[allow(dead_code)]
pub fn sequential_engine() -> DiffEngine {
    DiffEngine::builder()
        .with_id_generator(SequentialIdGenerator::new())
        .build()
}

/// Applies `operations` to `spec` with [`sequential_engine`].
#[allow(dead_code)]
pub fn apply_sequential(spec: &Specification, operations: &[Operation]) -> ApplyResult {
    sequential_engine().apply(spec, operations)
}

/// Ids of the nodes in `spec`, in order.
#[allow(dead_code)]
pub fn node_ids(spec: &Specification) -> Vec<&str> {
    spec.nodes.iter().map(|n| n.id.as_str()).collect()
}

/// `(source, target)` pairs of the connections in `spec`, in order.
#[allow(dead_code)]
pub fn connection_pairs(spec: &Specification) -> Vec<(&str, &str)> {
    spec.connections
        .iter()
        .map(|c| (c.source.as_str(), c.target.as_str()))
        .collect()
}

/// Component types of detected patterns, in order.
#[allow(dead_code)]
pub fn types_of(patterns: &[&Pattern]) -> Vec<String> {
    patterns.iter().map(|p| p.component_type.clone()).collect()
}
