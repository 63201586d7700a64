//! Tests for applying operation batches to a specification.
mod common;
use common::*;
use infraflow::layout::resolve_tier;
use infraflow::prelude::*;

#[test]
fn test_empty_batch_returns_equal_spec() {
    let spec = create_base_spec();
    let result = apply_operations(&spec, &[]);

    assert!(result.success);
    assert_eq!(result.applied_ops, 0);
    assert!(result.errors.is_empty());
    assert!(result.node_id_mappings.is_empty());
    assert_eq!(result.new_spec, spec);
}

#[test]
fn test_input_spec_is_never_mutated() {
    let spec = create_base_spec();
    let snapshot = spec.clone();
    let _ = apply_operations(
        &spec,
        &[Operation::remove("firewall-1"), Operation::connect("web-server", "web-server")],
    );
    assert_eq!(spec, snapshot);
}

#[cfg(test)]
mod replace_tests {
    use super::*;

    #[test]
    fn test_replace_firewall_with_waf() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::replace("firewall-1", "waf")]);

        assert!(result.success, "errors: {:?}", result.errors);
        assert_eq!(result.applied_ops, 1);

        let new_spec = &result.new_spec;
        assert!(!new_spec.contains_node("firewall-1"));
        assert_eq!(node_ids(new_spec), vec!["waf-1", "web-server-1", "db-server-1"]);

        let waf = new_spec.node("waf-1").unwrap();
        assert_eq!(waf.node_type, "waf");
        assert_eq!(waf.label, "WAF");
        assert_eq!(waf.tier, None);
        assert_eq!(resolve_tier(waf), Tier::Dmz);

        assert!(new_spec.has_connection("waf-1", "web-server-1"));
        assert_eq!(new_spec.connections.len(), spec.connections.len());
        assert!(new_spec.connections.iter().all(|c| !c.touches("firewall-1")));
        assert_eq!(result.node_id_mappings.get("firewall-1").map(String::as_str), Some("waf-1"));
    }

    #[test]
    fn test_replace_with_random_ids() {
        let spec = create_base_spec();
        let result = apply_operations(&spec, &[Operation::replace("firewall-1", "waf")]);

        let new_id = result.node_id_mappings["firewall-1"].clone();
        assert!(new_id.starts_with("waf-"));
        let suffix = &new_id["waf-".len()..];
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(result.new_spec.has_connection(&new_id, "web-server-1"));
    }

    #[test]
    fn test_replace_resolves_by_type() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::replace("db-server", "storage")]);

        assert!(result.success);
        assert!(result.new_spec.has_connection("web-server-1", "storage-1"));
        assert_eq!(result.node_id_mappings["db-server-1"], "storage-1");
    }

    #[test]
    fn test_replace_keeps_zone_and_uses_given_label() {
        let mut spec = create_base_spec();
        spec.nodes[0].zone = Some("perimeter".to_string());

        let op = Operation::Replace {
            target: "firewall-1".to_string(),
            data: ReplaceData {
                new_type: "waf".to_string(),
                label: Some("Edge WAF".to_string()),
                description: Some("Managed rules".to_string()),
                preserve_connections: true,
            },
        };
        let result = apply_sequential(&spec, &[op]);

        let waf = result.new_spec.node("waf-1").unwrap();
        assert_eq!(waf.label, "Edge WAF");
        assert_eq!(waf.description.as_deref(), Some("Managed rules"));
        assert_eq!(waf.zone.as_deref(), Some("perimeter"));
        assert_eq!(resolve_tier(waf), Tier::Dmz);
    }

    #[test]
    fn test_replace_places_new_node_by_carried_zone() {
        let mut bs = Node::new("bs-1", "base-station", "Base Station");
        bs.zone = Some("core-dc".to_string());
        let spec = Specification::new(
            vec![Node::new("user-1", "user", "User"), bs],
            vec![Connection::new("user-1", "bs-1")],
        );

        let result = apply_sequential(&spec, &[Operation::replace("bs-1", "router")]);
        assert!(result.success, "errors: {:?}", result.errors);

        let router = result.new_spec.node("router-1").unwrap();
        assert_eq!(router.tier, None);
        assert_eq!(router.zone.as_deref(), Some("core-dc"));

        // the zone outranks the router's own default tier (dmz)
        let flow = spec_to_flow(&result.new_spec, &LayoutConfig::default());
        let placed = flow.nodes.iter().find(|n| n.id == "router-1").unwrap();
        assert_eq!(placed.tier, Tier::Data);
    }

    #[test]
    fn test_replace_without_preserving_connections() {
        let spec = create_base_spec();
        let op = Operation::Replace {
            target: "web-server-1".to_string(),
            data: ReplaceData {
                new_type: "app-server".to_string(),
                label: None,
                description: None,
                preserve_connections: false,
            },
        };
        let result = apply_sequential(&spec, &[op]);

        assert!(result.success);
        assert!(result.new_spec.contains_node("app-server-1"));
        assert!(result.new_spec.connections.is_empty());
    }

    #[test]
    fn test_chained_replace_forwards_mappings() {
        let spec = create_base_spec();
        let result = apply_sequential(
            &spec,
            &[
                Operation::replace("firewall-1", "waf"),
                Operation::replace("waf-1", "ids-ips"),
            ],
        );

        assert!(result.success);
        assert_eq!(result.node_id_mappings["firewall-1"], "ids-ips-1");
        assert_eq!(result.node_id_mappings["waf-1"], "ids-ips-1");
        assert!(result.new_spec.has_connection("ids-ips-1", "web-server-1"));
    }

    #[test]
    fn test_replace_unknown_type_fails_without_change() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::replace("firewall-1", "flux-capacitor")]);

        assert!(!result.success);
        assert_eq!(result.applied_ops, 0);
        assert_eq!(
            result.errors,
            vec!["operation 0: replace: unknown component type 'flux-capacitor'"]
        );
        assert_eq!(result.new_spec, spec);
    }

    #[test]
    fn test_replace_missing_target() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::replace("router", "waf")]);
        assert_eq!(
            result.errors,
            vec!["operation 0: replace: node 'router' not found"]
        );
    }
}

#[cfg(test)]
mod add_tests {
    use super::*;

    #[test]
    fn test_add_between_nodes() {
        let spec = create_base_spec();
        let op = Operation::add(
            "waf",
            AddData {
                between_nodes: Some(["firewall-1".to_string(), "web-server-1".to_string()]),
                ..Default::default()
            },
        );
        let result = apply_sequential(&spec, &[op]);

        assert!(result.success, "errors: {:?}", result.errors);
        let new_spec = &result.new_spec;
        assert!(!new_spec.has_connection("firewall-1", "web-server-1"));
        assert!(new_spec.has_connection("firewall-1", "waf-1"));
        assert!(new_spec.has_connection("waf-1", "web-server-1"));
        assert!(new_spec.has_connection("web-server-1", "db-server-1"));
        assert_eq!(new_spec.connections.len(), 3);
    }

    #[test]
    fn test_add_between_inherits_flow_type() {
        let mut spec = create_base_spec();
        spec.connections[1].flow_type = Some(FlowType::Encrypted);

        let op = Operation::add(
            "cache",
            AddData {
                between_nodes: Some(["web-server".to_string(), "db-server".to_string()]),
                ..Default::default()
            },
        );
        let result = apply_sequential(&spec, &[op]);

        let flows: Vec<_> = result
            .new_spec
            .connections_of("cache-1")
            .map(|c| c.flow_type)
            .collect();
        assert_eq!(flows, vec![Some(FlowType::Encrypted), Some(FlowType::Encrypted)]);
    }

    #[test]
    fn test_add_with_defaults() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::add("monitoring", AddData::default())]);

        assert!(result.success);
        let node = result.new_spec.nodes.last().unwrap();
        assert_eq!(node.id, "monitoring-1");
        assert_eq!(node.label, "Monitoring");
        assert_eq!(node.tier, Some(Tier::Internal));
        assert_eq!(result.new_spec.connections, spec.connections);
    }

    #[test]
    fn test_add_after_and_before() {
        let spec = create_base_spec();
        let op = Operation::add(
            "load-balancer",
            AddData {
                label: Some("LB".to_string()),
                tier: Some(Tier::Dmz),
                after_node: Some("firewall-1".to_string()),
                before_node: Some("web-server-1".to_string()),
                ..Default::default()
            },
        );
        let result = apply_sequential(&spec, &[op]);

        let new_spec = &result.new_spec;
        let lb = new_spec.node("load-balancer-1").unwrap();
        assert_eq!(lb.label, "LB");
        assert_eq!(lb.tier, Some(Tier::Dmz));
        assert!(new_spec.has_connection("firewall-1", "load-balancer-1"));
        assert!(new_spec.has_connection("load-balancer-1", "web-server-1"));
        // the existing edge is kept when only after/before are given
        assert!(new_spec.has_connection("firewall-1", "web-server-1"));
    }

    #[test]
    fn test_add_id_avoids_existing_ids() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::add("firewall", AddData::default())]);

        assert!(result.success);
        assert_eq!(result.new_spec.nodes.last().unwrap().id, "firewall-2");
    }

    #[test]
    fn test_add_with_colliding_closure_generator() {
        let spec = create_base_spec();
        let mut engine = DiffEngine::builder()
            .with_id_generator(|_: &str| "firewall-1".to_string())
            .build();
        let result = engine.apply(
            &spec,
            &[
                Operation::add("waf", AddData::default()),
                Operation::add("waf", AddData::default()),
            ],
        );

        assert!(result.success);
        assert_eq!(
            node_ids(&result.new_spec),
            vec!["firewall-1", "web-server-1", "db-server-1", "firewall-1-2", "firewall-1-3"]
        );
    }

    #[test]
    fn test_add_with_missing_anchor_fails_without_change() {
        let spec = create_base_spec();
        let op = Operation::add(
            "waf",
            AddData {
                after_node: Some("firewall-1".to_string()),
                before_node: Some("router".to_string()),
                ..Default::default()
            },
        );
        let result = apply_sequential(&spec, &[op]);

        assert!(!result.success);
        assert_eq!(
            result.errors,
            vec!["operation 0: add: beforeNode node 'router' not found"]
        );
        assert_eq!(result.new_spec, spec);
    }

    #[test]
    fn test_add_unknown_type_fails() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::add("teleporter", AddData::default())]);
        assert_eq!(
            result.errors,
            vec!["operation 0: add: unknown component type 'teleporter'"]
        );
        assert_eq!(result.new_spec, spec);
    }
}

#[cfg(test)]
mod remove_modify_tests {
    use super::*;

    #[test]
    fn test_remove_cascades_connections() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::remove("web-server-1")]);

        assert!(result.success);
        assert_eq!(node_ids(&result.new_spec), vec!["firewall-1", "db-server-1"]);
        assert!(result.new_spec.connections.is_empty());
    }

    #[test]
    fn test_remove_resolves_by_id_substring() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::remove("db")]);
        assert!(result.success);
        assert!(!result.new_spec.contains_node("db-server-1"));
        assert_eq!(connection_pairs(&result.new_spec), vec![("firewall-1", "web-server-1")]);
    }

    #[test]
    fn test_remove_missing_node_fails() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::remove("ghost")]);
        assert!(!result.success);
        assert_eq!(result.errors, vec!["operation 0: remove: node 'ghost' not found"]);
    }

    #[test]
    fn test_empty_target_never_resolves() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::remove("")]);
        assert!(!result.success);
        assert_eq!(result.new_spec, spec);
    }

    #[test]
    fn test_modify_patches_only_given_fields() {
        let spec = create_base_spec();
        let op = Operation::modify(
            "web-server-1",
            ModifyData {
                label: Some("Frontend".to_string()),
                tier: Some(Tier::Dmz),
                ..Default::default()
            },
        );
        let result = apply_sequential(&spec, &[op]);

        let node = result.new_spec.node("web-server-1").unwrap();
        assert_eq!(node.label, "Frontend");
        assert_eq!(node.tier, Some(Tier::Dmz));
        assert_eq!(node.description, None);
        assert_eq!(node.node_type, "web-server");
        assert_eq!(result.new_spec.connections, spec.connections);
    }
}

#[cfg(test)]
mod connection_tests {
    use super::*;

    #[test]
    fn test_connect_twice_yields_one_connection() {
        let spec = create_base_spec();
        let result = apply_sequential(
            &spec,
            &[
                Operation::connect("firewall-1", "db-server-1"),
                Operation::connect("firewall-1", "db-server-1"),
            ],
        );

        assert!(result.success);
        assert_eq!(result.applied_ops, 2);
        let count = result
            .new_spec
            .connections
            .iter()
            .filter(|c| c.links("firewall-1", "db-server-1"))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_connect_resolves_types_and_defaults_flow() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::connect("firewall", "db-server")]);

        let connection = result.new_spec.connections.last().unwrap();
        assert_eq!(connection.source, "firewall-1");
        assert_eq!(connection.target, "db-server-1");
        assert_eq!(connection.flow_type, Some(FlowType::Request));
    }

    #[test]
    fn test_connect_keeps_flow_type_and_label() {
        let spec = create_base_spec();
        let op = Operation::Connect {
            data: ConnectData {
                source: "db-server-1".to_string(),
                target: "web-server-1".to_string(),
                flow_type: Some(FlowType::Response),
                label: Some("rows".to_string()),
            },
        };
        let result = apply_sequential(&spec, &[op]);

        let connection = result.new_spec.connections.last().unwrap();
        assert_eq!(connection.flow_type, Some(FlowType::Response));
        assert_eq!(connection.label.as_deref(), Some("rows"));
    }

    #[test]
    fn test_connect_reports_missing_endpoint() {
        let spec = create_base_spec();
        let result = apply_sequential(
            &spec,
            &[
                Operation::connect("ghost", "web-server-1"),
                Operation::connect("web-server-1", "ghost"),
            ],
        );

        assert_eq!(
            result.errors,
            vec![
                "operation 0: connect: source node 'ghost' not found",
                "operation 1: connect: target node 'ghost' not found",
            ]
        );
        assert_eq!(result.new_spec, spec);
    }

    #[test]
    fn test_disconnect_stale_connection() {
        let spec = Specification::new(
            vec![],
            vec![Connection::new("firewall-1", "web-server-1")],
        );
        let result = apply_sequential(&spec, &[Operation::disconnect("firewall-1", "web-server-1")]);

        assert!(result.success);
        assert!(result.new_spec.connections.is_empty());
    }

    #[test]
    fn test_disconnect_resolves_endpoints() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::disconnect("firewall", "web-server")]);

        assert!(result.success);
        assert_eq!(connection_pairs(&result.new_spec), vec![("web-server-1", "db-server-1")]);
    }

    #[test]
    fn test_disconnect_without_match_is_a_no_op() {
        let spec = create_base_spec();
        let result = apply_sequential(&spec, &[Operation::disconnect("db-server-1", "firewall-1")]);

        assert!(result.success);
        assert_eq!(result.applied_ops, 1);
        assert_eq!(result.new_spec, spec);
    }
}

#[test]
fn test_batch_continues_after_failure() {
    let spec = create_base_spec();
    let operations = [
        Operation::remove("ghost"),
        Operation::replace("firewall-1", "waf"),
        Operation::connect("waf-1", "nowhere"),
        Operation::add(
            "cache",
            AddData {
                before_node: Some("db-server-1".to_string()),
                ..Default::default()
            },
        ),
    ];
    let result = apply_sequential(&spec, &operations);

    assert!(!result.success);
    assert_eq!(result.applied_ops, 2);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].starts_with("operation 0: remove"));
    assert!(result.errors[1].starts_with("operation 2: connect"));

    // later operations see the state produced by earlier ones
    assert!(result.new_spec.has_connection("waf-1", "web-server-1"));
    assert!(result.new_spec.has_connection("cache-1", "db-server-1"));
    assert!(result.new_spec.validate().is_ok());
}

#[test]
fn test_operations_from_json() {
    let json = r#"[
        { "type": "replace", "target": "firewall-1", "data": { "newType": "waf" } },
        { "type": "add", "target": "cache", "data": { "betweenNodes": ["web-server-1", "db-server-1"] } },
        { "type": "add", "target": "monitoring" },
        { "type": "modify", "target": "db-server-1", "data": { "label": "Primary DB" } },
        { "type": "connect", "data": { "source": "monitoring-1", "target": "db-server-1", "flowType": "sync" } },
        { "type": "disconnect", "data": { "source": "a", "target": "b" } },
        { "type": "remove", "target": "monitoring-1" }
    ]"#;
    let operations = Operation::batch_from_json(json).unwrap();
    assert_eq!(operations.len(), 7);
    assert_eq!(operations[0], Operation::replace("firewall-1", "waf"));

    let spec = Specification::from_json(BASE_SPEC_JSON).unwrap();
    let result = apply_sequential(&spec, &operations);

    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.applied_ops, 7);
    assert_eq!(
        node_ids(&result.new_spec),
        vec!["waf-1", "web-server-1", "db-server-1", "cache-1"]
    );
    assert_eq!(result.new_spec.node("db-server-1").unwrap().label, "Primary DB");
    assert_eq!(
        connection_pairs(&result.new_spec),
        vec![
            ("waf-1", "web-server-1"),
            ("web-server-1", "cache-1"),
            ("cache-1", "db-server-1"),
        ]
    );
}

#[test]
fn test_malformed_operations_json() {
    let err = Operation::batch_from_json(r#"[{ "type": "explode", "target": "x" }]"#).unwrap_err();
    assert!(matches!(err, SpecError::OperationParseError(_)));
}

#[test]
fn test_apply_result_serializes_camel_case() {
    let spec = create_base_spec();
    let result = apply_sequential(&spec, &[Operation::replace("firewall-1", "waf")]);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["appliedOps"], 1);
    assert_eq!(json["nodeIdMappings"]["firewall-1"], "waf-1");
    assert_eq!(json["newSpec"]["nodes"][0]["type"], "waf");
}
