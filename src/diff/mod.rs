//! Operation-based edits on a [`Specification`].
//!
//! A batch is applied in order against a private copy of the input. Each operation
//! either succeeds completely or leaves the working copy untouched; failures are
//! collected and the batch carries on with the next operation.

use crate::catalog;
use crate::error::OperationError;
use crate::spec::{Connection, FlowType, Node, Specification};
use serde::Serialize;
use std::collections::BTreeMap;

mod ids;
mod operation;
mod resolve;

pub use ids::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use operation::*;

use resolve::{push_unique, resolve_id, resolve_index};

const MAX_ID_ATTEMPTS: usize = 16;

/// Outcome of applying a batch of operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResult {
    /// `false` when at least one operation failed.
    pub success: bool,
    pub new_spec: Specification,
    /// Number of operations that succeeded.
    pub applied_ops: usize,
    pub errors: Vec<String>,
    /// Every id substitution made by `replace` in this batch, old id to current id.
    pub node_id_mappings: BTreeMap<String, String>,
}

/// Applies operation batches, minting ids for new nodes from an [`IdGenerator`].
pub struct DiffEngine {
    ids: Box<dyn IdGenerator>,
}

pub struct DiffEngineBuilder {
    ids: Option<Box<dyn IdGenerator>>,
}

impl DiffEngineBuilder {
    pub fn new() -> Self {
        Self { ids: None }
    }

    pub fn with_id_generator<G: IdGenerator + 'static>(mut self, ids: G) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    pub fn build(self) -> DiffEngine {
        DiffEngine {
            ids: self.ids.unwrap_or_else(|| Box::new(RandomIdGenerator)),
        }
    }
}

impl Default for DiffEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies `operations` to `spec` with randomly generated ids.
pub fn apply_operations(spec: &Specification, operations: &[Operation]) -> ApplyResult {
    DiffEngine::new().apply(spec, operations)
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> DiffEngineBuilder {
        DiffEngineBuilder::new()
    }

    /// Applies `operations` in order and returns the resulting specification.
    ///
    /// `spec` itself is never modified.
    #[tracing::instrument(skip_all, fields(operations = operations.len()))]
    pub fn apply(&mut self, spec: &Specification, operations: &[Operation]) -> ApplyResult {
        let mut working = spec.clone();
        let mut mappings = BTreeMap::new();
        let mut applied_ops = 0;
        let mut errors = Vec::new();

        for (index, operation) in operations.iter().enumerate() {
            match self.apply_one(&mut working, &mut mappings, operation) {
                Ok(()) => {
                    applied_ops += 1;
                    tracing::debug!(index, kind = %operation.kind(), "operation applied");
                }
                Err(e) => {
                    tracing::warn!(index, kind = %operation.kind(), error = %e, "operation failed");
                    errors.push(format!("operation {}: {}", index, e));
                }
            }
        }

        ApplyResult {
            success: errors.is_empty(),
            new_spec: working,
            applied_ops,
            errors,
            node_id_mappings: mappings,
        }
    }

    fn apply_one(
        &mut self,
        spec: &mut Specification,
        mappings: &mut BTreeMap<String, String>,
        operation: &Operation,
    ) -> Result<(), OperationError> {
        match operation {
            Operation::Replace { target, data } => self.replace(spec, mappings, target, data),
            Operation::Add { target, data } => self.add(spec, target, data),
            Operation::Remove { target } => remove(spec, target),
            Operation::Modify { target, data } => modify(spec, target, data),
            Operation::Connect { data } => connect(spec, data),
            Operation::Disconnect { data } => {
                disconnect(spec, data);
                Ok(())
            }
        }
    }

    fn replace(
        &mut self,
        spec: &mut Specification,
        mappings: &mut BTreeMap<String, String>,
        target: &str,
        data: &ReplaceData,
    ) -> Result<(), OperationError> {
        let index = resolve_index(&spec.nodes, target).ok_or_else(|| OperationError::NodeNotFound {
            operation: OperationKind::Replace,
            target: target.to_string(),
        })?;
        require_known_type(OperationKind::Replace, &data.new_type)?;

        // Minted while the old node is still present so the two ids always differ.
        let new_id = self.mint_id(spec, &data.new_type);
        let old = spec.nodes.remove(index);

        spec.nodes.insert(
            index,
            Node {
                id: new_id.clone(),
                node_type: data.new_type.clone(),
                label: data
                    .label
                    .clone()
                    .unwrap_or_else(|| catalog::label_for(&data.new_type)),
                description: data.description.clone(),
                // Left unset so layout places it by the carried zone, then the new type.
                tier: None,
                zone: old.zone,
            },
        );

        if data.preserve_connections {
            for connection in &mut spec.connections {
                if connection.source == old.id {
                    connection.source = new_id.clone();
                }
                if connection.target == old.id {
                    connection.target = new_id.clone();
                }
            }
        } else {
            spec.connections.retain(|c| !c.touches(&old.id));
        }

        // Keep earlier substitutions pointing at the live id.
        for current in mappings.values_mut() {
            if *current == old.id {
                *current = new_id.clone();
            }
        }
        mappings.insert(old.id, new_id);
        Ok(())
    }

    fn add(
        &mut self,
        spec: &mut Specification,
        component_type: &str,
        data: &AddData,
    ) -> Result<(), OperationError> {
        require_known_type(OperationKind::Add, component_type)?;

        let after = data
            .after_node
            .as_deref()
            .map(|t| resolve_anchor(spec, "afterNode", t))
            .transpose()?;
        let before = data
            .before_node
            .as_deref()
            .map(|t| resolve_anchor(spec, "beforeNode", t))
            .transpose()?;
        let between = match &data.between_nodes {
            Some([a, b]) => Some((
                resolve_anchor(spec, "betweenNodes", a)?,
                resolve_anchor(spec, "betweenNodes", b)?,
            )),
            None => None,
        };

        let new_id = self.mint_id(spec, component_type);
        spec.nodes.push(Node {
            id: new_id.clone(),
            node_type: component_type.to_string(),
            label: data
                .label
                .clone()
                .unwrap_or_else(|| catalog::label_for(component_type)),
            description: data.description.clone(),
            tier: Some(data.tier.unwrap_or_else(|| catalog::default_tier(component_type))),
            zone: None,
        });

        if let Some(after) = after {
            let flow = spec
                .connections_of(&after)
                .next()
                .and_then(|c| c.flow_type)
                .unwrap_or_default();
            push_unique(
                &mut spec.connections,
                Connection::new(after, new_id.clone()).with_flow_type(flow),
            );
        }

        if let Some(before) = before {
            push_unique(
                &mut spec.connections,
                Connection::new(new_id.clone(), before).with_flow_type(FlowType::Request),
            );
        }

        if let Some((a, b)) = between {
            let flow = spec
                .connections
                .iter()
                .find(|c| c.links(&a, &b))
                .and_then(|c| c.flow_type)
                .unwrap_or_default();
            spec.connections.retain(|c| !c.links(&a, &b));
            push_unique(
                &mut spec.connections,
                Connection::new(a, new_id.clone()).with_flow_type(flow),
            );
            push_unique(
                &mut spec.connections,
                Connection::new(new_id, b).with_flow_type(flow),
            );
        }
        Ok(())
    }

    /// Draws ids until one is unused by nodes and connections alike.
    fn mint_id(&mut self, spec: &Specification, component_type: &str) -> String {
        let in_use = |id: &str| {
            id.is_empty() || spec.contains_node(id) || spec.connections.iter().any(|c| c.touches(id))
        };

        let mut candidate = String::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            candidate = self.ids.generate(component_type);
            if !in_use(&candidate) {
                return candidate;
            }
        }

        // The generator keeps colliding; disambiguate its last answer.
        let base = if candidate.is_empty() {
            component_type.to_string()
        } else {
            candidate
        };
        let mut n = 2;
        loop {
            let id = format!("{}-{}", base, n);
            if !in_use(&id) {
                return id;
            }
            n += 1;
        }
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn require_known_type(operation: OperationKind, component_type: &str) -> Result<(), OperationError> {
    if catalog::is_known_type(component_type) {
        Ok(())
    } else {
        Err(OperationError::UnknownComponentType {
            operation,
            type_name: component_type.to_string(),
        })
    }
}

fn resolve_anchor(
    spec: &Specification,
    anchor: &'static str,
    target: &str,
) -> Result<String, OperationError> {
    resolve_id(&spec.nodes, target).ok_or_else(|| OperationError::AnchorNotFound {
        anchor,
        target: target.to_string(),
    })
}

fn remove(spec: &mut Specification, target: &str) -> Result<(), OperationError> {
    let index = resolve_index(&spec.nodes, target).ok_or_else(|| OperationError::NodeNotFound {
        operation: OperationKind::Remove,
        target: target.to_string(),
    })?;
    let removed = spec.nodes.remove(index);
    spec.connections.retain(|c| !c.touches(&removed.id));
    Ok(())
}

fn modify(spec: &mut Specification, target: &str, data: &ModifyData) -> Result<(), OperationError> {
    let index = resolve_index(&spec.nodes, target).ok_or_else(|| OperationError::NodeNotFound {
        operation: OperationKind::Modify,
        target: target.to_string(),
    })?;
    let node = &mut spec.nodes[index];
    if let Some(label) = &data.label {
        node.label = label.clone();
    }
    if let Some(description) = &data.description {
        node.description = Some(description.clone());
    }
    if let Some(tier) = data.tier {
        node.tier = Some(tier);
    }
    Ok(())
}

fn connect(spec: &mut Specification, data: &ConnectData) -> Result<(), OperationError> {
    let source = resolve_id(&spec.nodes, &data.source)
        .ok_or_else(|| OperationError::SourceNotFound(data.source.clone()))?;
    let target = resolve_id(&spec.nodes, &data.target)
        .ok_or_else(|| OperationError::TargetNotFound(data.target.clone()))?;

    let connection = Connection {
        source,
        target,
        flow_type: Some(data.flow_type.unwrap_or_default()),
        label: data.label.clone(),
    };
    if !push_unique(&mut spec.connections, connection) {
        tracing::debug!(source = %data.source, target = %data.target, "connection already present");
    }
    Ok(())
}

/// Removes matching connections by value first, so stale connections whose nodes are
/// gone can still be cleaned up; falls back to resolved node ids. Never fails.
fn disconnect(spec: &mut Specification, data: &DisconnectData) {
    let before = spec.connections.len();
    spec.connections.retain(|c| !c.links(&data.source, &data.target));
    if spec.connections.len() != before {
        return;
    }

    if let (Some(source), Some(target)) = (
        resolve_id(&spec.nodes, &data.source),
        resolve_id(&spec.nodes, &data.target),
    ) {
        spec.connections.retain(|c| !c.links(&source, &target));
    }

    if spec.connections.len() == before {
        tracing::debug!(source = %data.source, target = %data.target, "no connection to remove");
    }
}
