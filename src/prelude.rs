//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! infraflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use infraflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let spec = Specification::from_json(&std::fs::read_to_string("path/to/spec.json")?)?;
//! let operations = Operation::batch_from_json(&std::fs::read_to_string("path/to/ops.json")?)?;
//!
//! let result = apply_operations(&spec, &operations);
//! let flow = spec_to_flow(&result.new_spec, &LayoutConfig::default());
//! println!("{} nodes, {} edges", flow.nodes.len(), flow.edges.len());
//! # Ok(())
//! # }
//! ```

// Data model
pub use crate::spec::{Connection, FlowType, Node, Specification, Tier};

// Detection
pub use crate::catalog::Category;
pub use crate::detect::{CacheStats, CommandType, Pattern, PatternCache, PatternDetector};
pub use crate::draft::draft_specification;

// Diff application
pub use crate::diff::{
    AddData, ApplyResult, ConnectData, DiffEngine, DisconnectData, IdGenerator, ModifyData,
    Operation, RandomIdGenerator, ReplaceData, SequentialIdGenerator, apply_operations,
};

// Layout
pub use crate::layout::{
    FlowGraph, LayoutConfig, Position, PositionedNode, RenderEdge, relayout_nodes, spec_to_flow,
};

// Error types
pub use crate::error::{LayoutConfigError, OperationError, SpecError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
