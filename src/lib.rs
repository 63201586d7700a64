//! # Infraflow - Infrastructure Specification Transformation Engine
//!
//! **Infraflow** turns a free-text description of an infrastructure topology into a
//! typed component graph, applies externally proposed edits to that graph safely and
//! deterministically, and lays it out in tiers ready for a canvas renderer. Everything
//! here is a pure, in-memory transformation: no I/O, no network, no persistence.
//!
//! ## Core Workflow
//!
//! 1.  **Detect**: A [`PatternDetector`](detect::PatternDetector) maps text to component
//!     types from the bilingual (English/Korean) [`catalog`] and classifies the
//!     request intent (`create`, `add`, `remove`, `connect`, `query`).
//! 2.  **Draft**: [`draft_specification`](draft::draft_specification) builds an initial
//!     [`Specification`](spec::Specification) from the detected types.
//! 3.  **Edit**: A [`DiffEngine`](diff::DiffEngine) applies a batch of
//!     [`Operation`](diff::Operation)s (`replace`, `add`, `remove`, `modify`, `connect`,
//!     `disconnect`), never aborting on a bad operation and never leaving a dangling
//!     connection behind.
//! 4.  **Lay out**: [`spec_to_flow`](layout::spec_to_flow) assigns positions by tier
//!     and connection degree and emits render edges.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use infraflow::prelude::*;
//!
//! let detector = PatternDetector::new();
//! let mut ids = SequentialIdGenerator::new();
//!
//! // 1. Detect and draft
//! let text = "Internet users reach a firewall, then a web server backed by a database";
//! assert_eq!(detector.detect_command_type(text), CommandType::Create);
//! let spec = draft_specification(&detector, text, &mut ids);
//!
//! // 2. Apply edits proposed elsewhere
//! let operations = vec![
//!     Operation::replace("firewall", "waf"),
//!     Operation::add("cache", AddData {
//!         before_node: Some("db-server".to_string()),
//!         ..Default::default()
//!     }),
//! ];
//! let mut engine = DiffEngine::builder().with_id_generator(ids).build();
//! let result = engine.apply(&spec, &operations);
//! for error in &result.errors {
//!     eprintln!("skipped: {}", error);
//! }
//!
//! // 3. Lay out for rendering
//! let flow = spec_to_flow(&result.new_spec, &LayoutConfig::default());
//! for node in &flow.nodes {
//!     println!("{} at ({}, {})", node.id, node.position.x, node.position.y);
//! }
//! ```

pub mod catalog;
pub mod detect;
pub mod diff;
pub mod draft;
pub mod error;
pub mod layout;
pub mod prelude;
pub mod spec;
