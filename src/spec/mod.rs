//! The specification graph: nodes, connections, and their JSON form.

pub mod model;
mod validate;

pub use model::*;
