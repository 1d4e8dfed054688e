//! Embedded property graph
//!
//! The in-process stand-in for the external graph database:
//! - Nodes with labels and scalar properties
//! - Directed, typed edges without properties
//! - Label, edge-type and optional property indexes

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, EdgeType, Label, NodeId};
