//! Edge implementation for the embedded property graph
//!
//! Relationships in this schema carry no properties, so an edge is just a
//! typed, directed pair of node ids.

use super::types::{EdgeId, EdgeType, NodeId};

/// A directed edge in the property graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,

    /// Edge goes FROM this node
    pub source: NodeId,

    /// Edge goes TO this node
    pub target: NodeId,

    pub edge_type: EdgeType,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, edge_type: impl Into<EdgeType>) -> Self {
        Edge {
            id,
            source,
            target,
            edge_type: edge_type.into(),
        }
    }

    pub fn is_type(&self, edge_type: &EdgeType) -> bool {
        &self.edge_type == edge_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_direction() {
        let edge = Edge::new(EdgeId::new(1), NodeId::new(1), NodeId::new(2), "HAS_SYMPTOM");
        assert!(edge.is_type(&EdgeType::new("HAS_SYMPTOM")));
        assert!(!edge.is_type(&EdgeType::new("CONSULTED")));
        assert_eq!(edge.source, NodeId::new(1));
        assert_eq!(edge.target, NodeId::new(2));
    }
}
