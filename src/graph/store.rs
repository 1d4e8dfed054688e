//! In-memory graph storage backing the embedded client
//!
//! Arena storage indexed by id, adjacency lists in both directions, a label
//! index, an edge-type index and optional per-label property indexes.

use super::edge::Edge;
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, Label, NodeId};
use crate::index::IndexManager;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - nodes / edges: arenas indexed by id (slot 0 is always `None`)
/// - outgoing / incoming: adjacency lists per node
/// - label_index: Label -> ordered node ids
/// - edge_type_index: EdgeType -> ordered edge ids
#[derive(Debug)]
pub struct GraphStore {
    nodes: Vec<Option<Node>>,
    edges: Vec<Option<Edge>>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
    label_index: HashMap<Label, BTreeSet<NodeId>>,
    edge_type_index: HashMap<EdgeType, BTreeSet<EdgeId>>,
    property_index: IndexManager,
    next_node_id: u64,
    next_edge_id: u64,
    node_count: usize,
    edge_count: usize,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        GraphStore {
            nodes: vec![None],
            edges: vec![None],
            outgoing: vec![Vec::new()],
            incoming: vec![Vec::new()],
            label_index: HashMap::new(),
            edge_type_index: HashMap::new(),
            property_index: IndexManager::new(),
            next_node_id: 1,
            next_edge_id: 1,
            node_count: 0,
            edge_count: 0,
        }
    }

    /// Create a node with one label and its properties
    pub fn create_node(&mut self, label: impl Into<Label>, properties: PropertyMap) -> NodeId {
        let node_id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;

        let label = label.into();
        for (key, value) in &properties {
            self.property_index.index_insert(&label, key, value, node_id);
        }
        self.label_index
            .entry(label.clone())
            .or_default()
            .insert(node_id);

        self.nodes.push(Some(Node::with_properties(node_id, label, properties)));
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.node_count += 1;
        node_id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    /// Set a node property, keeping property indexes in step
    pub fn set_node_property(
        &mut self,
        id: NodeId,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<Option<PropertyValue>> {
        let value = value.into();
        let node = self
            .nodes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(GraphError::NodeNotFound(id))?;

        let old = node.set_property(key, value.clone());
        for label in &node.labels {
            if let Some(old_value) = &old {
                self.property_index.index_remove(label, key, old_value, id);
            }
            self.property_index.index_insert(label, key, &value, id);
        }
        Ok(old)
    }

    /// Create a directed edge between two existing nodes
    pub fn create_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge_type: impl Into<EdgeType>,
    ) -> GraphResult<EdgeId> {
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        let edge_id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;

        let edge = Edge::new(edge_id, source, target, edge_type);
        self.edge_type_index
            .entry(edge.edge_type.clone())
            .or_default()
            .insert(edge_id);
        self.outgoing[source.index()].push(edge_id);
        self.incoming[target.index()].push(edge_id);
        self.edges.push(Some(edge));
        self.edge_count += 1;
        Ok(edge_id)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.outgoing
            .get(node_id.index())
            .map(|ids| ids.iter().filter_map(|id| self.get_edge(*id)).collect())
            .unwrap_or_default()
    }

    pub fn get_incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.incoming
            .get(node_id.index())
            .map(|ids| ids.iter().filter_map(|id| self.get_edge(*id)).collect())
            .unwrap_or_default()
    }

    /// Follow outgoing edges of one type to nodes carrying `label`
    pub fn out_neighbors(&self, node_id: NodeId, edge_type: &EdgeType, label: &Label) -> Vec<&Node> {
        self.get_outgoing_edges(node_id)
            .into_iter()
            .filter(|edge| edge.is_type(edge_type))
            .filter_map(|edge| self.get_node(edge.target))
            .filter(|node| node.has_label(label))
            .collect()
    }

    /// Follow incoming edges of one type back to nodes carrying `label`
    pub fn in_neighbors(&self, node_id: NodeId, edge_type: &EdgeType, label: &Label) -> Vec<&Node> {
        self.get_incoming_edges(node_id)
            .into_iter()
            .filter(|edge| edge.is_type(edge_type))
            .filter_map(|edge| self.get_node(edge.source))
            .filter(|node| node.has_label(label))
            .collect()
    }

    /// All nodes with a label, in creation order
    pub fn get_nodes_by_label(&self, label: &Label) -> Vec<&Node> {
        self.label_index
            .get(label)
            .map(|ids| ids.iter().filter_map(|id| self.get_node(*id)).collect())
            .unwrap_or_default()
    }

    /// Nodes with `label` whose `property` equals `value`.
    ///
    /// Uses the property index when one exists for (label, property),
    /// otherwise scans the label.
    pub fn find_nodes(&self, label: &Label, property: &str, value: &PropertyValue) -> Vec<&Node> {
        if let Some(index) = self.property_index.get_index(label, property) {
            if crate::index::IndexKey::from_value(value).is_some() {
                return index
                    .get(value)
                    .into_iter()
                    .filter_map(|id| self.get_node(id))
                    .collect();
            }
        }
        self.get_nodes_by_label(label)
            .into_iter()
            .filter(|node| node.get_property(property) == Some(value))
            .collect()
    }

    /// Create a property index and backfill it from existing nodes.
    /// Returns false if the index already existed.
    pub fn create_index(&mut self, label: &Label, property: &str) -> bool {
        if !self.property_index.create_index(label, property) {
            return false;
        }
        let existing: Vec<(NodeId, PropertyValue)> = self
            .get_nodes_by_label(label)
            .into_iter()
            .filter_map(|node| node.get_property(property).map(|v| (node.id, v.clone())))
            .collect();
        for (id, value) in existing {
            self.property_index.index_insert(label, property, &value, id);
        }
        true
    }

    pub fn has_index(&self, label: &Label, property: &str) -> bool {
        self.property_index.has_index(label, property)
    }

    pub fn index_count(&self) -> usize {
        self.property_index.index_count()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn label_count(&self, label: &Label) -> usize {
        self.label_index.get(label).map_or(0, BTreeSet::len)
    }

    pub fn edge_type_count(&self, edge_type: &EdgeType) -> usize {
        self.edge_type_index.get(edge_type).map_or(0, BTreeSet::len)
    }

    /// Remove every node and edge. Index definitions survive, as they do
    /// for `MATCH (n) DETACH DELETE n`.
    pub fn clear(&mut self) {
        self.nodes = vec![None];
        self.edges = vec![None];
        self.outgoing = vec![Vec::new()];
        self.incoming = vec![Vec::new()];
        self.label_index.clear();
        self.edge_type_index.clear();
        self.property_index.clear_entries();
        self.next_node_id = 1;
        self.next_edge_id = 1;
        self.node_count = 0;
        self.edge_count = 0;
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, PropertyValue)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_create_and_traverse() {
        let mut store = GraphStore::new();
        let rohit = store.create_node("Patient", props(&[("name", "Rohit".into())]));
        let fever = store.create_node("Symptom", props(&[("type", "Fever".into())]));
        let paracetamol = store.create_node("Treatment", props(&[("name", "Paracetamol".into())]));

        store.create_edge(rohit, fever, "HAS_SYMPTOM").unwrap();
        store.create_edge(paracetamol, fever, "RECOMMENDED_FOR").unwrap();

        assert_eq!(store.node_count(), 3);
        assert_eq!(store.edge_count(), 2);

        let symptoms = store.out_neighbors(rohit, &"HAS_SYMPTOM".into(), &"Symptom".into());
        assert_eq!(symptoms.len(), 1);
        assert_eq!(symptoms[0].get_str("type"), Some("Fever"));

        let treatments = store.in_neighbors(fever, &"RECOMMENDED_FOR".into(), &"Treatment".into());
        assert_eq!(treatments[0].id, paracetamol);

        // wrong label filters the neighbour out
        assert!(store
            .out_neighbors(rohit, &"HAS_SYMPTOM".into(), &"Doctor".into())
            .is_empty());
    }

    #[test]
    fn test_create_edge_requires_endpoints() {
        let mut store = GraphStore::new();
        let a = store.create_node("Patient", PropertyMap::new());
        let missing = NodeId::new(99);
        assert_eq!(
            store.create_edge(a, missing, "CONSULTED"),
            Err(GraphError::InvalidEdgeTarget(missing))
        );
        assert_eq!(
            store.create_edge(missing, a, "CONSULTED"),
            Err(GraphError::InvalidEdgeSource(missing))
        );
    }

    #[test]
    fn test_find_nodes_with_and_without_index() {
        let mut store = GraphStore::new();
        let label = Label::new("Patient");
        let a = store.create_node("Patient", props(&[("name", "Aisha".into())]));
        store.create_node("Patient", props(&[("name", "Vikram".into())]));

        let scanned = store.find_nodes(&label, "name", &"Aisha".into());
        assert_eq!(scanned.len(), 1);

        assert!(store.create_index(&label, "name"));
        assert!(!store.create_index(&label, "name"));
        let indexed = store.find_nodes(&label, "name", &"Aisha".into());
        assert_eq!(indexed[0].id, a);

        store.set_node_property(a, "name", "Aisha K").unwrap();
        assert!(store.find_nodes(&label, "name", &"Aisha".into()).is_empty());
        assert_eq!(store.find_nodes(&label, "name", &"Aisha K".into()).len(), 1);
    }

    #[test]
    fn test_clear_keeps_indexes() {
        let mut store = GraphStore::new();
        let label = Label::new("Symptom");
        store.create_index(&label, "type");
        store.create_node("Symptom", props(&[("type", "Cough".into())]));

        store.clear();
        assert_eq!(store.node_count(), 0);
        assert!(store.has_index(&label, "type"));
        assert!(store.find_nodes(&label, "type", &"Cough".into()).is_empty());

        let id = store.create_node("Symptom", props(&[("type", "Cough".into())]));
        assert_eq!(id, NodeId::new(1));
        assert_eq!(store.find_nodes(&label, "type", &"Cough".into()).len(), 1);
    }

    #[test]
    fn test_clear_drops_edges_and_adjacency() {
        let mut store = GraphStore::new();
        let doctor = store.create_node("Doctor", props(&[("name", "Dr. Singh".into())]));
        let hospital = store.create_node("Hospital", props(&[("name", "City Hospital".into())]));
        store.create_edge(doctor, hospital, "WORKS_AT").unwrap();

        store.clear();
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.edge_type_count(&"WORKS_AT".into()), 0);
        assert_eq!(store.label_count(&"Doctor".into()), 0);

        // ids restart, and the old edge does not reappear on the new nodes
        let doctor = store.create_node("Doctor", PropertyMap::new());
        store.create_node("Hospital", PropertyMap::new());
        assert!(store.get_outgoing_edges(doctor).is_empty());
        assert!(store
            .out_neighbors(doctor, &"WORKS_AT".into(), &"Hospital".into())
            .is_empty());
    }
}
