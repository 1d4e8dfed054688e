//! Node implementation for the embedded property graph

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use std::collections::HashSet;

/// A node in the property graph
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Labels on this node (one per entity in practice)
    pub labels: HashSet<Label>,

    /// Properties associated with this node
    pub properties: PropertyMap,
}

impl Node {
    /// Create a node with a single label and no properties
    pub fn new(id: NodeId, label: impl Into<Label>) -> Self {
        let mut labels = HashSet::new();
        labels.insert(label.into());
        Node {
            id,
            labels,
            properties: PropertyMap::new(),
        }
    }

    /// Create a node with a single label and the given properties
    pub fn with_properties(id: NodeId, label: impl Into<Label>, properties: PropertyMap) -> Self {
        let mut node = Node::new(id, label);
        node.properties = properties;
        node
    }

    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Set a property, returning the previous value
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// String property, or `None` when absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get_property(key).and_then(PropertyValue::as_string)
    }

    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get_property(key).and_then(PropertyValue::as_integer)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}
