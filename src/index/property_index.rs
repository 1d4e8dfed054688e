//! B-Tree based property index for key lookups

use crate::graph::{NodeId, PropertyValue};
use std::collections::{BTreeMap, BTreeSet};

/// Indexable form of a property value.
///
/// Floats and nulls are never indexed; lookups on them fall back to a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexKey {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl IndexKey {
    pub fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::String(s) => Some(IndexKey::String(s.clone())),
            PropertyValue::Integer(i) => Some(IndexKey::Integer(*i)),
            PropertyValue::Boolean(b) => Some(IndexKey::Boolean(*b)),
            PropertyValue::Float(_) | PropertyValue::Null => None,
        }
    }
}

/// Index for a specific property on a specific label
#[derive(Debug, Clone, Default)]
pub struct PropertyIndex {
    /// Value -> set of node ids (ordered, so lookups are creation-ordered)
    index: BTreeMap<IndexKey, BTreeSet<NodeId>>,
}

impl PropertyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: &PropertyValue, node_id: NodeId) {
        if let Some(key) = IndexKey::from_value(value) {
            self.index.entry(key).or_default().insert(node_id);
        }
    }

    pub fn remove(&mut self, value: &PropertyValue, node_id: NodeId) {
        let Some(key) = IndexKey::from_value(value) else {
            return;
        };
        if let Some(nodes) = self.index.get_mut(&key) {
            nodes.remove(&node_id);
            if nodes.is_empty() {
                self.index.remove(&key);
            }
        }
    }

    pub fn get(&self, value: &PropertyValue) -> Vec<NodeId> {
        IndexKey::from_value(value)
            .and_then(|key| self.index.get(&key))
            .map(|nodes| nodes.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of distinct indexed values
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn clear(&mut self) {
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_index_ops() {
        let mut index = PropertyIndex::new();
        let n1 = NodeId::new(1);
        let n2 = NodeId::new(2);
        let val = PropertyValue::from("Rohit");

        index.insert(&val, n2);
        index.insert(&val, n1);
        assert_eq!(index.get(&val), vec![n1, n2]);

        index.remove(&val, n1);
        assert_eq!(index.get(&val), vec![n2]);

        index.remove(&val, n2);
        assert!(index.is_empty());
    }

    #[test]
    fn test_unindexable_values_are_ignored() {
        let mut index = PropertyIndex::new();
        index.insert(&PropertyValue::Float(1.5), NodeId::new(1));
        index.insert(&PropertyValue::Null, NodeId::new(2));
        assert!(index.is_empty());
        assert!(index.get(&PropertyValue::Null).is_empty());
    }
}
