//! Manager for property indices
//!
//! Handles creation, maintenance and lookup of the per-label key indexes
//! requested by `CREATE INDEX` statements.

use super::property_index::PropertyIndex;
use crate::graph::{Label, NodeId, PropertyValue};
use std::collections::HashMap;

/// Key for identifying a property index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyIndexKey {
    pub label: Label,
    pub property: String,
}

impl PropertyIndexKey {
    fn new(label: &Label, property: &str) -> Self {
        Self {
            label: label.clone(),
            property: property.to_string(),
        }
    }
}

/// Manager for all property indices.
///
/// Owned by the `GraphStore`; the store's own lock serializes access.
#[derive(Debug, Default)]
pub struct IndexManager {
    indices: HashMap<PropertyIndexKey, PropertyIndex>,
}

impl IndexManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index for a label and property. Returns false if it already existed.
    pub fn create_index(&mut self, label: &Label, property: &str) -> bool {
        let key = PropertyIndexKey::new(label, property);
        if self.indices.contains_key(&key) {
            return false;
        }
        self.indices.insert(key, PropertyIndex::new());
        true
    }

    pub fn has_index(&self, label: &Label, property: &str) -> bool {
        self.indices.contains_key(&PropertyIndexKey::new(label, property))
    }

    pub fn get_index(&self, label: &Label, property: &str) -> Option<&PropertyIndex> {
        self.indices.get(&PropertyIndexKey::new(label, property))
    }

    /// Update index when a node property is set
    pub fn index_insert(&mut self, label: &Label, property: &str, value: &PropertyValue, node_id: NodeId) {
        if let Some(index) = self.indices.get_mut(&PropertyIndexKey::new(label, property)) {
            index.insert(value, node_id);
        }
    }

    /// Update index when a node property is removed or replaced
    pub fn index_remove(&mut self, label: &Label, property: &str, value: &PropertyValue, node_id: NodeId) {
        if let Some(index) = self.indices.get_mut(&PropertyIndexKey::new(label, property)) {
            index.remove(value, node_id);
        }
    }

    /// Drop all indexed entries but keep the index definitions
    pub fn clear_entries(&mut self) {
        for index in self.indices.values_mut() {
            index.clear();
        }
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_idempotent() {
        let mut manager = IndexManager::new();
        let label = Label::new("Patient");
        assert!(manager.create_index(&label, "name"));
        assert!(!manager.create_index(&label, "name"));
        assert!(manager.has_index(&label, "name"));
        assert!(!manager.has_index(&label, "age"));
        assert_eq!(manager.index_count(), 1);
    }

    #[test]
    fn test_clear_entries_keeps_definitions() {
        let mut manager = IndexManager::new();
        let label = Label::new("Symptom");
        manager.create_index(&label, "type");
        manager.index_insert(&label, "type", &"Fever".into(), NodeId::new(1));
        assert_eq!(manager.get_index(&label, "type").map(|i| i.len()), Some(1));

        manager.clear_entries();
        assert!(manager.has_index(&label, "type"));
        assert_eq!(manager.get_index(&label, "type").map(|i| i.len()), Some(0));
    }
}
