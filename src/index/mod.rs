//! Property indexing for the embedded graph
//!
//! Provides B-Tree indices for key property lookups.

pub mod manager;
pub mod property_index;

pub use manager::{IndexManager, PropertyIndexKey};
pub use property_index::{IndexKey, PropertyIndex};
