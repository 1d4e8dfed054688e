//! Caregraph
//!
//! Graph-backed treatment recommendations: a patient's symptoms are matched
//! to treatments in a property graph, and every match is decorated with a
//! placeholder efficacy score.
//!
//! # Architecture
//!
//! - `client`: the `GraphClient` seam, with a Neo4j (Bolt) and an embedded backend
//! - `cypher`: typed write statements rendered to static Cypher text
//! - `graph` / `index`: the in-process property graph behind the embedded backend
//! - `recommend`: match, shape, score
//! - `estimator`: the efficacy classifier
//! - `seed` / `schema` / `csv_io`: data loading, indexes, CSV boundary
//! - `http`: the single-page web form
//!
//! ## Example Usage
//!
//! ```rust
//! use caregraph::client::EmbeddedClient;
//! use caregraph::estimator::{Efficacy, FixedEstimator};
//! use caregraph::{recommend_treatments, seed};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = EmbeddedClient::new();
//!     seed::create_sample_data(&client).await.unwrap();
//!
//!     let estimator = FixedEstimator::new(Efficacy::High);
//!     let recs = recommend_treatments(&client, &estimator, "Rohit").await.unwrap();
//!     assert!(recs.iter().any(|r| r.treatment.name == "Paracetamol"));
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod csv_io;
pub mod cypher;
pub mod estimator;
pub mod graph;
pub mod http;
pub mod index;
pub mod logging;
pub mod model;
pub mod recommend;
pub mod schema;
pub mod seed;

// Re-export main types for convenience
pub use client::{BoltClient, ClientError, ClientResult, EmbeddedClient, GraphClient, StoreStatus};
pub use config::{AppConfig, Backend, ConfigError};
pub use cypher::{CypherQuery, Statement};
pub use estimator::{Efficacy, EfficacyEstimator, EstimatorError, FixedEstimator, ForestEstimator};
pub use model::{
    Doctor, Entity, EntityLabel, Hospital, Patient, Relationship, RelationshipKind, Severity,
    Symptom, Treatment, TreatmentMatch,
};
pub use recommend::{recommend_treatments, RecommendError, Recommendation, Recommender};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.1.0");
    }
}
