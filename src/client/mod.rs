//! GraphClient trait, the single seam to the graph store
//!
//! Implemented by:
//! - `BoltClient`: a Neo4j server over Bolt
//! - `EmbeddedClient`: in-process, no network (tests, demos, offline CLI use)

pub mod bolt;
pub mod embedded;
pub mod error;

pub use bolt::BoltClient;
pub use embedded::EmbeddedClient;
pub use error::{ClientError, ClientResult};

use crate::config::{Backend, StoreConfig};
use crate::cypher::Statement;
use crate::model::{EntityLabel, Patient, RelationshipKind, TreatmentMatch};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Counts reported by `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatus {
    pub backend: String,
    pub node_count: u64,
    pub relationship_count: u64,
}

/// Unified interface over the graph store.
///
/// Every call acquires its own session and releases it before returning,
/// on success and on error alike.
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Run all statements in one write transaction
    async fn execute_write(&self, statements: &[Statement]) -> ClientResult<()>;

    /// Run the recommendation match for one patient (read transaction)
    async fn treatment_matches(&self, patient: &str) -> ClientResult<Vec<TreatmentMatch>>;

    /// Every patient node carrying this name
    async fn find_patients(&self, name: &str) -> ClientResult<Vec<Patient>>;

    async fn count_nodes(&self, label: EntityLabel) -> ClientResult<u64>;

    async fn count_relationships(&self, kind: RelationshipKind) -> ClientResult<u64>;

    async fn status(&self) -> ClientResult<StoreStatus>;

    async fn ping(&self) -> ClientResult<String>;
}

/// Index creation and data writes never share a transaction
pub(crate) fn check_batch(statements: &[Statement]) -> ClientResult<()> {
    let schema = statements.iter().filter(|s| s.is_schema()).count();
    if schema != 0 && schema != statements.len() {
        return Err(ClientError::Query(
            "schema and data statements cannot share a transaction".to_string(),
        ));
    }
    Ok(())
}

/// Build the client selected by the store configuration
pub async fn connect(config: &StoreConfig) -> ClientResult<Arc<dyn GraphClient>> {
    match config.backend {
        Backend::Bolt => Ok(Arc::new(BoltClient::connect(config).await?)),
        Backend::Embedded => {
            tracing::info!("Using embedded graph store");
            Ok(Arc::new(EmbeddedClient::new()))
        }
    }
}
