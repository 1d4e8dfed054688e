//! BoltClient: Neo4j over the Bolt protocol

use async_trait::async_trait;
use neo4rs::{query, BoltNull, BoltType, ConfigBuilder, Graph, Query, Row};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{check_batch, ClientError, ClientResult, GraphClient, StoreStatus};
use crate::config::StoreConfig;
use crate::cypher::{self, CypherQuery, Statement};
use crate::graph::PropertyValue;
use crate::model::{EntityLabel, Patient, RelationshipKind, TreatmentMatch};

/// Client for a Neo4j server
pub struct BoltClient {
    graph: Arc<Graph>,
    uri: String,
}

impl BoltClient {
    /// Connect and verify the server answers
    pub async fn connect(config: &StoreConfig) -> ClientResult<Self> {
        let mut builder = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .max_connections(config.max_connections);
        if let Some(db) = &config.database {
            builder = builder.db(db.as_str());
        }
        let neo_config = builder
            .build()
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config).await.map_err(client_error)?;
        let client = Self {
            graph: Arc::new(graph),
            uri: config.uri.clone(),
        };
        client.ping().await?;
        info!(uri = %client.uri, "Connected to Neo4j");
        Ok(client)
    }

    async fn fetch(&self, q: &CypherQuery) -> ClientResult<Vec<Row>> {
        let mut result = self.graph.execute(to_bolt(q)).await.map_err(client_error)?;
        let mut rows = Vec::new();
        while let Some(row) = result.next().await.map_err(client_error)? {
            rows.push(row);
        }
        Ok(rows)
    }

    async fn fetch_count(&self, q: &CypherQuery) -> ClientResult<u64> {
        let rows = self.fetch(q).await?;
        match rows.first() {
            Some(row) => Ok(get::<i64>(row, "count")?.max(0) as u64),
            None => Ok(0),
        }
    }
}

/// Connectivity failures are reported apart from statement failures
fn client_error(e: neo4rs::Error) -> ClientError {
    match &e {
        neo4rs::Error::IOError { .. }
        | neo4rs::Error::ConnectionError
        | neo4rs::Error::AuthenticationError(_) => ClientError::Connection(e.to_string()),
        _ => ClientError::Query(e.to_string()),
    }
}

fn bolt_value(value: &PropertyValue) -> BoltType {
    match value {
        PropertyValue::String(s) => s.clone().into(),
        PropertyValue::Integer(i) => (*i).into(),
        PropertyValue::Float(f) => (*f).into(),
        PropertyValue::Boolean(b) => (*b).into(),
        PropertyValue::Null => BoltType::Null(BoltNull),
    }
}

fn to_bolt(q: &CypherQuery) -> Query {
    q.params
        .iter()
        .fold(query(q.text), |acc, (key, value)| acc.param(key, bolt_value(value)))
}

fn get<'a, T: serde::Deserialize<'a>>(row: &'a Row, column: &str) -> ClientResult<T> {
    row.get::<T>(column)
        .map_err(|e| ClientError::Decode(format!("{}: {}", column, e)))
}

fn row_to_match(row: &Row) -> ClientResult<TreatmentMatch> {
    Ok(TreatmentMatch {
        name: get(row, "name")?,
        dosage: get(row, "dosage")?,
        side_effects: get(row, "side_effects")?,
        symptoms: get(row, "symptoms")?,
        doctor: get(row, "doctor")?,
        hospital: get(row, "hospital")?,
    })
}

#[async_trait]
impl GraphClient for BoltClient {
    async fn execute_write(&self, statements: &[Statement]) -> ClientResult<()> {
        check_batch(statements)?;
        let mut txn = self.graph.start_txn().await.map_err(client_error)?;
        for statement in statements {
            let q = statement.to_cypher();
            debug!(cypher = q.text, "Running statement");
            if let Err(e) = txn.run(to_bolt(&q)).await {
                warn!(error = %e, "Statement failed, rolling back");
                if let Err(rollback) = txn.rollback().await {
                    warn!(error = %rollback, "Rollback failed");
                }
                return Err(client_error(e));
            }
        }
        txn.commit().await.map_err(client_error)
    }

    async fn treatment_matches(&self, patient: &str) -> ClientResult<Vec<TreatmentMatch>> {
        let rows = self.fetch(&cypher::recommendation_query(patient)).await?;
        rows.iter().map(row_to_match).collect()
    }

    async fn find_patients(&self, name: &str) -> ClientResult<Vec<Patient>> {
        let rows = self.fetch(&cypher::find_patients_query(name)).await?;
        rows.iter()
            .map(|row| {
                Ok(Patient {
                    name: get(row, "name")?,
                    age: get(row, "age")?,
                    gender: get(row, "gender")?,
                })
            })
            .collect()
    }

    async fn count_nodes(&self, label: EntityLabel) -> ClientResult<u64> {
        self.fetch_count(&cypher::count_nodes_query(label)).await
    }

    async fn count_relationships(&self, kind: RelationshipKind) -> ClientResult<u64> {
        self.fetch_count(&cypher::count_relationships_query(kind)).await
    }

    async fn status(&self) -> ClientResult<StoreStatus> {
        let node_count = self
            .fetch_count(&CypherQuery::new(cypher::COUNT_ALL_NODES_QUERY))
            .await?;
        let relationship_count = self
            .fetch_count(&CypherQuery::new(cypher::COUNT_ALL_RELATIONSHIPS_QUERY))
            .await?;
        Ok(StoreStatus {
            backend: format!("bolt ({})", self.uri),
            node_count,
            relationship_count,
        })
    }

    async fn ping(&self) -> ClientResult<String> {
        let rows = self.fetch(&CypherQuery::new(cypher::PING_QUERY)).await?;
        match rows.first() {
            Some(row) => get(row, "pong"),
            None => Err(ClientError::Decode("empty ping response".to_string())),
        }
    }
}
