//! EmbeddedClient: in-process graph store client
//!
//! Applies the typed write statements directly to a `GraphStore` and
//! evaluates the recommendation match by traversal, with the same
//! semantics as the Cypher the Bolt client sends.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{check_batch, ClientResult, GraphClient, StoreStatus};
use crate::cypher::Statement;
use crate::graph::{EdgeType, GraphStore, Label, Node, NodeId, PropertyValue};
use crate::model::{EntityLabel, Patient, Relationship, RelationshipKind, TreatmentMatch};

/// In-process client wrapping a `GraphStore`.
///
/// The write lock plays the part of a write transaction and the read lock
/// that of a read transaction; both guards drop on every exit path.
#[derive(Clone)]
pub struct EmbeddedClient {
    store: Arc<RwLock<GraphStore>>,
}

impl EmbeddedClient {
    /// Create a client over a fresh empty store
    pub fn new() -> Self {
        Self::with_store(Arc::new(RwLock::new(GraphStore::new())))
    }

    /// Create a client sharing an existing store
    pub fn with_store(store: Arc<RwLock<GraphStore>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<RwLock<GraphStore>> {
        &self.store
    }
}

impl Default for EmbeddedClient {
    fn default() -> Self {
        Self::new()
    }
}

fn label(entity: EntityLabel) -> Label {
    Label::new(entity.as_str())
}

fn edge_type(kind: RelationshipKind) -> EdgeType {
    EdgeType::new(kind.as_str())
}

fn text(node: &Node, key: &str) -> String {
    node.get_str(key).unwrap_or_default().to_string()
}

/// Nodes of `entity` whose key property equals `key`
fn find_by_key<'a>(store: &'a GraphStore, entity: EntityLabel, key: &str) -> Vec<&'a Node> {
    store.find_nodes(
        &label(entity),
        entity.key_property(),
        &PropertyValue::from(key),
    )
}

fn apply(store: &mut GraphStore, statement: &Statement) -> ClientResult<()> {
    match statement {
        Statement::ClearGraph => store.clear(),
        Statement::CreateIndex(entity) => {
            if store.create_index(&label(*entity), entity.key_property()) {
                debug!(label = entity.as_str(), "Created index");
            }
        }
        Statement::Create(entity) => {
            store.create_node(label(entity.label()), entity.properties());
        }
        Statement::Relate(rel) => relate(store, rel)?,
        Statement::UpsertPatient(patient) => upsert_patient(store, patient)?,
    }
    Ok(())
}

/// MATCH both endpoints then CREATE: one edge per matching pair, none when
/// either side is missing.
fn relate(store: &mut GraphStore, rel: &Relationship) -> ClientResult<()> {
    let sources: Vec<NodeId> = find_by_key(store, rel.kind.source_label(), &rel.source)
        .into_iter()
        .map(|n| n.id)
        .collect();
    let targets: Vec<NodeId> = find_by_key(store, rel.kind.target_label(), &rel.target)
        .into_iter()
        .map(|n| n.id)
        .collect();

    if sources.is_empty() || targets.is_empty() {
        debug!(source = %rel.source, target = %rel.target, kind = %rel.kind, "Endpoint missing, nothing created");
    }
    for source in &sources {
        for target in &targets {
            store.create_edge(*source, *target, edge_type(rel.kind))?;
        }
    }
    Ok(())
}

/// MERGE on name, then SET age and gender on every match
fn upsert_patient(store: &mut GraphStore, patient: &Patient) -> ClientResult<()> {
    let existing: Vec<NodeId> = find_by_key(store, EntityLabel::Patient, &patient.name)
        .into_iter()
        .map(|n| n.id)
        .collect();

    if existing.is_empty() {
        let properties = crate::model::Entity::Patient(patient.clone()).properties();
        store.create_node(label(EntityLabel::Patient), properties);
        return Ok(());
    }
    for id in existing {
        store.set_node_property(id, "age", patient.age)?;
        store.set_node_property(id, "gender", patient.gender.as_str())?;
    }
    Ok(())
}

/// (doctor, hospital) pairs reachable by CONSULTED then WORKS_AT.
/// A single (None, None) when no complete path exists.
fn consultations(store: &GraphStore, patient: NodeId) -> Vec<(Option<String>, Option<String>)> {
    let mut pairs = Vec::new();
    for doctor in store.out_neighbors(
        patient,
        &edge_type(RelationshipKind::Consulted),
        &label(EntityLabel::Doctor),
    ) {
        for hospital in store.out_neighbors(
            doctor.id,
            &edge_type(RelationshipKind::WorksAt),
            &label(EntityLabel::Hospital),
        ) {
            pairs.push((
                doctor.get_str("name").map(str::to_string),
                hospital.get_str("name").map(str::to_string),
            ));
        }
    }
    if pairs.is_empty() {
        pairs.push((None, None));
    }
    pairs
}

type GroupKey = (String, String, String, Option<String>, Option<String>);

fn match_treatments(store: &GraphStore, patient: &str) -> Vec<TreatmentMatch> {
    let has_symptom = edge_type(RelationshipKind::HasSymptom);
    let recommended_for = edge_type(RelationshipKind::RecommendedFor);
    let symptom_label = label(EntityLabel::Symptom);
    let treatment_label = label(EntityLabel::Treatment);

    // grouping keys are every non-aggregated column, in first-seen order
    let mut groups: IndexMap<GroupKey, Vec<String>> = IndexMap::new();

    for p in find_by_key(store, EntityLabel::Patient, patient) {
        let pairs = consultations(store, p.id);
        for symptom in store.out_neighbors(p.id, &has_symptom, &symptom_label) {
            for treatment in store.in_neighbors(symptom.id, &recommended_for, &treatment_label) {
                for (doctor, hospital) in &pairs {
                    let key = (
                        text(treatment, "name"),
                        text(treatment, "dosage"),
                        text(treatment, "side_effects"),
                        doctor.clone(),
                        hospital.clone(),
                    );
                    let collected = groups.entry(key).or_default();
                    // collect() skips nulls
                    if let Some(symptom_type) = symptom.get_str("type") {
                        collected.push(symptom_type.to_string());
                    }
                }
            }
        }
    }

    groups
        .into_iter()
        .map(|((name, dosage, side_effects, doctor, hospital), symptoms)| TreatmentMatch {
            name,
            dosage,
            side_effects,
            symptoms,
            doctor,
            hospital,
        })
        .collect()
}

#[async_trait]
impl GraphClient for EmbeddedClient {
    async fn execute_write(&self, statements: &[Statement]) -> ClientResult<()> {
        check_batch(statements)?;
        let mut store = self.store.write().await;
        for statement in statements {
            apply(&mut store, statement)?;
        }
        debug!(count = statements.len(), "Applied write statements");
        Ok(())
    }

    async fn treatment_matches(&self, patient: &str) -> ClientResult<Vec<TreatmentMatch>> {
        let store = self.store.read().await;
        Ok(match_treatments(&store, patient))
    }

    async fn find_patients(&self, name: &str) -> ClientResult<Vec<Patient>> {
        let store = self.store.read().await;
        Ok(find_by_key(&store, EntityLabel::Patient, name)
            .into_iter()
            .map(|node| Patient {
                name: text(node, "name"),
                age: node.get_integer("age").unwrap_or_default(),
                gender: text(node, "gender"),
            })
            .collect())
    }

    async fn count_nodes(&self, entity: EntityLabel) -> ClientResult<u64> {
        let store = self.store.read().await;
        Ok(store.label_count(&label(entity)) as u64)
    }

    async fn count_relationships(&self, kind: RelationshipKind) -> ClientResult<u64> {
        let store = self.store.read().await;
        Ok(store.edge_type_count(&edge_type(kind)) as u64)
    }

    async fn status(&self) -> ClientResult<StoreStatus> {
        let store = self.store.read().await;
        Ok(StoreStatus {
            backend: "embedded".to_string(),
            node_count: store.node_count() as u64,
            relationship_count: store.edge_count() as u64,
        })
    }

    async fn ping(&self) -> ClientResult<String> {
        Ok("PONG".to_string())
    }
}
