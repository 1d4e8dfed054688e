//! Cypher text for every statement and read the system issues
//!
//! Labels and relationship types are always part of the static query text,
//! chosen by matching on the statement. Parameters carry literal values only.

use crate::graph::PropertyValue;
use crate::model::{Entity, EntityLabel, Patient, Relationship, RelationshipKind};

/// Graph match + shape for one patient. Grouping keys are every
/// non-aggregated column.
pub const RECOMMENDATION_QUERY: &str = "\
MATCH (p:Patient {name: $patient_name})-[:HAS_SYMPTOM]->(s:Symptom)<-[:RECOMMENDED_FOR]-(t:Treatment)
OPTIONAL MATCH (p)-[:CONSULTED]->(d:Doctor)-[:WORKS_AT]->(h:Hospital)
RETURN t.name AS name, t.dosage AS dosage, t.side_effects AS side_effects,
       collect(s.type) AS symptoms, d.name AS doctor, h.name AS hospital";

pub const FIND_PATIENTS_QUERY: &str =
    "MATCH (p:Patient {name: $name}) RETURN p.name AS name, p.age AS age, p.gender AS gender";

pub const COUNT_ALL_NODES_QUERY: &str = "MATCH (n) RETURN count(n) AS count";

pub const COUNT_ALL_RELATIONSHIPS_QUERY: &str = "MATCH ()-[r]->() RETURN count(r) AS count";

pub const PING_QUERY: &str = "RETURN 'PONG' AS pong";

/// Query text plus its named parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CypherQuery {
    pub text: &'static str,
    pub params: Vec<(&'static str, PropertyValue)>,
}

impl CypherQuery {
    pub fn new(text: &'static str) -> Self {
        Self {
            text,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &'static str, value: impl Into<PropertyValue>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    pub fn get_param(&self, key: &str) -> Option<&PropertyValue> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

/// One typed write operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `MATCH (n) DETACH DELETE n`
    ClearGraph,
    /// Single-property index on the label's key property, if absent
    CreateIndex(EntityLabel),
    Create(Entity),
    /// Pattern-match both endpoints by key, then create the edge
    Relate(Relationship),
    /// Match-or-create by name, then overwrite age and gender
    UpsertPatient(Patient),
}

impl Statement {
    pub fn to_cypher(&self) -> CypherQuery {
        match self {
            Statement::ClearGraph => CypherQuery::new("MATCH (n) DETACH DELETE n"),
            Statement::CreateIndex(label) => CypherQuery::new(create_index_text(*label)),
            Statement::Create(entity) => create_query(entity),
            Statement::Relate(rel) => CypherQuery::new(relate_text(rel.kind))
                .param("source", rel.source.as_str())
                .param("target", rel.target.as_str()),
            Statement::UpsertPatient(p) => CypherQuery::new(
                "MERGE (p:Patient {name: $name}) SET p.age = $age, p.gender = $gender",
            )
            .param("name", p.name.as_str())
            .param("age", p.age)
            .param("gender", p.gender.as_str()),
        }
    }

    /// Schema statements cannot share a transaction with data writes
    pub fn is_schema(&self) -> bool {
        matches!(self, Statement::CreateIndex(_))
    }
}

fn create_index_text(label: EntityLabel) -> &'static str {
    match label {
        EntityLabel::Patient => "CREATE INDEX IF NOT EXISTS FOR (p:Patient) ON (p.name)",
        EntityLabel::Symptom => "CREATE INDEX IF NOT EXISTS FOR (s:Symptom) ON (s.type)",
        EntityLabel::Treatment => "CREATE INDEX IF NOT EXISTS FOR (t:Treatment) ON (t.name)",
        EntityLabel::Doctor => "CREATE INDEX IF NOT EXISTS FOR (d:Doctor) ON (d.name)",
        EntityLabel::Hospital => "CREATE INDEX IF NOT EXISTS FOR (h:Hospital) ON (h.name)",
    }
}

fn create_query(entity: &Entity) -> CypherQuery {
    match entity {
        Entity::Patient(p) => {
            CypherQuery::new("CREATE (:Patient {name: $name, age: $age, gender: $gender})")
                .param("name", p.name.as_str())
                .param("age", p.age)
                .param("gender", p.gender.as_str())
        }
        Entity::Symptom(s) => CypherQuery::new("CREATE (:Symptom {type: $type, severity: $severity})")
            .param("type", s.symptom_type.as_str())
            .param("severity", s.severity.as_str()),
        Entity::Treatment(t) => CypherQuery::new(
            "CREATE (:Treatment {name: $name, dosage: $dosage, side_effects: $side_effects})",
        )
        .param("name", t.name.as_str())
        .param("dosage", t.dosage.as_str())
        .param("side_effects", t.side_effects.as_str()),
        Entity::Doctor(d) => CypherQuery::new("CREATE (:Doctor {name: $name, specialty: $specialty})")
            .param("name", d.name.as_str())
            .param("specialty", d.specialty.as_str()),
        Entity::Hospital(h) => {
            CypherQuery::new("CREATE (:Hospital {name: $name, location: $location})")
                .param("name", h.name.as_str())
                .param("location", h.location.as_str())
        }
    }
}

fn relate_text(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::HasSymptom => {
            "MATCH (p:Patient {name: $source}), (s:Symptom {type: $target}) CREATE (p)-[:HAS_SYMPTOM]->(s)"
        }
        RelationshipKind::RecommendedFor => {
            "MATCH (t:Treatment {name: $source}), (s:Symptom {type: $target}) CREATE (t)-[:RECOMMENDED_FOR]->(s)"
        }
        RelationshipKind::Consulted => {
            "MATCH (p:Patient {name: $source}), (d:Doctor {name: $target}) CREATE (p)-[:CONSULTED]->(d)"
        }
        RelationshipKind::WorksAt => {
            "MATCH (d:Doctor {name: $source}), (h:Hospital {name: $target}) CREATE (d)-[:WORKS_AT]->(h)"
        }
    }
}

pub fn recommendation_query(patient: &str) -> CypherQuery {
    CypherQuery::new(RECOMMENDATION_QUERY).param("patient_name", patient)
}

pub fn find_patients_query(name: &str) -> CypherQuery {
    CypherQuery::new(FIND_PATIENTS_QUERY).param("name", name)
}

pub fn count_nodes_query(label: EntityLabel) -> CypherQuery {
    CypherQuery::new(match label {
        EntityLabel::Patient => "MATCH (n:Patient) RETURN count(n) AS count",
        EntityLabel::Symptom => "MATCH (n:Symptom) RETURN count(n) AS count",
        EntityLabel::Treatment => "MATCH (n:Treatment) RETURN count(n) AS count",
        EntityLabel::Doctor => "MATCH (n:Doctor) RETURN count(n) AS count",
        EntityLabel::Hospital => "MATCH (n:Hospital) RETURN count(n) AS count",
    })
}

pub fn count_relationships_query(kind: RelationshipKind) -> CypherQuery {
    CypherQuery::new(match kind {
        RelationshipKind::HasSymptom => "MATCH ()-[r:HAS_SYMPTOM]->() RETURN count(r) AS count",
        RelationshipKind::RecommendedFor => {
            "MATCH ()-[r:RECOMMENDED_FOR]->() RETURN count(r) AS count"
        }
        RelationshipKind::Consulted => "MATCH ()-[r:CONSULTED]->() RETURN count(r) AS count",
        RelationshipKind::WorksAt => "MATCH ()-[r:WORKS_AT]->() RETURN count(r) AS count",
    })
}
