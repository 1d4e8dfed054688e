//! Domain model: the five entity kinds, the closed set of relationship
//! types, and the shaped rows the recommendation match produces.

use crate::graph::{PropertyMap, PropertyValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    #[error("Unknown relationship type: {0}")]
    UnknownRelationship(String),

    #[error("Unknown severity: {0}")]
    UnknownSeverity(String),
}

/// Node labels used by the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Patient,
    Symptom,
    Treatment,
    Doctor,
    Hospital,
}

impl EntityLabel {
    pub const ALL: [EntityLabel; 5] = [
        EntityLabel::Patient,
        EntityLabel::Symptom,
        EntityLabel::Treatment,
        EntityLabel::Doctor,
        EntityLabel::Hospital,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Patient => "Patient",
            EntityLabel::Symptom => "Symptom",
            EntityLabel::Treatment => "Treatment",
            EntityLabel::Doctor => "Doctor",
            EntityLabel::Hospital => "Hospital",
        }
    }

    /// The identifying property (unique by convention, never enforced)
    pub fn key_property(&self) -> &'static str {
        match self {
            EntityLabel::Symptom => "type",
            _ => "name",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
            Severity::High => "High",
        }
    }
}

impl FromStr for Severity {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mild" => Ok(Severity::Mild),
            "Moderate" => Ok(Severity::Moderate),
            "Severe" => Ok(Severity::Severe),
            "High" => Ok(Severity::High),
            other => Err(ModelError::UnknownSeverity(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub age: i64,
    pub gender: String,
}

impl Patient {
    pub fn new(name: impl Into<String>, age: i64, gender: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            gender: gender.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    #[serde(rename = "type")]
    pub symptom_type: String,
    pub severity: Severity,
}

impl Symptom {
    pub fn new(symptom_type: impl Into<String>, severity: Severity) -> Self {
        Self {
            symptom_type: symptom_type.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub name: String,
    pub dosage: String,
    pub side_effects: String,
}

impl Treatment {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        side_effects: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            side_effects: side_effects.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub specialty: String,
}

impl Doctor {
    pub fn new(name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialty: specialty.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    pub location: String,
}

impl Hospital {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// Any node the schema knows how to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Patient(Patient),
    Symptom(Symptom),
    Treatment(Treatment),
    Doctor(Doctor),
    Hospital(Hospital),
}

impl Entity {
    pub fn label(&self) -> EntityLabel {
        match self {
            Entity::Patient(_) => EntityLabel::Patient,
            Entity::Symptom(_) => EntityLabel::Symptom,
            Entity::Treatment(_) => EntityLabel::Treatment,
            Entity::Doctor(_) => EntityLabel::Doctor,
            Entity::Hospital(_) => EntityLabel::Hospital,
        }
    }

    /// Value of the identifying property
    pub fn key(&self) -> &str {
        match self {
            Entity::Patient(p) => &p.name,
            Entity::Symptom(s) => &s.symptom_type,
            Entity::Treatment(t) => &t.name,
            Entity::Doctor(d) => &d.name,
            Entity::Hospital(h) => &h.name,
        }
    }

    /// Node properties, keyed by their graph property names
    pub fn properties(&self) -> PropertyMap {
        let pairs: Vec<(&str, PropertyValue)> = match self {
            Entity::Patient(p) => vec![
                ("name", p.name.as_str().into()),
                ("age", p.age.into()),
                ("gender", p.gender.as_str().into()),
            ],
            Entity::Symptom(s) => vec![
                ("type", s.symptom_type.as_str().into()),
                ("severity", s.severity.as_str().into()),
            ],
            Entity::Treatment(t) => vec![
                ("name", t.name.as_str().into()),
                ("dosage", t.dosage.as_str().into()),
                ("side_effects", t.side_effects.as_str().into()),
            ],
            Entity::Doctor(d) => vec![
                ("name", d.name.as_str().into()),
                ("specialty", d.specialty.as_str().into()),
            ],
            Entity::Hospital(h) => vec![
                ("name", h.name.as_str().into()),
                ("location", h.location.as_str().into()),
            ],
        };
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

impl From<Patient> for Entity {
    fn from(p: Patient) -> Self {
        Entity::Patient(p)
    }
}

impl From<Symptom> for Entity {
    fn from(s: Symptom) -> Self {
        Entity::Symptom(s)
    }
}

impl From<Treatment> for Entity {
    fn from(t: Treatment) -> Self {
        Entity::Treatment(t)
    }
}

impl From<Doctor> for Entity {
    fn from(d: Doctor) -> Self {
        Entity::Doctor(d)
    }
}

impl From<Hospital> for Entity {
    fn from(h: Hospital) -> Self {
        Entity::Hospital(h)
    }
}

/// The closed set of relationship types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    HasSymptom,
    RecommendedFor,
    Consulted,
    WorksAt,
}

impl RelationshipKind {
    pub const ALL: [RelationshipKind; 4] = [
        RelationshipKind::HasSymptom,
        RelationshipKind::RecommendedFor,
        RelationshipKind::Consulted,
        RelationshipKind::WorksAt,
    ];

    /// Wire name as it appears in query text
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::HasSymptom => "HAS_SYMPTOM",
            RelationshipKind::RecommendedFor => "RECOMMENDED_FOR",
            RelationshipKind::Consulted => "CONSULTED",
            RelationshipKind::WorksAt => "WORKS_AT",
        }
    }

    pub fn source_label(&self) -> EntityLabel {
        match self {
            RelationshipKind::HasSymptom | RelationshipKind::Consulted => EntityLabel::Patient,
            RelationshipKind::RecommendedFor => EntityLabel::Treatment,
            RelationshipKind::WorksAt => EntityLabel::Doctor,
        }
    }

    pub fn target_label(&self) -> EntityLabel {
        match self {
            RelationshipKind::HasSymptom | RelationshipKind::RecommendedFor => EntityLabel::Symptom,
            RelationshipKind::Consulted => EntityLabel::Doctor,
            RelationshipKind::WorksAt => EntityLabel::Hospital,
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationshipKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownRelationship(s.to_string()))
    }
}

/// A `(sourceKey, targetKey, relationshipType)` triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
}

impl Relationship {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }

    /// Build from a triple whose type arrives as text; only the closed set is accepted
    pub fn from_triple(source: &str, target: &str, kind: &str) -> Result<Self, ModelError> {
        Ok(Self::new(source, target, kind.parse()?))
    }
}

/// One row of the recommendation match, grouped by treatment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentMatch {
    pub name: String,
    pub dosage: String,
    pub side_effects: String,
    /// Matched symptom types; order carries no meaning
    pub symptoms: Vec<String>,
    /// `None` when the patient has no consulted doctor with a hospital
    pub doctor: Option<String>,
    pub hospital: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_kind_parsing_is_closed() {
        for kind in RelationshipKind::ALL {
            assert_eq!(kind.as_str().parse::<RelationshipKind>(), Ok(kind));
        }
        assert_eq!(
            "KNOWS".parse::<RelationshipKind>(),
            Err(ModelError::UnknownRelationship("KNOWS".to_string()))
        );
        // wire names are case sensitive
        assert!("has_symptom".parse::<RelationshipKind>().is_err());
    }

    #[test]
    fn test_relationship_endpoints() {
        assert_eq!(RelationshipKind::HasSymptom.source_label(), EntityLabel::Patient);
        assert_eq!(RelationshipKind::RecommendedFor.source_label(), EntityLabel::Treatment);
        assert_eq!(RelationshipKind::RecommendedFor.target_label(), EntityLabel::Symptom);
        assert_eq!(RelationshipKind::WorksAt.target_label(), EntityLabel::Hospital);
    }

    #[test]
    fn test_from_triple() {
        let rel = Relationship::from_triple("Rohit", "Fever", "HAS_SYMPTOM").unwrap();
        assert_eq!(rel, Relationship::new("Rohit", "Fever", RelationshipKind::HasSymptom));
        assert!(Relationship::from_triple("Rohit", "Fever", "$rel_type").is_err());
    }

    #[test]
    fn test_entity_properties() {
        let entity = Entity::from(Symptom::new("Fever", Severity::Mild));
        assert_eq!(entity.label(), EntityLabel::Symptom);
        assert_eq!(entity.key(), "Fever");
        let props = entity.properties();
        assert_eq!(props.get("type"), Some(&PropertyValue::from("Fever")));
        assert_eq!(props.get("severity"), Some(&PropertyValue::from("Mild")));

        let patient = Entity::from(Patient::new("Rohit", 25, "Male")).properties();
        assert_eq!(patient.get("age"), Some(&PropertyValue::Integer(25)));
    }

    #[test]
    fn test_severity_round_trip_names() {
        assert_eq!("High".parse::<Severity>(), Ok(Severity::High));
        assert!("Critical".parse::<Severity>().is_err());
        assert_eq!(EntityLabel::Symptom.key_property(), "type");
        assert_eq!(EntityLabel::Doctor.key_property(), "name");
    }
}
