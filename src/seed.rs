//! Sample data loader
//!
//! Wipes the graph, then writes the fixed catalogs and relationship triples.
//! Each phase is its own write transaction; a failure part way through
//! leaves the earlier phases in place.

use crate::client::{ClientResult, GraphClient};
use crate::cypher::Statement;
use crate::model::{
    Doctor, Entity, Hospital, Patient, Relationship, RelationshipKind, Severity, Symptom, Treatment,
};
use serde::Serialize;
use tracing::{debug, info};

const PATIENTS: [(&str, i64, &str); 24] = [
    ("Rohit", 25, "Male"),
    ("Aisha", 30, "Female"),
    ("Vikram", 45, "Male"),
    ("Priya", 28, "Female"),
    ("Sanjay", 35, "Male"),
    ("Neha", 22, "Female"),
    ("Amit", 40, "Male"),
    ("Riya", 32, "Female"),
    ("Karan", 29, "Male"),
    ("Sneha", 26, "Female"),
    ("Rahul", 50, "Male"),
    ("Pooja", 31, "Female"),
    ("Arjun", 27, "Male"),
    ("Meera", 33, "Female"),
    ("Vivek", 38, "Male"),
    ("Anjali", 24, "Female"),
    ("Deepak", 42, "Male"),
    ("Kavya", 29, "Female"),
    ("Tarun", 36, "Male"),
    ("Shreya", 23, "Female"),
    ("Nikhil", 47, "Male"),
    ("Divya", 34, "Female"),
    ("Manish", 39, "Male"),
    ("Tanya", 25, "Female"),
];

const SYMPTOMS: [(&str, Severity); 24] = [
    ("Fever", Severity::Mild),
    ("Cough", Severity::Severe),
    ("Headache", Severity::Moderate),
    ("Fatigue", Severity::High),
    ("Nausea", Severity::Mild),
    ("Sore Throat", Severity::Moderate),
    ("Dizziness", Severity::Severe),
    ("Chest Pain", Severity::High),
    ("Shortness of Breath", Severity::Moderate),
    ("Joint Pain", Severity::Mild),
    ("Rash", Severity::Severe),
    ("Vomiting", Severity::High),
    ("Diarrhea", Severity::Moderate),
    ("Abdominal Pain", Severity::Mild),
    ("Loss of Appetite", Severity::Severe),
    ("Muscle Ache", Severity::High),
    ("Chills", Severity::Moderate),
    ("Sweating", Severity::Mild),
    ("Insomnia", Severity::Severe),
    ("Anxiety", Severity::High),
    ("Depression", Severity::Moderate),
    ("Blurred Vision", Severity::Mild),
    ("Hearing Loss", Severity::Severe),
    ("Tinnitus", Severity::High),
];

const TREATMENTS: [(&str, &str, &str); 24] = [
    ("Paracetamol", "500mg", "None"),
    ("Cough Syrup", "10ml", "Drowsiness"),
    ("Hydration", "2L daily", "None"),
    ("Antibiotics", "250mg", "Nausea"),
    ("Ibuprofen", "400mg", "Stomach upset"),
    ("Antihistamine", "10mg", "Drowsiness"),
    ("Inhaler", "2 puffs", "Tremors"),
    ("Antacid", "1 tablet", "Constipation"),
    ("Vitamin C", "1000mg", "None"),
    ("Pain Reliever", "200mg", "Dizziness"),
    ("Anti-inflammatory", "50mg", "Rash"),
    ("Laxative", "5mg", "Diarrhea"),
    ("Eye Drops", "1 drop", "Irritation"),
    ("Ear Drops", "3 drops", "None"),
    ("Therapy Session", "1 hour", "Emotional fatigue"),
    ("Meditation", "20 min daily", "None"),
    ("Exercise", "30 min", "Muscle soreness"),
    ("Diet Plan", "Balanced meals", "None"),
    ("Sleep Aid", "1 pill", "Grogginess"),
    ("Herbal Tea", "1 cup", "None"),
    ("Acupuncture", "1 session", "Bruising"),
    ("Massage", "30 min", "Soreness"),
    ("Yoga", "45 min", "None"),
    ("Counseling", "50 min", "Emotional drain"),
];

const DOCTORS: [(&str, &str); 12] = [
    ("Dr. Singh", "General Physician"),
    ("Dr. Patel", "Neurologist"),
    ("Dr. Khan", "Cardiologist"),
    ("Dr. Gupta", "Dermatologist"),
    ("Dr. Sharma", "Psychiatrist"),
    ("Dr. Verma", "Orthopedist"),
    ("Dr. Reddy", "Gastroenterologist"),
    ("Dr. Joshi", "ENT Specialist"),
    ("Dr. Mehta", "Ophthalmologist"),
    ("Dr. Nair", "Pediatrician"),
    ("Dr. Bose", "Oncologist"),
    ("Dr. Das", "Endocrinologist"),
];

const HOSPITALS: [(&str, &str); 12] = [
    ("City Hospital", "Mumbai"),
    ("Health Center", "Delhi"),
    ("Metro Clinic", "Bangalore"),
    ("Wellness Hub", "Chennai"),
    ("Care Institute", "Hyderabad"),
    ("Prime Medical", "Kolkata"),
    ("Unity Hospital", "Pune"),
    ("Apex Health", "Ahmedabad"),
    ("Vital Care", "Jaipur"),
    ("Harmony Clinic", "Lucknow"),
    ("Summit Hospital", "Chandigarh"),
    ("Elite Medical", "Bhopal"),
];

const HAS_SYMPTOM: [(&str, &str); 26] = [
    ("Rohit", "Fever"),
    ("Rohit", "Cough"),
    ("Aisha", "Cough"),
    ("Aisha", "Headache"),
    ("Vikram", "Fatigue"),
    ("Priya", "Nausea"),
    ("Sanjay", "Sore Throat"),
    ("Neha", "Dizziness"),
    ("Amit", "Chest Pain"),
    ("Riya", "Shortness of Breath"),
    ("Karan", "Joint Pain"),
    ("Sneha", "Rash"),
    ("Rahul", "Vomiting"),
    ("Pooja", "Diarrhea"),
    ("Arjun", "Abdominal Pain"),
    ("Meera", "Loss of Appetite"),
    ("Vivek", "Muscle Ache"),
    ("Anjali", "Chills"),
    ("Deepak", "Sweating"),
    ("Kavya", "Insomnia"),
    ("Tarun", "Anxiety"),
    ("Shreya", "Depression"),
    ("Nikhil", "Blurred Vision"),
    ("Divya", "Hearing Loss"),
    ("Manish", "Tinnitus"),
    ("Tanya", "Fever"),
];

const RECOMMENDED_FOR: [(&str, &str); 38] = [
    ("Paracetamol", "Fever"),
    ("Paracetamol", "Headache"),
    ("Cough Syrup", "Cough"),
    ("Hydration", "Fever"),
    ("Antibiotics", "Sore Throat"),
    ("Herbal Tea", "Sore Throat"),
    ("Herbal Tea", "Cough"),
    ("Ibuprofen", "Joint Pain"),
    ("Ibuprofen", "Muscle Ache"),
    ("Antihistamine", "Rash"),
    ("Inhaler", "Shortness of Breath"),
    ("Antacid", "Abdominal Pain"),
    ("Antacid", "Nausea"),
    ("Laxative", "Abdominal Pain"),
    ("Vitamin C", "Fatigue"),
    ("Vitamin C", "Chills"),
    ("Pain Reliever", "Chest Pain"),
    ("Anti-inflammatory", "Joint Pain"),
    ("Hydration", "Vomiting"),
    ("Hydration", "Diarrhea"),
    ("Hydration", "Dizziness"),
    ("Hydration", "Sweating"),
    ("Diet Plan", "Loss of Appetite"),
    ("Eye Drops", "Blurred Vision"),
    ("Ear Drops", "Hearing Loss"),
    ("Ear Drops", "Tinnitus"),
    ("Therapy Session", "Depression"),
    ("Therapy Session", "Anxiety"),
    ("Meditation", "Anxiety"),
    ("Meditation", "Insomnia"),
    ("Yoga", "Anxiety"),
    ("Exercise", "Fatigue"),
    ("Sleep Aid", "Insomnia"),
    ("Acupuncture", "Joint Pain"),
    ("Massage", "Muscle Ache"),
    ("Counseling", "Depression"),
    ("Counseling", "Anxiety"),
    ("Yoga", "Insomnia"),
];

// Priya and Tanya, among others, consult nobody
const CONSULTED: [(&str, &str); 13] = [
    ("Rohit", "Dr. Singh"),
    ("Aisha", "Dr. Patel"),
    ("Vikram", "Dr. Singh"),
    ("Amit", "Dr. Khan"),
    ("Sneha", "Dr. Gupta"),
    ("Tarun", "Dr. Sharma"),
    ("Shreya", "Dr. Sharma"),
    ("Karan", "Dr. Verma"),
    ("Pooja", "Dr. Reddy"),
    ("Divya", "Dr. Joshi"),
    ("Nikhil", "Dr. Mehta"),
    ("Neha", "Dr. Nair"),
    ("Deepak", "Dr. Das"),
];

const WORKS_AT: [(&str, &str); 12] = [
    ("Dr. Singh", "City Hospital"),
    ("Dr. Patel", "Health Center"),
    ("Dr. Khan", "Metro Clinic"),
    ("Dr. Gupta", "Wellness Hub"),
    ("Dr. Sharma", "Care Institute"),
    ("Dr. Verma", "Prime Medical"),
    ("Dr. Reddy", "Unity Hospital"),
    ("Dr. Joshi", "Apex Health"),
    ("Dr. Mehta", "Vital Care"),
    ("Dr. Nair", "Harmony Clinic"),
    ("Dr. Bose", "Summit Hospital"),
    ("Dr. Das", "Elite Medical"),
];

pub fn patients() -> Vec<Patient> {
    PATIENTS
        .iter()
        .map(|&(name, age, gender)| Patient::new(name, age, gender))
        .collect()
}

pub fn symptoms() -> Vec<Symptom> {
    SYMPTOMS
        .iter()
        .map(|&(kind, severity)| Symptom::new(kind, severity))
        .collect()
}

pub fn treatments() -> Vec<Treatment> {
    TREATMENTS
        .iter()
        .map(|&(name, dosage, side_effects)| Treatment::new(name, dosage, side_effects))
        .collect()
}

pub fn doctors() -> Vec<Doctor> {
    DOCTORS
        .iter()
        .map(|&(name, specialty)| Doctor::new(name, specialty))
        .collect()
}

pub fn hospitals() -> Vec<Hospital> {
    HOSPITALS
        .iter()
        .map(|&(name, location)| Hospital::new(name, location))
        .collect()
}

/// Every relationship triple, grouped by type
pub fn relationships() -> Vec<Relationship> {
    let groups: [(&[(&str, &str)], RelationshipKind); 4] = [
        (&HAS_SYMPTOM, RelationshipKind::HasSymptom),
        (&RECOMMENDED_FOR, RelationshipKind::RecommendedFor),
        (&CONSULTED, RelationshipKind::Consulted),
        (&WORKS_AT, RelationshipKind::WorksAt),
    ];
    groups
        .iter()
        .flat_map(|(pairs, kind)| {
            pairs
                .iter()
                .map(move |&(source, target)| Relationship::new(source, target, *kind))
        })
        .collect()
}

/// Statements written per phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub patients: usize,
    pub symptoms: usize,
    pub treatments: usize,
    pub doctors: usize,
    pub hospitals: usize,
    pub relationships: usize,
}

fn create_all<T: Into<Entity>>(items: Vec<T>) -> Vec<Statement> {
    items
        .into_iter()
        .map(|item| Statement::Create(item.into()))
        .collect()
}

async fn phase(client: &dyn GraphClient, name: &str, statements: Vec<Statement>) -> ClientResult<usize> {
    client.execute_write(&statements).await?;
    debug!(phase = name, count = statements.len(), "Seed phase committed");
    Ok(statements.len())
}

/// Replace the whole graph with the sample data
pub async fn create_sample_data(client: &dyn GraphClient) -> ClientResult<SeedSummary> {
    client.execute_write(&[Statement::ClearGraph]).await?;

    let summary = SeedSummary {
        patients: phase(client, "patients", create_all(patients())).await?,
        symptoms: phase(client, "symptoms", create_all(symptoms())).await?,
        treatments: phase(client, "treatments", create_all(treatments())).await?,
        doctors: phase(client, "doctors", create_all(doctors())).await?,
        hospitals: phase(client, "hospitals", create_all(hospitals())).await?,
        relationships: phase(
            client,
            "relationships",
            relationships().into_iter().map(Statement::Relate).collect(),
        )
        .await?,
    };

    info!(
        patients = summary.patients,
        symptoms = summary.symptoms,
        treatments = summary.treatments,
        doctors = summary.doctors,
        hospitals = summary.hospitals,
        relationships = summary.relationships,
        "Sample data loaded"
    );
    Ok(summary)
}
