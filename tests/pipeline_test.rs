use caregraph::client::EmbeddedClient;
use caregraph::estimator::{Efficacy, EstimatorError, FixedEstimator, ForestEstimator};
use caregraph::config::EstimatorConfig;
use caregraph::{recommend_treatments, seed, EfficacyEstimator, RecommendError};
use std::collections::HashSet;

async fn seeded() -> EmbeddedClient {
    let client = EmbeddedClient::new();
    seed::create_sample_data(&client).await.unwrap();
    client
}

fn set(items: &[&'static str]) -> HashSet<&'static str> {
    items.iter().copied().collect()
}

fn names(recs: &[caregraph::Recommendation]) -> HashSet<&str> {
    recs.iter().map(|r| r.treatment.name.as_str()).collect()
}

#[tokio::test]
async fn test_rohit_gets_fever_and_cough_treatments() {
    let client = seeded().await;
    let recs = recommend_treatments(&client, &FixedEstimator::new(Efficacy::High), "Rohit")
        .await
        .unwrap();

    assert!(!recs.is_empty());
    assert_eq!(
        names(&recs),
        set(&["Paracetamol", "Hydration", "Cough Syrup", "Herbal Tea"])
    );

    let tea = recs.iter().find(|r| r.treatment.name == "Herbal Tea").unwrap();
    let symptoms: HashSet<&str> = tea.treatment.symptoms.iter().map(String::as_str).collect();
    assert_eq!(symptoms, set(&["Cough"]));

    for rec in &recs {
        assert_eq!(rec.treatment.doctor.as_deref(), Some("Dr. Singh"));
        assert_eq!(rec.treatment.hospital.as_deref(), Some("City Hospital"));
    }
}

#[tokio::test]
async fn test_unknown_patient_is_empty_not_error() {
    let client = seeded().await;
    let recs = recommend_treatments(&client, &FixedEstimator::new(Efficacy::High), "Nobody")
        .await
        .unwrap();
    assert!(recs.is_empty());
}

#[tokio::test]
async fn test_patient_without_consultation_has_no_doctor() {
    let client = seeded().await;
    let recs = recommend_treatments(&client, &FixedEstimator::new(Efficacy::Low), "Priya")
        .await
        .unwrap();
    assert_eq!(names(&recs), set(&["Antacid"]));
    assert!(recs[0].treatment.doctor.is_none());
    assert!(recs[0].treatment.hospital.is_none());

    let tanya = recommend_treatments(&client, &FixedEstimator::new(Efficacy::Low), "Tanya")
        .await
        .unwrap();
    assert_eq!(names(&tanya), set(&["Paracetamol", "Hydration"]));
}

#[tokio::test]
async fn test_forest_scores_are_binary_and_stable() {
    let client = seeded().await;
    let forest = ForestEstimator::train(&EstimatorConfig {
        trees: 15,
        samples: 300,
        seed: Some(3),
        ..EstimatorConfig::default()
    })
    .unwrap();

    let first = recommend_treatments(&client, &forest, "Aisha").await.unwrap();
    let second = recommend_treatments(&client, &forest, "Aisha").await.unwrap();
    assert!(!first.is_empty());
    for rec in &first {
        assert!(matches!(rec.predicted_efficacy.as_u8(), 0 | 1));
    }
    assert_eq!(first, second);
}

struct BrokenModel;

impl EfficacyEstimator for BrokenModel {
    fn predict(&self, _treatment: &str, _patient: &str) -> Result<Efficacy, EstimatorError> {
        Err(EstimatorError::Prediction("model unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_estimator_failure_propagates() {
    let client = seeded().await;
    let err = recommend_treatments(&client, &BrokenModel, "Rohit")
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::Estimator(EstimatorError::Prediction(_))));
    assert!(err.to_string().contains("model unavailable"));
}
