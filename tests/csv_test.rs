use caregraph::client::{EmbeddedClient, GraphClient};
use caregraph::csv_io::{self, CsvError};
use caregraph::estimator::{Efficacy, FixedEstimator};
use caregraph::{recommend_treatments, seed, EntityLabel, Patient};
use std::io::Write;

#[tokio::test]
async fn test_import_updates_existing_and_creates_new() {
    let client = EmbeddedClient::new();
    seed::create_sample_data(&client).await.unwrap();
    let before = client.count_nodes(EntityLabel::Patient).await.unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "name,age,gender").unwrap();
    writeln!(file, "Rohit,26,M").unwrap();
    writeln!(file, "Zara,31,Female").unwrap();

    let imported = csv_io::import_patients(&client, file.path()).await.unwrap();
    assert_eq!(imported, 2);

    assert_eq!(
        client.find_patients("Rohit").await.unwrap(),
        vec![Patient::new("Rohit", 26, "M")]
    );
    assert_eq!(client.find_patients("Zara").await.unwrap().len(), 1);
    assert_eq!(client.count_nodes(EntityLabel::Patient).await.unwrap(), before + 1);

    // the upsert leaves Rohit's relationships in place
    let recs = recommend_treatments(&client, &FixedEstimator::new(Efficacy::High), "Rohit")
        .await
        .unwrap();
    assert_eq!(recs.len(), 4);
}

#[tokio::test]
async fn test_import_missing_file() {
    let client = EmbeddedClient::new();
    let err = csv_io::import_patients(&client, std::path::Path::new("/nonexistent/patients.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, CsvError::Io(_)));
}

#[tokio::test]
async fn test_export_recommendations() {
    let client = EmbeddedClient::new();
    seed::create_sample_data(&client).await.unwrap();
    let recs = recommend_treatments(&client, &FixedEstimator::new(Efficacy::Low), "Priya")
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("priya.csv");
    let written = csv_io::export_rows(csv_io::recommendation_rows(&recs), &path).unwrap();
    assert_eq!(written, 1);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Antacid,1 tablet,Constipation,Nausea,,,0\n");
}
