use caregraph::client::{EmbeddedClient, GraphClient};
use caregraph::graph::Label;
use caregraph::{schema, seed, EntityLabel, RelationshipKind};

async fn counts(client: &EmbeddedClient) -> Vec<u64> {
    let mut out = Vec::new();
    for label in EntityLabel::ALL {
        out.push(client.count_nodes(label).await.unwrap());
    }
    for kind in RelationshipKind::ALL {
        out.push(client.count_relationships(kind).await.unwrap());
    }
    out
}

#[tokio::test]
async fn test_seed_populates_catalogs() {
    let client = EmbeddedClient::new();
    let summary = seed::create_sample_data(&client).await.unwrap();

    assert_eq!(summary.patients, 24);
    assert_eq!(summary.symptoms, 24);
    assert_eq!(summary.treatments, 24);
    assert_eq!(summary.doctors, 12);
    assert_eq!(summary.hospitals, 12);
    assert_eq!(summary.relationships, 89);

    assert_eq!(counts(&client).await, vec![24, 24, 24, 12, 12, 26, 38, 13, 12]);

    let status = client.status().await.unwrap();
    assert_eq!(status.node_count, 96);
    assert_eq!(status.relationship_count, 89);
}

#[tokio::test]
async fn test_seeding_twice_matches_seeding_once() {
    let client = EmbeddedClient::new();
    seed::create_sample_data(&client).await.unwrap();
    let once = counts(&client).await;

    seed::create_sample_data(&client).await.unwrap();
    assert_eq!(counts(&client).await, once);
    assert_eq!(client.find_patients("Rohit").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_indexes_survive_reseed() {
    let client = EmbeddedClient::new();
    schema::create_indexes(&client).await.unwrap();
    seed::create_sample_data(&client).await.unwrap();

    let store = client.store().read().await;
    assert_eq!(store.index_count(), 5);
    assert!(store.has_index(&Label::new("Patient"), "name"));
    // indexed lookups see the seeded data
    assert_eq!(
        store
            .find_nodes(&Label::new("Symptom"), "type", &"Fever".into())
            .len(),
        1
    );
}
