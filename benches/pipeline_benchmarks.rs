use caregraph::client::EmbeddedClient;
use caregraph::config::EstimatorConfig;
use caregraph::estimator::forest::pair_features;
use caregraph::estimator::{Efficacy, FixedEstimator, ForestEstimator};
use caregraph::graph::{GraphStore, Label, PropertyMap, PropertyValue};
use caregraph::{recommend_treatments, seed, EfficacyEstimator};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

/// Clear and reload the sample catalogs
fn bench_seed(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let client = EmbeddedClient::new();

    c.bench_function("seed_sample_data", |b| {
        b.iter(|| rt.block_on(seed::create_sample_data(&client)).unwrap());
    });
}

/// Match, shape and score for a handful of seeded patients
fn bench_recommend(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let client = EmbeddedClient::new();
    rt.block_on(seed::create_sample_data(&client)).unwrap();
    let estimator = FixedEstimator::new(Efficacy::High);

    let mut group = c.benchmark_group("recommend");
    for patient in ["Rohit", "Aisha", "Priya", "Nobody"] {
        group.bench_with_input(BenchmarkId::from_parameter(patient), patient, |b, patient| {
            b.iter(|| rt.block_on(recommend_treatments(&client, &estimator, patient)).unwrap());
        });
    }
    group.finish();
}

fn bench_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest");

    for trees in [10, 100].iter() {
        let forest = ForestEstimator::train(&EstimatorConfig {
            trees: *trees,
            seed: Some(42),
            ..EstimatorConfig::default()
        })
        .unwrap();
        group.bench_with_input(BenchmarkId::new("predict", trees), &forest, |b, forest| {
            b.iter(|| forest.predict("Paracetamol", "Rohit").unwrap());
        });
    }

    group.bench_function("pair_features", |b| {
        b.iter(|| pair_features("Cough Syrup", "Aisha"));
    });
    group.finish();
}

/// Indexed vs scanned key lookup in the embedded store
fn bench_key_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_lookup");
    let label = Label::new("Patient");

    for indexed in [false, true] {
        let mut store = GraphStore::new();
        for i in 0..10_000 {
            let mut props = PropertyMap::new();
            props.insert("name".to_string(), PropertyValue::String(format!("Patient{}", i)));
            store.create_node(label.clone(), props);
        }
        if indexed {
            store.create_index(&label, "name");
        }
        let target = PropertyValue::String("Patient9999".to_string());

        group.bench_with_input(
            BenchmarkId::from_parameter(if indexed { "indexed" } else { "scan" }),
            &store,
            |b, store| {
                b.iter(|| store.find_nodes(&label, "name", &target).len());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_seed, bench_recommend, bench_forest, bench_key_lookup);
criterion_main!(benches);
