use anyhow::{Context, Result};
use caregraph::http::{AppState, HttpServer};
use caregraph::{client, estimator, logging, schema, seed, AppConfig, Recommender};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // first argument, else CAREGRAPH_CONFIG, else built-in defaults
    let config_path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("CAREGRAPH_CONFIG"))
        .map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    logging::init(&config.log_level);
    info!("Caregraph v{}", caregraph::version());

    let client = client::connect(&config.store)
        .await
        .context("Failed to connect to the graph store")?;

    if config.create_indexes_on_start {
        schema::create_indexes(client.as_ref())
            .await
            .context("Failed to create indexes")?;
    }
    if config.seed_on_start {
        seed::create_sample_data(client.as_ref())
            .await
            .context("Failed to load sample data")?;
    }

    let estimator =
        estimator::from_config(&config.estimator).context("Failed to build efficacy estimator")?;
    let state = AppState::new(Recommender::new(client, estimator))?;

    HttpServer::new(state, &config.http)
        .start()
        .await
        .context("HTTP server stopped")?;
    Ok(())
}
