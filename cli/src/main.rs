//! Caregraph CLI: seed, query and import/export against the configured graph store

use anyhow::{Context, Result};
use caregraph::csv_io::{self, RECOMMENDATION_COLUMNS};
use caregraph::{
    client, estimator, logging, schema, seed, AppConfig, Backend, EntityLabel, GraphClient,
    Recommendation, Recommender, RelationshipKind,
};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "caregraph", version, about = "Caregraph treatment recommender CLI")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "CAREGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Graph store backend
    #[arg(long, global = true, env = "CAREGRAPH_BACKEND")]
    backend: Option<BackendArg>,

    /// Bolt URI
    #[arg(long, global = true, env = "CAREGRAPH_NEO4J_URI")]
    uri: Option<String>,

    #[arg(long, global = true, env = "CAREGRAPH_NEO4J_USER")]
    user: Option<String>,

    #[arg(long, global = true, env = "CAREGRAPH_NEO4J_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BackendArg {
    Bolt,
    Embedded,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Bolt => Backend::Bolt,
            BackendArg::Embedded => Backend::Embedded,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Create indexes and load the sample data (wipes the graph)
    Seed,
    /// Create the key-property indexes
    Indexes,
    /// Recommend treatments for a patient
    Recommend {
        /// Patient name
        patient: String,
    },
    /// Upsert patients from a CSV file with name, age and gender columns
    Import {
        path: PathBuf,
    },
    /// Write a patient's recommendations to a CSV file
    Export {
        patient: String,
        path: PathBuf,
    },
    /// Show backend and graph counts
    Status,
    /// Ping the graph store
    Ping,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(backend) = cli.backend {
        config.store.backend = backend.into();
    }
    if let Some(uri) = &cli.uri {
        config.store.uri = uri.clone();
    }
    if let Some(user) = &cli.user {
        config.store.user = user.clone();
    }
    if let Some(password) = &cli.password {
        config.store.password = password.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    logging::init(&config.log_level);

    let client = client::connect(&config.store)
        .await
        .context("Failed to connect to the graph store")?;

    // an embedded store starts empty in every process
    if config.store.backend == Backend::Embedded && !matches!(cli.command, Commands::Seed) {
        info!("Seeding embedded store");
        seed_all(client.as_ref()).await?;
    }

    match cli.command {
        Commands::Seed => {
            let summary = seed_all(client.as_ref()).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                _ => {
                    println!("Patients:      {}", summary.patients);
                    println!("Symptoms:      {}", summary.symptoms);
                    println!("Treatments:    {}", summary.treatments);
                    println!("Doctors:       {}", summary.doctors);
                    println!("Hospitals:     {}", summary.hospitals);
                    println!("Relationships: {}", summary.relationships);
                }
            }
        }
        Commands::Indexes => {
            schema::create_indexes(client.as_ref()).await?;
            println!("Indexes created");
        }
        Commands::Recommend { patient } => {
            let recommender = recommender(client, &config)?;
            let recs = recommender.recommend(&patient).await?;
            print_recommendations(&recs, cli.format)?;
        }
        Commands::Import { path } => {
            let imported = csv_io::import_patients(client.as_ref(), &path)
                .await
                .with_context(|| format!("Failed to import {}", path.display()))?;
            println!("Imported {} patient row(s)", imported);
        }
        Commands::Export { patient, path } => {
            let recommender = recommender(client, &config)?;
            let recs = recommender.recommend(&patient).await?;
            csv_io::export_rows(csv_with_header(&recs), &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} recommendation(s) to {}", recs.len(), path.display());
        }
        Commands::Status => run_status(client.as_ref(), cli.format).await?,
        Commands::Ping => println!("{}", client.ping().await?),
    }
    Ok(())
}

async fn seed_all(client: &dyn GraphClient) -> Result<seed::SeedSummary> {
    schema::create_indexes(client)
        .await
        .context("Failed to create indexes")?;
    let summary = seed::create_sample_data(client)
        .await
        .context("Failed to load sample data")?;
    Ok(summary)
}

fn recommender(client: Arc<dyn GraphClient>, config: &AppConfig) -> Result<Recommender> {
    let estimator =
        estimator::from_config(&config.estimator).context("Failed to build efficacy estimator")?;
    Ok(Recommender::new(client, estimator))
}

fn csv_with_header(recs: &[Recommendation]) -> Vec<Vec<String>> {
    let header: Vec<String> = RECOMMENDATION_COLUMNS.iter().map(|c| c.to_string()).collect();
    std::iter::once(header)
        .chain(csv_io::recommendation_rows(recs))
        .collect()
}

fn print_recommendations(recs: &[Recommendation], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(recs)?);
        }
        OutputFormat::Csv => {
            csv_io::export_rows_to_writer(csv_with_header(recs), std::io::stdout())?;
        }
        OutputFormat::Table => {
            if recs.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(RECOMMENDATION_COLUMNS);
            for row in csv_io::recommendation_rows(recs) {
                table.add_row(row);
            }

            println!("{}", table);
            println!("{} row(s)", recs.len());
        }
    }
    Ok(())
}

async fn run_status(client: &dyn GraphClient, format: OutputFormat) -> Result<()> {
    let status = client.status().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        _ => {
            println!("Backend:       {}", status.backend);
            println!("Nodes:         {}", status.node_count);
            println!("Relationships: {}", status.relationship_count);

            let mut table = Table::new();
            table.set_header(vec!["Label / type", "Count"]);
            for label in EntityLabel::ALL {
                table.add_row(vec![label.to_string(), client.count_nodes(label).await?.to_string()]);
            }
            for kind in RelationshipKind::ALL {
                table.add_row(vec![
                    kind.to_string(),
                    client.count_relationships(kind).await?.to_string(),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}
