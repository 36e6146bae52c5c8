//! One-shot sales prediction against an ensemble bundle.
//!
//! Loads the bundle the server would load, encodes a single item and prints
//! the prediction with per-model contributions as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use jewelai::application::ml::PredictionService;
use jewelai::config::{DataEnvConfig, EncoderEnvConfig};
use jewelai::domain::ml::encoder::{DEFAULT_PURITY, DEFAULT_STORE_ID, FeatureEncoder, PredictionRequest};
use jewelai::infrastructure::observability::Metrics;
use jewelai::infrastructure::persistence::ModelStore;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};

#[derive(Parser)]
#[command(author, version, about = "Predict sales for one jewelry item", long_about = None)]
struct Cli {
    /// Model bundle (JSON). Defaults to DATA_DIR/MODEL_FILE, like the server.
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Product category (e.g. RING, GOLD CHAINS)
    #[arg(short, long)]
    category: String,

    /// Net weight in grams
    #[arg(short = 'w', long)]
    net_weight: f64,

    /// Voucher date (YYYY-MM-DD)
    #[arg(short, long)]
    date: String,

    /// Karat purity
    #[arg(long, default_value_t = DEFAULT_PURITY)]
    purity: f64,

    /// Store identifier
    #[arg(long, default_value = DEFAULT_STORE_ID)]
    store: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let model_path = cli
        .model
        .unwrap_or_else(|| DataEnvConfig::from_env().model_path());
    let package = ModelStore::new(model_path.clone())
        .load()
        .with_context(|| format!("Cannot predict without a model bundle at {:?}", model_path))?;
    let encoder = FeatureEncoder::new(EncoderEnvConfig::from_env()?.stats);
    let service = PredictionService::new(Some(Arc::new(package)), encoder, Metrics::new()?);

    let request = PredictionRequest::new(&cli.category, cli.net_weight, &cli.date)
        .with_purity(cli.purity)
        .with_store(&cli.store);
    info!("Predicting {:?}", request);

    let result = service.predict(&request)?;
    let contributions: Vec<_> = result
        .contributions
        .iter()
        .map(|c| json!({ "model": c.name, "output": c.output, "weight": c.weight }))
        .collect();

    let output = json!({
        "predicted_sales": result.predicted_sales,
        "confidence": result.weights,
        "contributions": contributions,
        "input": result.request,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
