//! Nightly Price Estimator - Main Entry Point

use api::{init_logging, install_metrics, run_server, AppState, EstimatorConfig, EstimatorContext};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(version, about = "Serve nightly price estimates from a trained model")]
struct Args {
    /// Config file (TOML); defaults to ./price-estimator.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Listen address, overriding the config
    #[arg(long)]
    bind: Option<String>,
    /// Artifact directory, overriding the config
    #[arg(long)]
    artifacts: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = EstimatorConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    if let Some(dir) = args.artifacts {
        config.artifacts.dir = dir;
    }

    init_logging(&config.logging)?;

    info!("=== Nightly Price Estimator v{} ===", env!("CARGO_PKG_VERSION"));

    let context = EstimatorContext::initialize(&config).map_err(|e| {
        error!("Startup failed: {}", e);
        e
    })?;
    let metrics = if config.metrics.enabled {
        Some(install_metrics()?)
    } else {
        None
    };

    let state = Arc::new(AppState::new(context, metrics));
    run_server(&config.server, state).await?;

    Ok(())
}
