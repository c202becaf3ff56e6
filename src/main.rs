//! Staking Projection - Main Entry Point
//!
//! Command line front end: refreshes the market data snapshots and prints
//! prices, staking providers or strategy projections as JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use staking_projection::config::load_config;
use staking_projection::strategy::calculate_strategies;
use staking_projection::{AppConfig, CalculateRequest, EconomicsCache, Fetchers};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the configured level
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the live EGLD and MEX prices
    Prices,
    /// Print the EGLD staking providers
    Providers,
    /// Project every strategy for a JSON request file ("-" reads stdin)
    Calculate {
        #[arg(short, long)]
        request: PathBuf,
    },
    /// Keep refreshing the snapshots until interrupted
    Watch,
}

fn init_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout carries only JSON output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_cache(config: &AppConfig) -> Result<EconomicsCache> {
    let fetchers = Fetchers::from_config(&config.fetchers)?;
    Ok(EconomicsCache::new(
        Arc::new(fetchers.egld_price),
        Arc::new(fetchers.mex_economics),
        Arc::new(fetchers.staking_providers),
    ))
}

fn read_request(path: &Path) -> Result<CalculateRequest> {
    let raw = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("cannot read request file {}", path.display()))?
    };
    serde_json::from_str(&raw).context("request is not valid JSON")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn calculate(cache: &EconomicsCache, path: &Path) -> Result<()> {
    let request = read_request(path)?;
    let input = match request.into_input() {
        Ok(input) => input,
        Err(errors) => {
            let errors: Vec<_> = errors
                .iter()
                .map(|e| json!({ "field": e.field, "message": e.message }))
                .collect();
            print_json(&json!({ "errors": errors }))?;
            bail!("invalid calculation request");
        }
    };

    let providers = cache.staking_providers().await?;
    let economics = cache.economics().await?;
    let response = calculate_strategies(&input, &providers, &economics)?;
    print_json(&response)
}

async fn run_watch(cache: &EconomicsCache, config: &AppConfig) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let interval = Duration::from_secs(config.cache.refresh_interval_seconds);

    let runner = {
        let cache = cache.clone();
        tokio::spawn(async move { cache.run(interval, shutdown_rx).await })
    };

    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal, cleaning up...");
    shutdown_tx.send(true)?;
    runner.await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = load_config(Some(&args.config))?;
    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    init_logging(&log_level)?;

    info!("Starting staking projection");
    info!("Configuration file: {}", args.config);

    let cache = build_cache(&config)?;
    if config.cache.warmup {
        cache.warmup().await?;
    } else {
        let failures = cache.refresh().await;
        if !failures.is_empty() {
            warn!(failed = failures.len(), "Starting with incomplete snapshots");
        }
    }

    match &args.command {
        Command::Prices => print_json(&cache.prices().await?)?,
        Command::Providers => print_json(&cache.staking_providers().await?)?,
        Command::Calculate { request } => calculate(&cache, request).await?,
        Command::Watch => run_watch(&cache, &config).await?,
    }

    Ok(())
}
