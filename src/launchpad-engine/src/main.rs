//! Launchpad lifecycle engine.
//!
//! Runs the campaign lifecycle pipeline against an in-memory store until
//! Ctrl-C, then drains every stage before exiting.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use launchpad_core::clock::system_clock;
use launchpad_core::{Clock, EngineConfig};
use launchpad_pipeline::LifecyclePipeline;
use launchpad_store::MemoryStore;
use tokio::sync::watch;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Parser, Debug)]
#[command(name = "launchpad-engine")]
#[command(about = "Campaign lifecycle engine for the Launchpad crowdfunding platform")]
#[command(version)]
struct Cli {
    /// Config file (TOML, JSON or YAML)
    #[arg(long, env = "LAUNCHPAD_CONFIG")]
    config: Option<String>,

    /// Node identifier (overrides config)
    #[arg(long, env = "LAUNCHPAD__NODE_ID")]
    node_id: Option<String>,

    /// Seconds between periodic sweeps (overrides config)
    #[arg(long, env = "LAUNCHPAD__SWEEP__PERIOD_SECS")]
    sweep_period_secs: Option<u64>,

    /// JSON fixture of users, campaigns and donations to start from
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Start with an empty store instead of the demo data set
    #[arg(long, default_value_t = false)]
    no_demo_data: bool,

    /// Skip the Prometheus exporter
    #[arg(long, default_value_t = false)]
    no_metrics: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "launchpad=info".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

fn build_store(cli: &Cli, now: DateTime<Utc>) -> anyhow::Result<MemoryStore> {
    if let Some(path) = &cli.seed {
        return Ok(MemoryStore::load_fixture(path)?);
    }
    let store = MemoryStore::new();
    if !cli.no_demo_data {
        store.seed_demo_data(now);
    }
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    info!("Launchpad engine starting up");

    let mut config = EngineConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        EngineConfig::default()
    });

    if let Some(node_id) = cli.node_id.clone() {
        config.node_id = node_id;
    }
    if let Some(secs) = cli.sweep_period_secs {
        config.sweep.period_secs = secs;
    }

    info!(
        node_id = %config.node_id,
        outdated_check = ?config.pipeline.outdated_check,
        sweep_period_secs = config.sweep.period_secs,
        "Configuration loaded"
    );

    if !cli.no_metrics {
        let addr = SocketAddr::new(config.metrics.host.parse()?, config.metrics.port);
        match metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
        {
            Ok(()) => info!(port = config.metrics.port, "Metrics exporter started"),
            Err(e) => error!(error = %e, "Failed to start metrics exporter"),
        }
    }

    let clock = system_clock();
    let store = Arc::new(build_store(&cli, clock.now())?);
    info!(?store, "Store ready");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = LifecyclePipeline::new(config, store, clock).spawn(shutdown_rx);

    info!(stages = handle.stage_count(), "Launchpad engine is running");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested, draining pipeline");
    let _ = shutdown_tx.send(true);
    handle.wait().await;

    Ok(())
}
