use serde::Deserialize;
use std::time::Duration;

use crate::error::LifecycleResult;

/// Root engine configuration. Loaded from environment variables with the
/// prefix `LAUNCHPAD__` and an optional TOML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Where the "went stale in Search" check runs for campaigns that did not
/// advance out of Search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutdatedCheck {
    /// Search-Check forwards the campaign anyway and Harvest-Check closes
    /// it if its release date has passed.
    Harvest,
    /// Search-Check closes it itself and forwards only what it closed.
    Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_recalc_buffer")]
    pub recalc_buffer: usize,
    #[serde(default = "default_search_buffer")]
    pub search_buffer: usize,
    #[serde(default = "default_harvest_buffer")]
    pub harvest_buffer: usize,
    #[serde(default = "default_rate_buffer")]
    pub rate_buffer: usize,
    #[serde(default = "default_outdated_check")]
    pub outdated_check: OutdatedCheck,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_sweep_enabled")]
    pub enabled: bool,
    /// Ticker resolution. Each tick compares against the persisted
    /// last-sweep timestamp, so this can be much finer than the period.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_host")]
    pub host: String,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_node_id() -> String {
    "engine-01".to_string()
}
fn default_recalc_buffer() -> usize {
    100
}
fn default_search_buffer() -> usize {
    10
}
fn default_harvest_buffer() -> usize {
    10
}
fn default_rate_buffer() -> usize {
    100
}
fn default_outdated_check() -> OutdatedCheck {
    OutdatedCheck::Harvest
}
fn default_sweep_enabled() -> bool {
    true
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_period_secs() -> u64 {
    24 * 60 * 60
}
fn default_metrics_host() -> String {
    "0.0.0.0".to_string()
}
fn default_metrics_port() -> u16 {
    9091
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            recalc_buffer: default_recalc_buffer(),
            search_buffer: default_search_buffer(),
            harvest_buffer: default_harvest_buffer(),
            rate_buffer: default_rate_buffer(),
            outdated_check: default_outdated_check(),
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: default_sweep_enabled(),
            tick_interval_ms: default_tick_interval_ms(),
            period_secs: default_period_secs(),
        }
    }
}

impl SweepConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn period(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.period_secs as i64)
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            host: default_metrics_host(),
            port: default_metrics_port(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            pipeline: PipelineConfig::default(),
            sweep: SweepConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables and an optional
    /// config file. Environment wins over the file.
    pub fn load(path: Option<&str>) -> LifecycleResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let builder = builder.add_source(
            config::Environment::with_prefix("LAUNCHPAD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
