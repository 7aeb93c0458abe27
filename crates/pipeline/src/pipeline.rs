//! Pipeline orchestrator: wires the five stages together and supervises
//! their tasks.

use std::sync::Arc;

use launchpad_core::config::EngineConfig;
use launchpad_core::{Clock, LifecycleStore};
use launchpad_strategy::StrategyContext;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::notifier::DonationNotifier;
use crate::stages::{HarvestCheckStage, RecalculateStage, SearchCheckStage, SweepStage, UserRateStage};

/// Builds the campaign lifecycle pipeline.
pub struct LifecyclePipeline {
    config: EngineConfig,
    ctx: StrategyContext,
}

impl std::fmt::Debug for LifecyclePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecyclePipeline")
            .field("node_id", &self.config.node_id)
            .field("pipeline", &self.config.pipeline)
            .field("sweep", &self.config.sweep)
            .finish()
    }
}

impl LifecyclePipeline {
    pub fn new(config: EngineConfig, store: Arc<dyn LifecycleStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            ctx: StrategyContext::new(store, clock),
        }
    }

    /// Spawns all five stages. Raising `shutdown` (or dropping its sender)
    /// stops the sweep and starts the cascading shutdown.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> PipelineHandle {
        let pipeline = &self.config.pipeline;
        let (recalc_tx, recalc_rx) = mpsc::channel(pipeline.recalc_buffer.max(1));
        let (search_tx, search_rx) = mpsc::channel(pipeline.search_buffer.max(1));
        let (harvest_tx, harvest_rx) = mpsc::channel(pipeline.harvest_buffer.max(1));
        let (rate_tx, rate_rx) = mpsc::channel(pipeline.rate_buffer.max(1));

        let notifier = DonationNotifier::new(&recalc_tx);

        let sweep = SweepStage::new(self.ctx.clone(), self.config.sweep.clone(), recalc_tx, shutdown);
        let recalculate = RecalculateStage::new(self.ctx.clone(), recalc_rx, search_tx);
        let search = SearchCheckStage::new(self.ctx.clone(), pipeline.outdated_check, search_rx, harvest_tx);
        let harvest = HarvestCheckStage::new(self.ctx.clone(), harvest_rx, rate_tx);
        let user_rate = UserRateStage::new(self.ctx.clone(), rate_rx);

        let handles = vec![
            ("sweep", tokio::spawn(sweep.run())),
            ("recalculate", tokio::spawn(recalculate.run())),
            ("search_check", tokio::spawn(search.run())),
            ("harvest_check", tokio::spawn(harvest.run())),
            ("user_rate", tokio::spawn(user_rate.run())),
        ];

        info!(
            node_id = %self.config.node_id,
            stages = handles.len(),
            outdated_check = ?pipeline.outdated_check,
            "Lifecycle pipeline started"
        );

        PipelineHandle { notifier, handles }
    }
}

/// Running pipeline.
pub struct PipelineHandle {
    notifier: DonationNotifier,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl PipelineHandle {
    /// Producer handle for donation create/update/delete events.
    pub fn notifier(&self) -> DonationNotifier {
        self.notifier.clone()
    }

    pub fn stage_count(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every stage to exit (blocks until shutdown has cascaded).
    pub async fn wait(self) {
        for (stage, handle) in self.handles {
            if let Err(e) = handle.await {
                error!(stage, error = %e, "Stage task panicked");
            }
        }
        info!("Lifecycle pipeline stopped");
    }
}
