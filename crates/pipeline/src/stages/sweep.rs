use launchpad_core::config::SweepConfig;
use launchpad_core::types::CampaignId;
use launchpad_core::LifecycleResult;
use launchpad_strategy::StrategyContext;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::cancelled;

const STAGE: &str = "sweep";

/// Periodic producer: re-enqueues every open campaign once per period so
/// date-driven rules fire even when no donation changes.
///
/// The ticker runs far more often than the period; each tick compares the
/// clock against the persisted last-sweep timestamp. Owns the only strong
/// sender of the Recalculate inbox, so returning starts the shutdown
/// cascade.
pub struct SweepStage {
    ctx: StrategyContext,
    config: SweepConfig,
    outbox: mpsc::Sender<CampaignId>,
    shutdown: watch::Receiver<bool>,
}

impl SweepStage {
    pub fn new(
        ctx: StrategyContext,
        config: SweepConfig,
        outbox: mpsc::Sender<CampaignId>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            ctx,
            config,
            outbox,
            shutdown,
        }
    }

    pub async fn run(self) {
        let mut shutdown = self.shutdown.clone();

        if !self.config.enabled {
            info!(stage = STAGE, "Periodic sweep disabled, waiting for shutdown");
            cancelled(&mut shutdown).await;
            info!(stage = STAGE, "Stage stopped");
            return;
        }

        info!(
            stage = STAGE,
            tick_ms = self.config.tick_interval_ms,
            period_secs = self.config.period_secs,
            "Stage started"
        );
        let mut ticker = tokio::time::interval(self.config.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.sweep_if_due().await {
                        Ok(Some(count)) => debug!(stage = STAGE, count, "Sweep finished"),
                        Ok(None) => {}
                        Err(e) => {
                            metrics::counter!("pipeline.errors", "stage" => STAGE, "kind" => e.kind()).increment(1);
                            error!(stage = STAGE, error = %e, "Sweep failed");
                        }
                    }
                    if self.outbox.is_closed() {
                        warn!(stage = STAGE, "Recalculate stage gone, stopping");
                        break;
                    }
                }
                _ = cancelled(&mut shutdown) => {
                    break;
                }
            }
        }
        info!(stage = STAGE, "Stage stopped");
    }

    /// Enqueues all active campaigns if a full period has elapsed since the
    /// last sweep. Returns how many were enqueued, or `None` if not due.
    pub async fn sweep_if_due(&self) -> LifecycleResult<Option<usize>> {
        let store = self.ctx.store();
        let now = self.ctx.clock().now();

        if let Some(last) = store.last_sweep_at().await? {
            if now < last + self.config.period() {
                return Ok(None);
            }
        }
        // The timestamp only moves once the load succeeded, so a failed
        // tick is retried on the next one.
        let campaigns = store.active_campaigns().await?;
        store.set_last_sweep_at(now).await?;

        let sweep_id = Uuid::new_v4();
        info!(stage = STAGE, %sweep_id, count = campaigns.len(), "Checking active campaigns");
        metrics::counter!("pipeline.sweep.runs").increment(1);

        let mut enqueued = 0;
        for campaign in campaigns {
            if self.outbox.send(campaign.id).await.is_err() {
                break;
            }
            enqueued += 1;
        }
        metrics::counter!("pipeline.sweep.enqueued").increment(enqueued as u64);
        Ok(Some(enqueued))
    }
}
