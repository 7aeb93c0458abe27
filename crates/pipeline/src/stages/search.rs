use launchpad_core::config::OutdatedCheck;
use launchpad_core::types::Campaign;
use launchpad_core::LifecycleResult;
use launchpad_strategy::{resolve, StrategyContext};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::report;

const STAGE: &str = "search_check";

/// Decides whether a campaign leaves Search for Harvest.
///
/// Locked campaigns pass straight through. What happens to a campaign
/// that did not advance depends on [`OutdatedCheck`].
pub struct SearchCheckStage {
    ctx: StrategyContext,
    outdated_check: OutdatedCheck,
    inbox: mpsc::Receiver<Campaign>,
    outbox: mpsc::Sender<Campaign>,
}

impl SearchCheckStage {
    pub fn new(
        ctx: StrategyContext,
        outdated_check: OutdatedCheck,
        inbox: mpsc::Receiver<Campaign>,
        outbox: mpsc::Sender<Campaign>,
    ) -> Self {
        Self {
            ctx,
            outdated_check,
            inbox,
            outbox,
        }
    }

    pub async fn run(mut self) {
        info!(stage = STAGE, outdated_check = ?self.outdated_check, "Stage started");
        while let Some(campaign) = self.inbox.recv().await {
            metrics::counter!("pipeline.processed", "stage" => STAGE).increment(1);
            let id = campaign.id;
            let forward = match self.process(campaign).await {
                Ok(Some(campaign)) => campaign,
                Ok(None) => continue,
                Err(e) => {
                    report(STAGE, id, &e);
                    continue;
                }
            };
            if self.outbox.send(forward).await.is_err() {
                warn!(stage = STAGE, "Harvest-Check stage gone, stopping");
                break;
            }
        }
        info!(stage = STAGE, "Stage stopped");
    }

    /// Returns the campaign to forward to Harvest-Check, if any.
    pub async fn process(&self, mut campaign: Campaign) -> LifecycleResult<Option<Campaign>> {
        if campaign.locked {
            return Ok(Some(campaign));
        }
        let strategy = resolve(campaign.flags)?;
        if strategy.check_search(&self.ctx, &mut campaign).await? {
            debug!(campaign_id = campaign.id, strategy = strategy.kind().as_str(), "Search ended");
            return Ok(Some(campaign));
        }

        match self.outdated_check {
            OutdatedCheck::Harvest => Ok(Some(campaign)),
            OutdatedCheck::Search => {
                if strategy.close_outdated(&self.ctx, &mut campaign).await? {
                    Ok(Some(campaign))
                } else {
                    Ok(None)
                }
            }
        }
    }
}
