use launchpad_core::types::{Campaign, CampaignId};
use launchpad_core::{LifecycleError, LifecycleResult};
use launchpad_strategy::{resolve, StrategyContext};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::report;

const STAGE: &str = "recalculate";

/// Recomputes `total` for each incoming campaign id and forwards the
/// refreshed campaign to Search-Check.
pub struct RecalculateStage {
    ctx: StrategyContext,
    inbox: mpsc::Receiver<CampaignId>,
    outbox: mpsc::Sender<Campaign>,
}

impl RecalculateStage {
    pub fn new(
        ctx: StrategyContext,
        inbox: mpsc::Receiver<CampaignId>,
        outbox: mpsc::Sender<Campaign>,
    ) -> Self {
        Self { ctx, inbox, outbox }
    }

    pub async fn run(mut self) {
        info!(stage = STAGE, "Stage started");
        while let Some(id) = self.inbox.recv().await {
            metrics::counter!("pipeline.processed", "stage" => STAGE).increment(1);
            let campaign = match self.process(id).await {
                Ok(Some(campaign)) => campaign,
                Ok(None) => continue,
                Err(e) => {
                    report(STAGE, id, &e);
                    continue;
                }
            };
            if self.outbox.send(campaign).await.is_err() {
                warn!(stage = STAGE, "Search-Check stage gone, stopping");
                break;
            }
        }
        info!(stage = STAGE, "Stage stopped");
    }

    /// `None` when the campaign is no longer eligible for the pipeline.
    pub async fn process(&self, id: CampaignId) -> LifecycleResult<Option<Campaign>> {
        if id <= 0 {
            return Err(LifecycleError::InvalidId(id));
        }
        let mut campaign = self.ctx.store().get_campaign(id).await?;
        if !campaign.is_active() {
            debug!(campaign_id = id, status = campaign.status().as_str(), "Campaign not active, skipped");
            return Ok(None);
        }
        // Totals are frozen once donations are locked.
        if campaign.locked {
            return Ok(Some(campaign));
        }
        let strategy = resolve(campaign.flags)?;
        strategy.recalc(&self.ctx, &mut campaign).await?;
        debug!(
            campaign_id = id,
            strategy = strategy.kind().as_str(),
            total = campaign.total,
            percent = strategy.percent(&campaign),
            "Campaign recalculated"
        );
        Ok(Some(campaign))
    }
}
