use launchpad_core::types::{Campaign, UserId};
use launchpad_core::LifecycleResult;
use launchpad_strategy::{resolve, StrategyContext};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::report;

const STAGE: &str = "harvest_check";

/// Closes campaigns that are done and forwards their owner's id to
/// User-Rate-Update.
///
/// A locked campaign closes as a success when its strategy's harvest rule
/// holds. An unlocked one can only close as a failure, when its release
/// date has passed. A campaign that arrives already closed was closed
/// upstream during this pass and only needs its owner re-rated.
pub struct HarvestCheckStage {
    ctx: StrategyContext,
    inbox: mpsc::Receiver<Campaign>,
    outbox: mpsc::Sender<UserId>,
}

impl HarvestCheckStage {
    pub fn new(ctx: StrategyContext, inbox: mpsc::Receiver<Campaign>, outbox: mpsc::Sender<UserId>) -> Self {
        Self { ctx, inbox, outbox }
    }

    pub async fn run(mut self) {
        info!(stage = STAGE, "Stage started");
        while let Some(campaign) = self.inbox.recv().await {
            metrics::counter!("pipeline.processed", "stage" => STAGE).increment(1);
            let id = campaign.id;
            let owner_id = match self.process(campaign).await {
                Ok(Some(owner_id)) => owner_id,
                Ok(None) => continue,
                Err(e) => {
                    report(STAGE, id, &e);
                    continue;
                }
            };
            if self.outbox.send(owner_id).await.is_err() {
                warn!(stage = STAGE, "User-Rate-Update stage gone, stopping");
                break;
            }
        }
        info!(stage = STAGE, "Stage stopped");
    }

    /// The owner to re-rate if the campaign closed.
    pub async fn process(&self, mut campaign: Campaign) -> LifecycleResult<Option<UserId>> {
        if campaign.closed {
            return Ok(Some(campaign.owner_id));
        }
        let strategy = resolve(campaign.flags)?;
        let closed = if campaign.locked {
            strategy.check_harvest(&self.ctx, &mut campaign).await?
        } else {
            strategy.close_outdated(&self.ctx, &mut campaign).await?
        };
        if !closed {
            return Ok(None);
        }
        debug!(
            campaign_id = campaign.id,
            status = campaign.status().as_str(),
            owner_id = campaign.owner_id,
            "Campaign resolved"
        );
        Ok(Some(campaign.owner_id))
    }
}
