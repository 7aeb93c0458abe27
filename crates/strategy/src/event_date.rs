use launchpad_core::types::Campaign;
use launchpad_core::LifecycleResult;

use crate::{EventStrategy, StrategyContext};

/// People goal evaluated once, on the release date itself.
///
/// The Event rule is only consulted when today's calendar date equals the
/// release date's; there is no early or late trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventDateStrategy {
    event: EventStrategy,
}

impl EventDateStrategy {
    pub fn percent(&self, campaign: &Campaign) -> i64 {
        self.event.percent(campaign)
    }

    pub async fn recalc(&self, ctx: &StrategyContext, campaign: &mut Campaign) -> LifecycleResult<()> {
        self.event.recalc(ctx, campaign).await
    }

    pub async fn check_search(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        if ctx.today() != campaign.release_day() {
            return Ok(false);
        }
        self.event.check_search(ctx, campaign).await
    }

    pub async fn check_harvest(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        self.event.check_harvest(ctx, campaign).await
    }

    pub async fn close_outdated(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        self.event.close_outdated(ctx, campaign).await
    }
}
