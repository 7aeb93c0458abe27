use launchpad_core::types::Campaign;
use launchpad_core::LifecycleResult;

use crate::outdated::{close_if_outdated, percent_of};
use crate::StrategyContext;

/// People goal that ends as soon as enough partakers have signed up.
///
/// Progress is the number of donations; payment values are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStrategy;

impl EventStrategy {
    pub fn percent(&self, campaign: &Campaign) -> i64 {
        percent_of(campaign.total, campaign.goal_people)
    }

    pub async fn recalc(&self, ctx: &StrategyContext, campaign: &mut Campaign) -> LifecycleResult<()> {
        ctx.store().update_total_by_count(campaign).await
    }

    pub async fn check_search(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        if self.percent(campaign) < 100 {
            return Ok(false);
        }
        ctx.lock(campaign).await?;
        Ok(true)
    }

    /// Nothing to settle for an event: a locked campaign closes at once.
    pub async fn check_harvest(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        ctx.close(campaign).await?;
        Ok(true)
    }

    pub async fn close_outdated(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        close_if_outdated(ctx, campaign).await
    }
}
