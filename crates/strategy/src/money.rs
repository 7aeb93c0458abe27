use launchpad_core::types::Campaign;
use launchpad_core::LifecycleResult;

use crate::outdated::{close_if_outdated, percent_of};
use crate::StrategyContext;

/// Amount goal that ends as soon as the goal is gained.
///
/// Progress is the sum of donation payments. The campaign locks at 100%
/// and succeeds once the author has marked every transfer as paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoneyStrategy;

impl MoneyStrategy {
    pub fn percent(&self, campaign: &Campaign) -> i64 {
        percent_of(campaign.total, campaign.goal_amount)
    }

    pub async fn recalc(&self, ctx: &StrategyContext, campaign: &mut Campaign) -> LifecycleResult<()> {
        ctx.store().update_total_by_payment(campaign).await
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

    pub async fn check_harvest(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        if !ctx.store().all_donations_paid(campaign.id).await? {
            return Ok(false);
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{campaign, context, store_with_users};
    use launchpad_core::types::{CampaignStatus, GoalFlags};
    use launchpad_core::FixedClock;

    const MONEY: GoalFlags = GoalFlags::new(false, true, true);

    #[test]
    fn test_percent_uses_goal_amount() {
        let mut c = campaign(1, MONEY, 10, 200);
        c.total = 50;
        assert_eq!(MoneyStrategy.percent(&c), 25);
        c.goal_amount = 0;
        assert_eq!(MoneyStrategy.percent(&c), 0);
    }

    #[tokio::test]
    async fn test_recalc_sums_payments_and_is_idempotent() {
        let store = store_with_users(3);
        store.insert_campaign(campaign(1, MONEY, 0, 500));
        store.create_donation(2, 1, 120).unwrap();
        store.create_donation(3, 1, 80).unwrap();
        store.create_donation(4, 1, 1).unwrap();
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 1).unwrap());

        let mut c = store.campaign(1).unwrap();
        MoneyStrategy.recalc(&ctx, &mut c).await.unwrap();
        assert_eq!(c.total, 201);
        MoneyStrategy.recalc(&ctx, &mut c).await.unwrap();
        assert_eq!(c.total, 201);
        assert_eq!(store.campaign(1).unwrap().total, 201);
    }

    #[tokio::test]
    async fn test_check_search_locks_at_goal() {
        let store = store_with_users(2);
        store.insert_campaign(campaign(1, MONEY, 0, 300));
        store.create_donation(2, 1, 100).unwrap();
        let d = store.create_donation(3, 1, 200).unwrap();
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 1).unwrap());

        let mut c = store.campaign(1).unwrap();
        MoneyStrategy.recalc(&ctx, &mut c).await.unwrap();
        assert!(MoneyStrategy.check_search(&ctx, &mut c).await.unwrap());
        assert!(c.locked);
        assert_eq!(store.campaign(1).unwrap().status(), CampaignStatus::Harvest);
        assert!(store.donation(d.id).unwrap().locked);
    }

    #[tokio::test]
    async fn test_check_search_below_goal_does_nothing() {
        let store = store_with_users(1);
        store.insert_campaign(campaign(1, MONEY, 0, 300));
        store.create_donation(2, 1, 299).unwrap();
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 1).unwrap());

        let mut c = store.campaign(1).unwrap();
        MoneyStrategy.recalc(&ctx, &mut c).await.unwrap();
        assert!(!MoneyStrategy.check_search(&ctx, &mut c).await.unwrap());
        assert!(!store.campaign(1).unwrap().locked);
    }

    #[tokio::test]
    async fn test_check_harvest_requires_every_donation_paid() {
        let store = store_with_users(2);
        let mut locked = campaign(1, MONEY, 0, 100);
        locked.total = 100;
        store.insert_campaign(locked);
        let a = store.create_donation(2, 1, 50).unwrap();
        let b = store.create_donation(3, 1, 50).unwrap();
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 1).unwrap());
        let mut c = store.campaign(1).unwrap();
        ctx.lock(&mut c).await.unwrap();

        store.set_donation_paid(a.id, 1, true).unwrap();
        assert!(!MoneyStrategy.check_harvest(&ctx, &mut c).await.unwrap());
        assert!(!store.campaign(1).unwrap().closed);

        store.set_donation_paid(b.id, 1, true).unwrap();
        store.set_donation_paid(a.id, 1, false).unwrap();
        assert!(!MoneyStrategy.check_harvest(&ctx, &mut c).await.unwrap());

        store.set_donation_paid(a.id, 1, true).unwrap();
        assert!(MoneyStrategy.check_harvest(&ctx, &mut c).await.unwrap());
        assert_eq!(store.campaign(1).unwrap().status(), CampaignStatus::Success);
    }

    #[tokio::test]
    async fn test_check_harvest_with_no_donations_advances() {
        let store = store_with_users(0);
        let mut c = campaign(1, MONEY, 0, 100);
        c.locked = true;
        store.insert_campaign(c.clone());
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 1).unwrap());

        assert!(MoneyStrategy.check_harvest(&ctx, &mut c).await.unwrap());
        assert_eq!(store.campaign(1).unwrap().status(), CampaignStatus::Success);
    }

    #[tokio::test]
    async fn test_close_outdated_fails_stale_campaign() {
        let store = store_with_users(1);
        store.insert_campaign(campaign(1, MONEY, 0, 100));
        let d = store.create_donation(2, 1, 10).unwrap();
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 16).unwrap());

        let mut c = store.campaign(1).unwrap();
        assert!(MoneyStrategy.close_outdated(&ctx, &mut c).await.unwrap());
        assert_eq!(store.campaign(1).unwrap().status(), CampaignStatus::Fail);
        assert!(!store.donation(d.id).unwrap().locked);
    }

    #[tokio::test]
    async fn test_close_outdated_keeps_current_campaign_open() {
        let store = store_with_users(0);
        store.insert_campaign(campaign(1, MONEY, 0, 100));
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 15).unwrap());

        let mut c = store.campaign(1).unwrap();
        assert!(!MoneyStrategy.close_outdated(&ctx, &mut c).await.unwrap());
        assert_eq!(store.campaign(1).unwrap().status(), CampaignStatus::Search);
    }
}
