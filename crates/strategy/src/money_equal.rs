use launchpad_core::types::Campaign;
use launchpad_core::LifecycleResult;

use crate::{EventDateStrategy, MoneyStrategy, StrategyContext};

/// Fair split: partakers gather by the release date, then share the
/// amount equally.
///
/// Progress and search gating follow [`EventDateStrategy`]. On locking,
/// every donation's payment is set to `goal_amount / goal_people`, and
/// harvest follows [`MoneyStrategy`] (all transfers paid).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoneyEqualStrategy {
    event_date: EventDateStrategy,
    money: MoneyStrategy,
}

impl MoneyEqualStrategy {
    pub fn percent(&self, campaign: &Campaign) -> i64 {
        self.event_date.percent(campaign)
    }

    pub async fn recalc(&self, ctx: &StrategyContext, campaign: &mut Campaign) -> LifecycleResult<()> {
        self.event_date.recalc(ctx, campaign).await
    }

    pub async fn check_search(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        if !self.event_date.check_search(ctx, campaign).await? {
            return Ok(false);
        }
        ctx.store().set_equal_donation_amount(campaign).await?;
        Ok(true)
    }

    pub async fn check_harvest(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        self.money.check_harvest(ctx, campaign).await
    }

    pub async fn close_outdated(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        self.event_date.close_outdated(ctx, campaign).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{campaign, context, store_with_users};
    use launchpad_core::types::{CampaignStatus, GoalFlags};
    use launchpad_core::FixedClock;

    const MONEY_EQUAL: GoalFlags = GoalFlags::new(true, true, false);

    #[tokio::test]
    async fn test_split_goal_amount_on_lock() {
        let store = store_with_users(3);
        store.insert_campaign(campaign(1, MONEY_EQUAL, 3, 900));
        let donations: Vec<_> = (2..=4)
            .map(|user| store.create_donation(user, 1, 1).unwrap())
            .collect();
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 15).unwrap());

        let strategy = MoneyEqualStrategy::default();
        let mut c = store.campaign(1).unwrap();
        strategy.recalc(&ctx, &mut c).await.unwrap();
        assert_eq!(c.total, 3);
        assert!(strategy.check_search(&ctx, &mut c).await.unwrap());

        for d in donations {
            let stored = store.donation(d.id).unwrap();
            assert_eq!(stored.payment, 300);
            assert!(stored.locked);
        }
        assert_eq!(store.campaign(1).unwrap().status(), CampaignStatus::Harvest);
    }

    #[tokio::test]
    async fn test_no_split_before_release_day() {
        let store = store_with_users(2);
        store.insert_campaign(campaign(1, MONEY_EQUAL, 2, 500));
        let d = store.create_donation(2, 1, 7).unwrap();
        store.create_donation(3, 1, 7).unwrap();
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 14).unwrap());

        let strategy = MoneyEqualStrategy::default();
        let mut c = store.campaign(1).unwrap();
        strategy.recalc(&ctx, &mut c).await.unwrap();
        assert!(!strategy.check_search(&ctx, &mut c).await.unwrap());
        assert_eq!(store.donation(d.id).unwrap().payment, 7);
    }

    #[tokio::test]
    async fn test_no_split_after_release_day() {
        let store = store_with_users(2);
        store.insert_campaign(campaign(1, MONEY_EQUAL, 2, 500));
        let d = store.create_donation(2, 1, 7).unwrap();
        store.create_donation(3, 1, 7).unwrap();
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 16).unwrap());

        let strategy = MoneyEqualStrategy::default();
        let mut c = store.campaign(1).unwrap();
        strategy.recalc(&ctx, &mut c).await.unwrap();
        assert_eq!(strategy.percent(&c), 100);
        assert!(!strategy.check_search(&ctx, &mut c).await.unwrap());

        let stored = store.donation(d.id).unwrap();
        assert_eq!(stored.payment, 7);
        assert!(!stored.locked);
        assert!(!c.locked);
        assert_eq!(store.campaign(1).unwrap().status(), CampaignStatus::Search);
    }

    #[tokio::test]
    async fn test_harvest_waits_for_payments() {
        let store = store_with_users(2);
        store.insert_campaign(campaign(1, MONEY_EQUAL, 2, 100));
        let a = store.create_donation(2, 1, 0).unwrap();
        let b = store.create_donation(3, 1, 0).unwrap();
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 15).unwrap());

        let strategy = MoneyEqualStrategy::default();
        let mut c = store.campaign(1).unwrap();
        strategy.recalc(&ctx, &mut c).await.unwrap();
        assert!(strategy.check_search(&ctx, &mut c).await.unwrap());

        store.set_donation_paid(a.id, 1, true).unwrap();
        assert!(!strategy.check_harvest(&ctx, &mut c).await.unwrap());
        store.set_donation_paid(b.id, 1, true).unwrap();
        assert!(strategy.check_harvest(&ctx, &mut c).await.unwrap());
        assert_eq!(store.campaign(1).unwrap().status(), CampaignStatus::Success);
    }
}
