use launchpad_core::types::Campaign;
use launchpad_core::LifecycleResult;

use crate::{EventDateStrategy, EventStrategy, MoneyEqualStrategy, MoneyStrategy, StrategyContext};

/// Discriminant of [`Strategy`], for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Money,
    Event,
    EventDate,
    MoneyEqual,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Money => "money",
            StrategyKind::Event => "event",
            StrategyKind::EventDate => "event_date",
            StrategyKind::MoneyEqual => "money_equal",
        }
    }
}

/// The closed set of completion strategies.
///
/// Every operation that mutates the campaign goes through the injected
/// store and mirrors the change into `campaign`. The `check_*` and
/// `close_outdated` operations return whether the campaign advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Money(MoneyStrategy),
    Event(EventStrategy),
    EventDate(EventDateStrategy),
    MoneyEqual(MoneyEqualStrategy),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Money(_) => StrategyKind::Money,
            Strategy::Event(_) => StrategyKind::Event,
            Strategy::EventDate(_) => StrategyKind::EventDate,
            Strategy::MoneyEqual(_) => StrategyKind::MoneyEqual,
        }
    }

    pub fn percent(&self, campaign: &Campaign) -> i64 {
        match self {
            Strategy::Money(s) => s.percent(campaign),
            Strategy::Event(s) => s.percent(campaign),
            Strategy::EventDate(s) => s.percent(campaign),
            Strategy::MoneyEqual(s) => s.percent(campaign),
        }
    }

    /// Full recomputation of `total`.
    pub async fn recalc(&self, ctx: &StrategyContext, campaign: &mut Campaign) -> LifecycleResult<()> {
        match self {
            Strategy::Money(s) => s.recalc(ctx, campaign).await,
            Strategy::Event(s) => s.recalc(ctx, campaign).await,
            Strategy::EventDate(s) => s.recalc(ctx, campaign).await,
            Strategy::MoneyEqual(s) => s.recalc(ctx, campaign).await,
        }
    }

    /// Search -> Harvest. Locks the campaign when it advances.
    pub async fn check_search(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        match self {
            Strategy::Money(s) => s.check_search(ctx, campaign).await,
            Strategy::Event(s) => s.check_search(ctx, campaign).await,
            Strategy::EventDate(s) => s.check_search(ctx, campaign).await,
            Strategy::MoneyEqual(s) => s.check_search(ctx, campaign).await,
        }
    }

    /// Harvest -> Success. Closes the campaign when it advances.
    pub async fn check_harvest(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        match self {
            Strategy::Money(s) => s.check_harvest(ctx, campaign).await,
            Strategy::Event(s) => s.check_harvest(ctx, campaign).await,
            Strategy::EventDate(s) => s.check_harvest(ctx, campaign).await,
            Strategy::MoneyEqual(s) => s.check_harvest(ctx, campaign).await,
        }
    }

    /// Search -> Fail once the release date has passed.
    pub async fn close_outdated(
        &self,
        ctx: &StrategyContext,
        campaign: &mut Campaign,
    ) -> LifecycleResult<bool> {
        match self {
            Strategy::Money(s) => s.close_outdated(ctx, campaign).await,
            Strategy::Event(s) => s.close_outdated(ctx, campaign).await,
            Strategy::EventDate(s) => s.close_outdated(ctx, campaign).await,
            Strategy::MoneyEqual(s) => s.close_outdated(ctx, campaign).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve;
    use crate::testing::{campaign, context, store_with_users};
    use launchpad_core::types::{CampaignStatus, GoalFlags};
    use launchpad_core::FixedClock;

    #[tokio::test]
    async fn test_dispatch_reaches_resolved_strategy() {
        let flags = GoalFlags::new(false, true, true);
        let store = store_with_users(1);
        store.insert_campaign(campaign(1, flags, 0, 40));
        store.create_donation(2, 1, 40).unwrap();
        let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 1).unwrap());

        let strategy = resolve(flags).unwrap();
        assert_eq!(strategy.kind(), StrategyKind::Money);

        let mut c = store.campaign(1).unwrap();
        strategy.recalc(&ctx, &mut c).await.unwrap();
        assert_eq!(strategy.percent(&c), 100);
        assert!(strategy.check_search(&ctx, &mut c).await.unwrap());
        // Money needs every transfer marked paid before closing.
        store.set_donation_paid(store.donations_for(1)[0].id, 1, false).unwrap();
        assert!(!strategy.check_harvest(&ctx, &mut c).await.unwrap());
        assert_eq!(store.campaign(1).unwrap().status(), CampaignStatus::Harvest);
    }

    #[tokio::test]
    async fn test_close_outdated_shared_by_every_strategy() {
        let valid = [
            GoalFlags::new(false, true, true),
            GoalFlags::new(true, false, true),
            GoalFlags::new(true, false, false),
            GoalFlags::new(true, true, false),
        ];
        for (i, flags) in valid.into_iter().enumerate() {
            let id = i as i64 + 1;
            let store = store_with_users(0);
            store.insert_campaign(campaign(id, flags, 5, 500));
            let ctx = context(store.clone(), FixedClock::at_date(2026, 6, 20).unwrap());

            let strategy = resolve(flags).unwrap();
            let mut c = store.campaign(id).unwrap();
            assert!(strategy.close_outdated(&ctx, &mut c).await.unwrap(), "{flags}");
            assert_eq!(store.campaign(id).unwrap().status(), CampaignStatus::Fail);
        }
    }
}
