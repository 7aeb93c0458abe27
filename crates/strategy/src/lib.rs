//! Completion strategies for crowdfunding campaigns.
//!
//! A campaign's project type carries three capability flags. [`resolve`]
//! maps them to one of four closed strategies, each of which knows how to
//! recompute progress and when a campaign may leave Search (lock) or
//! Harvest (close).

pub mod context;
pub mod event;
pub mod event_date;
pub mod money;
pub mod money_equal;
pub mod outdated;
pub mod resolver;
pub mod strategy;

pub use context::StrategyContext;
pub use event::EventStrategy;
pub use event_date::EventDateStrategy;
pub use money::MoneyStrategy;
pub use money_equal::MoneyEqualStrategy;
pub use resolver::resolve;
pub use strategy::{Strategy, StrategyKind};

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{TimeZone, Utc};
    use launchpad_core::types::{Campaign, GoalFlags, User};
    use launchpad_core::FixedClock;
    use launchpad_store::MemoryStore;
    use std::sync::Arc;

    use crate::StrategyContext;

    pub const OWNER: i64 = 1;

    pub fn campaign(id: i64, flags: GoalFlags, goal_people: i64, goal_amount: i64) -> Campaign {
        Campaign {
            id,
            title: format!("campaign-{id}"),
            subtitle: String::new(),
            description: String::new(),
            release_date: Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap(),
            event_date: None,
            goal_people,
            goal_amount,
            total: 0,
            flags,
            published: true,
            locked: false,
            closed: false,
            owner_id: OWNER,
        }
    }

    pub fn store_with_users(donors: i64) -> Arc<MemoryStore> {
        let store = MemoryStore::new();
        for id in 1..=donors + 1 {
            store.insert_user(User {
                id,
                username: format!("user-{id}"),
                first_name: String::new(),
                last_name: String::new(),
                project_count: 0,
                success_rate: 0.0,
            });
        }
        Arc::new(store)
    }

    pub fn context(store: Arc<MemoryStore>, clock: FixedClock) -> StrategyContext {
        StrategyContext::new(store, Arc::new(clock))
    }
}
