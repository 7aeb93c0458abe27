//! Persistence port consumed by the lifecycle engine.
//!
//! The engine only ever talks to storage through these traits. Mutating
//! operations touch the affected columns only and mirror the change into
//! the snapshot they are handed, so a stage can keep working with the
//! campaign it already loaded.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::LifecycleResult;
use crate::types::{Campaign, CampaignId, ProjectGroup, User, UserId};

#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Returns `CampaignNotFound` if no such campaign exists.
    async fn get_campaign(&self, id: CampaignId) -> LifecycleResult<Campaign>;

    /// Every campaign that is published and not closed.
    async fn active_campaigns(&self) -> LifecycleResult<Vec<Campaign>>;

    /// Sets `total` to the sum of donation payments.
    async fn update_total_by_payment(&self, campaign: &mut Campaign) -> LifecycleResult<()>;

    /// Sets `total` to the number of donations.
    async fn update_total_by_count(&self, campaign: &mut Campaign) -> LifecycleResult<()>;

    /// Locks the campaign together with all of its current donations.
    async fn lock_campaign(&self, campaign: &mut Campaign) -> LifecycleResult<()>;

    /// Closes the campaign. Donations are left as they are.
    async fn close_campaign(&self, campaign: &mut Campaign) -> LifecycleResult<()>;

    /// Boolean AND over the `paid` flag of the campaign's donations.
    /// True when there are no donations.
    async fn all_donations_paid(&self, id: CampaignId) -> LifecycleResult<bool>;

    /// Sets every donation's payment to `goal_amount / goal_people`.
    async fn set_equal_donation_amount(&self, campaign: &Campaign) -> LifecycleResult<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns `UserNotFound` if no such user exists.
    async fn get_user(&self, id: UserId) -> LifecycleResult<User>;

    async fn update_user(&self, user: &User) -> LifecycleResult<()>;

    /// The user's published campaigns grouped by `(closed, locked)`.
    async fn project_groups_for_rate(&self, user_id: UserId) -> LifecycleResult<Vec<ProjectGroup>>;
}

#[async_trait]
pub trait SystemStore: Send + Sync {
    /// `None` until the first sweep has run.
    async fn last_sweep_at(&self) -> LifecycleResult<Option<DateTime<Utc>>>;

    async fn set_last_sweep_at(&self, at: DateTime<Utc>) -> LifecycleResult<()>;
}

/// Everything the pipeline needs from storage.
pub trait LifecycleStore: CampaignStore + UserStore + SystemStore {}

impl<T> LifecycleStore for T where T: CampaignStore + UserStore + SystemStore {}
