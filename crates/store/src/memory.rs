//! Thread-safe in-memory store backed by DashMap.
//!
//! Row-level writes are serialized by DashMap's shard locks. Donation
//! mutations that check-then-write across rows additionally take
//! `donation_writes`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use launchpad_core::types::{
    Campaign, CampaignId, Donation, DonationId, ProjectGroup, User, UserId,
};
use launchpad_core::{CampaignStore, LifecycleError, LifecycleResult, SystemStore, UserStore};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::fixture::Fixture;

pub struct MemoryStore {
    campaigns: DashMap<CampaignId, Campaign>,
    donations: DashMap<DonationId, Donation>,
    users: DashMap<UserId, User>,
    last_sweep: Mutex<Option<DateTime<Utc>>>,
    donation_writes: Mutex<()>,
    next_donation_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("campaigns", &self.campaigns.len())
            .field("donations", &self.donations.len())
            .field("users", &self.users.len())
            .finish()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            campaigns: DashMap::new(),
            donations: DashMap::new(),
            users: DashMap::new(),
            last_sweep: Mutex::new(None),
            donation_writes: Mutex::new(()),
            next_donation_id: AtomicI64::new(1),
        }
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        let store = Self::new();
        for user in fixture.users {
            store.insert_user(user);
        }
        for campaign in fixture.campaigns {
            store.insert_campaign(campaign);
        }
        for donation in fixture.donations {
            store.insert_donation(donation);
        }
        info!(
            users = store.users.len(),
            campaigns = store.campaigns.len(),
            donations = store.donations.len(),
            "Memory store loaded from fixture"
        );
        store
    }

    // ─── Raw inserts ───────────────────────────────────────────────────────

    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn insert_campaign(&self, campaign: Campaign) {
        self.campaigns.insert(campaign.id, campaign);
    }

    /// Inserts without rule checks, keeping the id generator ahead of any
    /// explicit id.
    pub fn insert_donation(&self, donation: Donation) {
        self.next_donation_id
            .fetch_max(donation.id + 1, Ordering::SeqCst);
        self.donations.insert(donation.id, donation);
    }

    // ─── Accessors ─────────────────────────────────────────────────────────

    pub fn campaign(&self, id: CampaignId) -> Option<Campaign> {
        self.campaigns.get(&id).map(|r| r.value().clone())
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.users.get(&id).map(|r| r.value().clone())
    }

    pub fn donation(&self, id: DonationId) -> Option<Donation> {
        self.donations.get(&id).map(|r| r.value().clone())
    }

    /// Donations of one campaign, ordered by id.
    pub fn donations_for(&self, campaign_id: CampaignId) -> Vec<Donation> {
        let mut donations: Vec<Donation> = self
            .donations
            .iter()
            .filter(|r| r.value().campaign_id == campaign_id)
            .map(|r| r.value().clone())
            .collect();
        donations.sort_by_key(|d| d.id);
        donations
    }

    pub fn publish_campaign(&self, id: CampaignId) -> LifecycleResult<Campaign> {
        let mut entry = self
            .campaigns
            .get_mut(&id)
            .ok_or(LifecycleError::CampaignNotFound(id))?;
        entry.published = true;
        Ok(entry.clone())
    }

    // ─── Donation rules ────────────────────────────────────────────────────

    /// One donation per user and campaign, only while the campaign is
    /// published and still in Search.
    pub fn create_donation(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
        payment: i64,
    ) -> LifecycleResult<Donation> {
        let _guard = self.donation_writes.lock();

        if !self.users.contains_key(&user_id) {
            return Err(LifecycleError::UserNotFound(user_id));
        }
        let campaign = self
            .campaign(campaign_id)
            .ok_or(LifecycleError::CampaignNotFound(campaign_id))?;
        if campaign.closed || campaign.locked || !campaign.published {
            return Err(LifecycleError::DonationForbidden(format!(
                "campaign {} is {}",
                campaign_id,
                campaign.status().as_str()
            )));
        }
        let duplicate = self
            .donations
            .iter()
            .any(|r| r.value().campaign_id == campaign_id && r.value().user_id == user_id);
        if duplicate {
            return Err(LifecycleError::DonationForbidden(format!(
                "user {user_id} already donated to campaign {campaign_id}"
            )));
        }

        let donation = Donation {
            id: self.next_donation_id.fetch_add(1, Ordering::SeqCst),
            payment,
            locked: false,
            paid: false,
            user_id,
            campaign_id,
        };
        self.donations.insert(donation.id, donation.clone());
        debug!(donation_id = donation.id, campaign_id, user_id, "Donation created");
        Ok(donation)
    }

    /// The donor may resize an unlocked donation.
    pub fn update_donation_payment(
        &self,
        donation_id: DonationId,
        user_id: UserId,
        payment: i64,
    ) -> LifecycleResult<Donation> {
        let _guard = self.donation_writes.lock();
        let mut entry = self
            .donations
            .get_mut(&donation_id)
            .ok_or_else(|| LifecycleError::DonationForbidden(format!("donation {donation_id} not found")))?;
        if entry.locked || entry.user_id != user_id {
            return Err(LifecycleError::DonationForbidden(format!(
                "donation {donation_id} cannot be resized"
            )));
        }
        entry.payment = payment;
        Ok(entry.clone())
    }

    /// The campaign owner may mark a locked donation as paid.
    pub fn set_donation_paid(
        &self,
        donation_id: DonationId,
        owner_id: UserId,
        paid: bool,
    ) -> LifecycleResult<Donation> {
        let _guard = self.donation_writes.lock();
        let campaign_id = self
            .donations
            .get(&donation_id)
            .map(|r| r.value().campaign_id)
            .ok_or_else(|| LifecycleError::DonationForbidden(format!("donation {donation_id} not found")))?;
        let campaign = self
            .campaign(campaign_id)
            .ok_or(LifecycleError::CampaignNotFound(campaign_id))?;

        let mut entry = self
            .donations
            .get_mut(&donation_id)
            .ok_or_else(|| LifecycleError::DonationForbidden(format!("donation {donation_id} not found")))?;
        if !entry.locked || campaign.owner_id != owner_id {
            return Err(LifecycleError::DonationForbidden(format!(
                "donation {donation_id} cannot be marked paid"
            )));
        }
        entry.paid = paid;
        Ok(entry.clone())
    }

    /// The donor may withdraw an unlocked donation.
    pub fn delete_donation(&self, donation_id: DonationId, user_id: UserId) -> LifecycleResult<Donation> {
        let _guard = self.donation_writes.lock();
        let allowed = self
            .donations
            .get(&donation_id)
            .map(|r| !r.value().locked && r.value().user_id == user_id)
            .ok_or_else(|| LifecycleError::DonationForbidden(format!("donation {donation_id} not found")))?;
        if !allowed {
            return Err(LifecycleError::DonationForbidden(format!(
                "donation {donation_id} cannot be withdrawn"
            )));
        }
        self.donations
            .remove(&donation_id)
            .map(|(_, d)| d)
            .ok_or_else(|| LifecycleError::DonationForbidden(format!("donation {donation_id} not found")))
    }

    fn donation_sum(&self, campaign_id: CampaignId) -> i64 {
        self.donations
            .iter()
            .filter(|r| r.value().campaign_id == campaign_id)
            .fold(0i64, |sum, r| sum.saturating_add(r.value().payment))
    }

    fn donation_count(&self, campaign_id: CampaignId) -> i64 {
        self.donations
            .iter()
            .filter(|r| r.value().campaign_id == campaign_id)
            .count() as i64
    }

    fn save_total(&self, campaign: &mut Campaign, total: i64) -> LifecycleResult<()> {
        let mut entry = self
            .campaigns
            .get_mut(&campaign.id)
            .ok_or(LifecycleError::CampaignNotFound(campaign.id))?;
        entry.total = total;
        campaign.total = total;
        Ok(())
    }
}

#[async_trait]
impl CampaignStore for MemoryStore {
    async fn get_campaign(&self, id: CampaignId) -> LifecycleResult<Campaign> {
        self.campaign(id).ok_or(LifecycleError::CampaignNotFound(id))
    }

    async fn active_campaigns(&self) -> LifecycleResult<Vec<Campaign>> {
        let mut campaigns: Vec<Campaign> = self
            .campaigns
            .iter()
            .filter(|r| r.value().is_active())
            .map(|r| r.value().clone())
            .collect();
        campaigns.sort_by_key(|c| c.id);
        Ok(campaigns)
    }

    async fn update_total_by_payment(&self, campaign: &mut Campaign) -> LifecycleResult<()> {
        let sum = self.donation_sum(campaign.id);
        self.save_total(campaign, sum)
    }

    async fn update_total_by_count(&self, campaign: &mut Campaign) -> LifecycleResult<()> {
        let count = self.donation_count(campaign.id);
        self.save_total(campaign, count)
    }

    async fn lock_campaign(&self, campaign: &mut Campaign) -> LifecycleResult<()> {
        {
            let mut entry = self
                .campaigns
                .get_mut(&campaign.id)
                .ok_or(LifecycleError::CampaignNotFound(campaign.id))?;
            entry.locked = true;
        }
        let _guard = self.donation_writes.lock();
        for mut donation in self.donations.iter_mut() {
            if donation.campaign_id == campaign.id {
                donation.locked = true;
            }
        }
        campaign.locked = true;
        Ok(())
    }

    async fn close_campaign(&self, campaign: &mut Campaign) -> LifecycleResult<()> {
        let mut entry = self
            .campaigns
            .get_mut(&campaign.id)
            .ok_or(LifecycleError::CampaignNotFound(campaign.id))?;
        entry.closed = true;
        campaign.closed = true;
        Ok(())
    }

    async fn all_donations_paid(&self, id: CampaignId) -> LifecycleResult<bool> {
        Ok(self
            .donations
            .iter()
            .filter(|r| r.value().campaign_id == id)
            .all(|r| r.value().paid))
    }

    async fn set_equal_donation_amount(&self, campaign: &Campaign) -> LifecycleResult<()> {
        if campaign.goal_people <= 0 {
            return Err(LifecycleError::InvalidCampaign(format!(
                "campaign {} has no people goal to split by",
                campaign.id
            )));
        }
        let share = campaign.goal_amount / campaign.goal_people;
        let _guard = self.donation_writes.lock();
        for mut donation in self.donations.iter_mut() {
            if donation.campaign_id == campaign.id {
                donation.payment = share;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: UserId) -> LifecycleResult<User> {
        self.user(id).ok_or(LifecycleError::UserNotFound(id))
    }

    async fn update_user(&self, user: &User) -> LifecycleResult<()> {
        let mut entry = self
            .users
            .get_mut(&user.id)
            .ok_or(LifecycleError::UserNotFound(user.id))?;
        entry.project_count = user.project_count;
        entry.success_rate = user.success_rate;
        Ok(())
    }

    async fn project_groups_for_rate(&self, user_id: UserId) -> LifecycleResult<Vec<ProjectGroup>> {
        let mut groups: BTreeMap<(bool, bool), i64> = BTreeMap::new();
        for entry in self.campaigns.iter() {
            let campaign = entry.value();
            if campaign.owner_id == user_id && campaign.published {
                *groups.entry((campaign.closed, campaign.locked)).or_default() += 1;
            }
        }
        Ok(groups
            .into_iter()
            .map(|((closed, locked), count)| ProjectGroup {
                count,
                closed,
                locked,
            })
            .collect())
    }
}

#[async_trait]
impl SystemStore for MemoryStore {
    async fn last_sweep_at(&self) -> LifecycleResult<Option<DateTime<Utc>>> {
        Ok(*self.last_sweep.lock())
    }

    async fn set_last_sweep_at(&self, at: DateTime<Utc>) -> LifecycleResult<()> {
        *self.last_sweep.lock() = Some(at);
        Ok(())
    }
}
