use chrono::NaiveDate;
use launchpad_core::types::Campaign;
use launchpad_core::{Clock, LifecycleResult, LifecycleStore};
use std::sync::Arc;
use tracing::debug;

/// Injected collaborators every strategy operation runs against.
#[derive(Clone)]
pub struct StrategyContext {
    store: Arc<dyn LifecycleStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for StrategyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyContext")
            .field("today", &self.today())
            .finish()
    }
}

impl StrategyContext {
    pub fn new(store: Arc<dyn LifecycleStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &dyn LifecycleStore {
        self.store.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Search -> Harvest.
    pub(crate) async fn lock(&self, campaign: &mut Campaign) -> LifecycleResult<()> {
        self.store.lock_campaign(campaign).await?;
        metrics::counter!("lifecycle.locked").increment(1);
        debug!(campaign_id = campaign.id, total = campaign.total, "Campaign locked");
        Ok(())
    }

    /// Harvest -> Success, or Search -> Fail when the campaign was never
    /// locked.
    pub(crate) async fn close(&self, campaign: &mut Campaign) -> LifecycleResult<()> {
        self.store.close_campaign(campaign).await?;
        if campaign.locked {
            metrics::counter!("lifecycle.closed_success").increment(1);
        } else {
            metrics::counter!("lifecycle.closed_fail").increment(1);
        }
        debug!(
            campaign_id = campaign.id,
            status = campaign.status().as_str(),
            "Campaign closed"
        );
        Ok(())
    }
}
