//! Entry point for donation mutations.

use launchpad_core::types::CampaignId;
use tokio::sync::mpsc;
use tracing::warn;

/// Pushes campaign ids straight into the Recalculate stage after a
/// donation is created, updated or deleted.
///
/// Holds only a weak handle on the entry channel: once the sweep has
/// stopped, live notifiers do not keep the pipeline from shutting down.
#[derive(Debug, Clone)]
pub struct DonationNotifier {
    entry: mpsc::WeakSender<CampaignId>,
}

impl DonationNotifier {
    pub(crate) fn new(entry: &mpsc::Sender<CampaignId>) -> Self {
        Self {
            entry: entry.downgrade(),
        }
    }

    /// Waits for room in the entry channel, then returns. Never reports
    /// failure to the caller; a notification after shutdown is dropped.
    pub async fn notify(&self, campaign_id: CampaignId) {
        let Some(sender) = self.entry.upgrade() else {
            metrics::counter!("pipeline.notify.dropped").increment(1);
            warn!(campaign_id, "Pipeline stopped, donation notification dropped");
            return;
        };
        if sender.send(campaign_id).await.is_err() {
            metrics::counter!("pipeline.notify.dropped").increment(1);
            warn!(campaign_id, "Recalculate stage gone, donation notification dropped");
            return;
        }
        metrics::counter!("pipeline.notify.queued").increment(1);
    }

    /// Whether the pipeline still accepts notifications.
    pub fn is_open(&self) -> bool {
        self.entry.upgrade().map(|s| !s.is_closed()).unwrap_or(false)
    }
}
