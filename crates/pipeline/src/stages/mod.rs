//! The five pipeline workers.
//!
//! No error from one item ends a stage loop. Only a closed inbox (or, for
//! the sweep, cancellation) does.

pub mod harvest;
pub mod recalculate;
pub mod search;
pub mod sweep;
pub mod user_rate;

pub use harvest::HarvestCheckStage;
pub use recalculate::RecalculateStage;
pub use search::SearchCheckStage;
pub use sweep::SweepStage;
pub use user_rate::UserRateStage;

use launchpad_core::LifecycleError;
use tokio::sync::watch;
use tracing::{error, warn};

/// Logs a dropped item. The campaign stays eligible, so the next sweep
/// picks it up again.
pub(crate) fn report(stage: &'static str, id: i64, err: &LifecycleError) {
    metrics::counter!("pipeline.errors", "stage" => stage, "kind" => err.kind()).increment(1);
    if err.is_transient() {
        error!(stage, id, error = %err, "Store failure, item dropped until next sweep");
    } else {
        warn!(stage, id, error = %err, "Item dropped");
    }
}

/// Resolves once the signal is raised or its sender is gone.
pub(crate) async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}
