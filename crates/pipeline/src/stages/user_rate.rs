use launchpad_core::types::{User, UserId};
use launchpad_core::{LifecycleError, LifecycleResult};
use launchpad_strategy::StrategyContext;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::report;
use crate::rate::UserStats;

const STAGE: &str = "user_rate";

/// Final stage: recomputes an owner's project count and success rate.
pub struct UserRateStage {
    ctx: StrategyContext,
    inbox: mpsc::Receiver<UserId>,
}

impl UserRateStage {
    pub fn new(ctx: StrategyContext, inbox: mpsc::Receiver<UserId>) -> Self {
        Self { ctx, inbox }
    }

    pub async fn run(mut self) {
        info!(stage = STAGE, "Stage started");
        while let Some(user_id) = self.inbox.recv().await {
            metrics::counter!("pipeline.processed", "stage" => STAGE).increment(1);
            if let Err(e) = self.process(user_id).await {
                report(STAGE, user_id, &e);
            }
        }
        info!(stage = STAGE, "Stage stopped");
    }

    /// Always a full recompute from the grouped query, never a delta.
    pub async fn process(&self, user_id: UserId) -> LifecycleResult<User> {
        if user_id <= 0 {
            return Err(LifecycleError::InvalidId(user_id));
        }
        let store = self.ctx.store();
        let mut user = store.get_user(user_id).await?;
        let groups = store.project_groups_for_rate(user_id).await?;
        let stats = UserStats::from_groups(&groups);

        user.project_count = stats.project_count;
        user.success_rate = stats.success_rate;
        store.update_user(&user).await?;

        debug!(
            user_id,
            project_count = user.project_count,
            success_rate = user.success_rate,
            "User rate updated"
        );
        Ok(user)
    }
}
