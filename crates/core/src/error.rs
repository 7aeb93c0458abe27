use crate::types::{CampaignId, GoalFlags, UserId};
use thiserror::Error;

pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("No strategy matches project type flags ({flags})")]
    NoStrategy { flags: GoalFlags },

    #[error("Campaign {0} not found")]
    CampaignNotFound(CampaignId),

    #[error("User {0} not found")]
    UserNotFound(UserId),

    #[error("Invalid identifier: {0}")]
    InvalidId(i64),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid campaign: {0}")]
    InvalidCampaign(String),

    #[error("Donation change forbidden: {0}")]
    DonationForbidden(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LifecycleError {
    /// Transient failures clear up on their own; the next sweep retries the
    /// campaign. Everything else needs the data fixed first.
    pub fn is_transient(&self) -> bool {
        matches!(self, LifecycleError::Store(_) | LifecycleError::Io(_))
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LifecycleError::NoStrategy { .. } => "no_strategy",
            LifecycleError::CampaignNotFound(_) => "campaign_not_found",
            LifecycleError::UserNotFound(_) => "user_not_found",
            LifecycleError::InvalidId(_) => "invalid_id",
            LifecycleError::Store(_) => "store",
            LifecycleError::InvalidCampaign(_) => "invalid_campaign",
            LifecycleError::DonationForbidden(_) => "donation_forbidden",
            LifecycleError::Config(_) => "config",
            LifecycleError::Serialization(_) => "serialization",
            LifecycleError::Io(_) => "io",
        }
    }
}

impl From<config::ConfigError> for LifecycleError {
    fn from(e: config::ConfigError) -> Self {
        LifecycleError::Config(e.to_string())
    }
}
