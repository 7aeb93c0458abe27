//! Shared domain types, errors, configuration and the persistence port of
//! the launchpad campaign lifecycle engine.

pub mod clock;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use error::{LifecycleError, LifecycleResult};
pub use store::{CampaignStore, LifecycleStore, SystemStore, UserStore};
