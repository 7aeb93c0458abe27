//! Staged background pipeline driving campaigns through their lifecycle.
//!
//! ```text
//! sweep ─┐
//!        ├─> recalculate ─> search-check ─> harvest-check ─> user-rate
//! notify ┘   (id, 100)      (campaign, 10)  (campaign, 10)   (owner id, 100)
//! ```
//!
//! Each stage is one Tokio task reading a bounded channel. Cancelling the
//! sweep closes its outbound channel; every downstream stage drains its
//! inbox, closes its own outbox and exits, and [`PipelineHandle::wait`]
//! joins all five.

pub mod notifier;
pub mod pipeline;
pub mod rate;
pub mod stages;

pub use notifier::DonationNotifier;
pub use pipeline::{LifecyclePipeline, PipelineHandle};
pub use rate::UserStats;
