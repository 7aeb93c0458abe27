//! In-memory persistence backend for the lifecycle engine.
//!
//! Production deployments put a relational store behind the same
//! [`launchpad_core::LifecycleStore`] port. This backend serves development,
//! demos and tests, and carries the donation rules the CRUD layer enforces.

pub mod fixture;
pub mod memory;
mod seed;

pub use fixture::Fixture;
pub use memory::MemoryStore;
