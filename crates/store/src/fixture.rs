//! JSON fixture documents for seeding a [`MemoryStore`].

use std::path::Path;

use launchpad_core::types::{Campaign, Donation, User};
use launchpad_core::LifecycleResult;
use serde::{Deserialize, Serialize};

use crate::MemoryStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub donations: Vec<Donation>,
}

impl Fixture {
    pub fn from_json(json: &str) -> LifecycleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> LifecycleResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

impl MemoryStore {
    pub fn load_fixture(path: impl AsRef<Path>) -> LifecycleResult<Self> {
        Ok(Self::from_fixture(Fixture::load(path)?))
    }
}
