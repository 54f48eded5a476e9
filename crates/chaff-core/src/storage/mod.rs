//! Persistent storage for the four top-level records.
//!
//! The store contract is a narrow read/write interface: configuration,
//! current profile, statistics and activity history, each loaded and saved
//! as a whole. Last write wins; there are no transactions. Multi-record
//! consistency (history + statistics) comes from the scheduler serializing
//! its ticks, not from the store.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::activity::BrowsingActivity;
use crate::config::SimulationConfig;
use crate::error::StoreError;
use crate::profile::Profile;
use crate::stats::Statistics;

/// Logical record keys.
pub mod keys {
    pub const CONFIG: &str = "config";
    pub const PROFILE: &str = "profile";
    pub const STATISTICS: &str = "statistics";
    pub const HISTORY: &str = "activity-history";
}

/// Read/write contract over the four persisted records.
pub trait Store {
    /// Configuration, or defaults when none was ever saved.
    fn load_config(&self) -> Result<SimulationConfig, StoreError>;
    fn save_config(&self, config: &SimulationConfig) -> Result<(), StoreError>;

    fn load_profile(&self) -> Result<Option<Profile>, StoreError>;
    fn save_profile(&self, profile: &Profile) -> Result<(), StoreError>;

    /// Statistics, zeroed when none was ever saved.
    fn load_statistics(&self) -> Result<Statistics, StoreError>;
    fn save_statistics(&self, statistics: &Statistics) -> Result<(), StoreError>;

    fn load_history(&self) -> Result<Vec<BrowsingActivity>, StoreError>;
    fn save_history(&self, history: &[BrowsingActivity]) -> Result<(), StoreError>;
}

/// Returns `~/.config/chaff[-dev]/` based on CHAFF_ENV.
///
/// Set CHAFF_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CHAFF_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("chaff-dev")
    } else {
        base_dir.join("chaff")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
