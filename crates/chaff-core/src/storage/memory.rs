//! In-memory store used by tests and embedders that don't want a file.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{keys, Store};
use crate::activity::BrowsingActivity;
use crate::config::SimulationConfig;
use crate::error::StoreError;
use crate::profile::Profile;
use crate::stats::Statistics;

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
    /// When set, every write fails. Lets tests exercise failure paths.
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn load_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        match records.get(key) {
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(|e| StoreError::CorruptRecord {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn save_record<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::QueryFailed("write failure injected".into()));
        }
        let json = serde_json::to_string(value).map_err(|e| StoreError::CorruptRecord {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.insert(key.to_string(), json);
        Ok(())
    }
}

impl Store for MemoryStore {
    fn load_config(&self) -> Result<SimulationConfig, StoreError> {
        Ok(self.load_record(keys::CONFIG)?.unwrap_or_default())
    }

    fn save_config(&self, config: &SimulationConfig) -> Result<(), StoreError> {
        self.save_record(keys::CONFIG, config)
    }

    fn load_profile(&self) -> Result<Option<Profile>, StoreError> {
        self.load_record(keys::PROFILE)
    }

    fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        self.save_record(keys::PROFILE, profile)
    }

    fn load_statistics(&self) -> Result<Statistics, StoreError> {
        Ok(self.load_record(keys::STATISTICS)?.unwrap_or_default())
    }

    fn save_statistics(&self, statistics: &Statistics) -> Result<(), StoreError> {
        self.save_record(keys::STATISTICS, statistics)
    }

    fn load_history(&self) -> Result<Vec<BrowsingActivity>, StoreError> {
        Ok(self.load_record(keys::HISTORY)?.unwrap_or_default())
    }

    fn save_history(&self, history: &[BrowsingActivity]) -> Result<(), StoreError> {
        self.save_record(keys::HISTORY, &history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_and_injected_failure() {
        let store = MemoryStore::new();
        let mut config = SimulationConfig::default();
        config.enabled = true;
        store.save_config(&config).unwrap();
        assert!(store.load_config().unwrap().enabled);

        store.set_fail_writes(true);
        assert!(store.save_config(&config).is_err());
        // Reads still work.
        assert!(store.load_config().unwrap().enabled);
    }
}
