//! SQLite-backed record store.
//!
//! Records live as JSON values in a two-column kv table, one row per
//! logical record. The file sits at `~/.config/chaff/chaff.db`.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{data_dir, keys, Store};
use crate::activity::BrowsingActivity;
use crate::config::SimulationConfig;
use crate::error::StoreError;
use crate::profile::Profile;
use crate::stats::Statistics;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at `~/.config/chaff/chaff.db`, creating the schema
    /// if it doesn't exist.
    pub fn open() -> Result<Self, StoreError> {
        Self::open_at(data_dir()?.join("chaff.db"))
    }

    /// Open at an explicit path (tests use a temp dir).
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// In-memory store, for tests.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    fn load_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM records WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(json) => {
                let value =
                    serde_json::from_str(&json).map_err(|e| StoreError::CorruptRecord {
                        key: key.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(Some(value))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_record<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|e| StoreError::CorruptRecord {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.conn.execute(
            "INSERT OR REPLACE INTO records (key, value) VALUES (?1, ?2)",
            params![key, json],
        )?;
        Ok(())
    }
}

impl Store for SqliteStore {
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
