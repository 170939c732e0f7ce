// Persistence for saved formations and the history log
// JSON documents under two fixed keys of an injectable key-value store

pub mod error;
pub mod store;

pub use error::{PersistError, StoreError};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::config::StorageConfig;
use crate::formation::Formation;
use crate::history::{HistoryEntry, HistoryLog};
use serde::de::DeserializeOwned;

pub const FORMATIONS_KEY: &str = "mtp_formations";
pub const HISTORY_KEY: &str = "mtp_history";

pub struct PersistenceStore<S> {
    store: S,
    formations_key: String,
    history_key: String,
}

impl<S: KeyValueStore> PersistenceStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_keys(store, &StorageConfig::default())
    }

    pub fn with_keys(store: S, keys: &StorageConfig) -> Self {
        Self {
            store,
            formations_key: keys.formations_key.clone(),
            history_key: keys.history_key.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Saved formations, newest first. Unreadable data counts as none.
    pub fn load_formations(&self) -> Vec<Formation> {
        self.load_list(&self.formations_key)
    }

    /// Persisted history, truncated to `capacity`. Unreadable data counts as none.
    pub fn load_history(&self, capacity: usize) -> HistoryLog {
        let entries: Vec<HistoryEntry> = self.load_list(&self.history_key);
        HistoryLog::from_entries(entries, capacity)
    }

    pub fn save_formations(&mut self, formations: &[Formation]) -> Result<(), PersistError> {
        let json = serde_json::to_string(formations)?;
        self.store.set(&self.formations_key, &json)?;
        Ok(())
    }

    pub fn save_history(&mut self, history: &HistoryLog) -> Result<(), PersistError> {
        let json = serde_json::to_string(history.entries())?;
        self.store.set(&self.history_key, &json)?;
        Ok(())
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Could not read '{}', starting empty: {}", key, err);
                return Vec::new();
            }
        };

        // `null` is what an unset key held in the browser build
        match serde_json::from_str::<Option<Vec<T>>>(&raw) {
            Ok(list) => list.unwrap_or_default(),
            Err(err) => {
                log::warn!("Discarding unreadable data under '{}': {}", key, err);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_players, layout_for};
    use chrono::{TimeZone, Utc};

    fn formation(id: &str) -> Formation {
        Formation {
            id: id.to_string(),
            name: "Meu Time Pro - 5x5".to_string(),
            game_type: "5x5".to_string(),
            players: default_players(&layout_for("5x5")),
            date: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_missing_keys_load_empty() {
        let persistence = PersistenceStore::new(MemoryStore::new());
        assert!(persistence.load_formations().is_empty());
        assert!(persistence.load_history(50).is_empty());
    }

    #[test]
    fn test_corrupt_data_loads_empty() {
        let store = MemoryStore::new()
            .with_value(FORMATIONS_KEY, "{not json")
            .with_value(HISTORY_KEY, "null");
        let persistence = PersistenceStore::new(store);

        assert!(persistence.load_formations().is_empty());
        assert!(persistence.load_history(50).is_empty());
    }

    #[test]
    fn test_formations_roundtrip() {
        let mut persistence = PersistenceStore::new(MemoryStore::new());
        let saved = vec![formation("f_2"), formation("f_1")];

        persistence.save_formations(&saved).unwrap();

        assert_eq!(persistence.load_formations(), saved);
    }

    #[test]
    fn test_history_is_truncated_on_load() {
        let mut log = HistoryLog::new(10);
        for i in 0..10 {
            log.append(HistoryEntry::export(Utc.timestamp_opt(i, 0).unwrap()));
        }
        let mut persistence = PersistenceStore::new(MemoryStore::new());
        persistence.save_history(&log).unwrap();

        let loaded = persistence.load_history(4);
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded.entries(), &log.entries()[..4]);
    }

    #[test]
    fn test_custom_keys() {
        let keys = StorageConfig {
            formations_key: "club_formations".to_string(),
            history_key: "club_history".to_string(),
        };
        let mut persistence = PersistenceStore::with_keys(MemoryStore::new(), &keys);
        persistence.save_formations(&[formation("f_1")]).unwrap();

        assert!(persistence.store().raw("club_formations").is_some());
        assert!(persistence.store().raw(FORMATIONS_KEY).is_none());
    }
}
