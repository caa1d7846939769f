//! Process-lifetime in-memory state for weather submissions.
//!
//! Holds the id → record map, the append-only submission history and the set
//! of seen `(location, date)` keys. All three live behind one mutex so the
//! duplicate check and the inserts happen as a single step.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::{AppError, HistoryEntry, WeatherRecord};

// ---

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<Uuid, WeatherRecord>,
    history: Vec<HistoryEntry>,
    seen_keys: HashSet<String>,
}

/// Shared handle; clones point at the same state.
#[derive(Debug, Clone, Default)]
pub struct WeatherStore {
    inner: Arc<Mutex<Inner>>,
}

impl WeatherStore {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // ---
        // Nothing panics while holding the lock, but recover the data if it ever does.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a record, rejecting it if its composite key was already seen.
    ///
    /// On success the key, the history entry and the record are all written;
    /// on rejection nothing is.
    pub fn insert(&self, record: WeatherRecord) -> Result<(), AppError> {
        // ---
        let key = record.key();
        let mut inner = self.lock();

        if inner.seen_keys.contains(&key) || inner.records.contains_key(&record.id) {
            tracing::debug!("Rejecting duplicate submission for key {}", key);
            return Err(AppError::DuplicateSubmission);
        }

        inner.seen_keys.insert(key);
        inner.history.push((record.location.clone(), record.id));
        inner.records.insert(record.id, record);

        tracing::debug!("Store now holds {} records", inner.records.len());
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Option<WeatherRecord> {
        self.lock().records.get(id).cloned()
    }

    /// Snapshot of the history, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().history.clone()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().seen_keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::{GeoInfo, WeatherRequest, WeatherSnapshot};
    use serde_json::Number;
    use std::collections::BTreeMap;

    fn create_test_record(location: &str, date: &str) -> WeatherRecord {
        // ---
        let request = WeatherRequest {
            date: date.to_string(),
            location: location.to_string(),
            notes: Some("note".to_string()),
        };
        let weather = WeatherSnapshot {
            temperature: Number::from(20),
            description: vec!["Sunny".to_string()],
            humidity: Number::from(40),
            wind_speed: Number::from(12),
            uv_index: Number::from(5),
            icon: "sunny.png".to_string(),
            feelslike: Number::from(21),
            visibility: Number::from(10),
            sunrise: "N/A".to_string(),
            sunset: "N/A".to_string(),
            air_quality: BTreeMap::new(),
        };
        let geo = GeoInfo {
            lat: 1.0,
            lon: 2.0,
            timezone: "UTC".to_string(),
        };
        WeatherRecord::new(Uuid::new_v4(), &request, weather, geo)
    }

    #[test]
    fn test_insert_then_get() {
        // ---
        let store = WeatherStore::new();
        let record = create_test_record("Lima", "2024-05-01");
        let id = record.id;

        store.insert(record.clone()).unwrap();

        assert_eq!(store.get(&id), Some(record));
        assert!(store.contains_key("lima_2024-05-01"));
        assert_eq!(store.history(), vec![("lima".to_string(), id)]);
    }

    #[test]
    fn test_duplicate_rejected_without_mutation() {
        // ---
        let store = WeatherStore::new();
        let first = create_test_record("Lima", "2024-05-01");
        let first_id = first.id;
        store.insert(first).unwrap();

        let dup = create_test_record("  LIMA ", "2024-05-01");
        let dup_id = dup.id;
        let err = store.insert(dup).unwrap_err();

        assert!(matches!(err, AppError::DuplicateSubmission));
        assert_eq!(store.len(), 1);
        assert!(store.get(&dup_id).is_none());
        assert_eq!(store.history(), vec![("lima".to_string(), first_id)]);
    }

    #[test]
    fn test_same_location_different_date_accepted() {
        // ---
        let store = WeatherStore::new();
        store.insert(create_test_record("Lima", "2024-05-01")).unwrap();
        store.insert(create_test_record("Lima", "2024-05-02")).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.contains_key("lima_2024-05-02"));
    }

    #[test]
    fn test_history_preserves_submission_order() {
        // ---
        let store = WeatherStore::new();
        let mut expected = Vec::new();
        for city in ["Oslo", "Lima", "Cairo", "Lima"] {
            let record = create_test_record(city, if city == "Lima" { "d1" } else { "d0" });
            expected.push((record.location.clone(), record.id));
            // The second Lima/d1 is a duplicate and must not show up.
            if store.insert(record).is_err() {
                expected.pop();
            }
        }

        let history = store.history();
        assert_eq!(history, expected);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].0, "oslo");
        assert_eq!(history[2].0, "cairo");
    }

    #[test]
    fn test_unknown_id_is_none() {
        // ---
        let store = WeatherStore::new();
        assert!(store.is_empty());
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_clones_share_state() {
        // ---
        let store = WeatherStore::new();
        let handle = store.clone();
        handle.insert(create_test_record("Rome", "2024-01-01")).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_duplicates_yield_one_success() {
        // ---
        let store = WeatherStore::new();
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.insert(create_test_record("Rome", "2024-01-01")))
            })
            .collect();

        let successes = threads
            .into_iter()
            .map(|t| t.join().unwrap())
            .filter(|r| r.is_ok())
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.history().len(), 1);
    }
}
