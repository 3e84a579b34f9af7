// Forecast cache.
// Ordered, write-through key-value store over a pluggable storage backend.

#![allow(dead_code)]

pub mod key;
pub mod paths;
pub mod store;

pub use key::ForecastKey;
pub use store::{CacheEntry, CacheStorage, JsonFileStorage, MemoryStorage};

use crate::error::Result;

/// Forecast results keyed by (date, latitude, longitude).
///
/// Every `set` rewrites the complete snapshot to storage before returning.
/// Entries iterate in insertion order; overwriting a key keeps its position.
#[derive(Debug)]
pub struct ForecastCache<S: CacheStorage> {
    entries: Vec<CacheEntry>,
    storage: S,
}

impl<S: CacheStorage> ForecastCache<S> {
    /// Load the stored mapping, or start empty if nothing was stored yet.
    /// Storage that exists but cannot be parsed is an error.
    pub fn load(storage: S) -> Result<Self> {
        let entries = storage.load()?.unwrap_or_default();
        tracing::debug!(entries = entries.len(), "Loaded forecast cache");
        Ok(Self { entries, storage })
    }

    /// Cached value for `key`. The outer `None` means the key was never stored;
    /// `Some(None)` is a stored unknown.
    pub fn get(&self, key: &ForecastKey) -> Option<Option<f64>> {
        self.position(key).map(|i| self.entries[i].1)
    }

    pub fn contains(&self, key: &ForecastKey) -> bool {
        self.position(key).is_some()
    }

    /// Insert or overwrite, then persist the whole mapping.
    pub fn set(&mut self, key: ForecastKey, value: Option<f64>) -> Result<()> {
        match self.position(&key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
        self.storage.save(&self.entries)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ForecastKey, Option<f64>)> {
        self.entries.iter().map(|(key, value)| (key, *value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ForecastKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, key: &ForecastKey) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(lat: &str, lon: &str, date: &str) -> ForecastKey {
        ForecastKey::new(lat, lon, date)
    }

    #[test]
    fn test_load_empty_when_nothing_stored() {
        let cache = ForecastCache::load(MemoryStorage::new()).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.iter().count(), 0);
    }

    #[test]
    fn test_get_distinguishes_missing_from_unknown() {
        let mut cache = ForecastCache::load(MemoryStorage::new()).unwrap();
        let k = key("51.5", "-0.1", "2024-01-01");

        assert_eq!(cache.get(&k), None);
        assert!(!cache.contains(&k));

        cache.set(k.clone(), None).unwrap();
        assert_eq!(cache.get(&k), Some(None));
        assert!(cache.contains(&k));
    }

    #[test]
    fn test_set_writes_through_every_time() {
        let mut cache = ForecastCache::load(MemoryStorage::new()).unwrap();

        cache.set(key("1", "1", "2024-01-01"), Some(1.0)).unwrap();
        assert_eq!(cache.storage().save_count(), 1);

        cache.set(key("2", "2", "2024-01-01"), Some(2.0)).unwrap();
        assert_eq!(cache.storage().save_count(), 2);
        assert_eq!(cache.storage().snapshot().map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut cache = ForecastCache::load(MemoryStorage::new()).unwrap();
        cache.set(key("1", "1", "2024-01-01"), Some(1.0)).unwrap();
        cache.set(key("2", "2", "2024-01-01"), Some(2.0)).unwrap();
        cache.set(key("1", "1", "2024-01-01"), Some(5.0)).unwrap();

        let entries: Vec<_> = cache.iter().map(|(k, v)| (k.latitude.clone(), v)).collect();
        assert_eq!(
            entries,
            vec![("1".to_string(), Some(5.0)), ("2".to_string(), Some(2.0))]
        );
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_iteration_is_repeatable() {
        let storage = MemoryStorage::with_entries(vec![
            (key("1", "1", "2024-01-03"), Some(0.0)),
            (key("2", "2", "2024-01-01"), None),
        ]);
        let cache = ForecastCache::load(storage).unwrap();

        let first: Vec<String> = cache.keys().map(ToString::to_string).collect();
        let second: Vec<String> = cache.keys().map(ToString::to_string).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["2024-01-03_1_1", "2024-01-01_2_2"]);
    }

    #[test]
    fn test_file_round_trip_in_fresh_instance() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("weather_cache.json");

        let mut cache = ForecastCache::load(JsonFileStorage::new(&path)).unwrap();
        cache.set(key("51.5", "-0.1", "2024-01-01"), Some(3.2)).unwrap();
        cache.set(key("40.7", "-74.0", "2024-01-02"), None).unwrap();
        cache.set(key("35.6", "139.6", "2024-01-03"), Some(0.0)).unwrap();

        let reloaded = ForecastCache::load(JsonFileStorage::new(&path)).unwrap();
        let before: Vec<_> = cache.iter().collect();
        let after: Vec<_> = reloaded.iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_separator_in_coordinates_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("weather_cache.json");

        let mut cache = ForecastCache::load(JsonFileStorage::new(&path)).unwrap();
        cache.set(key("1_2", "3", "2024-01-01"), Some(1.0)).unwrap();
        cache.set(key("1", "2_3", "2024-01-01"), Some(2.0)).unwrap();
        cache.set(key("4", "5", "2024-01-01"), None).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key("1_2", "3", "2024-01-01")), Some(Some(2.0)));

        let reloaded = ForecastCache::load(JsonFileStorage::new(&path)).unwrap();
        assert_eq!(reloaded.len(), cache.len());
        let before: Vec<_> = cache.iter().collect();
        let after: Vec<_> = reloaded.iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("weather_cache.json");
        std::fs::write(&path, "this is not json").unwrap();

        assert!(ForecastCache::load(JsonFileStorage::new(&path)).is_err());
    }
}
