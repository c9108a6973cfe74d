//! In-memory release-date cache shared across a build session

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::age::types::Coordinate;

/// Maps (coordinate, version) pairs to release dates for the lifetime of
/// one build session. A published version's release date never changes, so
/// entries are never evicted and writes are idempotent. Safe for concurrent
/// readers and writers; the lock is only held for single map operations.
#[derive(Debug, Default)]
pub struct ReleaseDateCache {
    inner: Mutex<HashMap<Coordinate, HashMap<String, NaiveDate>>>,
}

impl ReleaseDateCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Coordinate, HashMap<String, NaiveDate>>> {
        // No code path panics while holding the guard; recover from
        // poisoning instead of propagating it.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, coordinate: &Coordinate, version: &str) -> Option<NaiveDate> {
        self.lock()
            .get(coordinate)
            .and_then(|versions| versions.get(version))
            .copied()
    }

    pub fn put(&self, coordinate: &Coordinate, version: &str, release_date: NaiveDate) {
        self.lock()
            .entry(coordinate.clone())
            .or_default()
            .insert(version.to_string(), release_date);
    }

    /// Number of distinct coordinates with at least one cached version.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every entry. Used between independent build sessions in a
    /// long-lived process (and for test isolation).
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn get_returns_none_for_unknown_pair() {
        let cache = ReleaseDateCache::new();
        let coordinate = Coordinate::new("g", "a");

        assert_eq!(cache.get(&coordinate, "1.0.0"), None);
    }

    #[test]
    fn put_then_get_returns_the_stored_date() {
        let cache = ReleaseDateCache::new();
        let coordinate = Coordinate::new("g", "a");

        cache.put(&coordinate, "1.0.0", date(2023, 5, 1));

        assert_eq!(cache.get(&coordinate, "1.0.0"), Some(date(2023, 5, 1)));
    }

    #[test]
    fn versions_of_one_coordinate_are_cached_independently() {
        let cache = ReleaseDateCache::new();
        let coordinate = Coordinate::new("g", "a");

        cache.put(&coordinate, "1.0.0", date(2020, 1, 1));
        cache.put(&coordinate, "2.0.0", date(2024, 1, 1));

        assert_eq!(cache.get(&coordinate, "1.0.0"), Some(date(2020, 1, 1)));
        assert_eq!(cache.get(&coordinate, "2.0.0"), Some(date(2024, 1, 1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn repeated_put_of_the_same_pair_is_idempotent() {
        let cache = ReleaseDateCache::new();
        let coordinate = Coordinate::new("g", "a");

        cache.put(&coordinate, "1.0.0", date(2023, 5, 1));
        cache.put(&coordinate, "1.0.0", date(2023, 5, 1));

        assert_eq!(cache.get(&coordinate, "1.0.0"), Some(date(2023, 5, 1)));
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ReleaseDateCache::new();
        cache.put(&Coordinate::new("g", "a"), "1.0.0", date(2023, 5, 1));

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&Coordinate::new("g", "a"), "1.0.0"), None);
    }

    #[test]
    fn concurrent_writers_never_lose_entries() {
        use std::sync::Arc;

        let cache = Arc::new(ReleaseDateCache::new());
        let handles: Vec<_> = (0..8)
            .map(|thread| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let coordinate = Coordinate::new("g", format!("a{thread}-{i}"));
                        cache.put(&coordinate, "1.0.0", date(2023, 1, 1));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 8 * 50);
    }
}
