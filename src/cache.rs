//! Read-through cache for listing views.
//!
//! Owned by the calling layer, never by the decision engines. Callers
//! invalidate entries explicitly when they mutate the records a view was
//! computed from.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::StudioError;

/// Month key for calendar views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

/// Key-to-value cache with manual invalidation.
#[derive(Debug, Default)]
pub struct ListingCache<K, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> ListingCache<K, V> {
    pub fn new() -> Self {
        ListingCache {
            entries: BTreeMap::new(),
        }
    }

    /// Look up a cached value without loading.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Return the cached value, loading and storing it on a miss.
    ///
    /// # Errors
    /// Propagates the loader's error; nothing is cached on failure.
    pub fn fetch(
        &mut self,
        key: K,
        loader: impl FnOnce() -> Result<V, StudioError>,
    ) -> Result<&V, StudioError> {
        match self.entries.entry(key) {
            Entry::Occupied(occupied) => Ok(occupied.into_mut()),
            Entry::Vacant(vacant) => {
                let value = loader()?;
                Ok(vacant.insert(value))
            }
        }
    }

    /// Drop one cached entry.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_loads_once_and_serves_from_cache() {
        let mut cache: ListingCache<MonthKey, u32> = ListingCache::new();
        let key = MonthKey {
            year: 2025,
            month: 6,
        };
        let mut loads = 0;
        let value = cache
            .fetch(key, || {
                loads += 1;
                Ok(30)
            })
            .unwrap();
        assert_eq!(*value, 30);

        let again = cache
            .fetch(key, || {
                loads += 1;
                Ok(99)
            })
            .unwrap();
        assert_eq!(*again, 30);
        assert_eq!(loads, 1);
    }

    #[test]
    fn invalidation_forces_a_reload() {
        let mut cache: ListingCache<MonthKey, u32> = ListingCache::new();
        let key = MonthKey {
            year: 2025,
            month: 6,
        };
        cache.fetch(key, || Ok(30)).unwrap();
        assert!(cache.invalidate(&key));
        assert!(!cache.invalidate(&key));
        let reloaded = cache.fetch(key, || Ok(99)).unwrap();
        assert_eq!(*reloaded, 99);
    }

    #[test]
    fn failed_loads_cache_nothing() {
        let mut cache: ListingCache<MonthKey, u32> = ListingCache::new();
        let key = MonthKey {
            year: 2025,
            month: 6,
        };
        let result = cache.fetch(key, || {
            Err(StudioError::Io("listing failed".to_string()))
        });
        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
