//! Keyed cache of server-state query results.
//!
//! DESIGN
//! ======
//! Entries are addressed by exact [`QueryKey`] and invalidated by prefix, so a
//! mutation can mark a whole key space stale without knowing which reads
//! exist. Values are type-erased; each read names the type it expects and a
//! mismatch reads as absent.
//!
//! TRADE-OFFS
//! ==========
//! Overlapping fetches for the same key are neither deduplicated nor
//! cancelled. The lock is released while a fetch runs, so whichever fetch
//! completes last overwrites the entry, even if it was issued first.

pub mod key;

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub use key::{KeySegment, QueryKey};

type CachedValue = Arc<dyn Any + Send + Sync>;

struct Entry {
    value: Option<CachedValue>,
    invalidated: bool,
    updated_at: Instant,
}

impl Entry {
    fn is_stale(&self, stale_time: Duration) -> bool {
        self.invalidated || self.updated_at.elapsed() >= stale_time
    }
}

pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    stale_time: Duration,
}

impl QueryCache {
    /// Cache whose entries go stale `stale_time` after they were written.
    #[must_use]
    pub fn new(stale_time: Duration) -> Self {
        Self { entries: Mutex::new(HashMap::new()), stale_time }
    }

    #[must_use]
    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Mark every entry under `prefix` stale. Returns how many entries matched.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.lock();
        let mut matched = 0_usize;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                matched += 1;
            }
        }
        tracing::debug!(prefix = %prefix, matched, "cache invalidated");
        matched
    }

    /// Write `value` under `key` as fresh data, bypassing any fetch.
    ///
    /// `None` stores an empty entry.
    pub fn set_entry<T>(&self, key: QueryKey, value: Option<T>)
    where
        T: Send + Sync + 'static,
    {
        let value = value.map(|v| Arc::new(v) as CachedValue);
        tracing::debug!(key = %key, empty = value.is_none(), "cache entry set");
        self.lock().insert(key, Entry { value, invalidated: false, updated_at: Instant::now() });
    }

    /// Peek at the cached value regardless of staleness. Never fetches.
    #[must_use]
    pub fn get<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + 'static,
    {
        let entries = self.lock();
        entries
            .get(key)
            .and_then(|entry| entry.value.as_ref())
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    /// True when `key` has no entry, was invalidated, or has aged past the stale time.
    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.lock()
            .get(key)
            .is_none_or(|entry| entry.is_stale(self.stale_time))
    }

    /// Drop the entry under `key`. Returns whether one existed.
    pub fn remove(&self, key: &QueryKey) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Read `key` as an active query.
    ///
    /// - `enabled == false`: no fetch, the entry is treated as absent (`Ok(None)`).
    /// - fresh entry of type `T`: returned without fetching (an empty fresh
    ///   entry reads as `Ok(None)`).
    /// - otherwise: `fetch` runs, its value is stored fresh and returned.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged; the existing entry is left as it was.
    pub async fn query<T, E, F, Fut>(&self, key: &QueryKey, enabled: bool, fetch: F) -> Result<Option<T>, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !enabled {
            tracing::debug!(key = %key, "query disabled");
            return Ok(None);
        }

        if let Some(cached) = self.fresh::<T>(key) {
            return Ok(cached);
        }

        tracing::debug!(key = %key, "query fetching");
        let value = fetch().await?;
        self.set_entry(key.clone(), Some(value.clone()));
        Ok(Some(value))
    }

    /// `Some(value)` when a fresh entry usable as `T` exists; `None` means fetch.
    fn fresh<T>(&self, key: &QueryKey) -> Option<Option<T>>
    where
        T: Clone + 'static,
    {
        let entries = self.lock();
        let entry = entries.get(key)?;
        if entry.is_stale(self.stale_time) {
            return None;
        }
        match &entry.value {
            None => Some(None),
            Some(value) => value.downcast_ref::<T>().map(|v| Some(v.clone())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.len())
            .field("stale_time", &self.stale_time)
            .finish()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
