//! Process-wide cache of loaded remote graphs.
//!
//! Entries are keyed by the literal URL string and never expire; callers drop
//! them with [`SourceCache::invalidate`] or [`SourceCache::clear`]. Each key
//! has its own slot lock, so concurrent requests for one URL perform a single
//! fetch while requests for different URLs proceed independently. A failed
//! load caches nothing, so the next request retries.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::graph::Graph;

type Slot = Arc<Mutex<Option<Arc<Graph>>>>;

/// URL-keyed cache with at most one load in flight per key.
#[derive(Debug, Default)]
pub struct SourceCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl SourceCache {
    /// An empty cache, independent of [`SourceCache::global`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide cache.
    pub fn global() -> &'static SourceCache {
        static GLOBAL: OnceLock<SourceCache> = OnceLock::new();
        GLOBAL.get_or_init(SourceCache::new)
    }

    /// Returns the cached graph for `url`, or runs `load` and caches its
    /// result. Concurrent callers for the same `url` wait for the first load
    /// rather than starting their own.
    ///
    /// # Errors
    ///
    /// Returns whatever `load` returns; nothing is cached in that case.
    pub fn get_or_load<F, E>(&self, url: &str, load: F) -> Result<Arc<Graph>, E>
    where
        F: FnOnce() -> Result<Graph, E>,
    {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(url.to_owned()).or_default())
        };
        let mut cached = slot.lock();
        if let Some(graph) = cached.as_ref() {
            tracing::info!(url, "remote source served from cache");
            return Ok(Arc::clone(graph));
        }
        match load() {
            Ok(graph) => {
                let graph = Arc::new(graph);
                *cached = Some(Arc::clone(&graph));
                Ok(graph)
            }
            Err(e) => {
                drop(cached);
                self.forget_empty(url, &slot);
                Err(e)
            }
        }
    }

    /// Removes the empty slot for `url` unless another caller holds it.
    fn forget_empty(&self, url: &str, slot: &Slot) {
        let mut slots = self.slots.lock();
        let unshared = slots
            .get(url)
            .is_some_and(|entry| Arc::ptr_eq(entry, slot) && Arc::strong_count(slot) == 2);
        if unshared {
            slots.remove(url);
        }
    }

    /// The cached graph for `url`, without loading.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<Arc<Graph>> {
        let slot = self.slots.lock().get(url).cloned()?;
        let cached = slot.lock();
        cached.clone()
    }

    /// Drops the entry for `url`. Returns whether a graph was cached.
    pub fn invalidate(&self, url: &str) -> bool {
        let Some(slot) = self.slots.lock().remove(url) else {
            return false;
        };
        let filled = slot.lock().is_some();
        filled
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.slots.lock().clear();
    }

    /// Number of cached graphs.
    #[must_use]
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.lock().values().cloned().collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    /// Whether no graph is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
