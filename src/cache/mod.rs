use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, RwLock};

use crate::config::DEFAULT_COMPLETION_CACHE_SIZE;
use crate::vfs::DirectoryEntry;

const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(DEFAULT_COMPLETION_CACHE_SIZE).unwrap();

/// In-memory cache of directory listings, keyed by normalized directory path.
///
/// Only found listings (including empty ones) are stored; absent directories
/// are looked up again on the next request.
pub struct ListingCache {
    cache: Arc<RwLock<LruCache<String, Arc<Vec<DirectoryEntry>>>>>,
}

impl ListingCache {
    /// Create a new listing cache with a maximum number of directories
    pub fn new(capacity: usize) -> Self {
        let cache = LruCache::new(NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY));
        ListingCache {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Get a listing from the cache
    pub fn get(&self, key: &str) -> Option<Arc<Vec<DirectoryEntry>>> {
        let mut cache = self.cache.write().ok()?;
        cache.get(key).cloned()
    }

    /// Put a listing into the cache
    pub fn put(&self, key: String, entries: Vec<DirectoryEntry>) {
        if let Ok(mut cache) = self.cache.write() {
            cache.put(key, Arc::new(entries));
        }
    }

    /// Number of cached directories
    pub fn directory_count(&self) -> usize {
        self.cache.read().ok().map(|c| c.len()).unwrap_or(0)
    }
}

impl Clone for ListingCache {
    fn clone(&self) -> Self {
        ListingCache {
            cache: Arc::clone(&self.cache),
        }
    }
}
