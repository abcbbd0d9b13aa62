//! Short-lived response cache for the index page.
//!
//! Rendered index pages are cached for a small TTL, so a freshly created
//! post may not appear until the cached entry ages out. Entries are kept
//! per page number.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// TTL cache of rendered page bodies keyed by page number.
pub struct PageCache {
    ttl: Duration,
    entries: Mutex<HashMap<u32, CacheEntry>>,
}

struct CacheEntry {
    body: String,
    stored_at: Instant,
}

impl PageCache {
    /// Create a cache with the given entry lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Get a cached body for a page, if present and not expired.
    pub fn get(&self, page: u32) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        let entry = entries.get(&page)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.body.clone())
        } else {
            None
        }
    }

    /// Store a rendered body for a page.
    pub fn put(&self, page: u32, body: String) {
        let mut entries = self.entries.lock().unwrap();
        // Opportunistic cleanup, the key space is tiny (page numbers)
        entries.retain(|_, e| e.stored_at.elapsed() < self.ttl);
        entries.insert(
            page,
            CacheEntry {
                body,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop all cached entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_miss() {
        let cache = PageCache::new(Duration::from_secs(20));
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_put_and_get() {
        let cache = PageCache::new(Duration::from_secs(20));
        cache.put(1, "body".to_string());
        assert_eq!(cache.get(1), Some("body".to_string()));
        assert!(cache.get(2).is_none());
    }

    #[test]
    fn test_expiry() {
        let cache = PageCache::new(Duration::from_millis(0));
        cache.put(1, "body".to_string());
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_clear() {
        let cache = PageCache::new(Duration::from_secs(20));
        cache.put(1, "body".to_string());
        cache.clear();
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_per_page_entries() {
        let cache = PageCache::new(Duration::from_secs(20));
        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        assert_eq!(cache.get(1), Some("one".to_string()));
        assert_eq!(cache.get(2), Some("two".to_string()));
    }
}
