use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

/// In-memory LRU cache mapping source text to localized text.
///
/// Keys are trimmed exact matches. Entries survive for the process
/// lifetime only, there is no persistence.
pub struct TranslationCache {
    entries: Mutex<LruCache<String, String>>,
}

impl TranslationCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap();
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up a cached localization, refreshing its recency on hit.
    pub fn get(&self, source: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        entries.get(source.trim()).cloned()
    }

    /// Store a localization, evicting the least recently used entry when full.
    pub fn put(&self, source: &str, localized: String) {
        let mut entries = self.entries.lock().unwrap();
        entries.put(source.trim().to_string(), localized);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_stored_entry() {
        let cache = TranslationCache::new(4);
        cache.put("cabbage", "キャベツ".to_string());

        assert_eq!(cache.get("cabbage"), Some("キャベツ".to_string()));
        assert_eq!(cache.get("onion"), None);
    }

    #[test]
    fn test_keys_are_trimmed() {
        let cache = TranslationCache::new(4);
        cache.put("  cabbage  ", "キャベツ".to_string());

        assert_eq!(cache.get("cabbage"), Some("キャベツ".to_string()));
        assert_eq!(cache.get(" cabbage "), Some("キャベツ".to_string()));
    }

    #[test]
    fn test_least_recently_used_entry_is_evicted() {
        let cache = TranslationCache::new(2);
        cache.put("one", "一".to_string());
        cache.put("two", "二".to_string());

        // Touch "one" so "two" becomes the eviction victim.
        assert!(cache.get("one").is_some());
        cache.put("three", "三".to_string());

        assert!(cache.get("one").is_some());
        assert!(cache.get("two").is_none());
        assert!(cache.get("three").is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache = TranslationCache::new(0);
        cache.put("one", "一".to_string());

        assert_eq!(cache.get("one"), Some("一".to_string()));
    }
}
