//! Content-addressed cache of prepared tables.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::debug;

use super::pipeline::PreparedTable;

/// Cleaned tables keyed by a hash of the uploaded file bytes, evicted
/// least-recently-used first.
pub struct TableCache {
    entries: HashMap<String, Arc<PreparedTable>>,
    order: VecDeque<String>,
    max_entries: usize,
}

impl TableCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<Arc<PreparedTable>> {
        let value = self.entries.get(key).cloned();
        if value.is_some() {
            debug!(key, "Table cache hit");
            self.touch(key);
        }
        value
    }

    pub fn insert(&mut self, key: String, value: Arc<PreparedTable>) {
        self.entries.insert(key.clone(), value);
        self.touch(&key);
        self.evict_overflow();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn touch(&mut self, key: &str) {
        self.order.retain(|existing| existing != key);
        self.order.push_front(key.to_string());
    }

    fn evict_overflow(&mut self) {
        while self.order.len() > self.max_entries {
            if let Some(removed) = self.order.pop_back() {
                debug!(key = %removed, "Evicting cached table");
                self.entries.remove(&removed);
            }
        }
    }
}

/// Cache key for a file's contents.
pub fn content_key(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::pipeline::tests::prepared_fixture;

    #[test]
    fn same_bytes_share_a_key() {
        assert_eq!(content_key(b"abc"), content_key(b"abc"));
        assert_ne!(content_key(b"abc"), content_key(b"abd"));
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = TableCache::new(2);
        let table = Arc::new(prepared_fixture());

        cache.insert("a".into(), Arc::clone(&table));
        cache.insert("b".into(), Arc::clone(&table));
        assert!(cache.get("a").is_some());
        cache.insert("c".into(), Arc::clone(&table));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn zero_capacity_still_holds_one_entry() {
        let mut cache = TableCache::new(0);
        cache.insert("a".into(), Arc::new(prepared_fixture()));
        assert!(cache.get("a").is_some());
    }
}
