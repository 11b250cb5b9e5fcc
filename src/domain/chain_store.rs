//! Separate-chaining hash table backing the asset registry and the
//! historical-data cache.
//!
//! Fixed bucket count, no rehashing. Each bucket is an insertion-ordered
//! chain stored as a growable array, so appending a previously-unseen key is
//! O(1) amortized while `get`/`delete` scan the target bucket. Bucket order
//! in [`ChainStore::items`] is a hashing artifact; callers wanting a display
//! order must sort themselves.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const DEFAULT_BUCKET_COUNT: usize = 256;

#[derive(Debug, Clone)]
pub struct ChainStore<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
}

impl<K: Hash + Eq, V> ChainStore<K, V> {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// Panics if `bucket_count` is 0.
    pub fn with_buckets(bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "bucket count must be non-zero");
        let mut buckets = Vec::with_capacity(bucket_count);
        for _ in 0..bucket_count {
            buckets.push(Vec::new());
        }
        Self { buckets, len: 0 }
    }

    fn bucket_index(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    /// Replaces the value in place if `key` is already present, otherwise
    /// appends at the chain tail. Existence is checked by a full bucket scan
    /// first, so an update is O(chain length).
    pub fn put(&mut self, key: K, value: V) {
        let idx = self.bucket_index(&key);
        let bucket = &mut self.buckets[idx];

        for entry in bucket.iter_mut() {
            if entry.0 == key {
                entry.1 = value;
                return;
            }
        }

        bucket.push((key, value));
        self.len += 1;
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, preserving the order of the remaining
    /// chain. Returns whether a removal occurred.
    pub fn delete(&mut self, key: &K) -> bool {
        let idx = self.bucket_index(key);
        let bucket = &mut self.buckets[idx];

        match bucket.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                bucket.remove(pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// All entries in bucket order then chain order.
    pub fn items(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.items().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl<K: Hash + Eq, V> Default for ChainStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
