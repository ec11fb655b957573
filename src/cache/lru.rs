//! Recency order for LRU eviction
//!
//! Both reads and writes refresh a key's position, so the order reflects the
//! last access of any kind rather than insertion time.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Keys ordered from least recently used (front) to most recently used
/// (back). A key appears at most once.
#[derive(Debug)]
pub struct LruTracker<K> {
    order: VecDeque<K>,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }
}

impl<K: PartialEq + Clone> LruTracker<K> {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Moves `key` to the most recently used end, adding it if unknown.
    pub fn touch(&mut self, key: &K) {
        if self.order.back() == Some(key) {
            return;
        }
        self.remove(key);
        self.order.push_back(key.clone());
    }

    // == Remove ==
    /// Forgets `key`. Unknown keys are ignored.
    pub fn remove(&mut self, key: &K) {
        if let Some(index) = self.order.iter().position(|tracked| tracked == key) {
            self.order.remove(index);
        }
    }

    // == Evict Oldest ==
    /// Pops the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<K> {
        self.order.pop_front()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Inspection ==
    /// Least recently used first.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
