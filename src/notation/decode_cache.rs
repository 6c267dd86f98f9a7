//! Bounded memoisation of successful decodes.
//!
//! Keyed by normalised text, player and board fingerprint. When an insert
//! pushes the map past its capacity the oldest half of the entries is
//! dropped in insertion order.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, trace};

use crate::game_state::xiangqi_types::{Move, Player};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub normalized_text: String,
    pub player: Player,
    pub fingerprint: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<CacheKey, Move>,
    order: VecDeque<CacheKey>,
    hits: u64,
    misses: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub len: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug)]
pub struct DecodeCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl DecodeCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Entries are replaced whole, so a poisoned lock still guards a usable map.
    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &CacheKey) -> Option<Move> {
        if self.capacity == 0 {
            return None;
        }
        let mut inner = self.lock();
        let found = inner.entries.get(key).cloned();
        if found.is_some() {
            inner.hits += 1;
            trace!(text = %key.normalized_text, player = %key.player, "decode cache hit");
        } else {
            inner.misses += 1;
        }
        found
    }

    pub fn insert(&self, key: CacheKey, mv: Move) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.lock();
        if inner.entries.insert(key.clone(), mv).is_none() {
            inner.order.push_back(key);
        }
        if inner.entries.len() > self.capacity {
            let evict = inner.order.len().div_ceil(2);
            for _ in 0..evict {
                if let Some(old) = inner.order.pop_front() {
                    inner.entries.remove(&old);
                }
            }
            debug!(evicted = evict, remaining = inner.entries.len(), "decode cache evicted oldest half");
        }
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            len: inner.entries.len(),
            hits: inner.hits,
            misses: inner.misses,
        }
    }
}
