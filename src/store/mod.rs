//! Volatile token store with time-to-live eviction.
//!
//! Entries are stamped with their insertion time and stop resolving once
//! their age reaches the TTL, whether or not a sweep has physically removed
//! them yet. [`TtlStore::sweep`] is the explicit eviction entry point; hosts
//! schedule it with [`spawn_sweeper`] and tests call it directly.

pub mod clock;
pub mod sweeper;

use std::{sync::Arc, time::Duration};

use dashmap::{DashMap, mapref::entry::Entry as MapEntry};
use rand::Rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use sweeper::spawn_sweeper;

/// Random bytes per token; rendered as twice as many hex characters.
pub const TOKEN_BYTES: usize = 8;

struct Entry<V> {
    value: V,
    created_at: u64,
}

pub struct TtlStore<V> {
    entries: DashMap<String, Entry<V>>,
    ttl_ms: u64,
    max_entries: Option<usize>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlStore<V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl_ms: ttl.as_millis() as u64,
            max_entries: None,
            clock,
        }
    }

    /// Caps the number of live entries. Inserting a new key into a full store
    /// sweeps first and then drops the oldest entry if that was not enough.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max.max(1));
        self
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    fn is_fresh(&self, created_at: u64, now: u64) -> bool {
        now.saturating_sub(created_at) < self.ttl_ms
    }

    pub fn put(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = self.clock.now_ms();
        if !self.entries.contains_key(&key) {
            self.make_room();
        }
        self.entries.insert(
            key,
            Entry {
                value,
                created_at: now,
            },
        );
    }

    /// Stores `value` under a freshly generated token and returns the token.
    pub fn mint(&self, value: V) -> String {
        self.make_room();
        let now = self.clock.now_ms();

        loop {
            let token = generate_token();
            match self.entries.entry(token.clone()) {
                MapEntry::Occupied(_) => continue,
                MapEntry::Vacant(slot) => {
                    slot.insert(Entry {
                        value,
                        created_at: now,
                    });
                    return token;
                }
            }
        }
    }

    /// Returns the value only while it is younger than the TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        let entry = self.entries.get(key)?;
        self.is_fresh(entry.created_at, now)
            .then(|| entry.value.clone())
    }

    /// Removes every expired entry and returns how many were dropped.
    ///
    /// Shards are locked one at a time, so concurrent `get`/`put` calls on
    /// other shards proceed while a sweep runs.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now_ms();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = self.is_fresh(entry.created_at, now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Physical entry count, including expired entries not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn make_room(&self) {
        let Some(max) = self.max_entries else {
            return;
        };
        if self.entries.len() < max {
            return;
        }

        self.sweep();
        while self.entries.len() >= max {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|e| e.value().created_at)
                .map(|e| e.key().clone());
            match oldest {
                Some(key) => {
                    tracing::debug!("Token store full at {} entries, evicting {}", max, key);
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::thread_rng().r#gen();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(600);

    fn store() -> (TtlStore<u64>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        (TtlStore::with_clock(TTL, clock.clone()), clock)
    }

    #[test]
    fn test_put_then_get() {
        let (store, _) = store();
        store.put("abc", 42);
        assert_eq!(store.get("abc"), Some(42));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_put_overwrites_and_restamps() {
        let (store, clock) = store();
        store.put("abc", 1);
        clock.advance(Duration::from_secs(500));
        store.put("abc", 2);
        clock.advance(Duration::from_secs(500));
        assert_eq!(store.get("abc"), Some(2));
    }

    #[test]
    fn test_fresh_just_before_ttl() {
        let (store, clock) = store();
        store.put("abc", 1);
        clock.advance(TTL - Duration::from_millis(1));
        assert_eq!(store.get("abc"), Some(1));
    }

    #[test]
    fn test_expired_at_and_after_ttl_without_sweep() {
        let (store, clock) = store();
        store.put("abc", 1);

        clock.advance(TTL);
        assert_eq!(store.get("abc"), None);

        clock.advance(Duration::from_millis(1));
        assert_eq!(store.get("abc"), None);
        // still physically present until swept
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let (store, clock) = store();
        store.put("old", 1);
        clock.advance(Duration::from_secs(400));
        store.put("new", 2);
        clock.advance(Duration::from_secs(300));

        assert_eq!(store.sweep(), 1);
        assert_eq!(store.get("old"), None);
        assert_eq!(store.get("new"), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let (store, clock) = store();
        store.put("a", 1);
        store.put("b", 2);
        clock.advance(Duration::from_secs(300));
        store.put("c", 3);
        clock.advance(Duration::from_secs(400));

        assert_eq!(store.sweep(), 2);
        let remaining = store.len();
        assert_eq!(store.sweep(), 0);
        assert_eq!(store.len(), remaining);
        assert_eq!(store.get("c"), Some(3));
    }

    #[test]
    fn test_mint_generates_distinct_hex_tokens() {
        let (store, _) = store();
        let a = store.mint(1);
        let b = store.mint(2);

        assert_ne!(a, b);
        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(store.get(&a), Some(1));
        assert_eq!(store.get(&b), Some(2));
    }

    #[test]
    fn test_max_entries_evicts_oldest() {
        let clock = Arc::new(ManualClock::new(0));
        let store = TtlStore::with_clock(TTL, clock.clone()).with_max_entries(2);

        store.put("first", 1);
        clock.advance(Duration::from_secs(1));
        store.put("second", 2);
        clock.advance(Duration::from_secs(1));
        store.put("third", 3);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("first"), None);
        assert_eq!(store.get("second"), Some(2));
        assert_eq!(store.get("third"), Some(3));
    }

    #[test]
    fn test_max_entries_prefers_sweeping_expired() {
        let clock = Arc::new(ManualClock::new(0));
        let store = TtlStore::with_clock(TTL, clock.clone()).with_max_entries(2);

        store.put("expired", 1);
        clock.advance(Duration::from_secs(599));
        store.put("live", 2);
        clock.advance(Duration::from_secs(2));
        store.put("newest", 3);

        assert_eq!(store.get("live"), Some(2));
        assert_eq!(store.get("newest"), Some(3));
    }

    #[test]
    fn test_concurrent_put_get() {
        let store = Arc::new(TtlStore::new(TTL));
        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..200u64 {
                        let key = format!("{}-{}", t, i);
                        store.put(key.clone(), t * 1_000 + i);
                        assert_eq!(store.get(&key), Some(t * 1_000 + i));
                        if i % 50 == 0 {
                            store.sweep();
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker thread");
        }
        assert_eq!(store.len(), 8 * 200);
    }
}
