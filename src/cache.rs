// Copyright (C) 2020-2026 Andy Kurnia.

use super::fash;

// Bounded memo table keyed by value, evicting the least recently used key.
//
// The lock is only held to find or make the slot for a key. The value is then
// computed outside the lock through the slot's OnceLock, so concurrent callers
// asking for the same missing key run the computation once and all get its
// result, while different keys compute in parallel.
pub struct LruCache<K, V> {
    inner: std::sync::Mutex<Inner<K, V>>,
    capacity: usize,
    hits: std::sync::atomic::AtomicU64,
    misses: std::sync::atomic::AtomicU64,
}

type Slot<V> = std::sync::Arc<std::sync::OnceLock<V>>;

struct Inner<K, V> {
    slots: fash::MyHashMap<K, (Slot<V>, u64)>,
    // last use -> key, oldest first.
    recency: std::collections::BTreeMap<u64, K>,
    clock: u64,
}

impl<K: Clone + Eq + std::hash::Hash, V: Clone> LruCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: std::sync::Mutex::new(Inner {
                slots: fash::MyHashMap::default(),
                recency: std::collections::BTreeMap::new(),
                clock: 0,
            }),
            capacity,
            hits: std::sync::atomic::AtomicU64::new(0),
            misses: std::sync::atomic::AtomicU64::new(0),
        }
    }

    #[inline(always)]
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<K, V>> {
        // a panicking computation never holds the lock, the map stays sound.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn slot(&self, key: &K) -> Slot<V> {
        let mut inner = self.lock();
        inner.clock += 1;
        let now = inner.clock;
        let Inner { slots, recency, .. } = &mut *inner;
        if let Some((slot, last_used)) = slots.get_mut(key) {
            recency.remove(&*last_used);
            *last_used = now;
            recency.insert(now, key.clone());
            return std::sync::Arc::clone(slot);
        }
        // slots still being computed are never evicted, so the cache may run
        // over capacity until those computations finish.
        while slots.len() >= self.capacity {
            let oldest_ready = recency
                .iter()
                .find(|(_, k)| slots.get(*k).is_some_and(|(slot, _)| slot.get().is_some()))
                .map(|(&last_used, _)| last_used);
            match oldest_ready.and_then(|last_used| recency.remove(&last_used)) {
                Some(oldest) => {
                    slots.remove(&oldest);
                }
                None => break,
            }
        }
        let slot = Slot::<V>::default();
        slots.insert(key.clone(), (std::sync::Arc::clone(&slot), now));
        recency.insert(now, key.clone());
        slot
    }

    pub fn get_or_compute<F: FnOnce() -> V>(&self, key: &K, compute: F) -> V {
        if self.capacity == 0 {
            self.misses
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            return compute();
        }
        let slot = self.slot(key);
        let mut computed = false;
        let ret = slot
            .get_or_init(|| {
                computed = true;
                compute()
            })
            .clone();
        if computed {
            self.misses
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
        ret
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let inner = self.lock();
        inner
            .slots
            .get(key)
            .and_then(|(slot, _)| slot.get().cloned())
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.slots.clear();
        inner.recency.clear();
    }

    #[inline(always)]
    pub fn hits(&self) -> u64 {
        self.hits.load(std::sync::atomic::Ordering::Relaxed)
    }

    #[inline(always)]
    pub fn misses(&self) -> u64 {
        self.misses.load(std::sync::atomic::Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once_per_key() {
        let cache = LruCache::<u8, u32>::new(4);
        let mut calls = 0;
        for _ in 0..3 {
            let v = cache.get_or_compute(&7, || {
                calls += 1;
                49
            });
            assert_eq!(v, 49);
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 2);
        assert_eq!(cache.get(&7), Some(49));
        assert_eq!(cache.get(&8), None);
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = LruCache::<u8, u8>::new(2);
        cache.get_or_compute(&1, || 1);
        cache.get_or_compute(&2, || 2);
        // touch 1, so 2 is now the oldest.
        cache.get_or_compute(&1, || unreachable!());
        cache.get_or_compute(&3, || 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some(1));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), Some(3));
        let mut recomputed = false;
        cache.get_or_compute(&2, || {
            recomputed = true;
            2
        });
        assert!(recomputed);
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn zero_capacity_never_stores() {
        let cache = LruCache::<u8, u8>::new(0);
        assert_eq!(cache.get_or_compute(&1, || 5), 5);
        assert_eq!(cache.get_or_compute(&1, || 6), 6);
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_first_use_computes_once() {
        let cache = LruCache::<u8, u64>::new(8);
        let calls = std::sync::atomic::AtomicUsize::new(0);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    let v = cache.get_or_compute(&1, || {
                        calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                        std::thread::sleep(std::time::Duration::from_millis(20));
                        1234
                    });
                    assert_eq!(v, 1234);
                });
            }
        });
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 7);
    }

    #[test]
    fn pending_slot_survives_eviction() {
        let cache = LruCache::<u8, u32>::new(1);
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let (started_tx, started_rx) = std::sync::mpsc::channel();
        std::thread::scope(|s| {
            let first = s.spawn(|| {
                cache.get_or_compute(&1, || {
                    calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    started_tx.send(()).unwrap();
                    std::thread::sleep(std::time::Duration::from_millis(300));
                    11
                })
            });
            started_rx.recv().unwrap();
            // would push key 1 out if pending slots could be evicted.
            assert_eq!(cache.get_or_compute(&2, || 22), 22);
            let second = s.spawn(|| {
                cache.get_or_compute(&1, || {
                    calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    99
                })
            });
            assert_eq!(first.join().unwrap(), 11);
            assert_eq!(second.join().unwrap(), 11);
        });
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(cache.capacity(), 1);
        // back to capacity once nothing is pending.
        cache.get_or_compute(&3, || 33);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&3), Some(33));
    }

    #[test]
    fn clear_forgets() {
        let cache = LruCache::<u8, u8>::new(3);
        cache.get_or_compute(&1, || 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
    }
}
