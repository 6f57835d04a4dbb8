// ── Generic reactive entity collection ──
//
// Concurrent keyed storage with O(1) lookups, stable insertion order,
// and push-based change notification via `watch` channels.

use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::watch;

struct Slot<T> {
    /// Insertion sequence; snapshots are ordered by it.
    seq: u64,
    entity: Arc<T>,
}

/// A concurrent, reactive collection for a single entity type.
///
/// Uses `DashMap` for O(1) concurrent lookups and a `watch` channel for
/// push-based change notification. Every mutation rebuilds the ordered
/// snapshot that subscribers receive. Replacing an existing key keeps its
/// original position.
pub(crate) struct EntityCollection<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone + Send + Sync + 'static,
{
    by_key: DashMap<K, Slot<T>>,
    next_seq: AtomicU64,
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<K, T> EntityCollection<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_key: DashMap::new(),
            next_seq: AtomicU64::new(0),
            snapshot,
        }
    }

    /// Insert or replace an entity. Returns `true` if the key was new.
    pub(crate) fn upsert(&self, key: K, entity: T) -> bool {
        let is_new = match self.by_key.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().entity = Arc::new(entity);
                false
            }
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Slot {
                    seq,
                    entity: Arc::new(entity),
                });
                true
            }
        };

        self.rebuild_snapshot();
        is_new
    }

    /// Apply `f` to the entity stored under `key`, if present.
    ///
    /// Returns whatever `f` returns, or `None` when the key is unknown.
    pub(crate) fn modify<R>(&self, key: &K, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let result = {
            let mut slot = self.by_key.get_mut(key)?;
            f(Arc::make_mut(&mut slot.entity))
        };
        self.rebuild_snapshot();
        Some(result)
    }

    /// Apply `f` to every entity matching `pred`. Returns how many matched.
    ///
    /// Subscribers are only notified when at least one entity changed.
    pub(crate) fn modify_where(
        &self,
        pred: impl Fn(&T) -> bool,
        f: impl Fn(&mut T),
    ) -> usize {
        let mut changed = 0;
        for mut slot in self.by_key.iter_mut() {
            if pred(&slot.entity) {
                f(Arc::make_mut(&mut slot.entity));
                changed += 1;
            }
        }
        if changed > 0 {
            self.rebuild_snapshot();
        }
        changed
    }

    /// Remove an entity by key. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, key: &K) -> Option<Arc<T>> {
        let removed = self.by_key.remove(key).map(|(_, slot)| slot.entity);
        if removed.is_some() {
            self.rebuild_snapshot();
        }
        removed
    }

    pub(crate) fn get(&self, key: &K) -> Option<Arc<T>> {
        self.by_key.get(key).map(|slot| Arc::clone(&slot.entity))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all values in insertion order and broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let mut slots: Vec<(u64, Arc<T>)> = self
            .by_key
            .iter()
            .map(|r| (r.seq, Arc::clone(&r.entity)))
            .collect();
        slots.sort_unstable_by_key(|(seq, _)| *seq);
        let values: Vec<Arc<T>> = slots.into_iter().map(|(_, entity)| entity).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}
