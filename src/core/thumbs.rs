//! Thumbnail metadata cache with single-flight fetches.
//!
//! Keys are entry content hashes, so a cached descriptor survives renames
//! and re-sorted listings. For a given key at most one fetch is ever in
//! flight: concurrent callers await one shared future instead of issuing
//! duplicate requests. A fetch failure is surfaced to every current waiter
//! and clears the slot so the next call retries. "No preview available"
//! (`Ok(None)`) is never cached: an empty result must not become a
//! permanent negative entry.
//!
//! The cache is bounded: resolved entries are evicted least-recently-used
//! once the configured capacity is exceeded. In-flight slots are never
//! evicted.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use super::error::FetchError;
use crate::models::Thumb;

type ThumbResult = Result<Option<Thumb>, FetchError>;
type SharedFetch = Shared<LocalBoxFuture<'static, ThumbResult>>;

enum Slot {
    Ready { thumb: Thumb, last_used: u64 },
    Pending(SharedFetch),
}

/// Session-scoped thumbnail cache.
///
/// Single-threaded by design (wasm event loop); interior mutability is
/// never held across an await point.
pub struct ThumbnailCache {
    slots: RefCell<HashMap<String, Slot>>,
    capacity: usize,
    tick: Cell<u64>,
}

impl ThumbnailCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: RefCell::new(HashMap::new()),
            capacity: capacity.max(1),
            tick: Cell::new(0),
        }
    }

    /// Get the thumbnail for `key`, fetching it with `fetcher` on a miss.
    ///
    /// Returns `Ok(None)` when the backend has no preview for the target;
    /// that outcome is not cached.
    pub async fn get<F, Fut>(&self, key: &str, fetcher: F) -> ThumbResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ThumbResult> + 'static,
    {
        let shared = {
            let mut slots = self.slots.borrow_mut();
            match slots.get_mut(key) {
                Some(Slot::Ready { thumb, last_used }) => {
                    *last_used = self.next_tick();
                    return Ok(Some(thumb.clone()));
                }
                Some(Slot::Pending(shared)) => shared.clone(),
                None => {
                    let shared: SharedFetch = fetcher().boxed_local().shared();
                    slots.insert(key.to_string(), Slot::Pending(shared.clone()));
                    shared
                }
            }
        };

        let result = shared.await;

        // Every waiter runs this settle step; it only takes effect while
        // the slot is still the pending one, so it is idempotent.
        let mut slots = self.slots.borrow_mut();
        if matches!(slots.get(key), Some(Slot::Pending(_))) {
            match &result {
                Ok(Some(thumb)) => {
                    slots.insert(
                        key.to_string(),
                        Slot::Ready {
                            thumb: thumb.clone(),
                            last_used: self.next_tick(),
                        },
                    );
                    Self::evict_lru(&mut slots, self.capacity);
                }
                Ok(None) | Err(_) => {
                    slots.remove(key);
                }
            }
        }

        result
    }

    /// Whether `key` holds a resolved descriptor (pending slots excluded).
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.slots.borrow().get(key), Some(Slot::Ready { .. }))
    }

    /// Number of resolved entries.
    pub fn len(&self) -> usize {
        self.slots
            .borrow()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_tick(&self) -> u64 {
        let tick = self.tick.get() + 1;
        self.tick.set(tick);
        tick
    }

    fn evict_lru(slots: &mut HashMap<String, Slot>, capacity: usize) {
        while slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready { .. }))
            .count()
            > capacity
        {
            let oldest = slots
                .iter()
                .filter_map(|(key, slot)| match slot {
                    Slot::Ready { last_used, .. } => Some((*last_used, key.clone())),
                    Slot::Pending(_) => None,
                })
                .min();
            match oldest {
                Some((_, key)) => {
                    slots.remove(&key);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn thumb(path: &str) -> Thumb {
        Thumb {
            path: path.to_string(),
            width: 640,
            height: 480,
        }
    }

    #[tokio::test]
    async fn test_hit_skips_fetcher() {
        let cache = ThumbnailCache::new(16);
        let calls = Rc::new(Cell::new(0u32));

        for _ in 0..3 {
            let calls = calls.clone();
            let got = cache
                .get("h1", move || async move {
                    calls.set(calls.get() + 1);
                    Ok(Some(thumb("/statics/a.jpg")))
                })
                .await
                .unwrap();
            assert_eq!(got.unwrap().path, "/statics/a.jpg");
        }
        assert_eq!(calls.get(), 1);
        assert!(cache.contains("h1"));
    }

    #[tokio::test]
    async fn test_concurrent_gets_single_flight() {
        let cache = Rc::new(ThumbnailCache::new(16));
        let calls = Rc::new(Cell::new(0u32));

        let fetch = |cache: Rc<ThumbnailCache>, calls: Rc<Cell<u32>>| async move {
            cache
                .get("h1", move || async move {
                    calls.set(calls.get() + 1);
                    // Suspend so the other callers attach while in flight.
                    tokio::task::yield_now().await;
                    Ok(Some(thumb("/statics/a.jpg")))
                })
                .await
        };

        let (a, b, c) = futures::join!(
            fetch(cache.clone(), calls.clone()),
            fetch(cache.clone(), calls.clone()),
            fetch(cache.clone(), calls.clone()),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_failure_reaches_all_waiters_and_allows_retry() {
        let cache = Rc::new(ThumbnailCache::new(16));
        let calls = Rc::new(Cell::new(0u32));

        let failing = |cache: Rc<ThumbnailCache>, calls: Rc<Cell<u32>>| async move {
            cache
                .get("h1", move || async move {
                    calls.set(calls.get() + 1);
                    tokio::task::yield_now().await;
                    Err(FetchError::Timeout)
                })
                .await
        };

        let (a, b) = futures::join!(
            failing(cache.clone(), calls.clone()),
            failing(cache.clone(), calls.clone()),
        );
        assert_eq!(a, Err(FetchError::Timeout));
        assert_eq!(b, Err(FetchError::Timeout));
        assert_eq!(calls.get(), 1);
        assert!(!cache.contains("h1"));

        // The slot was cleared, so a later call retries the fetch.
        let got = cache
            .get("h1", {
                let calls = calls.clone();
                move || async move {
                    calls.set(calls.get() + 1);
                    Ok(Some(thumb("/statics/a.jpg")))
                }
            })
            .await
            .unwrap();
        assert!(got.is_some());
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_no_preview_is_not_cached() {
        let cache = ThumbnailCache::new(16);
        let calls = Rc::new(Cell::new(0u32));

        for _ in 0..2 {
            let calls = calls.clone();
            let got = cache
                .get("h1", move || async move {
                    calls.set(calls.get() + 1);
                    Ok(None)
                })
                .await
                .unwrap();
            assert!(got.is_none());
        }
        // No permanent negative entry: the fetcher ran both times.
        assert_eq!(calls.get(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_lru_eviction_respects_capacity() {
        let cache = ThumbnailCache::new(2);
        for key in ["a", "b", "c"] {
            let path = format!("/statics/{key}.jpg");
            cache
                .get(key, move || async move { Ok(Some(thumb(&path))) })
                .await
                .unwrap();
        }
        assert_eq!(cache.len(), 2);
        // "a" was the least recently used.
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[tokio::test]
    async fn test_lru_touch_on_hit() {
        let cache = ThumbnailCache::new(2);
        for key in ["a", "b"] {
            let path = format!("/statics/{key}.jpg");
            cache
                .get(key, move || async move { Ok(Some(thumb(&path))) })
                .await
                .unwrap();
        }
        // Touch "a" so "b" becomes the eviction candidate.
        cache
            .get("a", || async { panic!("fetcher must not run on a hit") })
            .await
            .unwrap();
        cache
            .get("c", || async { Ok(Some(thumb("/statics/c.jpg"))) })
            .await
            .unwrap();
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }
}
