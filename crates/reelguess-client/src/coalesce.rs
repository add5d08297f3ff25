//! Sharing of identical in-flight fetches.

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

/// Runs at most one fetch per key at a time; concurrent callers for the same
/// key await the same future and receive clones of its output.
///
/// The entry is removed once the fetch completes, so results are not cached
/// here. A caller that is dropped mid-flight leaves the shared future to the
/// remaining callers; when the last one leaves, the entry goes too and the
/// next caller starts a fresh fetch.
pub struct Coalescer<K, V>
where
    V: Clone,
{
    inflight: Mutex<HashMap<K, Shared<BoxFuture<'static, V>>>>,
}

impl<K, V> Default for Coalescer<K, V>
where
    V: Clone,
{
    fn default() -> Self {
        Self {
            inflight: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> Coalescer<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Await the in-flight fetch for `key`, or start one with `make`.
    ///
    /// `make` runs under the coalescer lock, so it must not block.
    pub async fn run<F, Fut>(&self, key: K, make: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let shared = {
            let mut inflight = self.inflight.lock();
            match inflight.get(&key) {
                Some(existing) => {
                    tracing::debug!("joining in-flight fetch");
                    existing.clone()
                }
                None => {
                    let fresh = make().boxed().shared();
                    inflight.insert(key.clone(), fresh.clone());
                    fresh
                }
            }
        };

        let mut waiter = Waiter {
            inflight: &self.inflight,
            key,
            shared,
        };
        (&mut waiter.shared).await
    }

    pub fn in_flight(&self) -> usize {
        self.inflight.lock().len()
    }
}

/// One caller's handle on a shared fetch. Dropping it, finished or not,
/// clears the table entry once no other caller is waiting.
struct Waiter<'a, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    inflight: &'a Mutex<HashMap<K, Shared<BoxFuture<'static, V>>>>,
    key: K,
    shared: Shared<BoxFuture<'static, V>>,
}

impl<K, V> Drop for Waiter<'_, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn drop(&mut self) {
        let mut inflight = self.inflight.lock();
        let ours = inflight
            .get(&self.key)
            .is_some_and(|current| current.ptr_eq(&self.shared));
        // None once the fetch has completed; 2 is the table plus this waiter.
        let last = self.shared.strong_count().is_none_or(|count| count <= 2);
        if ours && last {
            inflight.remove(&self.key);
        }
    }
}
