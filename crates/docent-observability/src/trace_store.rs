//! Bounded store of recent request traces.
//!
//! Exact LRU over `(session_id, request_id)` behind one mutex. Both `put`
//! and `get` refresh recency.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use lru::LruCache;
use tracing::debug;

use docent_core::models::QueryTrace;

type TraceKey = (String, String);

pub struct TraceStore {
    cache: Mutex<LruCache<TraceKey, QueryTrace>>,
}

impl TraceStore {
    /// Store holding at most `capacity` traces (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Insert a trace, evicting the least recently used one when full.
    /// Returns the evicted key; replacing an existing trace evicts nothing.
    pub fn put(&self, trace: QueryTrace) -> Option<(String, String)> {
        let key = (trace.session_id.clone(), trace.request_id.clone());
        let displaced = self.lock().push(key.clone(), trace);
        let (evicted, _) = displaced.filter(|(k, _)| *k != key)?;
        debug!(
            component = "trace_store",
            session_id = %evicted.0,
            request_id = %evicted.1,
            "trace evicted"
        );
        Some(evicted)
    }

    pub fn get(&self, session_id: &str, request_id: &str) -> Option<QueryTrace> {
        self.lock()
            .get(&(session_id.to_string(), request_id.to_string()))
            .cloned()
    }

    /// Traces of one session, most recent first.
    pub fn for_session(&self, session_id: &str) -> Vec<QueryTrace> {
        self.lock()
            .iter()
            .filter(|((sid, _), _)| sid == session_id)
            .map(|(_, t)| t.clone())
            .collect()
    }

    /// Drop every trace of a session.
    pub fn remove_session(&self, session_id: &str) -> usize {
        let mut cache = self.lock();
        let keys: Vec<TraceKey> = cache
            .iter()
            .filter(|((sid, _), _)| sid == session_id)
            .map(|(k, _)| k.clone())
            .collect();
        for key in &keys {
            cache.pop(key);
        }
        keys.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock leaves the cache itself consistent.
    fn lock(&self) -> MutexGuard<'_, LruCache<TraceKey, QueryTrace>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
