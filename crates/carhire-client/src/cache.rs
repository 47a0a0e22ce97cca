//! Populate-once list caches
//!
//! The first caller loads the list while holding the cache lock. Callers
//! arriving during that load wait on the lock and then read the stored
//! list, so concurrent callers share one network call.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;

/// A list loaded at most once while non-empty
pub struct ListCache<T> {
    name: &'static str,
    slot: Mutex<Option<Arc<Vec<T>>>>,
}

impl<T> ListCache<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Mutex::new(None),
        }
    }

    /// Cached list, or the result of `load`
    ///
    /// Failed loads and empty lists are not stored, so the next call
    /// tries again.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<Vec<T>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(list) = slot.as_ref() {
            return Ok(list.clone());
        }

        debug!(cache = self.name, "Loading");
        let list = Arc::new(load().await?);
        if !list.is_empty() {
            *slot = Some(list.clone());
        }
        Ok(list)
    }

    /// Cached list without waiting for an in-flight load
    pub fn peek(&self) -> Option<Arc<Vec<T>>> {
        self.slot.try_lock().ok().and_then(|slot| slot.clone())
    }

    pub async fn clear(&self) {
        *self.slot.lock().await = None;
    }
}
