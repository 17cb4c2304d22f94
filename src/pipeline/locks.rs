//! Per-slug build serialization.
//!
//! Two concurrent requests for the same app name share a project directory
//! and would otherwise race on its files. Builds for the same slug take the
//! same lock and run one after another; distinct slugs stay independent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Map of slug to its build lock.
///
/// Entries are never removed; the set of distinct slugs a deployment sees is
/// small and bounded by its users.
#[derive(Debug, Default)]
pub struct SlugLocks {
    inner: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SlugLocks {
    /// Acquires the lock for `slug`, waiting if another build of the same
    /// slug is in flight.
    pub async fn acquire(&self, slug: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().expect("slug lock map poisoned");
            Arc::clone(
                map.entry(slug.to_string())
                    .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}
