use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::gallery::{self, GallerySnapshot, RawRow};

/// When a cached snapshot is considered stale. Snapshot freshness is the
/// caller's policy, not the matcher's; the matcher only ever sees an
/// immutable snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Re-fetch rows and rebuild on every call.
    EveryCall,
    /// Reuse a built snapshot until the TTL elapses.
    Ttl(Duration),
}

/// Caches the built gallery between matching calls. Snapshots are handed
/// out as `Arc`s so concurrent matches share one immutable view while a
/// rebuild swaps in a fresh one.
pub struct SnapshotCache {
    policy: RefreshPolicy,
    dim: usize,
    cached: Option<(Instant, Arc<GallerySnapshot>)>,
}

impl SnapshotCache {
    pub fn new(policy: RefreshPolicy, dim: usize) -> Self {
        Self {
            policy,
            dim,
            cached: None,
        }
    }

    /// Return the cached snapshot if still fresh, otherwise fetch rows
    /// and rebuild. Fetch errors propagate untouched and leave any stale
    /// snapshot in place for the next attempt.
    pub fn snapshot<E>(
        &mut self,
        fetch: impl FnOnce() -> Result<Vec<RawRow>, E>,
    ) -> Result<Arc<GallerySnapshot>, E> {
        if let (RefreshPolicy::Ttl(ttl), Some((built_at, snapshot))) = (self.policy, &self.cached) {
            if built_at.elapsed() < ttl {
                return Ok(Arc::clone(snapshot));
            }
        }
        let rows = fetch()?;
        let snapshot = Arc::new(gallery::build_gallery(&rows, self.dim));
        self.cached = Some((Instant::now(), Arc::clone(&snapshot)));
        Ok(snapshot)
    }

    /// Drop the cached snapshot, forcing the next call to rebuild. Called
    /// after the store is mutated (enrollment, removal).
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
