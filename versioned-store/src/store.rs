//! The versioned store
//!
//! Holds a single [`Versioned`] handle behind a `parking_lot::RwLock`. The
//! lock guards only the handle swap, never the snapshot contents: readers
//! clone the `Arc` out and drop the lock immediately, writers build the new
//! snapshot outside the lock and swap it in with a version check.

use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;

use crate::error::{Result, StoreError};
use crate::snapshot::Versioned;

/// Generic store holding an immutable, versioned snapshot
///
/// `S` is the whole-store snapshot type. Cloning the store is cheap and
/// shares the underlying state.
///
/// # Example
///
/// ```rust
/// use versioned_store::VersionedStore;
///
/// let store = VersionedStore::new(10u32);
/// let (value, _) = store.modify(|n| *n += 1);
/// assert_eq!(*value, 11);
/// assert_eq!(store.version(), 1);
/// ```
pub struct VersionedStore<S> {
    current: Arc<RwLock<Versioned<S>>>,
}

impl<S: Clone> VersionedStore<S> {
    /// Create a store seeded with an initial snapshot at version 0
    pub fn new(initial: S) -> Self {
        Self {
            current: Arc::new(RwLock::new(Versioned::initial(initial))),
        }
    }

    /// Get the current snapshot
    ///
    /// The returned `Arc` is a point-in-time view; later commits do not
    /// affect it.
    pub fn load(&self) -> Arc<S> {
        self.current.read().snapshot.clone()
    }

    /// Get the current snapshot together with its version
    pub fn versioned(&self) -> (Arc<S>, u64) {
        let guard = self.current.read();
        (guard.snapshot.clone(), guard.version)
    }

    /// Get the current version
    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Get the wall-clock time of the last commit
    pub fn updated_at(&self) -> SystemTime {
        self.current.read().updated_at
    }

    /// Unconditionally replace the snapshot, returning the new version
    ///
    /// Used for initialization and reset paths where overwriting concurrent
    /// work is intended.
    pub fn replace(&self, snapshot: S) -> u64 {
        let mut guard = self.current.write();
        *guard = guard.next(snapshot);
        guard.version
    }

    /// Commit a snapshot if the version is still `expected_version`
    ///
    /// Returns the new version on success, `StoreError::Conflict` if any
    /// other commit landed in between.
    pub fn try_commit(&self, expected_version: u64, snapshot: S) -> Result<u64> {
        let mut guard = self.current.write();
        if guard.version != expected_version {
            return Err(StoreError::Conflict { attempts: 1 });
        }
        *guard = guard.next(snapshot);
        Ok(guard.version)
    }

    /// Apply an in-place edit to the snapshot, retrying on contention
    ///
    /// The edit is applied to a clone of the current snapshot and committed
    /// with a version check; on conflict the edit re-runs against the fresh
    /// snapshot. The closure must therefore be idempotent with respect to
    /// re-reads, which pure field assignments are. Returns the committed
    /// snapshot and its version.
    pub fn modify<F>(&self, edit: F) -> (Arc<S>, u64)
    where
        F: Fn(&mut S),
    {
        loop {
            let (snapshot, version) = self.versioned();
            let mut next = (*snapshot).clone();
            edit(&mut next);
            let committed = Arc::new(next);
            {
                let mut guard = self.current.write();
                if guard.version == version {
                    *guard = Versioned {
                        snapshot: committed.clone(),
                        version: version + 1,
                        updated_at: SystemTime::now(),
                    };
                    return (committed, version + 1);
                }
            }
            // Lost the race, re-read and retry
        }
    }

    /// Apply a pure transform to the whole snapshot with bounded retries
    ///
    /// The transform receives the current snapshot and returns its
    /// replacement. Each attempt re-reads the snapshot; after `max_retries`
    /// additional attempts the call fails with `StoreError::Conflict`
    /// carrying the total attempt count.
    pub fn update_with_retry<F>(&self, transform: F, max_retries: u32) -> Result<(Arc<S>, u64)>
    where
        F: Fn(&S) -> S,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let (snapshot, version) = self.versioned();
            let next = transform(&snapshot);
            match self.try_commit(version, next) {
                Ok(new_version) => return Ok((self.load(), new_version)),
                Err(StoreError::Conflict { .. }) => {
                    if attempts > max_retries {
                        return Err(StoreError::Conflict { attempts });
                    }
                }
            }
        }
    }
}

impl<S> Clone for VersionedStore<S> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for VersionedStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.current.read();
        f.debug_struct("VersionedStore")
            .field("version", &guard.version)
            .field("snapshot", &guard.snapshot)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::thread;

    #[test]
    fn test_load_is_point_in_time() {
        let store = VersionedStore::new(1u32);
        let before = store.load();
        store.replace(2);
        assert_eq!(*before, 1);
        assert_eq!(*store.load(), 2);
    }

    #[test]
    fn test_replace_bumps_version() {
        let store = VersionedStore::new(0u32);
        assert_eq!(store.version(), 0);
        assert_eq!(store.replace(5), 1);
        assert_eq!(store.replace(6), 2);
    }

    #[test]
    fn test_try_commit_conflict() {
        let store = VersionedStore::new(0u32);
        let (_, version) = store.versioned();

        store.replace(1);

        let result = store.try_commit(version, 2);
        assert_eq!(result, Err(StoreError::Conflict { attempts: 1 }));
        assert_eq!(*store.load(), 1);
    }

    #[test]
    fn test_modify_always_lands() {
        let store = VersionedStore::new(0u64);
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        store.modify(|n| *n += 1);
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(*store.load(), 800);
        assert_eq!(store.version(), 800);
    }

    #[test]
    fn test_update_with_retry_exhaustion() {
        let store = VersionedStore::new(0u32);
        // A transform that always loses: bump the version from inside it
        let saboteur = store.clone();
        let result = store.update_with_retry(
            |n| {
                saboteur.replace(*n + 100);
                *n + 1
            },
            2,
        );
        assert_eq!(result, Err(StoreError::Conflict { attempts: 3 }));
    }

    #[test]
    fn test_concurrent_transforms_on_disjoint_keys() {
        let mut initial = HashMap::new();
        initial.insert("a", 0u32);
        initial.insert("b", 0u32);
        let store = VersionedStore::new(initial);

        let handles: Vec<_> = ["a", "b"]
            .into_iter()
            .map(|key| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        store
                            .update_with_retry(
                                |m| {
                                    let mut next = m.clone();
                                    *next.get_mut(key).unwrap() += 1;
                                    next
                                },
                                1000,
                            )
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let snapshot = store.load();
        // Neither writer's effect was lost
        assert_eq!(snapshot["a"], 50);
        assert_eq!(snapshot["b"], 50);
    }
}
