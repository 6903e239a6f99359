//! Versioned snapshot handle

use std::sync::Arc;
use std::time::SystemTime;

/// An immutable snapshot together with its version and commit timestamp
///
/// The version counter is store-wide and monotonically increasing: every
/// committed mutation, however small, produces a new `Versioned` with
/// `version + 1` and a fresh `updated_at` stamp.
#[derive(Debug, Clone)]
pub struct Versioned<S> {
    /// The snapshot itself, shared with readers
    pub snapshot: Arc<S>,
    /// Store-wide version this snapshot was committed at
    pub version: u64,
    /// Wall-clock time of the commit
    pub updated_at: SystemTime,
}

impl<S> Versioned<S> {
    /// Wrap an initial snapshot at version 0
    pub fn initial(snapshot: S) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            version: 0,
            updated_at: SystemTime::now(),
        }
    }

    /// Produce the successor of this snapshot
    pub fn next(&self, snapshot: S) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            version: self.version + 1,
            updated_at: SystemTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_is_version_zero() {
        let v = Versioned::initial("a");
        assert_eq!(v.version, 0);
        assert_eq!(*v.snapshot, "a");
    }

    #[test]
    fn test_next_bumps_version() {
        let v = Versioned::initial("a");
        let n = v.next("b");
        assert_eq!(n.version, 1);
        assert_eq!(*n.snapshot, "b");
        // Predecessor is untouched
        assert_eq!(*v.snapshot, "a");
    }
}
