//! Error types for the versioned store

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur when committing to a [`crate::VersionedStore`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The snapshot changed between read and commit.
    ///
    /// `attempts` is the number of commit attempts made before giving up
    /// (1 for a single `try_commit` call).
    #[error("snapshot version changed concurrently after {attempts} attempt(s)")]
    Conflict {
        /// Commit attempts made, including the failed one
        attempts: u32,
    },
}
