//! Error types for zonehub-state

use crate::model::{ClientIndex, ZoneIndex};

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors that can occur during state management
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Target zone does not exist
    #[error("{0} not found")]
    ZoneNotFound(ZoneIndex),

    /// Target client does not exist
    #[error("{0} not found")]
    ClientNotFound(ClientIndex),

    /// A whole-store transform could not commit after exhausting retries
    ///
    /// Indicates contention, not bad data.
    #[error("whole-store transform lost the version race {attempts} time(s)")]
    Conflict {
        /// Total commit attempts made
        attempts: u32,
    },

    /// A whole-store transform produced a snapshot violating cross-entity
    /// invariants; the prior snapshot was kept
    #[error("rejected invalid snapshot: {0}")]
    Validation(String),
}

impl From<versioned_store::StoreError> for StateError {
    fn from(err: versioned_store::StoreError) -> Self {
        match err {
            versioned_store::StoreError::Conflict { attempts } => StateError::Conflict { attempts },
        }
    }
}
