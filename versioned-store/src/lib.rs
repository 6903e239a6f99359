//! Generic Versioned Snapshot Store
//!
//! A small, domain-agnostic state container built around an immutable
//! snapshot handle and a store-wide version counter.
//!
//! # Features
//!
//! - **Point-in-time Reads**: `load()` hands out an `Arc` to the current
//!   snapshot; readers never hold the snapshot lock while working
//! - **Optimistic Concurrency**: `try_commit()` swaps in a new snapshot only
//!   if the version is unchanged since it was read
//! - **Retrying Transforms**: `update_with_retry()` re-reads and re-applies a
//!   pure transform on conflict, up to a caller-chosen bound
//! - **CAS-loop Mutation**: `modify()` applies an in-place edit that always
//!   lands, retrying internally on contention
//!
//! # Quick Start
//!
//! ```rust
//! use versioned_store::VersionedStore;
//!
//! let store = VersionedStore::new(vec![1, 2, 3]);
//!
//! // Read without blocking writers
//! let snapshot = store.load();
//! assert_eq!(snapshot.len(), 3);
//!
//! // Optimistic whole-snapshot transform
//! let (after, _version) = store
//!     .update_with_retry(|v| {
//!         let mut next = v.clone();
//!         next.push(4);
//!         next
//!     }, 3)
//!     .unwrap();
//! assert_eq!(after.len(), 4);
//! ```
//!
//! # Architecture
//!
//! ```text
//! VersionedStore<S>
//!     │
//!     └── RwLock<Versioned<S>>
//!             ├── snapshot: Arc<S>      (immutable, cheaply cloned out)
//!             ├── version: u64          (bumped by every commit)
//!             └── updated_at: SystemTime
//! ```

pub mod error;
pub mod snapshot;
pub mod store;

pub use error::StoreError;
pub use snapshot::Versioned;
pub use store::VersionedStore;
