//! Zone Hub State Management
//!
//! Versioned, concurrent state store for a multi-room audio hub: zones,
//! playback clients, and the typed change events downstream protocol
//! adapters fan out to message buses and automation buses.
//!
//! # Features
//!
//! - **Single source of truth**: one immutable snapshot of every zone and
//!   client, swapped atomically under a store-wide version counter
//! - **Granular mutators**: per-field updates with change detection, so an
//!   unchanged write commits nothing and fires nothing
//! - **Optimistic transforms**: whole-store read-transform-commit with
//!   bounded retries and cross-entity validation before commit
//! - **Typed events**: one broadcast channel per field group plus a
//!   catch-all, via `tokio::sync::broadcast`
//! - **Position coalescing**: per-zone trailing-edge debounce so position
//!   chatter reaches subscribers at most twice a second
//!
//! # Architecture
//!
//! ```text
//! Commands → HubStore → VersionedStore<HubSnapshot> → EventBus → Subscribers
//!            (mutators)  (versioned snapshots)        (per-kind + firehose)
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use zonehub_state::{HubConfig, HubStore, StatusKind, ZoneConfig, ZoneIndex};
//!
//! let config = HubConfig {
//!     zones: vec![ZoneConfig::new("Living Room")],
//!     clients: vec![],
//! };
//! let store = HubStore::from_config(&config)?;
//!
//! // Subscribe before mutating to observe the change
//! let mut volume_rx = store.subscribe(StatusKind::ZoneVolume);
//! store.update_zone_volume(ZoneIndex::new(1), 42)?;
//!
//! let change = volume_rx.recv().await?;
//! println!("{:?}", change);
//! ```

// Core modules
pub mod config;
pub mod events;
pub mod logging;
pub mod model;
pub mod snapshot;
pub mod store;

mod debounce;
mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ClientConfig, HubConfig, ZoneConfig};
pub use debounce::POSITION_WINDOW;
pub use error::{Result, StateError};
pub use events::{EventBus, StateChange, StatusKind};
pub use model::{
    ClientIndex, ClientState, PlaybackState, PlaylistInfo, TrackInfo, ZoneIndex, ZoneState,
    MAX_LATENCY_MS, MAX_VOLUME,
};
pub use snapshot::HubSnapshot;
pub use store::HubStore;

/// Convenience imports for embedding applications
pub mod prelude {
    pub use crate::config::{ClientConfig, HubConfig, ZoneConfig};
    pub use crate::error::{Result, StateError};
    pub use crate::events::{StateChange, StatusKind};
    pub use crate::model::{
        ClientIndex, ClientState, PlaybackState, PlaylistInfo, TrackInfo, ZoneIndex, ZoneState,
    };
    pub use crate::snapshot::HubSnapshot;
    pub use crate::store::HubStore;
}
