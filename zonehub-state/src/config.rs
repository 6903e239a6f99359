//! Static hub configuration
//!
//! The set of zones and clients is fixed at startup; indices are assigned by
//! configuration order (1-based) and never change at runtime. The config is
//! plain serde data so it can be loaded from JSON or built in code.

use serde::{Deserialize, Serialize};

use crate::model::{ClientIndex, ClientState, ZoneIndex, ZoneState};
use crate::snapshot::HubSnapshot;

/// Configuration for one audio zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Human-readable zone name
    pub name: String,
    /// Starting volume (0-100)
    #[serde(default = "default_volume")]
    pub initial_volume: u8,
}

/// Configuration for one playback client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Human-readable client name
    pub name: String,
    /// Zone this client starts in, as a 1-based index into the zone list
    #[serde(default)]
    pub zone: Option<u16>,
}

/// Full hub configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubConfig {
    /// Zones in index order; the first entry is zone 1
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
    /// Clients in index order; the first entry is client 1
    #[serde(default)]
    pub clients: Vec<ClientConfig>,
}

fn default_volume() -> u8 {
    50
}

impl ZoneConfig {
    /// Create a zone config with the default starting volume
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_volume: default_volume(),
        }
    }
}

impl ClientConfig {
    /// Create an unassigned client config
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zone: None,
        }
    }

    /// Create a client config starting in the given 1-based zone
    pub fn in_zone(name: impl Into<String>, zone: u16) -> Self {
        Self {
            name: name.into(),
            zone: Some(zone),
        }
    }
}

impl HubConfig {
    /// Build the startup snapshot this configuration describes
    ///
    /// Client→zone assignments are mirrored into the zones' client sets so
    /// the result passes [`HubSnapshot::validate`] whenever every referenced
    /// zone index is in range.
    pub fn initial_snapshot(&self) -> HubSnapshot {
        let mut snapshot = HubSnapshot::new();

        for (i, zone_config) in self.zones.iter().enumerate() {
            let index = ZoneIndex::new(i as u16 + 1);
            let mut zone = ZoneState::new(index, zone_config.name.clone());
            zone.set_volume(zone_config.initial_volume);
            snapshot.zones.insert(index, zone);
        }

        for (i, client_config) in self.clients.iter().enumerate() {
            let index = ClientIndex::new(i as u16 + 1);
            let mut client = ClientState::new(index, client_config.name.clone());
            if let Some(zone_raw) = client_config.zone {
                let zone_index = ZoneIndex::new(zone_raw);
                client.zone = Some(zone_index);
                if let Some(zone) = snapshot.zones.get_mut(&zone_index) {
                    zone.clients.insert(index);
                }
            }
            snapshot.clients.insert(index, client);
        }

        snapshot
    }
}
