//! Whole-store snapshot value

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{ClientIndex, ClientState, ZoneIndex, ZoneState};

/// A point-in-time view of every zone and client
///
/// This is the value the versioned store swaps atomically. It is cloned on
/// every mutation, so it stays a plain value type with no interior locks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubSnapshot {
    /// All zones by index
    pub zones: HashMap<ZoneIndex, ZoneState>,
    /// All clients by index
    pub clients: HashMap<ClientIndex, ClientState>,
}

impl HubSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a zone by index
    pub fn zone(&self, index: ZoneIndex) -> Option<&ZoneState> {
        self.zones.get(&index)
    }

    /// Get a client by index
    pub fn client(&self, index: ClientIndex) -> Option<&ClientState> {
        self.clients.get(&index)
    }

    /// Iterate zones in index order
    pub fn zones_ordered(&self) -> Vec<&ZoneState> {
        let mut zones: Vec<_> = self.zones.values().collect();
        zones.sort_by_key(|z| z.index);
        zones
    }

    /// Iterate clients in index order
    pub fn clients_ordered(&self) -> Vec<&ClientState> {
        let mut clients: Vec<_> = self.clients.values().collect();
        clients.sort_by_key(|c| c.index);
        clients
    }

    /// Number of zones
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Number of clients
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Check cross-entity invariants
    ///
    /// Every client's assigned zone must exist and list the client back in
    /// its client set, and every index in a zone's client set must refer to
    /// a known client. Returns a human-readable reason on the first
    /// violation found.
    pub fn validate(&self) -> Result<(), String> {
        for client in self.clients.values() {
            if let Some(zone_index) = client.zone {
                let Some(zone) = self.zones.get(&zone_index) else {
                    return Err(format!(
                        "{} is assigned to {zone_index}, which does not exist",
                        client.index
                    ));
                };
                if !zone.clients.contains(&client.index) {
                    return Err(format!(
                        "{} is assigned to {zone_index}, but the zone does not list it",
                        client.index
                    ));
                }
            }
        }

        for zone in self.zones.values() {
            for client_index in &zone.clients {
                let Some(client) = self.clients.get(client_index) else {
                    return Err(format!(
                        "{} lists {client_index}, which does not exist",
                        zone.index
                    ));
                };
                if client.zone != Some(zone.index) {
                    return Err(format!(
                        "{} lists {client_index}, but the client is assigned to {:?}",
                        zone.index, client.zone
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(zone: ZoneState, client: ClientState) -> HubSnapshot {
        let mut snapshot = HubSnapshot::new();
        snapshot.zones.insert(zone.index, zone);
        snapshot.clients.insert(client.index, client);
        snapshot
    }

    #[test]
    fn test_validate_consistent() {
        let mut zone = ZoneState::new(ZoneIndex::new(1), "Living Room");
        zone.clients.insert(ClientIndex::new(1));
        let mut client = ClientState::new(ClientIndex::new(1), "Speaker");
        client.zone = Some(ZoneIndex::new(1));

        assert!(snapshot_with(zone, client).validate().is_ok());
    }

    #[test]
    fn test_validate_dangling_zone_reference() {
        let zone = ZoneState::new(ZoneIndex::new(1), "Living Room");
        let mut client = ClientState::new(ClientIndex::new(1), "Speaker");
        client.zone = Some(ZoneIndex::new(9));

        let err = snapshot_with(zone, client).validate().unwrap_err();
        assert!(err.contains("does not exist"), "{err}");
    }

    #[test]
    fn test_validate_missing_back_reference() {
        let zone = ZoneState::new(ZoneIndex::new(1), "Living Room");
        let mut client = ClientState::new(ClientIndex::new(1), "Speaker");
        client.zone = Some(ZoneIndex::new(1));

        let err = snapshot_with(zone, client).validate().unwrap_err();
        assert!(err.contains("does not list"), "{err}");
    }

    #[test]
    fn test_validate_unknown_client_in_zone() {
        let mut zone = ZoneState::new(ZoneIndex::new(1), "Living Room");
        zone.clients.insert(ClientIndex::new(4));
        let client = ClientState::new(ClientIndex::new(1), "Speaker");

        let err = snapshot_with(zone, client).validate().unwrap_err();
        assert!(err.contains("does not exist"), "{err}");
    }

    #[test]
    fn test_ordered_accessors() {
        let mut snapshot = HubSnapshot::new();
        for i in [3u16, 1, 2] {
            let zone = ZoneState::new(ZoneIndex::new(i), format!("Zone {i}"));
            snapshot.zones.insert(zone.index, zone);
        }
        let order: Vec<u16> = snapshot.zones_ordered().iter().map(|z| z.index.get()).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }
}
