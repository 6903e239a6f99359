//! Zone and client index newtypes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, 1-based identifier of an audio zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneIndex(pub u16);

impl ZoneIndex {
    /// Create a zone index
    pub fn new(index: u16) -> Self {
        Self(index)
    }

    /// Raw index value
    pub fn get(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ZoneIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone {}", self.0)
    }
}

impl From<u16> for ZoneIndex {
    fn from(index: u16) -> Self {
        Self(index)
    }
}

/// Stable, 1-based identifier of a playback client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientIndex(pub u16);

impl ClientIndex {
    /// Create a client index
    pub fn new(index: u16) -> Self {
        Self(index)
    }

    /// Raw index value
    pub fn get(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ClientIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client {}", self.0)
    }
}

impl From<u16> for ClientIndex {
    fn from(index: u16) -> Self {
        Self(index)
    }
}
