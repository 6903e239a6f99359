//! Playlist descriptor

use serde::{Deserialize, Serialize};

/// Information about the playlist currently loaded in a zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistInfo {
    /// 1-based playlist index
    pub index: u32,
    /// Display name
    pub name: Option<String>,
    /// Number of tracks
    pub track_count: Option<u32>,
    /// Total duration in milliseconds
    pub total_duration_ms: Option<u64>,
    /// Cover art reference
    pub cover_art_url: Option<String>,
}

impl PlaylistInfo {
    /// Create a playlist descriptor at an index
    pub fn at_index(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Builder-style name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style track count
    pub fn with_track_count(mut self, count: u32) -> Self {
        self.track_count = Some(count);
        self
    }
}
