//! Track descriptor

use serde::{Deserialize, Serialize};

/// Information about the track currently loaded in a zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// 1-based index within the current playlist
    pub index: u32,
    /// Track title
    pub title: Option<String>,
    /// Artist name
    pub artist: Option<String>,
    /// Album name
    pub album: Option<String>,
    /// Cover art reference
    pub cover_art_url: Option<String>,
    /// Genre
    pub genre: Option<String>,
    /// Track number on the album
    pub track_number: Option<u32>,
    /// Release year
    pub year: Option<u16>,
    /// Track duration in milliseconds, where known
    pub duration_ms: Option<u64>,
}

impl TrackInfo {
    /// Create a track descriptor at a playlist index
    pub fn at_index(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Builder-style title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder-style artist
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Builder-style duration
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}
