//! Domain model types for zones and clients

mod client_state;
mod ids;
mod playback_state;
mod playlist;
mod track;
mod zone_state;

pub use client_state::{ClientState, MAX_LATENCY_MS};
pub use ids::{ClientIndex, ZoneIndex};
pub use playback_state::PlaybackState;
pub use playlist::PlaylistInfo;
pub use track::TrackInfo;
pub use zone_state::{ZoneState, MAX_VOLUME};
