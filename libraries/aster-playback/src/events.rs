//! Playback Events
//!
//! Two directions:
//! - `MediaEvent`: notifications from the native audio output
//!   (time advanced, metadata loaded, ended, play rejected)
//! - `PlaybackEvent`: changes emitted for UI synchronization

use aster_core::{CategoryId, TrackId};
use serde::{Deserialize, Serialize};

use crate::types::PlaybackState;

/// Notification from the native audio output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Playhead advanced
    TimeUpdate { position_secs: f64 },

    /// Metadata loaded; the reported duration may be NaN or infinite
    LoadedMetadata { duration_secs: f64 },

    /// Playback reached the end of the source
    Ended,

    /// A previously accepted play request failed
    PlaybackFailed { message: String },
}

/// DOMException name of a play request cut short by `pause()` or a new `src`
const INTERRUPTED_PLAY: &str = "AbortError";

impl MediaEvent {
    /// Map a rejected play request to a notification
    ///
    /// A request interrupted by a later pause or source change is not a
    /// failure and yields `None`.
    pub fn from_play_rejection(name: Option<&str>, message: String) -> Option<Self> {
        if name == Some(INTERRUPTED_PLAY) {
            return None;
        }
        Some(Self::PlaybackFailed { message })
    }
}

/// Events emitted by the playback surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Transport state changed (playing, paused, stopped)
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A different track was loaded
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
        /// Dominant category of the new track
        category: CategoryId,
    },

    /// Position update
    PositionUpdate {
        position_secs: f64,
        duration_secs: f64,
    },

    /// Authoritative duration became known
    DurationChanged { duration_secs: f64 },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        volume: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}
