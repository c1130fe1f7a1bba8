//! Core types for the playback surface

use serde::{Deserialize, Serialize};

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No track loaded
    Stopped,

    /// Track loaded, not playing
    Paused,

    /// Currently playing
    Playing,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

/// Identifies the audio source a media notification belongs to
///
/// A new token is issued on every track switch; notifications carrying an
/// older token are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceToken(u64);

impl SourceToken {
    /// Token before any track was loaded
    pub const INITIAL: SourceToken = SourceToken(0);

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Snapshot of the mutable transport state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportState {
    pub state: PlaybackState,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub volume: f32,
    pub is_muted: bool,
}

impl TransportState {
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }
}
