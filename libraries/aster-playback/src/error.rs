//! Error types for the playback surface

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The loaded track has nothing to play
    #[error("Track has no audio source")]
    NoAudioSource,

    /// Invalid seek position
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Invalid volume level
    #[error("Invalid volume: {0}")]
    InvalidVolume(f32),

    /// Native audio output rejected a command
    #[error("Audio output error: {0}")]
    Output(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
