//! Playback surface - transport orchestration
//!
//! Owns the transport state of the LP player and mediates with the native
//! audio output. The dominant charm category of the loaded track is
//! resolved here for theming; it never influences transport decisions.

use std::sync::Arc;

use aster_core::{
    Category, CategoryId, CategoryRegistry, DominanceResolver, PlaybackSettings, Track,
};
use tracing::{debug, info, warn};

use crate::{
    error::{PlaybackError, Result},
    events::{MediaEvent, PlaybackEvent},
    output::AudioOutput,
    types::{PlaybackState, SourceToken, TransportState},
    volume::Volume,
};

/// Transport state machine for a single player
///
/// All transitions happen in response to a user command or a
/// [`MediaEvent`] from the output. A track switch resets the transport and
/// issues a new [`SourceToken`] before any notification from the new source
/// can be applied; notifications tagged with an older token are dropped.
pub struct PlaybackSurface<O: AudioOutput> {
    registry: Arc<CategoryRegistry>,
    output: O,

    // Loaded track and its theme
    track: Option<Track>,
    category: CategoryId,

    // Transport
    state: PlaybackState,
    position_secs: f64,
    duration_secs: f64,
    volume: Volume,
    token: SourceToken,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<O: AudioOutput> PlaybackSurface<O> {
    /// Create a surface with nothing loaded
    pub fn new(registry: Arc<CategoryRegistry>, mut output: O, settings: &PlaybackSettings) -> Self {
        let mut volume = Volume::new(settings.initial_volume);
        if settings.start_muted {
            volume.mute();
        }

        output.set_volume(volume.level());
        output.set_muted(volume.is_muted());

        Self {
            registry,
            output,
            track: None,
            category: CategoryId::FALLBACK,
            state: PlaybackState::Stopped,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume,
            token: SourceToken::INITIAL,
            pending_events: Vec::new(),
        }
    }

    // ===== Track Loading =====

    /// Load a track, resetting transport when the source changes
    ///
    /// Reloading the track that is already loaded with the same audio source
    /// only refreshes its data and theme. A new id or a new `audio_url`
    /// switches the source. Returns the token that media notifications for
    /// this source must carry.
    pub fn load_track(&mut self, track: Track) -> SourceToken {
        let category = DominanceResolver::new(&self.registry).resolve_track(&track).id;

        if self
            .track
            .as_ref()
            .is_some_and(|loaded| loaded.id == track.id && loaded.audio_url == track.audio_url)
        {
            debug!("Refreshing data of loaded track {}", track.id);
            self.category = category;
            self.track = Some(track);
            return self.token;
        }

        // Stop the previous source before anything of the new one is applied
        self.output.pause();
        self.output.set_position(0.0);

        let previous_track_id = self.track.take().map(|t| t.id);
        self.token = self.token.next();
        self.state = PlaybackState::Paused;
        self.position_secs = 0.0;
        self.duration_secs = f64::from(track.duration_secs);
        self.category = category;

        info!(
            "Loaded track {} ({:?}), category {}, source {:?}",
            track.id,
            track.title,
            category,
            self.token
        );

        if let Err(e) = self.output.load(track.audio_url.as_deref()) {
            warn!("Output rejected source for track {}: {}", track.id, e);
            self.push_error(&e);
        }

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
            category,
        });
        self.track = Some(track);
        self.emit_state_changed();
        self.emit_position();

        self.token
    }

    /// Unload the current track
    pub fn eject(&mut self) {
        if self.track.is_none() {
            return;
        }

        self.output.pause();
        if let Err(e) = self.output.load(None) {
            warn!("Output rejected clearing the source: {}", e);
        }
        self.track = None;
        self.category = CategoryId::FALLBACK;
        self.token = self.token.next();
        self.state = PlaybackState::Stopped;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.emit_state_changed();
    }

    // ===== Playback Control =====

    /// Toggle between playing and paused
    pub fn toggle_play(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Playing => {
                self.pause();
                Ok(())
            }
            PlaybackState::Paused => self.play(),
            PlaybackState::Stopped => Err(PlaybackError::NoTrackLoaded),
        }
    }

    /// Start or resume playback
    ///
    /// If the output refuses, the surface stays paused and an error event is
    /// queued.
    pub fn play(&mut self) -> Result<()> {
        let has_audio = match &self.track {
            Some(track) => track.has_audio(),
            None => return Err(PlaybackError::NoTrackLoaded),
        };

        if self.state == PlaybackState::Playing {
            return Ok(());
        }

        if !has_audio {
            let err = PlaybackError::NoAudioSource;
            self.push_error(&err);
            return Err(err);
        }

        match self.output.play() {
            Ok(()) => {
                self.state = PlaybackState::Playing;
                self.emit_state_changed();
                Ok(())
            }
            Err(e) => {
                warn!("Play request failed: {}", e);
                self.push_error(&e);
                Err(e)
            }
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.output.pause();
            self.state = PlaybackState::Paused;
            self.emit_state_changed();
        }
    }

    // ===== Seek =====

    /// Seek to an absolute position in seconds
    ///
    /// Positions past a known duration are clamped to it.
    pub fn seek_to(&mut self, position_secs: f64) -> Result<()> {
        if self.track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        if !position_secs.is_finite() || position_secs < 0.0 {
            return Err(PlaybackError::InvalidSeekPosition(position_secs));
        }

        let position = if self.duration_secs > 0.0 {
            position_secs.min(self.duration_secs)
        } else {
            position_secs
        };

        self.position_secs = position;
        self.output.set_position(position);
        self.emit_position();
        Ok(())
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0); out-of-range values are clamped
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        if !volume.is_finite() {
            return Err(PlaybackError::InvalidVolume(volume));
        }

        self.volume.set_level(volume);
        self.output.set_volume(self.volume.level());
        self.emit_volume_changed();
        Ok(())
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_mute();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_mute();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_mute();
    }

    fn apply_mute(&mut self) {
        self.output.set_muted(self.volume.is_muted());
        self.emit_volume_changed();
    }

    // ===== Media Notifications =====

    /// Apply a notification from the output
    ///
    /// Returns `false` when the notification was dropped because it belongs
    /// to a source that is no longer loaded.
    pub fn handle_media_event(&mut self, token: SourceToken, event: MediaEvent) -> bool {
        if token != self.token || self.track.is_none() {
            debug!(
                "Dropping {:?} for source {:?} (current {:?})",
                event, token, self.token
            );
            return false;
        }

        match event {
            MediaEvent::TimeUpdate { position_secs } => {
                if position_secs.is_finite() && position_secs >= 0.0 {
                    self.position_secs = position_secs;
                    self.emit_position();
                }
            }
            MediaEvent::LoadedMetadata { duration_secs } => {
                if duration_secs.is_finite() && duration_secs > 0.0 {
                    self.duration_secs = duration_secs;
                } else {
                    debug!(
                        "Output reported unusable duration {}, keeping nominal {}",
                        duration_secs, self.duration_secs
                    );
                }
                self.pending_events.push(PlaybackEvent::DurationChanged {
                    duration_secs: self.duration_secs,
                });
            }
            MediaEvent::Ended => {
                self.state = PlaybackState::Paused;
                self.position_secs = self.duration_secs;
                self.emit_state_changed();
                self.emit_position();
            }
            MediaEvent::PlaybackFailed { message } => {
                warn!("Playback failed: {}", message);
                if self.state == PlaybackState::Playing {
                    self.state = PlaybackState::Paused;
                    self.emit_state_changed();
                }
                self.push_error(&PlaybackError::Output(message));
            }
        }

        true
    }

    // ===== State Queries =====

    pub fn get_state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn get_position(&self) -> f64 {
        self.position_secs
    }

    /// Duration in seconds: nominal until the output reports metadata
    pub fn get_duration(&self) -> f64 {
        self.duration_secs
    }

    pub fn get_volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Volume slider value (zero while muted)
    pub fn volume_slider_value(&self) -> f32 {
        self.volume.slider_value()
    }

    pub fn get_current_track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    /// Theme category of the loaded track (fallback when nothing is loaded)
    pub fn dominant_category(&self) -> &Category {
        self.registry.get(self.category)
    }

    /// Token that notifications for the current source must carry
    pub fn source_token(&self) -> SourceToken {
        self.token
    }

    /// Snapshot of the transport
    pub fn transport(&self) -> TransportState {
        TransportState {
            state: self.state,
            position_secs: self.position_secs,
            duration_secs: self.duration_secs,
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        }
    }

    pub fn registry(&self) -> &Arc<CategoryRegistry> {
        &self.registry
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_state_changed(&mut self) {
        self.pending_events
            .push(PlaybackEvent::StateChanged { state: self.state });
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_secs: self.position_secs,
            duration_secs: self.duration_secs,
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn push_error(&mut self, error: &PlaybackError) {
        self.pending_events.push(PlaybackEvent::Error {
            message: error.to_string(),
        });
    }
}

impl<O: AudioOutput + std::fmt::Debug> std::fmt::Debug for PlaybackSurface<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSurface")
            .field("output", &self.output)
            .field("track", &self.track.as_ref().map(|t| &t.id))
            .field("category", &self.category)
            .field("transport", &self.transport())
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}
