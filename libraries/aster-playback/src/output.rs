//! Native audio output seam
//!
//! Abstracts the host's media element (the browser `<audio>` element in the
//! WASM build) behind imperative commands. Notifications flow back through
//! [`crate::MediaEvent`].

use crate::error::Result;

/// Platform audio output
///
/// Implementors only forward commands; transport state lives in
/// [`crate::PlaybackSurface`].
pub trait AudioOutput {
    /// Point the output at a new source
    ///
    /// `None` clears the source (silent entries).
    fn load(&mut self, src: Option<&str>) -> Result<()>;

    /// Start or resume playback
    ///
    /// `Ok` means the command was accepted. Hosts whose play request can
    /// still fail asynchronously report that later as
    /// [`crate::MediaEvent::PlaybackFailed`].
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Move the playhead (seconds from start)
    fn set_position(&mut self, position_secs: f64);

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Mute or unmute without touching the volume
    fn set_muted(&mut self, muted: bool);
}

/// Command log output for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub commands: Vec<String>,
    pub fail_play: bool,
    pub fail_load: bool,
}

#[cfg(test)]
impl AudioOutput for RecordingOutput {
    fn load(&mut self, src: Option<&str>) -> Result<()> {
        if self.fail_load {
            return Err(crate::error::PlaybackError::Output(
                "MEDIA_ERR_SRC_NOT_SUPPORTED".to_string(),
            ));
        }
        self.commands.push(format!("load {}", src.unwrap_or("-")));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.fail_play {
            return Err(crate::error::PlaybackError::Output(
                "NotAllowedError".to_string(),
            ));
        }
        self.commands.push("play".to_string());
        Ok(())
    }

    fn pause(&mut self) {
        self.commands.push("pause".to_string());
    }

    fn set_position(&mut self, position_secs: f64) {
        self.commands.push(format!("seek {position_secs}"));
    }

    fn set_volume(&mut self, volume: f32) {
        self.commands.push(format!("volume {volume}"));
    }

    fn set_muted(&mut self, muted: bool) {
        self.commands.push(format!("muted {muted}"));
    }
}
