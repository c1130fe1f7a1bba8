//! `AudioOutput` over a browser media element

use js_sys::Promise;
use tracing::warn;
use web_sys::HtmlAudioElement;

use crate::{AudioOutput, PlaybackError, Result};

/// Forwards transport commands to an `<audio>` element
pub struct HtmlAudioOutput {
    element: HtmlAudioElement,

    // Promise of the last accepted play() call; rejection arrives later
    pending_play: Option<Promise>,
}

impl HtmlAudioOutput {
    pub fn new(element: HtmlAudioElement) -> Self {
        Self {
            element,
            pending_play: None,
        }
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    /// Take the promise of the most recent play request
    pub fn take_pending_play(&mut self) -> Option<Promise> {
        self.pending_play.take()
    }
}

impl AudioOutput for HtmlAudioOutput {
    fn load(&mut self, src: Option<&str>) -> Result<()> {
        self.pending_play = None;
        self.element.set_src(src.unwrap_or(""));
        self.element.load();
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlaybackError::Output(format!("{e:?}")))?;
        self.pending_play = Some(promise);
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            warn!("Media element refused pause: {:?}", e);
        }
    }

    fn set_position(&mut self, position_secs: f64) {
        self.element.set_current_time(position_secs);
    }

    fn set_volume(&mut self, volume: f32) {
        self.element.set_volume(f64::from(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }
}
