//! Volume control
//!
//! Linear 0.0-1.0 level matching the native media element's `volume`
//! property, with a mute flag that preserves the level.

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// Out-of-range levels are clamped; NaN falls back to full volume.
    pub fn new(level: f32) -> Self {
        Self {
            level: Self::sanitize(level),
            muted: false,
        }
    }

    /// Set volume level (0.0-1.0)
    pub fn set_level(&mut self, level: f32) {
        self.level = Self::sanitize(level);
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Value the volume slider shows: zero while muted
    pub fn slider_value(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    fn sanitize(level: f32) -> f32 {
        if level.is_nan() {
            1.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
