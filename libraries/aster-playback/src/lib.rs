//! Aster Alarm - LP Player Playback
//!
//! Platform-agnostic transport for the Aster Alarm charm player.
//!
//! This crate provides:
//! - Play/pause transport with a single loaded track
//! - Seek with clamping to the known duration
//! - Volume and mute control
//! - Track switching that resets transport and ignores stale notifications
//! - The dominant charm category of the loaded track for theming
//! - A renderer snapshot (`PlayerView`) with formatted labels
//!
//! # Architecture
//!
//! The native media element is reached only through the [`AudioOutput`]
//! trait. Commands flow out through it; notifications flow back in as
//! [`MediaEvent`]s tagged with the [`SourceToken`] of the source they came
//! from. Changes for the UI are queued as [`PlaybackEvent`]s and collected
//! with [`PlaybackSurface::drain_events`].
//!
//! The `wasm` feature adds an `HtmlAudioElement` output and a JavaScript
//! facade (`WasmPlayer`).
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use aster_core::{CategoryId, CategoryRegistry, PlaybackSettings, Track};
//! use aster_playback::{AudioOutput, MediaEvent, PlaybackState, PlaybackSurface, Result};
//!
//! // Implement AudioOutput for your platform
//! struct SilentOutput;
//!
//! impl AudioOutput for SilentOutput {
//!     fn load(&mut self, _src: Option<&str>) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn set_position(&mut self, _position_secs: f64) {}
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn set_muted(&mut self, _muted: bool) {}
//! }
//!
//! let mut surface = PlaybackSurface::new(
//!     Arc::new(CategoryRegistry::standard()),
//!     SilentOutput,
//!     &PlaybackSettings::default(),
//! );
//!
//! let track = Track::new("태양", "BTS", 80)
//!     .with_trait("목표 의식", 9)
//!     .with_trait("열정", 8)
//!     .with_audio_url("/music/taeyang.mp3");
//!
//! let token = surface.load_track(track);
//! assert_eq!(surface.dominant_category().id, CategoryId::Passion);
//!
//! surface.toggle_play().unwrap();
//! assert_eq!(surface.get_state(), PlaybackState::Playing);
//!
//! surface.handle_media_event(token, MediaEvent::TimeUpdate { position_secs: 12.5 });
//! assert_eq!(surface.get_position(), 12.5);
//! ```

mod error;
mod events;
mod output;
mod surface;
pub mod types;
mod view;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::{MediaEvent, PlaybackEvent};
pub use output::AudioOutput;
pub use surface::PlaybackSurface;
pub use types::{PlaybackState, SourceToken, TransportState};
pub use view::PlayerView;
pub use volume::Volume;
