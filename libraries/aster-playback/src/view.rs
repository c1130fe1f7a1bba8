//! Renderer snapshot of the LP player

use aster_core::{
    format_clock, format_date, CategoryId, DisplayLocale, DisplaySettings, Theme, TrackId,
};
use serde::Serialize;

use crate::{output::AudioOutput, surface::PlaybackSurface};

/// Progress slider maximum while the duration is unknown
const UNKNOWN_DURATION_SLIDER_MAX: f64 = 100.0;

/// Everything the player renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub track_id: TrackId,
    pub heading: String,
    pub category: CategoryId,
    pub category_name: String,
    pub theme: Theme,
    pub trait_labels: Vec<String>,

    /// Drives the record spin and tonearm position
    pub is_playing: bool,

    pub position_label: String,
    pub duration_label: String,
    pub progress_value: f64,
    pub progress_max: f64,

    pub volume_slider: f32,
    pub is_muted: bool,

    pub date_label: String,
}

impl<O: AudioOutput> PlaybackSurface<O> {
    /// Snapshot for the renderer, `None` when nothing is loaded
    pub fn view(&self, display: &DisplaySettings) -> Option<PlayerView> {
        let track = self.get_current_track()?;
        let category = self.dominant_category();
        let duration = self.get_duration();

        let heading = match display.locale {
            DisplayLocale::KoKr => format!("{}의 매력 음악", track.title),
            DisplayLocale::EnUs => format!("{}'s charm music", track.title),
        };

        Some(PlayerView {
            track_id: track.id.clone(),
            heading,
            category: category.id,
            category_name: category.display_name.clone(),
            theme: category.theme.clone(),
            trait_labels: track.traits.iter().map(|t| t.label()).collect(),
            is_playing: self.is_playing(),
            position_label: format_clock(self.get_position()),
            duration_label: format_clock(duration),
            progress_value: self.get_position(),
            progress_max: if duration > 0.0 {
                duration
            } else {
                UNKNOWN_DURATION_SLIDER_MAX
            },
            volume_slider: self.volume_slider_value(),
            is_muted: self.is_muted(),
            date_label: format_date(track.created_at, display.locale, display.utc_offset_minutes),
        })
    }
}
