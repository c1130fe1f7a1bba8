//! Track catalog and session list
//!
//! A `TrackCatalog` supplies the ordered tracks for a session. `TrackList`
//! holds them in memory together with the currently selected pointer and
//! produces the entries a list renderer draws.

use crate::category::{CategoryId, Theme};
use crate::config::DisplaySettings;
use crate::error::{AsterError, Result};
use crate::format::{format_clock, format_list_timestamp};
use crate::resolver::DominanceResolver;
use crate::types::{Track, TrackId};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Data-fetch collaborator
pub trait TrackCatalog {
    /// Fetch the full, ordered track list
    fn fetch_tracks(&self) -> Result<Vec<Track>>;
}

/// Built-in demo tracks
#[derive(Debug, Clone)]
pub struct MockCatalog {
    now: DateTime<Utc>,
}

impl MockCatalog {
    /// Demo tracks timestamped relative to the current time
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Demo tracks timestamped relative to `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackCatalog for MockCatalog {
    fn fetch_tracks(&self) -> Result<Vec<Track>> {
        const DEMO: [(&str, &str, [(&str, i32); 3], u32); 7] = [
            ("1", "지민", [("침착함", 6), ("안정감", 5), ("긍정적", 4)], 60),
            ("2", "승현", [("유머 감각", 6), ("분위기 메이커", 5), ("사교적 에너지", 4)], 45),
            ("3", "수진", [("호기심", 8), ("창의성", 7), ("통찰력", 6)], 90),
            ("4", "민수", [("정직함", 7), ("양심", 6), ("진정성", 5)], 75),
            ("5", "혜린", [("다정함", 8), ("공감 능력", 7), ("배려심", 6)], 55),
            ("6", "태양", [("목표 의식", 9), ("열정", 8), ("리더십", 7)], 80),
            ("7", "은서", [("성실함", 7), ("책임감", 6), ("계획성", 5)], 65),
        ];

        let tracks = DEMO
            .iter()
            .zip(1..)
            .map(|((id, title, traits, duration), hours_ago)| {
                let mut track = Track::new(*title, "BTS", *duration);
                track.id = TrackId::new(*id);
                track.created_at = self.now - Duration::hours(hours_ago);
                for (name, level) in traits {
                    track = track.with_trait(*name, *level);
                }
                track
            })
            .collect();

        Ok(tracks)
    }
}

/// Catalog backed by a JSON array in the track wire shape
///
/// Track ids must be unique within the array.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    json: String,
}

impl JsonCatalog {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl TrackCatalog for JsonCatalog {
    fn fetch_tracks(&self) -> Result<Vec<Track>> {
        let tracks: Vec<Track> = serde_json::from_str(&self.json)?;

        let mut seen = HashSet::with_capacity(tracks.len());
        if let Some(dup) = tracks.iter().find(|t| !seen.insert(&t.id)) {
            return Err(AsterError::catalog(format!("duplicate track id {}", dup.id)));
        }

        Ok(tracks)
    }
}

/// One row of the track list as drawn by the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackListEntry {
    pub id: TrackId,
    pub title: String,
    pub is_active: bool,
    pub category: CategoryId,
    pub category_name: String,
    pub theme: Theme,
    pub trait_labels: Vec<String>,
    pub duration_label: String,
    pub created_label: String,
}

/// In-memory session collection with a selection pointer
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    tracks: Vec<Track>,
    selected: Option<TrackId>,
}

impl TrackList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch from `catalog` and replace the current contents
    pub fn refresh(&mut self, catalog: &dyn TrackCatalog) -> Result<()> {
        let tracks = catalog.fetch_tracks()?;
        self.replace(tracks);
        Ok(())
    }

    /// Replace every track
    ///
    /// The selection survives if its id is still present; otherwise the
    /// first track becomes selected.
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;

        let still_present = self
            .selected
            .as_ref()
            .is_some_and(|id| self.tracks.iter().any(|t| &t.id == id));
        if !still_present {
            self.selected = self.tracks.first().map(|t| t.id.clone());
        }

        info!(
            "Track list replaced: {} tracks, selected {:?}",
            self.tracks.len(),
            self.selected
        );
    }

    /// Select a track by id
    pub fn select(&mut self, id: &TrackId) -> Result<&Track> {
        let track = self
            .tracks
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| AsterError::TrackNotFound(id.clone()))?;

        debug!("Selected track {}", id);
        self.selected = Some(id.clone());
        Ok(track)
    }

    /// Currently selected track
    pub fn selected(&self) -> Option<&Track> {
        let id = self.selected.as_ref()?;
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Look up a track
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Rows for the list renderer, in track order
    pub fn entries(
        &self,
        resolver: &DominanceResolver<'_>,
        display: &DisplaySettings,
    ) -> Vec<TrackListEntry> {
        self.tracks
            .iter()
            .map(|track| {
                let category = resolver.resolve_track(track);
                TrackListEntry {
                    id: track.id.clone(),
                    title: track.title.clone(),
                    is_active: self.selected.as_ref() == Some(&track.id),
                    category: category.id,
                    category_name: category.display_name.clone(),
                    theme: category.theme.clone(),
                    trait_labels: track.traits.iter().map(|t| t.label()).collect(),
                    duration_label: format_clock(f64::from(track.duration_secs)),
                    created_label: format_list_timestamp(
                        track.created_at,
                        display.locale,
                        display.utc_offset_minutes,
                    ),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_catalog_has_seven_tracks() {
        let tracks = MockCatalog::new().fetch_tracks().unwrap();
        assert_eq!(tracks.len(), 7);
        assert!(tracks.iter().all(|t| t.traits.len() == 3 && !t.has_audio()));
        assert_eq!(tracks[0].id, TrackId::new("1"));
    }

    #[test]
    fn mock_catalog_timestamps_step_back_hourly() {
        let now = Utc::now();
        let tracks = MockCatalog::at(now).fetch_tracks().unwrap();
        assert_eq!(tracks[0].created_at, now - Duration::hours(1));
        assert_eq!(tracks[6].created_at, now - Duration::hours(7));
    }

    #[test]
    fn json_catalog_reports_bad_input() {
        let err = JsonCatalog::new("{not json").fetch_tracks().unwrap_err();
        assert!(matches!(err, AsterError::Serialization(_)));
    }

    #[test]
    fn json_catalog_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "1", "title": "지민", "traits": [], "duration": 60, "createdAt": 0},
            {"id": "1", "title": "승현", "traits": [], "duration": 45, "createdAt": 0}
        ]"#;

        let err = JsonCatalog::new(json).fetch_tracks().unwrap_err();
        assert!(matches!(err, AsterError::Catalog(ref msg) if msg.contains("1")));
    }

    #[test]
    fn select_unknown_track_fails() {
        let mut list = TrackList::new();
        list.refresh(&MockCatalog::new()).unwrap();

        let err = list.select(&TrackId::new("99")).unwrap_err();
        assert!(matches!(err, AsterError::TrackNotFound(_)));
        assert_eq!(list.selected().map(|t| t.id.as_str()), Some("1"));
    }

    #[test]
    fn empty_replace_clears_selection() {
        let mut list = TrackList::new();
        list.refresh(&MockCatalog::new()).unwrap();
        list.replace(Vec::new());

        assert!(list.is_empty());
        assert!(list.selected().is_none());
    }
}
