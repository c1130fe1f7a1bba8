/// Track domain type
use crate::types::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// A named personality attribute attached to a track
///
/// Names are free text and are never validated against the category
/// vocabulary; `level` is informally 1-10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharmTrait {
    /// Trait name
    #[serde(rename = "charm_name")]
    pub name: String,

    /// Trait level
    #[serde(rename = "stage")]
    pub level: i32,
}

impl CharmTrait {
    /// Create a new trait
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    /// Chip label shown next to the player, e.g. `침착함 Lv.6`
    pub fn label(&self) -> String {
        format!("{} Lv.{}", self.name, self.level)
    }
}

/// A generated charm track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title (the person the track was generated for)
    pub title: String,

    /// Artist or owner name
    #[serde(default)]
    pub artist: String,

    /// Traits in display order
    #[serde(default)]
    pub traits: Vec<CharmTrait>,

    /// Nominal duration in seconds
    #[serde(rename = "duration")]
    pub duration_secs: u32,

    /// Playable asset; absent for silent entries
    #[serde(default, deserialize_with = "empty_as_none")]
    pub audio_url: Option<String>,

    /// Creation time (epoch milliseconds on the wire)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Track {
    /// Create a new track with no traits and no audio
    pub fn new(title: impl Into<String>, artist: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: artist.into(),
            traits: Vec::new(),
            duration_secs,
            audio_url: None,
            created_at: Utc::now(),
        }
    }

    /// Builder-style trait append
    #[must_use]
    pub fn with_trait(mut self, name: impl Into<String>, level: i32) -> Self {
        self.traits.push(CharmTrait::new(name, level));
        self
    }

    /// Builder-style audio source
    #[must_use]
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.audio_url = if url.is_empty() { None } else { Some(url) };
        self
    }

    /// Get the nominal duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }

    /// Whether the track has something to play
    pub fn has_audio(&self) -> bool {
        self.audio_url.is_some()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|url| !url.is_empty()))
}
