//! Integration tests for the playback surface
//!
//! Drive the surface the way the player renderer does: load a track from
//! the list, toggle, seek, adjust volume, and feed back native media
//! notifications.

use std::sync::Arc;

use aster_core::{
    CategoryId, CategoryRegistry, DisplayLocale, DisplaySettings, MockCatalog, PlaybackSettings,
    Track, TrackCatalog,
};
use aster_playback::{
    AudioOutput, MediaEvent, PlaybackError, PlaybackEvent, PlaybackState, PlaybackSurface,
};
use chrono::{TimeZone, Utc};

// ===== Test Helpers =====

/// Mock output recording every command it receives
#[derive(Debug, Default)]
struct MockOutput {
    commands: Vec<String>,
    src: Option<String>,
    muted: bool,
    volume: f32,
    refuse_play: bool,
}

impl AudioOutput for MockOutput {
    fn load(&mut self, src: Option<&str>) -> aster_playback::Result<()> {
        self.src = src.map(str::to_string);
        self.commands.push(format!("load {}", src.unwrap_or("-")));
        Ok(())
    }

    fn play(&mut self) -> aster_playback::Result<()> {
        if self.refuse_play {
            return Err(PlaybackError::Output("NotAllowedError".to_string()));
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
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

fn surface() -> PlaybackSurface<MockOutput> {
    PlaybackSurface::new(
        Arc::new(CategoryRegistry::standard()),
        MockOutput::default(),
        &PlaybackSettings::default(),
    )
}

fn jimin() -> Track {
    let mut track = Track::new("지민", "BTS", 60)
        .with_trait("침착함", 6)
        .with_trait("안정감", 5)
        .with_trait("긍정적", 4)
        .with_audio_url("/music/jimin.mp3");
    track.id = "1".into();
    track.created_at = Utc.with_ymd_and_hms(2026, 10, 17, 7, 0, 0).unwrap();
    track
}

fn seunghyun() -> Track {
    let mut track = Track::new("승현", "BTS", 45)
        .with_trait("유머 감각", 6)
        .with_trait("분위기 메이커", 5)
        .with_trait("사교적 에너지", 4)
        .with_audio_url("/music/seunghyun.mp3");
    track.id = "2".into();
    track
}

// ===== Listening Session =====

#[test]
fn test_listen_seek_and_finish() {
    let mut s = surface();
    let token = s.load_track(jimin());
    assert_eq!(s.get_state(), PlaybackState::Paused);
    assert_eq!(s.output().src.as_deref(), Some("/music/jimin.mp3"));

    s.toggle_play().unwrap();
    assert!(s.is_playing());

    assert!(s.handle_media_event(token, MediaEvent::LoadedMetadata { duration_secs: 61.3 }));
    assert_eq!(s.get_duration(), 61.3);

    assert!(s.handle_media_event(token, MediaEvent::TimeUpdate { position_secs: 10.0 }));
    s.seek_to(30.0).unwrap();
    assert_eq!(s.get_position(), 30.0);

    s.handle_media_event(token, MediaEvent::Ended);
    assert_eq!(s.get_state(), PlaybackState::Paused);
    assert_eq!(s.get_position(), 61.3);

    // Toggling after the end starts again from the output's playhead
    s.toggle_play().unwrap();
    assert!(s.is_playing());
}

#[test]
fn test_events_for_first_load() {
    let mut s = surface();
    s.load_track(jimin());

    let events = s.drain_events();
    assert_eq!(
        events,
        vec![
            PlaybackEvent::TrackChanged {
                track_id: "1".into(),
                previous_track_id: None,
                category: CategoryId::Stability,
            },
            PlaybackEvent::StateChanged {
                state: PlaybackState::Paused,
            },
            PlaybackEvent::PositionUpdate {
                position_secs: 0.0,
                duration_secs: 60.0,
            },
        ]
    );
    assert!(!s.has_pending_events());
}

// ===== Track Switching =====

#[test]
fn test_switch_resets_transport_and_theme() {
    let mut s = surface();
    let first = s.load_track(jimin());
    s.play().unwrap();
    s.handle_media_event(first, MediaEvent::TimeUpdate { position_secs: 42.0 });
    s.drain_events();

    let second = s.load_track(seunghyun());

    assert_ne!(first, second);
    assert_eq!(s.get_state(), PlaybackState::Paused);
    assert_eq!(s.get_position(), 0.0);
    assert_eq!(s.get_duration(), 45.0);
    assert_eq!(s.dominant_category().id, CategoryId::Humor);
    assert_eq!(s.dominant_category().theme.classes.from, "from-orange-500");

    let events = s.drain_events();
    assert!(events.contains(&PlaybackEvent::TrackChanged {
        track_id: "2".into(),
        previous_track_id: Some("1".into()),
        category: CategoryId::Humor,
    }));

    // The old source was stopped and rewound before the new one was loaded
    let tail: Vec<&str> = s
        .output()
        .commands
        .iter()
        .rev()
        .take(3)
        .rev()
        .map(String::as_str)
        .collect();
    assert_eq!(tail, ["pause", "seek 0", "load /music/seunghyun.mp3"]);
}

#[test]
fn test_stale_notifications_are_ignored() {
    let mut s = surface();
    let old = s.load_track(jimin());
    s.play().unwrap();
    let current = s.load_track(seunghyun());
    s.drain_events();

    assert!(!s.handle_media_event(old, MediaEvent::TimeUpdate { position_secs: 50.0 }));
    assert!(!s.handle_media_event(old, MediaEvent::LoadedMetadata { duration_secs: 60.0 }));
    assert!(!s.handle_media_event(old, MediaEvent::Ended));
    assert!(!s.handle_media_event(
        old,
        MediaEvent::PlaybackFailed {
            message: "aborted".to_string()
        }
    ));

    assert_eq!(s.get_position(), 0.0);
    assert_eq!(s.get_duration(), 45.0);
    assert!(!s.has_pending_events());

    assert!(s.handle_media_event(current, MediaEvent::TimeUpdate { position_secs: 3.0 }));
    assert_eq!(s.get_position(), 3.0);
}

// ===== Duration =====

#[test]
fn test_unusable_metadata_keeps_nominal_duration() {
    let mut s = surface();
    let token = s.load_track(jimin());

    for bad in [f64::NAN, f64::INFINITY, 0.0, -4.0] {
        s.handle_media_event(token, MediaEvent::LoadedMetadata { duration_secs: bad });
        assert_eq!(s.get_duration(), 60.0);
    }
}

// ===== Seek =====

#[test]
fn test_seek_clamps_and_rejects() {
    let mut s = surface();
    s.load_track(jimin());

    s.seek_to(500.0).unwrap();
    assert_eq!(s.get_position(), 60.0);
    assert_eq!(s.output().commands.last().map(String::as_str), Some("seek 60"));

    assert!(matches!(
        s.seek_to(-1.0),
        Err(PlaybackError::InvalidSeekPosition(_))
    ));
    assert!(matches!(
        s.seek_to(f64::NAN),
        Err(PlaybackError::InvalidSeekPosition(_))
    ));
    assert_eq!(s.get_position(), 60.0);
}

#[test]
fn test_seek_without_known_duration() {
    let mut s = surface();
    let mut track = jimin();
    track.duration_secs = 0;
    s.load_track(track);

    s.seek_to(500.0).unwrap();
    assert_eq!(s.get_position(), 500.0);
}

// ===== Volume =====

#[test]
fn test_volume_and_mute() {
    let mut s = surface();

    s.set_volume(0.3).unwrap();
    assert_eq!(s.get_volume(), 0.3);
    assert_eq!(s.output().volume, 0.3);

    s.set_volume(7.0).unwrap();
    assert_eq!(s.get_volume(), 1.0);
    s.set_volume(-2.0).unwrap();
    assert_eq!(s.get_volume(), 0.0);
    assert!(matches!(
        s.set_volume(f32::NAN),
        Err(PlaybackError::InvalidVolume(_))
    ));
    assert_eq!(s.get_volume(), 0.0);

    s.set_volume(0.8).unwrap();
    s.toggle_mute();
    assert!(s.is_muted());
    assert!(s.output().muted);
    assert_eq!(s.get_volume(), 0.8);
    assert_eq!(s.volume_slider_value(), 0.0);

    s.toggle_mute();
    assert!(!s.is_muted());
    assert_eq!(s.volume_slider_value(), 0.8);
}

// ===== Failures =====

#[test]
fn test_demo_tracks_have_no_audio() {
    let mut s = surface();
    let tracks = MockCatalog::new().fetch_tracks().unwrap();
    s.load_track(tracks[0].clone());
    s.drain_events();

    assert_eq!(s.toggle_play(), Err(PlaybackError::NoAudioSource));
    assert_eq!(s.get_state(), PlaybackState::Paused);
    assert!(matches!(
        s.drain_events().as_slice(),
        [PlaybackEvent::Error { .. }]
    ));
    assert_eq!(s.output().commands.last().map(String::as_str), Some("load -"));
}

#[test]
fn test_rejected_play_request_pauses() {
    let mut s = surface();
    let token = s.load_track(jimin());
    s.play().unwrap();
    s.drain_events();

    s.handle_media_event(
        token,
        MediaEvent::PlaybackFailed {
            message: "NotAllowedError".to_string(),
        },
    );

    assert_eq!(s.get_state(), PlaybackState::Paused);
    let events = s.drain_events();
    assert_eq!(
        events[0],
        PlaybackEvent::StateChanged {
            state: PlaybackState::Paused
        }
    );
    assert!(matches!(&events[1], PlaybackEvent::Error { message } if message.contains("NotAllowedError")));
}

#[test]
fn test_refused_play_stays_paused() {
    let mut s = surface();
    s.load_track(jimin());
    s.output_mut().refuse_play = true;

    assert!(matches!(s.play(), Err(PlaybackError::Output(_))));
    assert!(!s.is_playing());
}

// ===== View =====

#[test]
fn test_view_labels() {
    let mut s = surface();
    assert!(s.view(&DisplaySettings::default()).is_none());

    let token = s.load_track(jimin());
    s.handle_media_event(token, MediaEvent::TimeUpdate { position_secs: 12.9 });

    let view = s.view(&DisplaySettings::default()).unwrap();
    assert_eq!(view.heading, "지민의 매력 음악");
    assert_eq!(view.category, CategoryId::Stability);
    assert_eq!(view.category_name, "정서적 안정 및 자기 인식");
    assert_eq!(view.trait_labels, ["침착함 Lv.6", "안정감 Lv.5", "긍정적 Lv.4"]);
    assert_eq!(view.position_label, "0:12");
    assert_eq!(view.duration_label, "1:00");
    assert_eq!(view.progress_max, 60.0);
    assert_eq!(view.date_label, "2026. 10. 17.");
    assert!(!view.is_playing);

    let english = DisplaySettings {
        locale: DisplayLocale::EnUs,
        utc_offset_minutes: 0,
    };
    let view = s.view(&english).unwrap();
    assert_eq!(view.heading, "지민's charm music");
    assert_eq!(view.date_label, "10/17/2026");
}

#[test]
fn test_view_with_unknown_duration() {
    let mut s = surface();
    let mut track = jimin();
    track.duration_secs = 0;
    s.load_track(track);

    let view = s.view(&DisplaySettings::default()).unwrap();
    assert_eq!(view.duration_label, "0:00");
    assert_eq!(view.progress_max, 100.0);
}

#[test]
fn test_event_wire_shape() {
    let event = PlaybackEvent::StateChanged {
        state: PlaybackState::Playing,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "stateChanged");
    assert_eq!(json["state"], "playing");
}
