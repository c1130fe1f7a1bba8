//! WASM-compatible player wrapper

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use aster_core::{
    AsterConfig, CategoryRegistry, CharmTrait, DominanceResolver, MockCatalog, Track, TrackId,
    TrackList,
};
use js_sys::{Function, Reflect};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlAudioElement};

use super::output::HtmlAudioOutput;
use crate::{MediaEvent, PlaybackError, PlaybackEvent, PlaybackSurface, SourceToken};

const MEDIA_EVENTS: [&str; 3] = ["timeupdate", "loadedmetadata", "ended"];

struct Shared {
    surface: PlaybackSurface<HtmlAudioOutput>,
    tracks: TrackList,
    config: AsterConfig,
    on_state_change: Option<Function>,
    on_error: Option<Function>,
}

/// WASM-compatible LP player
///
/// Wraps the playback surface and the session track list with a
/// JavaScript-friendly API.
#[wasm_bindgen]
pub struct WasmPlayer {
    shared: Rc<RefCell<Shared>>,
    element: HtmlAudioElement,

    // Media listeners bound to the current source token
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,

    // Shared by every play promise; lives as long as the player
    on_play_rejected: Closure<dyn FnMut(JsValue)>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player driving `element`
    ///
    /// `config` is an optional `AsterConfig`-shaped object.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlAudioElement, config: JsValue) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let config: AsterConfig = if config.is_undefined() || config.is_null() {
            AsterConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let surface = PlaybackSurface::new(
            Arc::new(CategoryRegistry::standard()),
            HtmlAudioOutput::new(element.clone()),
            &config.playback,
        );

        let shared = Rc::new(RefCell::new(Shared {
            surface,
            tracks: TrackList::new(),
            config,
            on_state_change: None,
            on_error: None,
        }));
        let on_play_rejected = play_rejection_handler(&shared);

        Ok(Self {
            shared,
            element,
            listeners: Vec::new(),
            on_play_rejected,
        })
    }

    // ===== Track List =====

    /// Replace the session tracks with a JS array in the track wire shape
    #[wasm_bindgen(js_name = loadTracks)]
    pub fn load_tracks(&mut self, tracks: JsValue) -> Result<(), JsValue> {
        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;

        self.shared.borrow_mut().tracks.replace(tracks);
        self.sync_selected();
        Ok(())
    }

    /// Replace the session tracks with the built-in demo set
    #[wasm_bindgen(js_name = loadDemoTracks)]
    pub fn load_demo_tracks(&mut self) -> Result<(), JsValue> {
        self.shared
            .borrow_mut()
            .tracks
            .refresh(&MockCatalog::new())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.sync_selected();
        Ok(())
    }

    /// Select a track by id and load it into the player
    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&mut self, id: String) -> Result<(), JsValue> {
        self.shared
            .borrow_mut()
            .tracks
            .select(&TrackId::new(id))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.sync_selected();
        Ok(())
    }

    /// Rows for the track list renderer
    #[wasm_bindgen(js_name = getTrackList)]
    pub fn get_track_list(&self) -> JsValue {
        let shared = self.shared.borrow();
        let resolver = DominanceResolver::new(shared.surface.registry());
        let entries = shared.tracks.entries(&resolver, &shared.config.display);

        serde_wasm_bindgen::to_value(&entries).unwrap_or(JsValue::NULL)
    }

    // ===== Playback Control =====

    /// Toggle play/pause
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) -> Result<(), JsValue> {
        let result = self.shared.borrow_mut().surface.toggle_play();
        self.watch_play_request();
        flush(&self.shared);
        result.map_err(to_js_error)
    }

    /// Seek to position in seconds
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&mut self, position_secs: f64) -> Result<(), JsValue> {
        let result = self.shared.borrow_mut().surface.seek_to(position_secs);
        flush(&self.shared);
        result.map_err(to_js_error)
    }

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, volume: f32) -> Result<(), JsValue> {
        let result = self.shared.borrow_mut().surface.set_volume(volume);
        flush(&self.shared);
        result.map_err(to_js_error)
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.shared.borrow_mut().surface.toggle_mute();
        flush(&self.shared);
    }

    // ===== State Queries =====

    /// Player snapshot, `null` when nothing is loaded
    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> JsValue {
        let shared = self.shared.borrow();
        shared
            .surface
            .view(&shared.config.display)
            .and_then(|view| serde_wasm_bindgen::to_value(&view).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Transport snapshot
    #[wasm_bindgen(js_name = getTransport)]
    pub fn get_transport(&self) -> JsValue {
        let transport = self.shared.borrow().surface.transport();
        serde_wasm_bindgen::to_value(&transport).unwrap_or(JsValue::NULL)
    }

    /// Dominant category of an arbitrary trait array
    #[wasm_bindgen(js_name = dominantCategory)]
    pub fn dominant_category(&self, traits: JsValue) -> Result<JsValue, JsValue> {
        let traits: Vec<CharmTrait> = serde_wasm_bindgen::from_value(traits)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse traits: {}", e)))?;

        let shared = self.shared.borrow();
        let category =
            DominanceResolver::new(shared.surface.registry()).resolve_dominant_category(&traits);

        serde_wasm_bindgen::to_value(category)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    // ===== Event Listeners =====

    /// Register playback event callback
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&mut self, callback: Function) {
        self.shared.borrow_mut().on_state_change = Some(callback);
    }

    /// Register error callback
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, callback: Function) {
        self.shared.borrow_mut().on_error = Some(callback);
    }
}

impl WasmPlayer {
    /// Load the list's selected track into the surface and rebind listeners
    fn sync_selected(&mut self) {
        let token = {
            let mut shared = self.shared.borrow_mut();
            let selected = shared.tracks.selected().cloned();
            match selected {
                Some(track) => Some(shared.surface.load_track(track)),
                None => {
                    shared.surface.eject();
                    None
                }
            }
        };

        self.detach_listeners();
        if let Some(token) = token {
            self.attach_listeners(token);
        }
        flush(&self.shared);
    }

    fn attach_listeners(&mut self, token: SourceToken) {
        for kind in MEDIA_EVENTS {
            let shared = Rc::clone(&self.shared);
            let element = self.element.clone();

            let closure = Closure::wrap(Box::new(move |_event: Event| {
                let event = match kind {
                    "timeupdate" => MediaEvent::TimeUpdate {
                        position_secs: element.current_time(),
                    },
                    "loadedmetadata" => MediaEvent::LoadedMetadata {
                        duration_secs: element.duration(),
                    },
                    _ => MediaEvent::Ended,
                };
                shared.borrow_mut().surface.handle_media_event(token, event);
                flush(&shared);
            }) as Box<dyn FnMut(Event)>);

            if self
                .element
                .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
                .is_ok()
            {
                self.listeners.push((kind, closure));
            }
        }
    }

    fn detach_listeners(&mut self) {
        for (kind, closure) in self.listeners.drain(..) {
            self.element
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
                .ok();
        }
    }

    /// Route an asynchronous play rejection back into the surface
    fn watch_play_request(&mut self) {
        let pending = self
            .shared
            .borrow_mut()
            .surface
            .output_mut()
            .take_pending_play();

        if let Some(promise) = pending {
            promise.catch(&self.on_play_rejected);
        }
    }
}

impl Drop for WasmPlayer {
    fn drop(&mut self) {
        self.detach_listeners();
    }
}

/// Handler for rejected play promises
///
/// Interrupted requests are ignored. Anything else fails the current source;
/// a source switch interrupts the pending request, so a real rejection
/// always belongs to the loaded track.
fn play_rejection_handler(shared: &Rc<RefCell<Shared>>) -> Closure<dyn FnMut(JsValue)> {
    let shared = Rc::clone(shared);

    Closure::wrap(Box::new(move |reason: JsValue| {
        let field = |key: &str| {
            Reflect::get(&reason, &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_string())
        };
        let name = field("name");
        let message = field("message")
            .or_else(|| reason.as_string())
            .unwrap_or_else(|| format!("{reason:?}"));

        let Some(event) = MediaEvent::from_play_rejection(name.as_deref(), message) else {
            debug!("Play request interrupted");
            return;
        };

        {
            let mut shared = shared.borrow_mut();
            let token = shared.surface.source_token();
            shared.surface.handle_media_event(token, event);
        }
        flush(&shared);
    }) as Box<dyn FnMut(JsValue)>)
}

/// Deliver pending surface events to the registered callbacks
///
/// The shared state is released before any callback runs so callbacks may
/// call back into the player.
fn flush(shared: &Rc<RefCell<Shared>>) {
    let (events, on_state_change, on_error) = {
        let mut shared = shared.borrow_mut();
        (
            shared.surface.drain_events(),
            shared.on_state_change.clone(),
            shared.on_error.clone(),
        )
    };

    for event in events {
        match &event {
            PlaybackEvent::Error { message } => {
                if let Some(ref cb) = on_error {
                    cb.call1(&JsValue::NULL, &JsValue::from_str(message)).ok();
                }
            }
            _ => {
                if let Some(ref cb) = on_state_change {
                    if let Ok(js_event) = serde_wasm_bindgen::to_value(&event) {
                        cb.call1(&JsValue::NULL, &js_event).ok();
                    }
                }
            }
        }
    }
}

fn to_js_error(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
