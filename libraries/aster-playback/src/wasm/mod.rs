//! WASM bindings for aster-playback
//!
//! Binds the playback surface to a browser `HTMLAudioElement` so the LP
//! player renderer can drive it from JavaScript.

pub mod output;
pub mod player;

pub use output::HtmlAudioOutput;
pub use player::WasmPlayer;
