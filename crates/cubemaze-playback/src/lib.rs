//! Playback of cubemaze search traces.
//!
//! [`Playback`] replays a finished [`Trace`](cubemaze_paths::Trace) one
//! frame at a time, with pause, speed control and stepping back.
//! [`Palette`] maps the resulting [`Shade`]s to colours for a renderer.

pub mod palette;
pub mod playback;

pub use palette::{Palette, Shade, Style};
pub use playback::{DEFAULT_INTERVAL_MS, MAX_SPEED, Phase, Playback};
