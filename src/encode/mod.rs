//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by
//! [`render_range`](crate::render::pipeline::render_range).

/// `ffmpeg`-based MP4 output via the system `ffmpeg` binary.
pub mod ffmpeg;
/// PNG files, single or as a numbered sequence.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
