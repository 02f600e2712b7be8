//! Frameloom renders procedural motion graphics one frame at a time.
//!
//! Every scene is a pure function from a frame index to a vector scene graph. The graph
//! serializes to SVG, rasterizes with `resvg` and streams into frame sinks:
//!
//! - Look up a scene in the [`SceneRegistry`] (optionally with a [`SceneOverride`])
//! - Sample single frames with [`SceneSource::sample`] or render them with [`render_frame`]
//! - Stream a range into a [`FrameSink`] with [`render_range`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Easing, springs and digit-sequence randomness.
pub mod animation;
/// JSON render configuration.
pub mod config;
/// Frame sinks: memory, PNG and ffmpeg.
pub mod encode;
/// Rasterization and range rendering.
pub mod render;
/// Scene graph model, SVG output and fingerprints.
pub mod scene;
/// Built-in scenes.
pub mod scenes;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Vec2};
pub use crate::foundation::error::{FrameloomError, FrameloomResult};
pub use crate::foundation::math::{clamp01, lerp};

pub use crate::config::{RenderConfig, SceneOverride};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::pipeline::{RenderOpts, RenderStats, render_frame, render_range};
pub use crate::render::raster::{FrameRGBA, Rasterizer};
pub use crate::scene::fingerprint::{SceneFingerprint, fingerprint_scene};
pub use crate::scene::graph::Scene;
pub use crate::scene::svg::to_svg;
pub use crate::scene::{SceneSource, SceneSpec};
pub use crate::scenes::registry::SceneRegistry;
