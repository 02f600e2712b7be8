//! Turning sampled scenes into pixels.

/// Sequential and parallel range rendering into frame sinks.
pub mod pipeline;
/// SVG rasterization with `usvg` + `resvg`.
pub mod raster;
