//! Frame-driven animation primitives shared by every scene.

/// Deterministic digit-sequence randomness.
pub mod digits;
/// Easing curves, interpolation and smoothstep.
pub mod ease;
/// Closed-form damped springs.
pub mod spring;
