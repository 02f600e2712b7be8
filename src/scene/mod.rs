//! Scene graph model and the `frame → scene` sampling contract.

/// Stable hashing of sampled scenes.
pub mod fingerprint;
/// Shapes, paints, groups and definitions.
pub mod graph;
/// SVG serialization.
pub mod svg;

use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::scene::graph::Scene;

/// Registration data of a scene: id, length, frame rate and output size.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    /// Registry id, e.g. `"Fireflies"`.
    pub id: String,
    /// Total length in frames.
    pub duration_frames: u64,
    /// Frame rate.
    pub fps: Fps,
    /// Output canvas.
    pub canvas: Canvas,
}

impl SceneSpec {
    /// Build a spec with the standard 30 fps HD canvas.
    pub fn hd30(id: impl Into<String>, duration_frames: u64) -> Self {
        Self {
            id: id.into(),
            duration_frames,
            fps: Fps::whole(30),
            canvas: Canvas::HD,
        }
    }

    /// Check invariants that sampling and encoding rely on.
    pub fn validate(&self) -> FrameloomResult<()> {
        if self.id.trim().is_empty() {
            return Err(FrameloomError::validation("scene id must be non-empty"));
        }
        if self.duration_frames == 0 {
            return Err(FrameloomError::validation(format!(
                "scene '{}' duration must be > 0 frames",
                self.id
            )));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        Canvas::new(self.canvas.width, self.canvas.height)?;
        Ok(())
    }

    /// Full frame range `[0, duration)`.
    pub fn range(&self) -> FrameRange {
        FrameRange::from_raw(0, self.duration_frames)
    }

    /// Timeline time of `frame` in seconds.
    pub fn time_secs(&self, frame: FrameIndex) -> f64 {
        self.fps.frames_to_secs(frame.0)
    }

    /// Empty scene sized to this spec's canvas.
    pub fn blank(&self) -> Scene {
        Scene::new(self.canvas.width, self.canvas.height)
    }
}

/// A procedural scene: every frame is a pure function of the frame index.
///
/// Implementations must be deterministic and re-entrant so frames can be sampled in any order
/// and from several threads at once.
pub trait SceneSource: Send + Sync {
    /// Registration data.
    fn spec(&self) -> &SceneSpec;

    /// Produce the scene graph for `frame`.
    ///
    /// Frames past the end of the scene are valid input; scenes keep evaluating their formulas
    /// there.
    fn sample(&self, frame: FrameIndex) -> FrameloomResult<Scene>;
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mod.rs"]
mod tests;
