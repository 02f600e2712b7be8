//! A ball sprung across the screen, spinning in proportion to the distance covered.

use std::f64::consts::PI;

use crate::animation::ease::{Extrapolation, remap};
use crate::animation::spring::{SpringArgs, SpringConfig, spring};
use crate::foundation::core::{Affine, FrameIndex};
use crate::foundation::error::FrameloomResult;
use crate::scene::graph::{Circle, Color, Def, Group, Scene, Styled, Text};
use crate::scene::{SceneSource, SceneSpec};

/// Registry id.
pub const ID: &str = "RollingBall";
/// Registered length; the spring settles exactly on the last frame.
pub const DURATION_FRAMES: u64 = 120;

const BALL_RADIUS: f64 = 40.0;
const START_OFFSET: f64 = -100.0;

/// The RollingBall scene.
#[derive(Clone, Debug)]
pub struct RollingBall {
    spec: SceneSpec,
}

impl RollingBall {
    /// Scene for `spec`.
    pub fn new(spec: SceneSpec) -> FrameloomResult<Self> {
        spec.validate()?;
        Ok(Self { spec })
    }

    /// Default registration: 1280×720 at 30 fps for 120 frames.
    pub fn default_spec() -> SceneSpec {
        SceneSpec::hd30(ID, DURATION_FRAMES)
    }

    /// Horizontal offset from the canvas center at `frame`.
    pub fn offset(&self, frame: FrameIndex) -> f64 {
        spring(SpringArgs {
            frame: frame.0 as f64,
            fps: self.spec.fps.as_f64(),
            from: START_OFFSET,
            to: self.end_offset(),
            duration_in_frames: Some(DURATION_FRAMES as f64),
            config: SpringConfig::default(),
        })
    }

    /// Rotation in radians for a given offset: two full turns across the travel.
    pub fn rotation(&self, offset: f64) -> f64 {
        remap(
            offset,
            (START_OFFSET, self.end_offset()),
            (0.0, 4.0 * PI),
            Extrapolation::EXTEND,
        )
    }

    fn end_offset(&self) -> f64 {
        self.spec.canvas.w() - 100.0
    }
}

impl SceneSource for RollingBall {
    fn spec(&self) -> &SceneSpec {
        &self.spec
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn sample(&self, frame: FrameIndex) -> FrameloomResult<Scene> {
        let x = self.offset(frame);
        let center = self.spec.canvas.center();
        let (cx, cy) = (center.x + x, center.y);

        let mut scene = self.spec.blank().with_background(Color::hex(0x1a1a2e));
        scene.def(Def::Blur {
            id: "shadow".into(),
            std_dev: 15.0,
        });
        scene.push(
            Circle::new(cx, cy + 10.0, BALL_RADIUS)
                .fill(Color::rgba(0, 0, 0, 0.3))
                .filter("shadow"),
        );
        scene.push(
            Group::new()
                .transform(Affine::translate((cx, cy)) * Affine::rotate(self.rotation(x)))
                .child(Circle::new(0.0, 0.0, BALL_RADIUS).fill(Color::hex(0xff6b6b)))
                .child(Text::new(0.0, 0.0, "⚽", 24.0).bold().centered()),
        );
        Ok(scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/rolling_ball.rs"]
mod tests;
