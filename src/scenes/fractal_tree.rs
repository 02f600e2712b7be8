//! A binary tree growing out of the ground and swaying in a slowly turning wind.

use crate::animation::ease::{Extrapolation, remap};
use crate::foundation::core::{FrameIndex, Point};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::scene::graph::{
    Circle, Color, Def, Ellipse, GradientStop, Line, Node, Paint, Rect, Scene, Stroke, Styled,
};
use crate::scene::{SceneSource, SceneSpec};

/// Registry id.
pub const ID: &str = "FractalTree";
/// Registered length.
pub const DURATION_FRAMES: u64 = 300;
/// Deepest branch level drawn by default.
pub const DEFAULT_MAX_DEPTH: u32 = 10;
/// Deepest level accepted; each level doubles the branch count.
pub const MAX_DEPTH_LIMIT: u32 = 14;

const VIEW_W: f64 = 800.0;
const VIEW_H: f64 = 600.0;
const ROOT: Point = Point::new(VIEW_W / 2.0, VIEW_H);
const FULL_HEIGHT: f64 = 180.0;
const FULL_TRUNK_WIDTH: f64 = 12.0;
const GROWTH_FRAMES: f64 = 200.0;
const SPREAD: f64 = 0.4;
const SHRINK: f64 = 0.7;

/// One branch segment; children start at `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    /// Base of the segment.
    pub start: Point,
    /// Segment length.
    pub length: f64,
    /// Angle from vertical in radians, positive to the right.
    pub angle: f64,
    /// Level, `0` for the trunk.
    pub depth: u32,
    /// Stroke width.
    pub width: f64,
}

impl Branch {
    /// Tip of the segment.
    pub fn end(&self) -> Point {
        Point::new(
            self.start.x + self.length * self.angle.sin(),
            self.start.y - self.length * self.angle.cos(),
        )
    }

    /// Left and right children bent by `wind`.
    pub fn children(&self, wind: f64) -> [Branch; 2] {
        let d = f64::from(self.depth);
        let sway = wind * (d * 0.5).sin() * (d * 0.5);
        let child = |turn: f64| Branch {
            start: self.end(),
            length: self.length * SHRINK,
            angle: self.angle + turn + sway,
            depth: self.depth + 1,
            width: self.width * SHRINK,
        };
        [child(SPREAD), child(-SPREAD)]
    }

    fn node(&self) -> Node {
        let end = self.end();
        let d = f64::from(self.depth);
        Line::new(self.start.x, self.start.y, end.x, end.y)
            .stroke(
                Stroke::new(Color::hsl(120.0 + d * 10.0, 70.0, 30.0 + d * 5.0), self.width)
                    .round(),
            )
            .into()
    }
}

/// Branches down to `max_depth` in depth-first paint order.
pub fn grow(trunk: Branch, max_depth: u32, wind: f64, out: &mut Vec<Node>) {
    if trunk.depth > max_depth {
        return;
    }
    out.push(trunk.node());
    for child in trunk.children(wind) {
        grow(child, max_depth, wind, out);
    }
}

/// Growth in `[0, 1]`, reaching full size at frame 200.
pub fn growth(frame: FrameIndex) -> f64 {
    remap(
        frame.0 as f64,
        (0.0, GROWTH_FRAMES),
        (0.0, 1.0),
        Extrapolation::CLAMP_RIGHT,
    )
}

/// Wind drifting from `-0.05` to `0.05` across 300 frames.
pub fn wind(frame: FrameIndex) -> f64 {
    remap(
        frame.0 as f64,
        (0.0, DURATION_FRAMES as f64),
        (-0.05, 0.05),
        Extrapolation::CLAMP_RIGHT,
    )
}

/// The FractalTree scene.
#[derive(Clone, Debug)]
pub struct FractalTree {
    spec: SceneSpec,
    max_depth: u32,
}

impl FractalTree {
    /// Scene for `spec` at the default depth.
    pub fn new(spec: SceneSpec) -> FrameloomResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Use a different recursion depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> FrameloomResult<Self> {
        if max_depth > MAX_DEPTH_LIMIT {
            return Err(FrameloomError::validation(format!(
                "fractal tree depth must be <= {MAX_DEPTH_LIMIT}, got {max_depth}"
            )));
        }
        self.max_depth = max_depth;
        Ok(self)
    }

    /// Default registration: 1280×720 at 30 fps for 300 frames.
    pub fn default_spec() -> SceneSpec {
        SceneSpec::hd30(ID, DURATION_FRAMES)
    }
}

fn ground_shadow() -> Ellipse {
    Ellipse::new(ROOT.x, ROOT.y, 80.0, 20.0).fill(Color::rgba(0, 0, 0, 0.3))
}

impl SceneSource for FractalTree {
    fn spec(&self) -> &SceneSpec {
        &self.spec
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn sample(&self, frame: FrameIndex) -> FrameloomResult<Scene> {
        let g = growth(frame);
        let mut scene = self
            .spec
            .blank()
            .with_view_box(VIEW_W, VIEW_H)
            .with_background(Color::hex(0x1a1a2e));

        if g == 0.0 {
            scene.push(Rect::new(0.0, 0.0, VIEW_W, VIEW_H).fill(Color::hex(0x1a1a2e)));
            scene.push(ground_shadow());
            return Ok(scene);
        }

        scene.def(Def::LinearGradient {
            id: "skyGradient".into(),
            from: Point::new(0.0, 0.0),
            to: Point::new(0.0, 1.0),
            stops: vec![
                GradientStop::new(0.0, Color::hex(0x1a1a2e)),
                GradientStop::new(1.0, Color::hex(0x16213e)),
            ],
        });
        scene.def(Def::Glow {
            id: "glow".into(),
            std_dev: 4.0,
        });
        scene.push(Rect::new(0.0, 0.0, VIEW_W, VIEW_H).fill(Paint::gradient("skyGradient")));

        let height = FULL_HEIGHT * g;
        let trunk = Branch {
            start: ROOT,
            length: height,
            angle: 0.0,
            depth: 0,
            width: FULL_TRUNK_WIDTH * g,
        };
        let mut branches = Vec::with_capacity((1usize << (self.max_depth + 1)) - 1);
        grow(trunk, self.max_depth, wind(frame), &mut branches);
        scene.extend(branches);

        scene.push(
            Circle::new(ROOT.x, ROOT.y - height, 8.0 * g)
                .fill(Color::hsla(120.0 + frame.0 as f64 * 0.5, 100.0, 70.0, 0.8 * g))
                .filter("glow"),
        );
        scene.push(ground_shadow());
        Ok(scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/fractal_tree.rs"]
mod tests;
