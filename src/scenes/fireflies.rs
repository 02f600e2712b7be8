//! Fireflies drifting in the dark, born on a digit-driven schedule.
//!
//! The spawn schedule is computed once into an immutable table. A firefly's position at any
//! frame is derived in closed form from its spawn record, so frames can be sampled in any
//! order or in parallel.

use std::f64::consts::TAU;

use crate::animation::digits::DigitSequence;
use crate::animation::ease::{Extrapolation, Interpolator};
use crate::foundation::core::{FrameIndex, Point, Vec2};
use crate::foundation::error::FrameloomResult;
use crate::scene::graph::{
    Circle, Color, Def, GradientStop, Group, Node, Paint, Scene, Styled, Text,
};
use crate::scene::{SceneSource, SceneSpec};

/// Registry id.
pub const ID: &str = "Fireflies";
/// Registered length: half an hour at 30 fps.
pub const DURATION_FRAMES: u64 = 54_000;

/// Seconds before time zero of the virtual previous spawn, so the first firefly appears at
/// frame 0.
const INITIAL_LAST_SPAWN_SECS: f64 = -100.0;

/// Movement tag assigned at spawn. Informational; every firefly moves in a straight line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Keeps its heading.
    Straight,
    /// Wanders.
    RandomTurn,
    /// Drifts toward the center.
    Inward,
    /// Drifts away from the center.
    Outward,
}

impl MovementType {
    /// Every tag, in digit order.
    pub const ALL: [Self; 4] = [
        Self::Straight,
        Self::RandomTurn,
        Self::Inward,
        Self::Outward,
    ];

    /// Tag chosen by the digit at `index + floor(time_ms·0.1)`.
    pub fn pick(seq: &DigitSequence, index: u64, time_ms: f64) -> Self {
        let shift = if time_ms.is_finite() && time_ms > 0.0 {
            (time_ms * 0.1).floor() as u64
        } else {
            0
        };
        seq.choose(index.wrapping_add(shift), &Self::ALL)
            .copied()
            .unwrap_or(Self::Straight)
    }

    /// Snake-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::RandomTurn => "random_turn",
            Self::Inward => "inward",
            Self::Outward => "outward",
        }
    }
}

/// Everything fixed at a firefly's birth.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpawnRecord {
    /// Dense id, equal to the record's index in the schedule.
    pub id: u64,
    /// Frame the firefly appears on.
    pub spawn_frame: u64,
    /// `spawn_frame` in seconds.
    pub spawn_time: f64,
    /// Position before the first integration step; may lie outside the band.
    pub position: Point,
    /// Initial velocity in px/s.
    pub velocity: Vec2,
    /// Core size; the reflective margin is three times this.
    pub size: f64,
    /// Core and inner glow color.
    pub color1: Color,
    /// Outer glow color.
    pub color2: Color,
    /// Brightness multiplier in `[0.4, 1)`.
    pub base_brightness: f64,
    /// Seconds until expiry.
    pub lifetime: f64,
    /// Movement tag.
    pub movement: MovementType,
    /// Turn speed in `[0.3, 1.5)`.
    pub turn_speed: f64,
    /// Turn phase in `[0, 2π)`.
    pub turn_phase: f64,
    /// Brightness modifier in `[0.3, 0.8)`.
    pub brightness_modifier: f64,
}

impl SpawnRecord {
    /// Reflective margin around the canvas edges.
    pub fn margin(&self) -> f64 {
        self.size * 3.0
    }
}

/// Position and velocity of one firefly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireflyState {
    /// Current position.
    pub position: Point,
    /// Current velocity in px/s.
    pub velocity: Vec2,
}

impl FireflyState {
    /// One Euler step of `dt` seconds inside the `[margin, W − margin] × [margin, H − margin]`
    /// band. A coordinate that would leave the band is clamped onto it and its velocity
    /// component turned back inward.
    pub fn step(self, dt: f64, size: (f64, f64), margin: f64) -> Self {
        let (x, vx) = step_axis(self.position.x, self.velocity.x, dt, band(margin, size.0));
        let (y, vy) = step_axis(self.position.y, self.velocity.y, dt, band(margin, size.1));
        Self {
            position: Point::new(x, y),
            velocity: Vec2::new(vx, vy),
        }
    }

    /// State after `steps` calls to [`step`](Self::step), computed in closed form.
    pub fn advance(self, steps: u64, dt: f64, size: (f64, f64), margin: f64) -> Self {
        let (bx0, bx1) = band(margin, size.0);
        let (by0, by1) = band(margin, size.1);
        let (x, vx) = reflect_axis(self.position.x, self.velocity.x, dt, bx0, bx1, steps);
        let (y, vy) = reflect_axis(self.position.y, self.velocity.y, dt, by0, by1, steps);
        Self {
            position: Point::new(x, y),
            velocity: Vec2::new(vx, vy),
        }
    }
}

/// Allowed interval `[margin, extent − margin]`; collapses to its midpoint when inverted.
fn band(margin: f64, extent: f64) -> (f64, f64) {
    let (lo, hi) = (margin, extent - margin);
    if lo > hi {
        let mid = extent / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

fn step_axis(x: f64, v: f64, dt: f64, (lo, hi): (f64, f64)) -> (f64, f64) {
    let nx = x + v * dt;
    if nx < lo {
        (lo, v.abs())
    } else if nx > hi {
        (hi, -v.abs())
    } else {
        (nx, v)
    }
}

/// Position and velocity along one axis after `steps` reflective Euler steps of `dt` seconds
/// inside `[lo, hi]`.
///
/// The first step is applied exactly, which also brings an out-of-band start onto the band.
/// From there the motion is a bounce between the two walls with period `2K` steps, where `K` is
/// the number of steps needed to cross the band.
pub fn reflect_axis(x: f64, v: f64, dt: f64, lo: f64, hi: f64, steps: u64) -> (f64, f64) {
    if steps == 0 {
        return (x, v);
    }
    let (lo, hi) = if lo > hi {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    };
    let (x, v) = step_axis(x, v, dt, (lo, hi));

    let speed = v.abs();
    let s = speed * dt.abs();
    let rest = (steps - 1) as f64;
    if rest == 0.0 || s == 0.0 || !s.is_finite() {
        return (x, v);
    }

    let d = v.signum();
    let (wall, far_wall) = if v > 0.0 { (hi, lo) } else { (lo, hi) };
    let gap = (wall - x).abs();
    let first_hit = (gap / s).floor() + 1.0;
    if rest < first_hit {
        return (x + d * rest * s, v);
    }

    let crossing = ((hi - lo) / s).floor() + 1.0;
    let q = (rest - first_hit).rem_euclid(2.0 * crossing);
    if q < crossing {
        (wall - d * q * s, -d * speed)
    } else {
        (far_wall + d * (q - crossing) * s, d * speed)
    }
}

/// A firefly visible at some frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveFirefly<'a> {
    /// Birth data.
    pub record: &'a SpawnRecord,
    /// Seconds since spawn.
    pub age: f64,
    /// Kinematic state after `frame − spawn_frame + 1` steps.
    pub state: FireflyState,
    /// `sin(age·4 + id)·0.15 + 0.85`.
    pub flicker: f64,
    /// Envelope × base brightness × flicker.
    pub opacity: f64,
}

/// Immutable spawn table for one canvas, frame rate and duration.
#[derive(Clone, Debug)]
pub struct FireflySchedule {
    spec: SceneSpec,
    spawns: Vec<SpawnRecord>,
    envelope: Interpolator,
}

impl FireflySchedule {
    /// Walk the frames of `spec` in order and record every spawn.
    #[tracing::instrument(skip(seq, spec), fields(scene = %spec.id))]
    pub fn build(seq: &DigitSequence, spec: &SceneSpec) -> FrameloomResult<Self> {
        spec.validate()?;
        let (w, h) = (spec.canvas.w(), spec.canvas.h());
        let mut spawns = Vec::new();
        let mut last = INITIAL_LAST_SPAWN_SECS;

        for f in 0..spec.duration_frames {
            let t = spec.fps.frames_to_secs(f);
            let t_ms = t * 1000.0;
            let id = spawns.len() as u64;
            let interval = seq.uniform_timed(id.wrapping_mul(17), t_ms, 1.0, 5.0);
            if t - last < interval {
                continue;
            }
            spawns.push(spawn(seq, id, f, t, (w, h)));
            last = t;
        }

        tracing::debug!(spawns = spawns.len(), "built firefly spawn schedule");
        Ok(Self {
            spec: spec.clone(),
            spawns,
            envelope: Interpolator::new(
                &[0.0, 0.1, 0.8, 1.0],
                &[0.0, 1.0, 1.0, 0.0],
                Extrapolation::CLAMP_RIGHT,
            )?,
        })
    }

    /// All spawn records in id order.
    pub fn spawns(&self) -> &[SpawnRecord] {
        &self.spawns
    }

    /// Records spawned at or before `frame`.
    pub fn spawned_by(&self, frame: FrameIndex) -> &[SpawnRecord] {
        let n = self.spawns.partition_point(|r| r.spawn_frame <= frame.0);
        &self.spawns[..n]
    }

    /// Fireflies alive at `frame`, in id order.
    pub fn alive_at(&self, frame: FrameIndex) -> Vec<LiveFirefly<'_>> {
        let t = self.spec.fps.frames_to_secs(frame.0);
        let dt = self.spec.fps.frame_duration_secs();
        let size = (self.spec.canvas.w(), self.spec.canvas.h());

        self.spawned_by(frame)
            .iter()
            .filter_map(|r| {
                let age = t - r.spawn_time;
                if age >= r.lifetime {
                    return None;
                }
                let steps = frame.0 - r.spawn_frame + 1;
                let state = FireflyState {
                    position: r.position,
                    velocity: r.velocity,
                }
                .advance(steps, dt, size, r.margin());
                let flicker = (age * 4.0 + r.id as f64).sin() * 0.15 + 0.85;
                let envelope = self.envelope.sample(age / r.lifetime);
                Some(LiveFirefly {
                    record: r,
                    age,
                    state,
                    flicker,
                    opacity: envelope * r.base_brightness * flicker,
                })
            })
            .collect()
    }
}

fn spawn(seq: &DigitSequence, id: u64, frame: u64, t: f64, (w, h): (f64, f64)) -> SpawnRecord {
    let t_ms = t * 1000.0;
    let k = |m: u64| id.wrapping_mul(m);
    let speed = seq.uniform_timed(k(43), t_ms, 15.0, 45.0);
    let angle = seq.uniform_timed(k(47), t_ms, 0.0, TAU);

    let ci = k(67);
    let hue1 = seq.uniform_timed(ci.wrapping_mul(3), t_ms, 0.0, 360.0);
    let color1 = Color::hsl(
        hue1,
        seq.uniform_timed(ci.wrapping_mul(3).wrapping_add(2), t_ms, 70.0, 100.0),
        seq.uniform_timed(ci.wrapping_mul(5), t_ms, 50.0, 70.0),
    );
    let hue2 = (hue1.floor() + seq.uniform_timed(ci.wrapping_mul(7), t_ms, 15.0, 45.0)) % 360.0;
    let color2 = Color::hsl(
        hue2,
        seq.uniform_timed(ci.wrapping_mul(11), t_ms, 60.0, 90.0),
        seq.uniform_timed(ci.wrapping_mul(13), t_ms, 40.0, 60.0),
    );

    SpawnRecord {
        id,
        spawn_frame: frame,
        spawn_time: t,
        position: Point::new(
            seq.normal(k(19), t_ms, w / 2.0, w / 6.0),
            seq.normal(k(23), t_ms, h / 2.0, h / 5.0),
        ),
        velocity: Vec2::new(angle.cos() * speed, angle.sin() * speed),
        size: seq.uniform_timed(k(29), t_ms, 3.0, 8.0),
        color1,
        color2,
        base_brightness: seq.uniform_timed(k(31), t_ms, 0.4, 1.0),
        lifetime: seq.uniform_timed(k(37), t_ms, 10.0, 50.0),
        movement: MovementType::pick(seq, k(41), t_ms),
        turn_speed: seq.uniform_timed(k(53), t_ms, 0.3, 1.5),
        turn_phase: seq.uniform_timed(k(59), t_ms, 0.0, TAU),
        brightness_modifier: seq.uniform_timed(k(61), t_ms, 0.3, 0.8),
    }
}

/// The Fireflies scene.
#[derive(Clone, Debug)]
pub struct Fireflies {
    schedule: FireflySchedule,
}

impl Fireflies {
    /// Build the scene for `spec`, precomputing its spawn schedule.
    pub fn new(spec: SceneSpec, seq: DigitSequence) -> FrameloomResult<Self> {
        Ok(Self {
            schedule: FireflySchedule::build(&seq, &spec)?,
        })
    }

    /// Default registration: 1280×720 at 30 fps for 54000 frames.
    pub fn default_spec() -> SceneSpec {
        SceneSpec::hd30(ID, DURATION_FRAMES)
    }

    /// The precomputed spawn schedule.
    pub fn schedule(&self) -> &FireflySchedule {
        &self.schedule
    }
}

impl SceneSource for Fireflies {
    fn spec(&self) -> &SceneSpec {
        &self.schedule.spec
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn sample(&self, frame: FrameIndex) -> FrameloomResult<Scene> {
        let spec = &self.schedule.spec;
        let alive = self.schedule.alive_at(frame);

        let mut scene = spec.blank().with_background(Paint::gradient("night"));
        scene.def(Def::LinearGradient {
            id: "night".into(),
            from: Point::new(0.0, 0.0),
            to: Point::new(0.0, 1.0),
            stops: vec![
                GradientStop::new(0.0, Color::hex(0x0a0a1a)),
                GradientStop::new(0.5, Color::hex(0x1a1a2e)),
                GradientStop::new(1.0, Color::hex(0x0d0d1a)),
            ],
        });
        for ff in &alive {
            let r = ff.record;
            scene.def(Def::RadialGradient {
                id: glow_id(r.id),
                stops: vec![
                    GradientStop::with_opacity(0.0, r.color1, r.base_brightness),
                    GradientStop::with_opacity(0.4, r.color2, r.base_brightness * 0.5),
                    GradientStop::with_opacity(1.0, r.color2, 0.0),
                ],
            });
        }
        scene.def(Def::Blur {
            id: "blur".into(),
            std_dev: 2.0,
        });

        scene.extend(alive.iter().map(firefly_node));

        let t = spec.time_secs(frame);
        scene.push(
            Text::new(
                20.0,
                30.0,
                format!("萤火虫数量: {} | 时间: {:.1}s", alive.len(), t),
                14.0,
            )
            .opacity(0.6),
        );
        scene.push(
            Text::new(
                20.0,
                55.0,
                "rand = f(π, 时间) | 速度3倍 | 碰撞反弹 | 亮度随移动变化",
                12.0,
            )
            .opacity(0.4),
        );
        Ok(scene)
    }
}

fn glow_id(id: u64) -> String {
    format!("glow-{id}")
}

fn firefly_node(ff: &LiveFirefly<'_>) -> Node {
    let r = ff.record;
    let Point { x, y } = ff.state.position;
    Group::new()
        .child(
            Circle::new(x, y, r.size * 3.0 * ff.flicker)
                .fill(Paint::gradient(glow_id(r.id)))
                .opacity(ff.opacity),
        )
        .child(
            Circle::new(x, y, r.size * 0.8)
                .fill(r.color1)
                .opacity(ff.opacity)
                .filter("blur"),
        )
        .child(
            Circle::new(x, y, r.size * 0.4)
                .fill(Color::WHITE)
                .opacity(ff.opacity * 0.9),
        )
        .into()
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/fireflies.rs"]
mod tests;
