//! Closed-form spring easing.
//!
//! The spring is a damped harmonic oscillator released from rest at `0` and pulled toward `1`.
//! Its response is evaluated analytically, so sampling any frame costs the same and never
//! depends on previously sampled frames.

use crate::foundation::core::{FrameIndex, Fps};

/// Residual distance from the target at which a spring counts as settled.
const SETTLE_THRESHOLD: f64 = 0.005;
const MAX_SETTLE_FRAMES: u64 = 100_000;

/// Physical parameters of a spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Mass of the moving body.
    pub mass: f64,
    /// Spring constant.
    pub stiffness: f64,
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Cap the response at the target so under-damped springs never overshoot.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    /// Critically damped: fastest approach without overshoot.
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 20.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Damping ratio `c / (2·sqrt(k·m))`; `1` is critical.
    pub fn damping_ratio(self) -> f64 {
        let (m, k, c) = self.sanitized();
        c / (2.0 * (k * m).sqrt())
    }

    fn sanitized(self) -> (f64, f64, f64) {
        fn positive(v: f64, fallback: f64) -> f64 {
            if v.is_finite() && v > 0.0 { v } else { fallback }
        }
        (
            positive(self.mass, 1.0),
            positive(self.stiffness, 100.0),
            if self.damping.is_finite() {
                self.damping.max(0.0)
            } else {
                20.0
            },
        )
    }

    /// Normalized response at `t` seconds after release.
    pub fn response(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let (m, k, c) = self.sanitized();
        let omega0 = (k / m).sqrt();
        let zeta = c / (2.0 * (k * m).sqrt());

        let x = if (zeta - 1.0).abs() < 1e-9 {
            1.0 - (-omega0 * t).exp() * (1.0 + omega0 * t)
        } else if zeta < 1.0 {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega0 * t).exp();
            1.0 - decay * ((omega_d * t).cos() + (zeta * omega0 / omega_d) * (omega_d * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega0 * (zeta - root);
            let r2 = -omega0 * (zeta + root);
            1.0 + (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r1 - r2)
        };

        if self.overshoot_clamping { x.min(1.0) } else { x }
    }

    /// Upper bound of `|1 - response(t)|` for `t` seconds after release.
    fn residual_bound(self, t: f64) -> f64 {
        let (m, k, c) = self.sanitized();
        let omega0 = (k / m).sqrt();
        let zeta = c / (2.0 * (k * m).sqrt());
        if zeta < 1.0 - 1e-9 {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let amp = (1.0 + (zeta * omega0 / omega_d).powi(2)).sqrt();
            (-zeta * omega0 * t).exp() * amp
        } else {
            // Critical and over-damped responses approach monotonically.
            (1.0 - self.response(t)).abs()
        }
    }

    /// Frames until the spring stays within the settle threshold at `fps`.
    pub fn settle_frames(self, fps: f64) -> u64 {
        let fps = sanitize_fps(fps);
        (1..=MAX_SETTLE_FRAMES)
            .find(|&n| self.residual_bound(n as f64 / fps) < SETTLE_THRESHOLD)
            .unwrap_or(MAX_SETTLE_FRAMES)
    }
}

/// Arguments to [`spring`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringArgs {
    /// Frames elapsed since the spring was released; negative before release.
    pub frame: f64,
    /// Frame rate used to convert frames to seconds.
    pub fps: f64,
    /// Value at rest before release.
    pub from: f64,
    /// Target value.
    pub to: f64,
    /// Stretch the natural settle time to exactly this many frames.
    pub duration_in_frames: Option<f64>,
    /// Physical parameters.
    pub config: SpringConfig,
}

impl SpringArgs {
    /// Unit spring `0 → 1` at `fps` over `duration_in_frames`, released at `frame = 0`.
    pub fn unit(frame: f64, fps: f64, duration_in_frames: f64) -> Self {
        Self {
            frame,
            fps,
            from: 0.0,
            to: 1.0,
            duration_in_frames: Some(duration_in_frames),
            config: SpringConfig::default(),
        }
    }
}

/// Evaluate a spring animation at `args.frame`.
///
/// - `frame <= 0` yields `from`.
/// - `frame >= duration_in_frames` (or the natural settle time) yields `to` exactly.
pub fn spring(args: SpringArgs) -> f64 {
    if args.frame.is_nan() || args.frame <= 0.0 {
        return args.from;
    }
    let fps = sanitize_fps(args.fps);
    let natural = args.config.settle_frames(fps) as f64;

    let (done_at, natural_frame) = match args.duration_in_frames {
        Some(d) if d.is_finite() && d > 0.0 => (d, args.frame / d * natural),
        Some(_) => return args.to,
        None => (natural, args.frame),
    };
    if args.frame >= done_at {
        return args.to;
    }

    let x = args.config.response(natural_frame / fps);
    args.from + (args.to - args.from) * x
}

/// Unit spring progress for an entity released at `delay`, lasting `duration_in_frames`.
pub fn spring_progress(frame: FrameIndex, delay: f64, fps: Fps, duration_in_frames: f64) -> f64 {
    spring(SpringArgs::unit(
        frame.offset_from(delay),
        fps.as_f64(),
        duration_in_frames,
    ))
}

fn sanitize_fps(fps: f64) -> f64 {
    if fps.is_finite() && fps > 0.0 { fps } else { 30.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
