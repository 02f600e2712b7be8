//! The Big Bang to the present, compressed into ten seconds.
//!
//! Frames map onto a logarithmic cosmic clock through the epoch table. Temperature and scale
//! factor follow from the clock, and each era layer fades in and out with its own intensity.

/// Era visuals.
pub mod eras;
/// Epoch table and the frame → cosmic time mapping.
pub mod epochs;
mod hud;
/// Temperature, scale factor and derived quantities.
pub mod physics;

use crate::animation::digits::DigitSequence;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::FrameloomResult;
use crate::scene::graph::{Color, Def, GradientStop, Paint, Rect, Scene, Styled};
use crate::scene::{SceneSource, SceneSpec};

use self::eras::EraIntensities;
use self::physics::CosmicState;

/// Registry id.
pub const ID: &str = "BigBangUniverse";
/// Registered length.
pub const DURATION_FRAMES: u64 = 300;

/// Logical width the scene is laid out in.
pub const VIEW_W: f64 = 1280.0;
/// Logical height the scene is laid out in.
pub const VIEW_H: f64 = 720.0;
pub(crate) const CENTER_X: f64 = VIEW_W / 2.0;
pub(crate) const CENTER_Y: f64 = VIEW_H / 2.0;

/// The BigBangUniverse scene.
#[derive(Clone, Debug)]
pub struct BigBangUniverse {
    spec: SceneSpec,
    seq: DigitSequence,
}

impl BigBangUniverse {
    /// Scene for `spec`, drawing randomness from `seq`.
    pub fn new(spec: SceneSpec, seq: DigitSequence) -> FrameloomResult<Self> {
        spec.validate()?;
        Ok(Self { spec, seq })
    }

    /// Default registration: 1280×720 at 30 fps for 300 frames.
    pub fn default_spec() -> SceneSpec {
        SceneSpec::hd30(ID, DURATION_FRAMES)
    }
}

fn radial(id: &str, stops: &[(f64, u32, f64)]) -> Def {
    Def::RadialGradient {
        id: id.to_owned(),
        stops: stops
            .iter()
            .map(|&(offset, hex, opacity)| {
                GradientStop::with_opacity(offset, Color::hex(hex), opacity)
            })
            .collect(),
    }
}

fn defs() -> Vec<Def> {
    vec![
        Def::Glow {
            id: "starGlow".into(),
            std_dev: 2.0,
        },
        radial("bgGradient", &[(0.0, 0x0a0a1a, 1.0), (1.0, 0x000000, 1.0)]),
        radial(
            "inflationGrad",
            &[
                (0.0, 0xFFEEAA, 1.0),
                (0.2, 0xFFCC66, 1.0),
                (0.5, 0xFF8822, 1.0),
                (1.0, 0x000000, 0.0),
            ],
        ),
        radial(
            "qgpGrad",
            &[(0.0, 0xFFAA44, 0.9), (0.4, 0xCC4400, 0.5), (1.0, 0x220000, 0.0)],
        ),
        radial(
            "cmbGrad",
            &[(0.0, 0xFF6600, 0.7), (0.5, 0xCC4400, 0.4), (1.0, 0x220000, 0.0)],
        ),
    ]
}

impl SceneSource for BigBangUniverse {
    fn spec(&self) -> &SceneSpec {
        &self.spec
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn sample(&self, frame: FrameIndex) -> FrameloomResult<Scene> {
        let f = frame.0 as f64;
        let state = CosmicState::at(epochs::physical_time(frame));
        let epoch = epochs::epoch_at(frame);
        let k = EraIntensities::at(f, &state);
        let seq = &self.seq;

        let mut scene = self
            .spec
            .blank()
            .with_view_box(VIEW_W, VIEW_H)
            .with_background(physics::temperature_color(state.temperature));
        for def in defs() {
            scene.def(def);
        }

        if state.temperature < 1000.0 {
            scene.push(Rect::new(0.0, 0.0, VIEW_W, VIEW_H).fill(Paint::gradient("bgGradient")));
        }
        if k.planck > 0.0 {
            scene.push(eras::planck(seq, f, k.planck));
        }
        if k.inflation > 0.0 {
            scene.push(eras::inflation(f, k.inflation));
        }
        if k.reheating > 0.0 {
            scene.push(eras::reheating(seq, f, k.reheating));
        }
        if k.quark > 0.0 {
            scene.push(eras::quark_gluon_plasma(seq, f, k.quark));
        }
        if k.nucleosynthesis > 0.0 {
            scene.push(eras::nucleosynthesis(seq, k.nucleosynthesis));
        }
        if k.cmb > 0.0 {
            scene.push(eras::cmb(seq, f, state.temperature));
        }
        if k.structure > 0.0 {
            scene.push(eras::structure(seq, f, state.time));
        }

        let total = self.spec.duration_frames;
        scene.push(hud::title(epoch, state.time));
        scene.push(hud::physics_panel(&state));
        scene.push(hud::timeline(frame, total));
        scene.push(hud::frame_counter(frame, total));
        Ok(scene)
    }
}

impl Default for BigBangUniverse {
    fn default() -> Self {
        Self {
            spec: Self::default_spec(),
            seq: DigitSequence::PI,
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scenes/big_bang/mod.rs"]
mod tests;
