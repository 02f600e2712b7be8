//! Visual layers, one per physical era, each faded by its own intensity.

use std::f64::consts::{PI, TAU};

use crate::animation::digits::DigitSequence;
use crate::animation::ease::smoothstep;
use crate::foundation::math::clamp01;
use crate::scene::graph::{Circle, Color, Group, Line, Node, Paint, Stroke, Styled, Text};
use crate::scenes::big_bang::physics::{CosmicState, INFLATION_FACTOR};
use crate::scenes::big_bang::{CENTER_X, CENTER_Y};

/// Stroked rings wider than this lie entirely outside the view and are not emitted.
const MAX_RING_RADIUS: f64 = 2000.0;
/// Filled discs are capped here; inside the view the result is indistinguishable.
const MAX_DISC_RADIUS: f64 = 1e5;

const POP_III_SECS: f64 = 1.5e8 * 3.15e7;
const GYR_SECS: f64 = 1e9 * 3.15e7;

/// Per-layer intensities at one frame. A layer with intensity `0` is not drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EraIntensities {
    /// Quantum foam; fades out over the first 15 frames.
    pub planck: f64,
    /// Inflation progress across frames 20..40.
    pub inflation: f64,
    /// Reheating shock, up over 40..50 and down over 50..60.
    pub reheating: f64,
    /// Quark–gluon plasma, up over 70..80 and down over 90..100.
    pub quark: f64,
    /// Nucleosynthesis, up over 130..140 and down over 150..160.
    pub nucleosynthesis: f64,
    /// CMB gate on temperature.
    pub cmb: f64,
    /// Structure formation gate on cosmic time.
    pub structure: f64,
}

impl EraIntensities {
    /// Evaluate every gate at frame `f`.
    pub fn at(f: f64, state: &CosmicState) -> Self {
        let window =
            |a: f64, b: f64, c: f64, d: f64| smoothstep(a, b, f) * (1.0 - smoothstep(c, d, f));
        Self {
            planck: (1.0 - f / 15.0).max(0.0),
            inflation: smoothstep(20.0, 40.0, f),
            reheating: window(40.0, 50.0, 50.0, 60.0),
            quark: window(70.0, 80.0, 90.0, 100.0),
            nucleosynthesis: window(130.0, 140.0, 150.0, 160.0),
            cmb: smoothstep(2800.0, 3000.0, state.temperature),
            structure: smoothstep(1e13, 1e15, state.time),
        }
    }
}

fn disc(x: f64, y: f64, r: f64, fill: impl Into<Paint>) -> Node {
    Circle::new(x, y, r).fill(fill).into()
}

fn ring(r: f64, stroke: Stroke) -> Node {
    Circle::new(CENTER_X, CENTER_Y, r)
        .fill(Paint::None)
        .stroke(stroke)
        .into()
}

/// Jittering violet foam around the center.
pub fn planck(seq: &DigitSequence, f: f64, intensity: f64) -> Node {
    let t = f * 0.05;
    let foam = (0..150u64).map(|i| {
        let x = seq.uniform(i * 7, 540.0, 740.0);
        let y = seq.uniform(i * 11, 260.0, 460.0);
        let size = seq.uniform(i * 13, 2.0, 6.0);
        let phase = seq.uniform(i * 17, 0.0, TAU);
        let speed = seq.uniform(i * 19, 30.0, 80.0);
        let hue = seq.uniform(i * 23, 240.0, 300.0);

        let wave1 = (t * speed * 0.01 + phase).sin() * 15.0;
        let wave2 = (t * speed * 0.015 + phase * 1.3).cos() * 10.0;
        let r = size * (1.0 + (t * 0.2 + i as f64).sin() * 0.3);
        disc(
            x + wave1,
            y + wave2,
            r,
            Color::hsla(hue, 80.0, 70.0, 0.5 + (t + phase).sin() * 0.3),
        )
    });
    Group::new().opacity(intensity).children(foam).into()
}

/// Exponentially growing fireball with dashed horizon rings and orbiting fluctuations.
pub fn inflation(f: f64, progress: f64) -> Node {
    let expansion = INFLATION_FACTOR.powf(progress);
    let mut g = Group::new().child(
        Circle::new(CENTER_X, CENTER_Y, (30.0 * expansion).min(MAX_DISC_RADIUS))
            .fill(Paint::gradient("inflationGrad"))
            .opacity(1.0 - progress * 0.3),
    );

    let horizons = [
        (60.0, Color::hsla(40.0, 100.0, 60.0, 0.4), 2.0, [8.0, 4.0], 1.0 - progress),
        (100.0, Color::hsla(40.0, 100.0, 50.0, 0.2), 1.0, [20.0, 10.0], 0.8 - progress * 0.5),
    ];
    for (base, color, width, dash, opacity) in horizons {
        let r = base * expansion;
        if r <= MAX_RING_RADIUS && opacity > 0.0 {
            g = g.child(
                Circle::new(CENTER_X, CENTER_Y, r)
                    .fill(Paint::None)
                    .stroke(Stroke::new(color, width).dashed(&dash))
                    .opacity(opacity),
            );
        }
    }

    let orbit = 40.0 * expansion;
    let fluctuations = (0..50u64).filter_map(|i| {
        let angle = i as f64 / 50.0 * TAU + f * 0.01;
        let r = orbit + (f * 0.1 + i as f64).sin() * 10.0;
        (r <= MAX_RING_RADIUS).then(|| {
            disc(
                CENTER_X + angle.cos() * r,
                CENTER_Y + angle.sin() * r * 0.7,
                2.0,
                Color::hsla(30.0 + i as f64 * 2.0, 100.0, 60.0, 0.6),
            )
        })
    });
    g.children(fluctuations).into()
}

/// Expanding shock rings and a burst of newly created particles.
pub fn reheating(seq: &DigitSequence, f: f64, intensity: f64) -> Node {
    let rings = (0..5u64).map(|i| {
        let age = (f - 40.0 - i as f64 * 10.0).max(0.0);
        let alpha = (1.0 - age / 60.0).max(0.0);
        ring(
            age * 8.0,
            Stroke::new(
                Color::hsla(30.0 + i as f64 * 10.0, 100.0, 60.0, alpha * 0.6),
                6.0 - i as f64,
            ),
        )
    });
    let particles = (0..300u64).map(|i| {
        let angle = seq.uniform(i * 7, 0.0, TAU);
        let speed = seq.uniform(i * 11, 2.0, 8.0);
        let distance = ((f - 40.0) * speed).max(0.0);
        let alpha = (1.0 - distance / 400.0).max(0.0);
        disc(
            CENTER_X + angle.cos() * distance,
            CENTER_Y + angle.sin() * distance * 0.7,
            2.0,
            Color::hsla(seq.uniform(i * 13, 20.0, 50.0), 100.0, 60.0, alpha),
        )
    });
    Group::new()
        .opacity(intensity)
        .children(rings)
        .children(particles)
        .into()
}

const QUARK_COLORS: [(u32, &str); 3] = [(0xFF4444, "红"), (0x44FF44, "绿"), (0x4444FF, "蓝")];

/// Glowing plasma with colored quarks drifting inside a wrapping 400×400 box.
pub fn quark_gluon_plasma(seq: &DigitSequence, f: f64, intensity: f64) -> Node {
    let quarks = (0..120u64).map(|i| {
        let (color, label) = QUARK_COLORS[(i % 3) as usize];
        let x0 = seq.uniform(i * 7, 440.0, 840.0);
        let y0 = seq.uniform(i * 11, 160.0, 560.0);
        let vx = seq.uniform(i * 13, -5.0, 5.0);
        let vy = seq.uniform(i * 17, -3.0, 3.0);
        let x = (x0 + vx * f * 0.5 - 440.0).rem_euclid(400.0) + 440.0;
        let y = (y0 + vy * f * 0.5 - 160.0).rem_euclid(400.0) + 160.0;
        Group::new()
            .child(disc(x, y, 5.0, Color::hex(color)))
            .child(Text::new(x, y + 1.0, label, 6.0).bold().centered())
            .into()
    });
    Group::new()
        .opacity(intensity)
        .child(disc(CENTER_X, CENTER_Y, 250.0, Paint::gradient("qgpGrad")))
        .child(disc(
            CENTER_X,
            CENTER_Y,
            200.0,
            Color::hsla(30.0, 100.0, 40.0, 0.2),
        ))
        .children(quarks)
        .into()
}

/// Light nucleus kind produced by nucleosynthesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nucleus {
    /// ¹H, about 76% by mass.
    Hydrogen,
    /// ⁴He, about 24%.
    Helium,
    /// ⁷Li, trace.
    Lithium,
}

impl Nucleus {
    /// Kind for a unit draw `r`.
    pub fn from_draw(r: f64) -> Self {
        if r < 0.76 {
            Self::Hydrogen
        } else if r < 0.998 {
            Self::Helium
        } else {
            Self::Lithium
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Hydrogen => "¹H",
            Self::Helium => "⁴He",
            Self::Lithium => "⁷Li",
        }
    }

    fn color(self) -> Color {
        match self {
            Self::Hydrogen => Color::hex(0x4488FF),
            Self::Helium => Color::hex(0xFFAA44),
            Self::Lithium => Color::hex(0xAA44FF),
        }
    }

    fn radius(self) -> f64 {
        match self {
            Self::Hydrogen => 3.0,
            Self::Helium => 6.0,
            Self::Lithium => 4.0,
        }
    }
}

/// Scattered light nuclei with an abundance legend.
pub fn nucleosynthesis(seq: &DigitSequence, intensity: f64) -> Node {
    let legend = Group::at(50.0, 80.0)
        .child(Text::new(0.0, 0.0, "原初核合成丰度", 12.0).bold())
        .child(Text::new(0.0, 20.0, "氢 (¹H): 76%", 10.0).fill(Nucleus::Hydrogen.color()))
        .child(Text::new(0.0, 35.0, "氦 (⁴He): 24%", 10.0).fill(Nucleus::Helium.color()))
        .child(Text::new(0.0, 50.0, "锂 (⁷Li): 0.01%", 10.0).fill(Nucleus::Lithium.color()));

    let nuclei = (0..100u64).map(|i| {
        let kind = Nucleus::from_draw(seq.uniform(i * 7, 0.0, 1.0));
        let x = seq.uniform(i * 11, 200.0, 1080.0);
        let y = seq.uniform(i * 13, 100.0, 620.0);
        let r = kind.radius();
        Group::new()
            .child(Circle::new(x, y, r).fill(kind.color()).opacity(0.8))
            .child(Text::new(x, y + 1.0, kind.symbol(), r * 1.2).bold().centered())
            .into()
    });
    Group::new()
        .opacity(intensity)
        .child(legend)
        .children(nuclei)
        .into()
}

/// Microwave background shell with anisotropy spots and outgoing photon streaks.
pub fn cmb(seq: &DigitSequence, f: f64, temperature: f64) -> Node {
    let spots = (0..64u64).map(|i| {
        let theta = i as f64 / 64.0 * TAU;
        let phi = seq.uniform(i * 7, 0.0, PI);
        let r = 300.0 + seq.uniform(i * 11, -30.0, 30.0) * (f * 0.02).sin();
        let hot = seq.uniform(i * 13, -0.001, 0.001) > 0.0;
        disc(
            CENTER_X + theta.cos() * r,
            CENTER_Y + theta.sin() * r * phi.sin(),
            8.0,
            Color::hsla(if hot { 20.0 } else { 40.0 }, 100.0, 50.0, 0.3),
        )
    });
    let streak = Color::hsla(30.0 + temperature / 3000.0 * 30.0, 100.0, 50.0, 0.2);
    let photons = (0..100u64).map(|i| {
        let angle = i as f64 / 100.0 * TAU;
        let (c, s) = (angle.cos(), angle.sin());
        Line::new(
            CENTER_X + c * 320.0,
            CENTER_Y + s * 320.0,
            CENTER_X + c * 370.0,
            CENTER_Y + s * 370.0,
        )
        .stroke(Stroke::new(streak, 1.0))
        .into()
    });
    Group::new()
        .opacity(smoothstep(2000.0, 3000.0, temperature))
        .child(disc(CENTER_X, CENTER_Y, 350.0, Paint::gradient("cmbGrad")))
        .children(spots)
        .children(photons)
        .into()
}

/// Dark matter halos gathering, then the first stars igniting.
///
/// Halo count steps up with the structure scale (20, 40, then 80).
pub fn structure(seq: &DigitSequence, f: f64, time: f64) -> Node {
    let scale = clamp01((time / 1e13).log10() / 6.0);
    let count: u64 = if scale < 0.3 {
        20
    } else if scale < 0.7 {
        40
    } else {
        80
    };

    let halos = (0..count).map(|i| {
        let x = seq.uniform(i * 7, 80.0, 1200.0) + seq.uniform(i * 17, -0.2, 0.2) * f;
        let y = seq.uniform(i * 11, 60.0, 660.0) + seq.uniform(i * 19, -0.15, 0.15) * f;
        let mass = seq.uniform(i * 13, 10.0, 50.0);
        Group::new()
            .child(disc(x, y, mass * scale, Color::hsla(260.0, 40.0, 30.0, 0.15)))
            .child(disc(x, y, mass * 0.3 * scale, Color::hsla(280.0, 50.0, 40.0, 0.25)))
            .into()
    });
    let mut g = Group::new().opacity(scale).children(halos);

    if time > POP_III_SECS {
        let brightness = ((time - POP_III_SECS) / GYR_SECS).min(1.0);
        let stars = (0..30u64).map(|i| {
            let twinkle = 0.8 + (f * 0.1 + i as f64).sin() * 0.2;
            Circle::new(
                seq.uniform(i * 23, 150.0, 1130.0),
                seq.uniform(i * 29, 80.0, 640.0),
                4.0 * brightness * twinkle,
            )
            .fill(Color::hsla(
                seq.uniform(i * 31, 30.0, 50.0),
                100.0,
                80.0,
                brightness,
            ))
            .filter("starGlow")
            .into()
        });
        g = g.child(Group::new().children(stars));
    }
    g.into()
}
