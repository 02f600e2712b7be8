//! Toy cosmology: temperature, scale factor and derived panel quantities as functions of
//! cosmic time.

use crate::scene::graph::Color;

/// Planck temperature in kelvin.
pub const PLANCK_TEMPERATURE: f64 = 1.416e32;
/// Expansion factor of inflation.
pub const INFLATION_FACTOR: f64 = 1e26;
/// Present CMB temperature in kelvin.
pub const CMB_TEMPERATURE: f64 = 2.725;
/// Baryon density parameter.
pub const BARYON_DENSITY: f64 = 0.0224;
/// Dark matter density parameter.
pub const DARK_MATTER_DENSITY: f64 = 0.12;
/// Dark energy density parameter.
pub const DARK_ENERGY_DENSITY: f64 = 0.684;

const INFLATION_END_SECS: f64 = 1e-32;
const MATTER_ERA_SECS: f64 = 1e12;

/// Temperature in kelvin at `t` seconds.
///
/// Constant through inflation, then `T ∝ t^-1/2` while radiation dominates and
/// `T ∝ t^-0.67` once matter does.
pub fn temperature(t: f64) -> f64 {
    if t < INFLATION_END_SECS {
        PLANCK_TEMPERATURE
    } else if t < MATTER_ERA_SECS {
        1e10 * t.powf(-0.5)
    } else {
        1e4 * (t / MATTER_ERA_SECS).powf(-0.67)
    }
}

/// Relative scale factor at `t` seconds.
pub fn scale_factor(t: f64) -> f64 {
    if t < INFLATION_END_SECS {
        (t / 1e-43).powf(0.5)
    } else if t < MATTER_ERA_SECS {
        1e26 * (t / INFLATION_END_SECS).powf(0.5)
    } else {
        1e26 * (MATTER_ERA_SECS / INFLATION_END_SECS).powf(0.5)
            * (t / MATTER_ERA_SECS).powf(0.67)
    }
}

/// Rough black-body tint for a temperature.
pub fn temperature_color(temp: f64) -> Color {
    let hex = match temp {
        t if t > 1e7 => 0xBBDDFF,
        t if t > 1e6 => 0xDDEEFF,
        t if t > 1e5 => 0xFFFFDD,
        t if t > 1e4 => 0xFFDD88,
        t if t > 5000.0 => 0xFFAA44,
        t if t > 3000.0 => 0xFF8822,
        t if t > 1000.0 => 0xCC4400,
        t if t > 100.0 => 0x662200,
        _ => 0x110500,
    };
    Color::hex(hex)
}

/// Human-readable cosmic time, picking a unit from Planck times up to gigayears.
pub fn format_cosmic_time(s: f64) -> String {
    match s {
        s if s < 1e-36 => format!("{:.1} tₚ", s / 1e-43),
        s if s < 1e-30 => format!("{:.1}×10⁻³⁰ s", s * 1e30),
        s if s < 1e-20 => format!("{:.1}×10⁻²⁰ s", s * 1e20),
        s if s < 1e-10 => format!("{:.1} ps", s * 1e12),
        s if s < 1e-6 => format!("{:.1} ns", s * 1e9),
        s if s < 1e-3 => format!("{:.1} μs", s * 1e6),
        s if s < 1.0 => format!("{:.1} ms", s * 1e3),
        s if s < 60.0 => format!("{s:.1} s"),
        s if s < 3600.0 => format!("{:.1} min", s / 60.0),
        s if s < 86400.0 => format!("{:.1} hr", s / 3600.0),
        s if s < 3.15e7 => format!("{:.1} days", s / 86400.0),
        s if s < 3.15e9 => format!("{:.1} years", s / 3.15e7),
        s if s < 3.15e13 => format!("{:.1} kyr", s / 3.15e9),
        s => format!("{:.2} Gyr", s / 3.15e7 / 1e9),
    }
}

/// Values shown in the physics panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CosmicState {
    /// Cosmic time in seconds.
    pub time: f64,
    /// Temperature in kelvin.
    pub temperature: f64,
    /// Scale factor.
    pub scale_factor: f64,
}

impl CosmicState {
    /// Evaluate the model at `t` seconds.
    pub fn at(t: f64) -> Self {
        Self {
            time: t,
            temperature: temperature(t),
            scale_factor: scale_factor(t),
        }
    }

    /// `T / T_cmb − 1`.
    pub fn redshift(&self) -> f64 {
        self.temperature / CMB_TEMPERATURE - 1.0
    }

    /// Density relative to today, `a⁻³`.
    pub fn density(&self) -> f64 {
        self.scale_factor.powi(-3)
    }

    /// Light-travel horizon in meters, `c·t / a` (an `a` of zero counts as one).
    pub fn horizon(&self) -> f64 {
        let a = if self.scale_factor == 0.0 {
            1.0
        } else {
            self.scale_factor
        };
        3e8 * self.time / a
    }
}

/// JavaScript-style `toExponential(digits)`: `1.42e+32`, `3.00e-5`.
pub fn exponential(v: f64, digits: usize) -> String {
    if !v.is_finite() {
        return if v.is_nan() {
            "NaN".to_owned()
        } else if v > 0.0 {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        };
    }
    let s = format!("{v:.digits$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => s,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scenes/big_bang/physics.rs"]
mod tests;
