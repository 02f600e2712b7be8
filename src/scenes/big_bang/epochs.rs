//! The cosmic timeline: fourteen epochs laid end to end on a logarithmic time axis.

use crate::foundation::core::{FrameIndex, FrameRange};
use crate::scene::graph::Color;

/// Seconds in a Julian year.
pub const YEAR: f64 = 365.25 * 24.0 * 3600.0;

/// Stand-in for a zero start time on the log axis.
const LOG_FLOOR_SECS: f64 = 1e-50;

/// One period of cosmic history and the frames it occupies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Epoch {
    /// Chinese name.
    pub name: &'static str,
    /// English name.
    pub name_en: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Cosmic time at the start, in seconds.
    pub start_time: f64,
    /// Cosmic time at the end, in seconds.
    pub end_time: f64,
    /// First frame (inclusive).
    pub start_frame: u64,
    /// Last frame (exclusive).
    pub end_frame: u64,
    /// Characteristic temperature in kelvin.
    pub temperature: f64,
    /// Accent color.
    pub color: Color,
}

impl Epoch {
    /// Whether `frame` falls inside `[start_frame, end_frame)`.
    pub fn contains(&self, frame: FrameIndex) -> bool {
        FrameRange::from_raw(self.start_frame, self.end_frame).contains(frame)
    }

    /// Frames covered.
    pub fn frames(&self) -> u64 {
        self.end_frame - self.start_frame
    }
}

const fn epoch(
    name: &'static str,
    name_en: &'static str,
    description: &'static str,
    (start_time, end_time): (f64, f64),
    (start_frame, end_frame): (u64, u64),
    temperature: f64,
    color: u32,
) -> Epoch {
    Epoch {
        name,
        name_en,
        description,
        start_time,
        end_time,
        start_frame,
        end_frame,
        temperature,
        color: Color::hex(color),
    }
}

/// The timeline, ordered and contiguous in frames.
#[rustfmt::skip]
pub const EPOCHS: [Epoch; 14] = [
    epoch("普朗克时期", "Planck Epoch", "量子引力主导，四种力统一", (0.0, 1e-43), (0, 10), 1e32, 0xFFFFFF),
    epoch("大一统时期", "GUT Epoch", "重力分离，GUT对称性", (1e-43, 1e-36), (10, 20), 1e28, 0xEEDDFF),
    epoch("暴胀时期", "Inflation", "指数膨胀10²⁶倍", (1e-36, 1e-32), (20, 40), 1e27, 0xFFDDAA),
    epoch("再加热", "Reheating", "暴胀场衰变，粒子产生", (1e-32, 1e-12), (40, 60), 1e15, 0xFFAA66),
    epoch("电弱时期", "Electroweak", "电磁力与弱力分离", (1e-12, 1e-6), (60, 80), 1e15, 0xFF8844),
    epoch("夸克时期", "Quark Epoch", "夸克-胶子等离子体", (1e-6, 1e-4), (80, 100), 1e12, 0xFF6622),
    epoch("强子时期", "Hadron Epoch", "质子中子形成", (1e-4, 1.0), (100, 120), 1e10, 0xCC4400),
    epoch("轻子时期", "Lepton Epoch", "轻子主导宇宙", (1.0, 180.0), (120, 140), 1e9, 0xAA3300),
    epoch("核合成", "Nucleosynthesis", "氢、氦、锂形成", (180.0, 1200.0), (140, 160), 1e9, 0x882200),
    epoch("光子时期", "Photon Epoch", "等离子体不透明", (1200.0, 3.8e5 * YEAR), (160, 200), 3000.0, 0x441100),
    epoch("复合时期", "Recombination", "CMB释放，中性原子形成", (3.8e5 * YEAR, 1e6 * YEAR), (200, 220), 3000.0, 0x220800),
    epoch("黑暗时期", "Dark Ages", "无恒星，只有中性氢", (1e6 * YEAR, 1.5e8 * YEAR), (220, 250), 100.0, 0x110400),
    epoch("再电离", "Reionization", "第一代恒星形成", (1.5e8 * YEAR, 1e9 * YEAR), (250, 280), 50.0, 0x0A0200),
    epoch("星系形成", "Galaxy Formation", "大尺度结构演化", (1e9 * YEAR, 13.8e9 * YEAR), (280, 600), 2.725, 0x000001),
];

/// The epoch containing `frame`; frames past the table map to the last epoch.
pub fn epoch_at(frame: FrameIndex) -> &'static Epoch {
    EPOCHS
        .iter()
        .find(|e| e.contains(frame))
        .unwrap_or(&EPOCHS[EPOCHS.len() - 1])
}

/// Cosmic time at `frame`, interpolated logarithmically inside its epoch.
///
/// A zero start time is treated as `1e-50` s. Frames past the table return the last end time.
pub fn physical_time(frame: FrameIndex) -> f64 {
    let Some(e) = EPOCHS.iter().find(|e| e.contains(frame)) else {
        return EPOCHS[EPOCHS.len() - 1].end_time;
    };
    let p = (frame.0 - e.start_frame) as f64 / e.frames() as f64;
    let start = if e.start_time > 0.0 {
        e.start_time
    } else {
        LOG_FLOOR_SECS
    };
    let (log_start, log_end) = (start.log10(), e.end_time.log10());
    10f64.powf(log_start + p * (log_end - log_start))
}

#[cfg(test)]
#[path = "../../../tests/unit/scenes/big_bang/epochs.rs"]
mod tests;
