use crate::foundation::core::FrameIndex;
use crate::scene::graph::{Circle, Color, Group, Node, Rect, Stroke, Styled, Text, TextAnchor};
use crate::scenes::big_bang::epochs::{EPOCHS, Epoch};
use crate::scenes::big_bang::physics::{
    BARYON_DENSITY, CosmicState, DARK_ENERGY_DENSITY, DARK_MATTER_DENSITY, exponential,
    format_cosmic_time,
};
use crate::scenes::big_bang::VIEW_W;

const TIMELINE_W: f64 = 1240.0;
const MUTED: Color = Color::hex(0xAAAAAA);

/// Title block: scene title, epoch names, description and formatted cosmic time.
pub fn title(epoch: &Epoch, time: f64) -> Node {
    Group::at(20.0, 30.0)
        .child(Text::new(0.0, 0.0, "宇宙大爆炸 - 真实物理演化", 18.0).bold())
        .child(
            Text::new(0.0, 25.0, format!("{} | {}", epoch.name, epoch.name_en), 13.0)
                .fill(Color::hex(0x66AAFF)),
        )
        .child(Text::new(0.0, 45.0, epoch.description, 11.0).fill(MUTED))
        .child(Text::new(
            0.0,
            65.0,
            format!("t = {}", format_cosmic_time(time)),
            12.0,
        ))
        .into()
}

/// Redshift as shown in the panel: exponential above one million, one decimal below.
pub fn format_redshift(z: f64) -> String {
    if z > 1e6 {
        exponential(z, 2)
    } else {
        format!("{z:.1}")
    }
}

/// Panel with temperature, redshift, scale factor, density, horizon and density parameters.
pub fn physics_panel(state: &CosmicState) -> Node {
    let line = |y: f64, s: String| Text::new(10.0, y, s, 9.0).fill(MUTED);
    Group::at(20.0, 100.0)
        .child(
            Rect::new(0.0, 0.0, 220.0, 160.0)
                .rounded(8.0)
                .fill(Color::rgba(0, 0, 0, 0.6))
                .stroke(Stroke::new(Color::rgba(255, 255, 255, 0.2), 1.0)),
        )
        .child(Text::new(10.0, 20.0, "宇宙学参数", 11.0).bold())
        .child(line(
            40.0,
            format!("温度 (T): {} K", exponential(state.temperature, 2)),
        ))
        .child(line(
            55.0,
            format!("红移 (z): {}", format_redshift(state.redshift())),
        ))
        .child(line(
            70.0,
            format!("尺度因子 (a): {}", exponential(state.scale_factor, 2)),
        ))
        .child(line(
            85.0,
            format!("密度 (ρ): {} ρ₀", exponential(state.density(), 2)),
        ))
        .child(line(
            100.0,
            format!("视界: {} m", exponential(state.horizon(), 2)),
        ))
        .child(
            Text::new(
                10.0,
                125.0,
                format!("Ωₘ = {:.4}", BARYON_DENSITY + DARK_MATTER_DENSITY),
                8.0,
            )
            .fill(Color::hex(0x66AAFF)),
        )
        .child(
            Text::new(10.0, 140.0, format!("ΩΛ = {DARK_ENERGY_DENSITY}"), 8.0)
                .fill(Color::hex(0xFF66AA)),
        )
        .into()
}

/// Epoch bar along the bottom edge with a progress marker.
///
/// Segments are scaled to `total` frames and cut off at the bar's end. Labels are drawn only on
/// segments wider than 50 units.
pub fn timeline(frame: FrameIndex, total: u64) -> Node {
    let total = total.max(1);
    let to_x = |f: u64| f.min(total) as f64 / total as f64 * TIMELINE_W;

    let mut g = Group::at(20.0, 680.0).child(
        Rect::new(0.0, 0.0, TIMELINE_W, 30.0)
            .rounded(5.0)
            .fill(Color::rgba(0, 0, 0, 0.5)),
    );
    for e in EPOCHS.iter().filter(|e| e.start_frame < total) {
        let x = to_x(e.start_frame);
        let width = to_x(e.end_frame) - x;
        let fill = if e.contains(frame) {
            Color::rgba(100, 150, 255, 0.4)
        } else {
            Color::rgba(100, 100, 100, 0.2)
        };
        g = g.child(Rect::new(x, 0.0, width, 30.0).fill(fill));
        if width > 50.0 {
            g = g.child(Text::new(x + width / 2.0, 20.0, e.name, 8.0).anchor(TextAnchor::Middle));
        }
    }
    g.child(
        Circle::new(frame.0 as f64 / total as f64 * TIMELINE_W, 15.0, 5.0)
            .fill(Color::hex(0x4488FF)),
    )
    .into()
}

/// `Frame: n / total` in the top-right corner.
pub fn frame_counter(frame: FrameIndex, total: u64) -> Node {
    Text::new(VIEW_W - 20.0, 30.0, format!("Frame: {} / {}", frame.0, total), 10.0)
        .anchor(TextAnchor::End)
        .opacity(0.5)
        .into()
}
