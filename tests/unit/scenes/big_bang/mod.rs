use super::*;
use crate::scene::graph::{Node, Text};

fn texts(nodes: &[Node], out: &mut Vec<String>) {
    for n in nodes {
        match n {
            Node::Group(g) => texts(&g.children, out),
            Node::Text(Text { content, .. }) => out.push(content.clone()),
            _ => {}
        }
    }
}

fn scene_texts(frame: u64) -> Vec<String> {
    let scene = BigBangUniverse::default().sample(FrameIndex(frame)).unwrap();
    let mut out = Vec::new();
    texts(&scene.nodes, &mut out);
    out
}

fn layers(frame: u64) -> EraIntensities {
    let f = FrameIndex(frame);
    EraIntensities::at(frame as f64, &CosmicState::at(epochs::physical_time(f)))
}

#[test]
fn era_windows() {
    let k = layers(0);
    assert_eq!(k.planck, 1.0);
    assert_eq!((k.inflation, k.reheating, k.structure), (0.0, 0.0, 0.0));

    assert_eq!(layers(15).planck, 0.0);
    assert_eq!(layers(40).inflation, 1.0);
    assert_eq!(layers(50).reheating, 1.0);
    assert_eq!(layers(60).reheating, 0.0);
    assert_eq!(layers(85).quark, 1.0);
    assert_eq!(layers(145).nucleosynthesis, 1.0);
    assert_eq!(layers(165).nucleosynthesis, 0.0);
    assert_eq!(layers(250).structure, 1.0);
    assert_eq!(layers(250).cmb, 0.0);
}

#[test]
fn nucleus_draws() {
    assert_eq!(eras::Nucleus::from_draw(0.05), eras::Nucleus::Hydrogen);
    assert_eq!(eras::Nucleus::from_draw(0.85), eras::Nucleus::Helium);
    assert_eq!(eras::Nucleus::from_draw(0.999), eras::Nucleus::Lithium);
}

#[test]
fn background_tracks_temperature() {
    let hot = BigBangUniverse::default().sample(FrameIndex(0)).unwrap();
    assert_eq!(hot.background, Some(Paint::Color(Color::hex(0xBBDDFF))));
    assert_eq!(hot.view_box, Some((VIEW_W, VIEW_H)));

    let cold = BigBangUniverse::default().sample(FrameIndex(299)).unwrap();
    assert_eq!(cold.background, Some(Paint::Color(Color::hex(0x110500))));
    assert!(matches!(
        &cold.nodes[0],
        Node::Rect(r) if r.style.fill == Paint::gradient("bgGradient")
    ));
}

#[test]
fn hud_names_the_current_epoch() {
    let t = scene_texts(25);
    assert!(t.iter().any(|s| s == "暴胀时期 | Inflation"));
    assert!(t.iter().any(|s| s == "指数膨胀10²⁶倍"));
    assert!(t.iter().any(|s| s == "t = 0.0×10⁻³⁰ s"), "{t:?}");
    assert!(t.iter().any(|s| s == "Frame: 25 / 300"));
    assert!(t.iter().any(|s| s == "Ωₘ = 0.1424"));
    assert!(t.iter().any(|s| s == "ΩΛ = 0.684"));

    let late = scene_texts(299);
    assert!(late.iter().any(|s| s == "星系形成 | Galaxy Formation"));
}

#[test]
fn redshift_switches_notation() {
    assert_eq!(hud::format_redshift(1.5e7), "1.50e+7");
    assert_eq!(hud::format_redshift(1000.0), "1000.0");
}

#[test]
fn timeline_labels_wide_segments_only() {
    let Node::Group(g) = hud::timeline(FrameIndex(0), 300) else {
        panic!("timeline is a group");
    };
    // bar + 14 segments + 12 labels + marker
    assert_eq!(g.children.len(), 28);
    let Some(Node::Rect(last)) = g.children.iter().rev().find(|n| matches!(n, Node::Rect(_))) else {
        panic!("segments are rects");
    };
    assert!((last.origin.x + last.width - 1240.0).abs() < 1e-9);
}

#[test]
fn sampling_is_deterministic() {
    let scene = BigBangUniverse::default();
    for f in [0, 45, 85, 150, 210, 299] {
        assert_eq!(
            scene.sample(FrameIndex(f)).unwrap(),
            scene.sample(FrameIndex(f)).unwrap()
        );
    }
}

#[test]
fn inflation_culls_offscreen_rings() {
    let Node::Group(early) = eras::inflation(21.0, 0.01) else {
        panic!("group");
    };
    let Node::Group(late) = eras::inflation(39.0, 0.99) else {
        panic!("group");
    };
    assert_eq!(early.children.len(), 1 + 2 + 50);
    assert_eq!(late.children.len(), 1);
    let Node::Circle(fireball) = &late.children[0] else {
        panic!("circle");
    };
    assert!(fireball.radius <= 1e5);
}
