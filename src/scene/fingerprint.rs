use crate::foundation::core::{Affine, Point};
use crate::foundation::math::Fnv1a64;
use crate::scene::graph::{Color, Def, GradientStop, Node, Paint, Scene, Style, TextAnchor};

/// Stable 64-bit fingerprint of a sampled scene.
///
/// Two scenes with equal fingerprints rasterize identically, which static-frame elision relies
/// on. The frame index is not part of the hash, so a still tail of a scene elides across time.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct SceneFingerprint(pub u64);

impl std::fmt::Display for SceneFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Hash every drawable attribute of `scene`.
pub fn fingerprint_scene(scene: &Scene) -> SceneFingerprint {
    let mut h = Fnv1a64::new_default();
    h.write_u64(u64::from(scene.width));
    h.write_u64(u64::from(scene.height));
    match scene.view_box {
        Some((w, hh)) => {
            h.write_u8(1);
            h.write_f64(w);
            h.write_f64(hh);
        }
        None => h.write_u8(0),
    }
    match &scene.background {
        Some(p) => {
            h.write_u8(1);
            write_paint(&mut h, p);
        }
        None => h.write_u8(0),
    }
    h.write_u64(scene.defs.len() as u64);
    for d in &scene.defs {
        write_def(&mut h, d);
    }
    write_nodes(&mut h, &scene.nodes);
    SceneFingerprint(h.finish())
}

fn write_nodes(h: &mut Fnv1a64, nodes: &[Node]) {
    h.write_u64(nodes.len() as u64);
    for n in nodes {
        write_node(h, n);
    }
}

fn write_node(h: &mut Fnv1a64, node: &Node) {
    match node {
        Node::Group(g) => {
            h.write_u8(0);
            write_affine(h, g.transform);
            h.write_f64(g.opacity);
            write_nodes(h, &g.children);
        }
        Node::Circle(c) => {
            h.write_u8(1);
            write_point(h, c.center);
            h.write_f64(c.radius);
            write_style(h, &c.style);
        }
        Node::Ellipse(e) => {
            h.write_u8(2);
            write_point(h, e.center);
            h.write_f64(e.rx);
            h.write_f64(e.ry);
            write_style(h, &e.style);
        }
        Node::Line(l) => {
            h.write_u8(3);
            write_point(h, l.from);
            write_point(h, l.to);
            write_style(h, &l.style);
        }
        Node::Rect(r) => {
            h.write_u8(4);
            write_point(h, r.origin);
            h.write_f64(r.width);
            h.write_f64(r.height);
            h.write_f64(r.corner_radius);
            write_style(h, &r.style);
        }
        Node::Polygon(p) => {
            h.write_u8(5);
            h.write_u64(p.points.len() as u64);
            for pt in &p.points {
                write_point(h, *pt);
            }
            write_style(h, &p.style);
        }
        Node::Text(t) => {
            h.write_u8(6);
            write_point(h, t.position);
            h.write_f64(t.dy);
            h.write_str(&t.content);
            h.write_f64(t.font_size);
            h.write_u8(u8::from(t.bold));
            h.write_u8(match t.anchor {
                TextAnchor::Start => 0,
                TextAnchor::Middle => 1,
                TextAnchor::End => 2,
            });
            h.write_u8(u8::from(t.middle_baseline));
            write_style(h, &t.style);
        }
    }
}

fn write_style(h: &mut Fnv1a64, style: &Style) {
    write_paint(h, &style.fill);
    match &style.stroke {
        Some(s) => {
            h.write_u8(1);
            write_paint(h, &s.paint);
            h.write_f64(s.width);
            h.write_u64(s.dash.len() as u64);
            for d in &s.dash {
                h.write_f64(*d);
            }
            h.write_u8(u8::from(s.round_cap));
        }
        None => h.write_u8(0),
    }
    h.write_f64(style.opacity);
    match &style.filter {
        Some(id) => {
            h.write_u8(1);
            h.write_str(id);
        }
        None => h.write_u8(0),
    }
}

fn write_paint(h: &mut Fnv1a64, paint: &Paint) {
    match paint {
        Paint::None => h.write_u8(0),
        Paint::Color(c) => {
            h.write_u8(1);
            write_color(h, *c);
        }
        Paint::Gradient(id) => {
            h.write_u8(2);
            h.write_str(id);
        }
    }
}

fn write_color(h: &mut Fnv1a64, c: Color) {
    match c {
        Color::Rgb { r, g, b } => h.write_bytes(&[0, r, g, b]),
        Color::Rgba { r, g, b, a } => {
            h.write_bytes(&[1, r, g, b]);
            h.write_f64(a);
        }
        Color::Hsla { h: hue, s, l, a } => {
            h.write_u8(2);
            h.write_f64(hue);
            h.write_f64(s);
            h.write_f64(l);
            h.write_f64(a);
        }
    }
}

fn write_def(h: &mut Fnv1a64, def: &Def) {
    match def {
        Def::RadialGradient { id, stops } => {
            h.write_u8(0);
            h.write_str(id);
            write_stops(h, stops);
        }
        Def::LinearGradient {
            id,
            from,
            to,
            stops,
        } => {
            h.write_u8(1);
            h.write_str(id);
            write_point(h, *from);
            write_point(h, *to);
            write_stops(h, stops);
        }
        Def::Blur { id, std_dev } => {
            h.write_u8(2);
            h.write_str(id);
            h.write_f64(*std_dev);
        }
        Def::Glow { id, std_dev } => {
            h.write_u8(3);
            h.write_str(id);
            h.write_f64(*std_dev);
        }
    }
}

fn write_stops(h: &mut Fnv1a64, stops: &[GradientStop]) {
    h.write_u64(stops.len() as u64);
    for s in stops {
        h.write_f64(s.offset);
        write_color(h, s.color);
        h.write_f64(s.opacity);
    }
}

fn write_point(h: &mut Fnv1a64, p: Point) {
    h.write_f64(p.x);
    h.write_f64(p.y);
}

fn write_affine(h: &mut Fnv1a64, a: Affine) {
    for c in a.as_coeffs() {
        h.write_f64(c);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/fingerprint.rs"]
mod tests;
