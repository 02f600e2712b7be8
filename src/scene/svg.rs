//! Scene graph → SVG 1.1 document text.
//!
//! The output is what the rasterizer parses, so every attribute here must be understood by
//! `usvg`. Numbers are written with at most three decimals.

use std::fmt::{self, Write as _};

use crate::foundation::core::{Affine, Point};
use crate::scene::graph::{
    Circle, Color, Def, Ellipse, GradientStop, Group, Line, Node, Paint, Polygon, Rect, Scene,
    Style, Text, TextAnchor,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serialize `scene` into a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::with_capacity(4096 + scene.leaf_count() * 96);
    // Writing into a `String` cannot fail.
    let _ = write_svg(scene, &mut out);
    out
}

/// Stream `scene` as an SVG document into `out`.
pub fn write_svg(scene: &Scene, out: &mut impl fmt::Write) -> fmt::Result {
    write!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height
    )?;

    if !scene.defs.is_empty() {
        out.write_str("<defs>")?;
        for def in &scene.defs {
            write_def(out, def)?;
        }
        out.write_str("</defs>")?;
    }

    if let Some(bg) = &scene.background {
        write!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            scene.width,
            scene.height,
            PaintAttr(bg)
        )?;
    }

    let view = scene.view_transform();
    if view == Affine::IDENTITY {
        for node in &scene.nodes {
            write_node(out, node)?;
        }
    } else {
        write!(out, r#"<g transform="{}">"#, Matrix(view))?;
        for node in &scene.nodes {
            write_node(out, node)?;
        }
        out.write_str("</g>")?;
    }

    out.write_str("</svg>")
}

fn write_def(out: &mut impl fmt::Write, def: &Def) -> fmt::Result {
    match def {
        Def::RadialGradient { id, stops } => {
            write!(out, r#"<radialGradient id="{}">"#, Escaped(id))?;
            write_stops(out, stops)?;
            out.write_str("</radialGradient>")
        }
        Def::LinearGradient {
            id,
            from,
            to,
            stops,
        } => {
            write!(
                out,
                r#"<linearGradient id="{}" x1="{}%" y1="{}%" x2="{}%" y2="{}%">"#,
                Escaped(id),
                Num(from.x * 100.0),
                Num(from.y * 100.0),
                Num(to.x * 100.0),
                Num(to.y * 100.0)
            )?;
            write_stops(out, stops)?;
            out.write_str("</linearGradient>")
        }
        Def::Blur { id, std_dev } => write!(
            out,
            r#"<filter id="{}" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="{}"/></filter>"#,
            Escaped(id),
            Num(*std_dev)
        ),
        Def::Glow { id, std_dev } => write!(
            out,
            concat!(
                r#"<filter id="{}" x="-50%" y="-50%" width="200%" height="200%">"#,
                r#"<feGaussianBlur stdDeviation="{}" result="coloredBlur"/>"#,
                r#"<feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge>"#,
                "</filter>"
            ),
            Escaped(id),
            Num(*std_dev)
        ),
    }
}

fn write_stops(out: &mut impl fmt::Write, stops: &[GradientStop]) -> fmt::Result {
    for s in stops {
        write!(
            out,
            r#"<stop offset="{}%" stop-color="{}""#,
            Num(s.offset * 100.0),
            Css(s.color)
        )?;
        if s.opacity < 1.0 {
            write!(out, r#" stop-opacity="{}""#, Num(s.opacity))?;
        }
        out.write_str("/>")?;
    }
    Ok(())
}

fn write_node(out: &mut impl fmt::Write, node: &Node) -> fmt::Result {
    match node {
        Node::Group(g) => write_group(out, g),
        Node::Circle(Circle {
            center,
            radius,
            style,
        }) => {
            write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                Num(center.x),
                Num(center.y),
                Num(*radius)
            )?;
            write_style(out, style)?;
            out.write_str("/>")
        }
        Node::Ellipse(Ellipse {
            center,
            rx,
            ry,
            style,
        }) => {
            write!(
                out,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
                Num(center.x),
                Num(center.y),
                Num(*rx),
                Num(*ry)
            )?;
            write_style(out, style)?;
            out.write_str("/>")
        }
        Node::Line(Line { from, to, style }) => {
            write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                Num(from.x),
                Num(from.y),
                Num(to.x),
                Num(to.y)
            )?;
            write_style(out, style)?;
            out.write_str("/>")
        }
        Node::Rect(Rect {
            origin,
            width,
            height,
            corner_radius,
            style,
        }) => {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                Num(origin.x),
                Num(origin.y),
                Num(*width),
                Num(*height)
            )?;
            if *corner_radius > 0.0 {
                write!(out, r#" rx="{}""#, Num(*corner_radius))?;
            }
            write_style(out, style)?;
            out.write_str("/>")
        }
        Node::Polygon(Polygon { points, style }) => {
            out.write_str(r#"<polygon points=""#)?;
            for (i, p) in points.iter().enumerate() {
                if i > 0 {
                    out.write_char(' ')?;
                }
                write_point(out, *p)?;
            }
            out.write_char('"')?;
            write_style(out, style)?;
            out.write_str("/>")
        }
        Node::Text(t) => write_text(out, t),
    }
}

fn write_group(out: &mut impl fmt::Write, g: &Group) -> fmt::Result {
    out.write_str("<g")?;
    if g.transform != Affine::IDENTITY {
        write!(out, r#" transform="{}""#, Matrix(g.transform))?;
    }
    if g.opacity < 1.0 {
        write!(out, r#" opacity="{}""#, Num(g.opacity))?;
    }
    out.write_char('>')?;
    for child in &g.children {
        write_node(out, child)?;
    }
    out.write_str("</g>")
}

fn write_text(out: &mut impl fmt::Write, t: &Text) -> fmt::Result {
    write!(
        out,
        r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{}""#,
        Num(t.position.x),
        Num(t.position.y),
        Num(t.font_size)
    )?;
    if t.dy != 0.0 {
        write!(out, r#" dy="{}""#, Num(t.dy))?;
    }
    if t.bold {
        out.write_str(r#" font-weight="bold""#)?;
    }
    match t.anchor {
        TextAnchor::Start => {}
        TextAnchor::Middle => out.write_str(r#" text-anchor="middle""#)?,
        TextAnchor::End => out.write_str(r#" text-anchor="end""#)?,
    }
    if t.middle_baseline {
        out.write_str(r#" dominant-baseline="middle""#)?;
    }
    write_style(out, &t.style)?;
    write!(out, ">{}</text>", Escaped(&t.content))
}

fn write_style(out: &mut impl fmt::Write, style: &Style) -> fmt::Result {
    write!(out, r#" fill="{}""#, PaintAttr(&style.fill))?;
    if let Some(stroke) = &style.stroke {
        write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            PaintAttr(&stroke.paint),
            Num(stroke.width)
        )?;
        if !stroke.dash.is_empty() {
            out.write_str(r#" stroke-dasharray=""#)?;
            for (i, d) in stroke.dash.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write!(out, "{}", Num(*d))?;
            }
            out.write_char('"')?;
        }
        if stroke.round_cap {
            out.write_str(r#" stroke-linecap="round""#)?;
        }
    }
    if style.opacity < 1.0 {
        write!(out, r#" opacity="{}""#, Num(style.opacity))?;
    }
    if let Some(filter) = &style.filter {
        write!(out, r##" filter="url(#{})""##, Escaped(filter))?;
    }
    Ok(())
}

fn write_point(out: &mut impl fmt::Write, p: Point) -> fmt::Result {
    write!(out, "{},{}", Num(p.x), Num(p.y))
}

/// Finite number with at most three decimals and no trailing zeros.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() {
            return f.write_str("0");
        }
        let s = format!("{:.3}", self.0);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        match s {
            "-0" | "" => f.write_str("0"),
            s => f.write_str(s),
        }
    }
}

struct Matrix(Affine);

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0.as_coeffs();
        write!(
            f,
            "matrix({} {} {} {} {} {})",
            Num6(a),
            Num6(b),
            Num6(c),
            Num6(d),
            Num(e),
            Num(g)
        )
    }
}

/// Matrix coefficients need more precision than coordinates.
struct Num6(f64);

impl fmt::Display for Num6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() {
            return f.write_str("0");
        }
        let s = format!("{:.6}", self.0);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        match s {
            "-0" | "" => f.write_str("0"),
            s => f.write_str(s),
        }
    }
}

struct Css(Color);

impl fmt::Display for Css {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Color::Rgb { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Color::Rgba { r, g, b, a } => write!(f, "rgba({r},{g},{b},{})", Num(a)),
            Color::Hsla { h, s, l, a } if a >= 1.0 => {
                write!(f, "hsl({},{}%,{}%)", Num(h), Num(s), Num(l))
            }
            Color::Hsla { h, s, l, a } => {
                write!(f, "hsla({},{}%,{}%,{})", Num(h), Num(s), Num(l), Num(a))
            }
        }
    }
}

struct PaintAttr<'a>(&'a Paint);

impl fmt::Display for PaintAttr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Paint::None => f.write_str("none"),
            Paint::Color(c) => write!(f, "{}", Css(*c)),
            Paint::Gradient(id) => write!(f, "url(#{})", Escaped(id)),
        }
    }
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;
