use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::foundation::math::{clamp01, non_negative};

/// A fully evaluated frame: canvas, shared definitions and drawable nodes in paint order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Logical coordinate space fitted into the canvas (centered, aspect preserved).
    ///
    /// `None` draws nodes directly in pixel space.
    pub view_box: Option<(f64, f64)>,
    /// Paint covering the whole canvas before any node.
    pub background: Option<Paint>,
    /// Gradients and filters referenced by id.
    pub defs: Vec<Def>,
    /// Root nodes, painted in order.
    pub nodes: Vec<Node>,
}

impl Scene {
    /// Empty scene in pixel space.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            view_box: None,
            background: None,
            defs: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Draw nodes in a `w × h` logical space.
    pub fn with_view_box(mut self, w: f64, h: f64) -> Self {
        self.view_box = Some((w, h));
        self
    }

    /// Set the canvas background.
    pub fn with_background(mut self, paint: impl Into<Paint>) -> Self {
        self.background = Some(paint.into());
        self
    }

    /// Append a definition.
    pub fn def(&mut self, def: Def) {
        self.defs.push(def);
    }

    /// Append a root node.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Append every node from `nodes`.
    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.extend(nodes);
    }

    /// Transform mapping logical (view box) coordinates onto the canvas.
    pub fn view_transform(&self) -> Affine {
        match self.view_box {
            Some((vw, vh)) if vw > 0.0 && vh > 0.0 => {
                let (w, h) = (f64::from(self.width), f64::from(self.height));
                let s = (w / vw).min(h / vh);
                Affine::translate(((w - vw * s) / 2.0, (h - vh * s) / 2.0)) * Affine::scale(s)
            }
            _ => Affine::IDENTITY,
        }
    }

    /// Count of drawable leaves (groups are traversed, not counted).
    pub fn leaf_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|n| match n {
                    Node::Group(g) => count(&g.children),
                    _ => 1,
                })
                .sum()
        }
        count(&self.nodes)
    }
}

/// sRGB color in one of the notations scenes are authored in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Color {
    /// Opaque 8-bit RGB.
    Rgb {
        /// Red.
        r: u8,
        /// Green.
        g: u8,
        /// Blue.
        b: u8,
    },
    /// 8-bit RGB with alpha in `[0, 1]`.
    Rgba {
        /// Red.
        r: u8,
        /// Green.
        g: u8,
        /// Blue.
        b: u8,
        /// Alpha.
        a: f64,
    },
    /// Hue in degrees, saturation and lightness in percent, alpha in `[0, 1]`.
    Hsla {
        /// Hue in degrees.
        h: f64,
        /// Saturation in percent.
        s: f64,
        /// Lightness in percent.
        l: f64,
        /// Alpha.
        a: f64,
    },
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub const fn hex(v: u32) -> Self {
        Self::Rgb {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }

    /// Translucent color from 8-bit channels.
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self::Rgba {
            r,
            g,
            b,
            a: clamp01(a),
        }
    }

    /// Opaque HSL color.
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::hsla(h, s, l, 1.0)
    }

    /// HSL color with alpha.
    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self::Hsla {
            h,
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
            a: clamp01(a),
        }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn parse_hex(s: &str) -> FrameloomResult<Self> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| FrameloomError::validation(format!("color '{s}' must start with '#'")))?;
        let nibble = |c: u8| -> FrameloomResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| FrameloomError::validation(format!("invalid hex color '{s}'")))
        };
        let b = digits.as_bytes();
        match b.len() {
            3 => Ok(Self::rgb(
                nibble(b[0])? * 17,
                nibble(b[1])? * 17,
                nibble(b[2])? * 17,
            )),
            6 | 8 => {
                let byte = |i: usize| -> FrameloomResult<u8> {
                    Ok(nibble(b[i])? * 16 + nibble(b[i + 1])?)
                };
                let (r, g, bl) = (byte(0)?, byte(2)?, byte(4)?);
                if b.len() == 8 {
                    Ok(Self::rgba(r, g, bl, f64::from(byte(6)?) / 255.0))
                } else {
                    Ok(Self::rgb(r, g, bl))
                }
            }
            _ => Err(FrameloomError::validation(format!(
                "hex color '{s}' must have 3, 6 or 8 digits"
            ))),
        }
    }

    /// Straight-alpha RGBA8, converting HSL when needed.
    pub fn to_rgba8(self) -> [u8; 4] {
        match self {
            Self::Rgb { r, g, b } => [r, g, b, 255],
            Self::Rgba { r, g, b, a } => [r, g, b, unit_to_u8(a)],
            Self::Hsla { h, s, l, a } => {
                let (r, g, b) = hsl_to_rgb(h, s / 100.0, l / 100.0);
                [unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a)]
            }
        }
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (clamp01(v) * 255.0).round() as u8
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = clamp01(s);
    let l = clamp01(l);
    if s == 0.0 {
        return (l, l, l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

/// Fill or stroke source.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Paint {
    /// Paint nothing.
    None,
    /// Solid color.
    Color(Color),
    /// Gradient defined in [`Scene::defs`] under this id.
    Gradient(String),
}

impl Paint {
    /// Reference a gradient by id.
    pub fn gradient(id: impl Into<String>) -> Self {
        Self::Gradient(id.into())
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

/// Stroke parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Stroke paint.
    pub paint: Paint,
    /// Line width in user units.
    pub width: f64,
    /// Dash pattern; empty for solid.
    pub dash: Vec<f64>,
    /// Round line caps instead of butt caps.
    pub round_cap: bool,
}

impl Stroke {
    /// Solid stroke.
    pub fn new(paint: impl Into<Paint>, width: f64) -> Self {
        Self {
            paint: paint.into(),
            width: non_negative(width),
            dash: Vec::new(),
            round_cap: false,
        }
    }

    /// Use a dash pattern.
    pub fn dashed(mut self, dash: &[f64]) -> Self {
        self.dash = dash.iter().copied().map(non_negative).collect();
        self
    }

    /// Use round caps.
    pub fn round(mut self) -> Self {
        self.round_cap = true;
        self
    }
}

/// Presentation attributes shared by every shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    /// Fill paint.
    pub fill: Paint,
    /// Optional stroke.
    pub stroke: Option<Stroke>,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Filter id from [`Scene::defs`].
    pub filter: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Paint::Color(Color::BLACK),
            stroke: None,
            opacity: 1.0,
            filter: None,
        }
    }
}

/// Builder methods shared by every shape through its [`Style`].
pub trait Styled: Sized {
    /// Mutable access to the shape's style.
    fn style_mut(&mut self) -> &mut Style;

    /// Set the fill.
    fn fill(mut self, paint: impl Into<Paint>) -> Self {
        self.style_mut().fill = paint.into();
        self
    }

    /// Set the stroke.
    fn stroke(mut self, stroke: Stroke) -> Self {
        self.style_mut().stroke = Some(stroke);
        self
    }

    /// Set opacity, clamped into `[0, 1]`.
    fn opacity(mut self, opacity: f64) -> Self {
        self.style_mut().opacity = clamp01(opacity);
        self
    }

    /// Apply a filter by id.
    fn filter(mut self, id: impl Into<String>) -> Self {
        self.style_mut().filter = Some(id.into());
        self
    }
}

macro_rules! styled {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Styled for $ty {
                fn style_mut(&mut self) -> &mut Style {
                    &mut self.style
                }
            }

            impl From<$ty> for Node {
                fn from(v: $ty) -> Self {
                    Node::$ty(v)
                }
            }
        )*
    };
}

styled!(Circle, Ellipse, Line, Rect, Polygon, Text);

/// Drawable tree node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Transformed, faded container.
    Group(Group),
    /// Circle.
    Circle(Circle),
    /// Axis-aligned ellipse.
    Ellipse(Ellipse),
    /// Line segment.
    Line(Line),
    /// Rectangle, optionally rounded.
    Rect(Rect),
    /// Closed polygon.
    Polygon(Polygon),
    /// Single-line text.
    Text(Text),
}

/// Container applying a transform and opacity to its children.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Group {
    /// Local-to-parent transform.
    pub transform: Affine,
    /// Group opacity in `[0, 1]`.
    pub opacity: f64,
    /// Children in paint order.
    pub children: Vec<Node>,
}

impl Group {
    /// Identity group.
    pub fn new() -> Self {
        Self {
            transform: Affine::IDENTITY,
            opacity: 1.0,
            children: Vec::new(),
        }
    }

    /// Group translated by `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new().transform(Affine::translate((x, y)))
    }

    /// Set the transform.
    pub fn transform(mut self, t: Affine) -> Self {
        self.transform = t;
        self
    }

    /// Set the opacity, clamped into `[0, 1]`.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = clamp01(opacity);
        self
    }

    /// Append a child.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append children.
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Group> for Node {
    fn from(g: Group) -> Self {
        Node::Group(g)
    }
}

/// Circle shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    /// Center.
    pub center: Point,
    /// Radius, never negative.
    pub radius: f64,
    /// Presentation.
    pub style: Style,
}

impl Circle {
    /// Circle at `(cx, cy)`; negative or NaN radii collapse to `0`.
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            center: Point::new(cx, cy),
            radius: non_negative(radius),
            style: Style::default(),
        }
    }
}

/// Ellipse shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ellipse {
    /// Center.
    pub center: Point,
    /// Horizontal radius.
    pub rx: f64,
    /// Vertical radius.
    pub ry: f64,
    /// Presentation.
    pub style: Style,
}

impl Ellipse {
    /// Ellipse at `(cx, cy)`.
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self {
            center: Point::new(cx, cy),
            rx: non_negative(rx),
            ry: non_negative(ry),
            style: Style::default(),
        }
    }
}

/// Line segment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Presentation; lines are drawn by their stroke.
    pub style: Style,
}

impl Line {
    /// Line from `(x1, y1)` to `(x2, y2)` with no fill.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
            style: Style {
                fill: Paint::None,
                ..Style::default()
            },
        }
    }
}

/// Rectangle shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Corner radius.
    pub corner_radius: f64,
    /// Presentation.
    pub style: Style,
}

impl Rect {
    /// Rectangle with top-left corner `(x, y)`.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            width: non_negative(width),
            height: non_negative(height),
            corner_radius: 0.0,
            style: Style::default(),
        }
    }

    /// Round the corners.
    pub fn rounded(mut self, radius: f64) -> Self {
        self.corner_radius = non_negative(radius);
        self
    }
}

/// Closed polygon.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon {
    /// Vertices in order.
    pub points: Vec<Point>,
    /// Presentation.
    pub style: Style,
}

impl Polygon {
    /// Polygon through `points`.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
            style: Style::default(),
        }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// Anchor at the start of the run.
    #[default]
    Start,
    /// Anchor at the middle of the run.
    Middle,
    /// Anchor at the end of the run.
    End,
}

/// Single-line text run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Text {
    /// Anchor position.
    pub position: Point,
    /// Vertical offset applied after positioning.
    pub dy: f64,
    /// Content.
    pub content: String,
    /// Font size in user units.
    pub font_size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Center the run vertically on the anchor.
    pub middle_baseline: bool,
    /// Presentation.
    pub style: Style,
}

impl Text {
    /// Text at `(x, y)` filled white.
    pub fn new(x: f64, y: f64, content: impl Into<String>, font_size: f64) -> Self {
        Self {
            position: Point::new(x, y),
            dy: 0.0,
            content: content.into(),
            font_size: non_negative(font_size),
            bold: false,
            anchor: TextAnchor::Start,
            middle_baseline: false,
            style: Style {
                fill: Paint::Color(Color::WHITE),
                ..Style::default()
            },
        }
    }

    /// Bold weight.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the anchor.
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Centered on the anchor both ways.
    pub fn centered(mut self) -> Self {
        self.anchor = TextAnchor::Middle;
        self.middle_baseline = true;
        self
    }

    /// Vertical offset.
    pub fn dy(mut self, dy: f64) -> Self {
        self.dy = dy;
        self
    }
}

/// One gradient color stop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Position in `[0, 1]`.
    pub offset: f64,
    /// Stop color.
    pub color: Color,
    /// Stop opacity in `[0, 1]`.
    pub opacity: f64,
}

impl GradientStop {
    /// Opaque stop.
    pub fn new(offset: f64, color: Color) -> Self {
        Self::with_opacity(offset, color, 1.0)
    }

    /// Stop with explicit opacity.
    pub fn with_opacity(offset: f64, color: Color, opacity: f64) -> Self {
        Self {
            offset: clamp01(offset),
            color,
            opacity: clamp01(opacity),
        }
    }
}

/// Reusable definitions referenced by id.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Def {
    /// Radial gradient over the shape's bounding box.
    RadialGradient {
        /// Reference id.
        id: String,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Linear gradient between two points in bounding-box units.
    LinearGradient {
        /// Reference id.
        id: String,
        /// Start point in `[0, 1]²`.
        from: Point,
        /// End point in `[0, 1]²`.
        to: Point,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Gaussian blur over an enlarged region.
    Blur {
        /// Reference id.
        id: String,
        /// Blur standard deviation.
        std_dev: f64,
    },
    /// Blurred copy merged under the source graphic.
    Glow {
        /// Reference id.
        id: String,
        /// Blur standard deviation.
        std_dev: f64,
    },
}

impl Def {
    /// Id used by [`Paint::Gradient`] or [`Style::filter`].
    pub fn id(&self) -> &str {
        match self {
            Def::RadialGradient { id, .. }
            | Def::LinearGradient { id, .. }
            | Def::Blur { id, .. }
            | Def::Glow { id, .. } => id,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
