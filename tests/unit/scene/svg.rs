use super::*;
use crate::scene::graph::{Styled, Stroke};

#[test]
fn numbers_are_trimmed() {
    assert_eq!(Num(1.0).to_string(), "1");
    assert_eq!(Num(2.5).to_string(), "2.5");
    assert_eq!(Num(0.12345).to_string(), "0.123");
    assert_eq!(Num(-0.0001).to_string(), "0");
    assert_eq!(Num(f64::NAN).to_string(), "0");
    assert_eq!(Num(-12.0).to_string(), "-12");
}

#[test]
fn colors_use_css_notation() {
    assert_eq!(Css(Color::hex(0xff6b6b)).to_string(), "#ff6b6b");
    assert_eq!(Css(Color::rgba(0, 0, 0, 0.3)).to_string(), "rgba(0,0,0,0.3)");
    assert_eq!(Css(Color::hsl(120.0, 70.0, 35.0)).to_string(), "hsl(120,70%,35%)");
    assert_eq!(
        Css(Color::hsla(40.0, 100.0, 60.0, 0.4)).to_string(),
        "hsla(40,100%,60%,0.4)"
    );
}

#[test]
fn document_structure() {
    let mut scene = Scene::new(100, 50).with_background(Color::hex(0x1a1a2e));
    scene.def(Def::Blur {
        id: "blur".into(),
        std_dev: 2.0,
    });
    scene.push(
        Circle::new(10.0, 20.0, 5.0)
            .fill(Color::WHITE)
            .opacity(0.5)
            .filter("blur"),
    );
    scene.push(
        Line::new(0.0, 0.0, 10.0, 10.0)
            .stroke(Stroke::new(Color::hex(0xaaaaaa), 3.0).dashed(&[5.0, 5.0]).round()),
    );
    let svg = to_svg(&scene);
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"50\""));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("<defs><filter id=\"blur\""));
    assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"100\" height=\"50\" fill=\"#1a1a2e\"/>"));
    assert!(svg.contains(
        "<circle cx=\"10\" cy=\"20\" r=\"5\" fill=\"#ffffff\" opacity=\"0.5\" filter=\"url(#blur)\"/>"
    ));
    assert!(svg.contains("stroke-dasharray=\"5,5\" stroke-linecap=\"round\""));
    assert!(svg.contains("fill=\"none\""));
}

#[test]
fn view_box_wraps_nodes_in_fit_transform() {
    let mut scene = Scene::new(200, 100).with_view_box(100.0, 100.0);
    scene.push(Rect::new(0.0, 0.0, 100.0, 100.0));
    let svg = to_svg(&scene);
    assert!(svg.contains("<g transform=\"matrix(1 0 0 1 50 0)\">"), "{svg}");
}

#[test]
fn text_is_escaped() {
    let mut scene = Scene::new(10, 10);
    scene.push(Text::new(1.0, 2.0, "a<b & \"c\"", 12.0).bold().centered());
    let svg = to_svg(&scene);
    assert!(svg.contains(">a&lt;b &amp; &quot;c&quot;</text>"));
    assert!(svg.contains("text-anchor=\"middle\""));
    assert!(svg.contains("dominant-baseline=\"middle\""));
    assert!(svg.contains("font-weight=\"bold\""));
}

#[test]
fn output_parses_with_usvg() {
    let mut scene = Scene::new(64, 64).with_background(Paint::gradient("sky"));
    scene.def(Def::LinearGradient {
        id: "sky".into(),
        from: Point::new(0.0, 0.0),
        to: Point::new(0.0, 1.0),
        stops: vec![
            GradientStop::new(0.0, Color::hex(0x0a0a1a)),
            GradientStop::with_opacity(1.0, Color::hex(0x0d0d1a), 0.5),
        ],
    });
    scene.def(Def::Glow {
        id: "glow".into(),
        std_dev: 3.0,
    });
    scene.push(
        Group::at(32.0, 32.0)
            .opacity(0.8)
            .child(
                Circle::new(0.0, 0.0, 10.0)
                    .fill(Color::hsla(30.0, 100.0, 60.0, 0.6))
                    .filter("glow"),
            )
            .child(Polygon::new([
                Point::new(0.0, 0.0),
                Point::new(-10.0, -5.0),
                Point::new(-10.0, 5.0),
            ])),
    );
    let svg = to_svg(&scene);
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 64.0);
}
