use super::*;
use crate::scene::graph::{Circle, Color, Styled};

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn background_fills_canvas() {
    let scene = Scene::new(8, 6).with_background(Color::hex(0xff0000));
    let frame = Rasterizer::without_fonts().render_scene(&scene).unwrap();
    assert_eq!((frame.width, frame.height), (8, 6));
    assert_eq!(frame.data.len(), 8 * 6 * 4);
    assert!(frame.premultiplied);
    assert_eq!(pixel(&frame, 0, 0), [255, 0, 0, 255]);
    assert_eq!(pixel(&frame, 7, 5), [255, 0, 0, 255]);
}

#[test]
fn translucent_shapes_are_premultiplied() {
    let mut scene = Scene::new(16, 16);
    scene.push(Circle::new(8.0, 8.0, 8.0).fill(Color::WHITE).opacity(0.5));
    let frame = Rasterizer::without_fonts().render_scene(&scene).unwrap();
    let [r, g, b, a] = pixel(&frame, 8, 8);
    assert!((120..=136).contains(&a), "a={a}");
    assert_eq!((r, g, b), (a, a, a));
    let straight = frame.to_straight_rgba8();
    let i = ((8 * 16 + 8) * 4) as usize;
    assert_eq!(&straight[i..i + 3], &[255, 255, 255]);
    // Outside the circle stays transparent.
    assert_eq!(pixel(&frame, 0, 0), [0, 0, 0, 0]);
}

#[test]
fn straight_conversion_handles_edges() {
    let frame = FrameRGBA {
        width: 3,
        height: 1,
        data: vec![0, 0, 0, 0, 10, 20, 30, 255, 64, 32, 0, 128],
        premultiplied: true,
    };
    assert_eq!(
        frame.to_straight_rgba8(),
        vec![0, 0, 0, 0, 10, 20, 30, 255, 128, 64, 0, 128]
    );
}

#[test]
fn invalid_svg_is_a_render_error() {
    let err = Rasterizer::without_fonts()
        .rasterize_svg("<not-svg", 4, 4)
        .unwrap_err();
    assert!(matches!(err, FrameloomError::Render(_)));
    assert!(Rasterizer::without_fonts()
        .rasterize_svg(r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#, 0, 4)
        .is_err());
}
