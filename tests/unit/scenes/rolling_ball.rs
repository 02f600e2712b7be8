use super::*;
use crate::scene::graph::Node;

fn ball() -> RollingBall {
    RollingBall::new(RollingBall::default_spec()).unwrap()
}

#[test]
fn spring_moves_across_the_canvas() {
    let b = ball();
    assert_eq!(b.offset(FrameIndex(0)), -100.0);
    assert_eq!(b.offset(FrameIndex(120)), 1180.0);
    assert_eq!(b.offset(FrameIndex(500)), 1180.0);
    let mut prev = -100.0;
    for f in 1..120 {
        let x = b.offset(FrameIndex(f));
        assert!(x >= prev && x < 1180.0, "frame {f}: {x}");
        prev = x;
    }
}

#[test]
fn rotation_tracks_distance() {
    let b = ball();
    assert_eq!(b.rotation(-100.0), 0.0);
    assert!((b.rotation(1180.0) - 4.0 * PI).abs() < 1e-12);
    assert!((b.rotation(540.0) - 2.0 * PI).abs() < 1e-12);
}

#[test]
fn ball_starts_left_of_center() {
    let scene = ball().sample(FrameIndex(0)).unwrap();
    assert_eq!(scene.nodes.len(), 2);
    let Node::Group(g) = &scene.nodes[1] else {
        panic!("ball group");
    };
    assert_eq!(g.transform, Affine::translate((540.0, 360.0)));
    assert_eq!(g.children.len(), 2);
}
