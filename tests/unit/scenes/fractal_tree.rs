use super::*;

fn tree() -> FractalTree {
    FractalTree::new(FractalTree::default_spec()).unwrap()
}

#[test]
fn growth_and_wind_ramps() {
    assert_eq!(growth(FrameIndex(0)), 0.0);
    assert_eq!(growth(FrameIndex(100)), 0.5);
    assert_eq!(growth(FrameIndex(250)), 1.0);
    assert_eq!(wind(FrameIndex(0)), -0.05);
    assert!(wind(FrameIndex(150)).abs() < 1e-12);
    assert_eq!(wind(FrameIndex(400)), 0.05);
}

#[test]
fn zero_growth_draws_only_backdrop_and_shadow() {
    let scene = tree().sample(FrameIndex(0)).unwrap();
    assert_eq!(scene.nodes.len(), 2);
    assert!(matches!(scene.nodes[0], Node::Rect(_)));
    assert!(matches!(scene.nodes[1], Node::Ellipse(_)));
    assert!(scene.defs.is_empty());
}

#[test]
fn full_depth_tree_has_every_branch() {
    let scene = tree().sample(FrameIndex(100)).unwrap();
    let lines = scene
        .nodes
        .iter()
        .filter(|n| matches!(n, Node::Line(_)))
        .count();
    assert_eq!(lines, (1 << 11) - 1);
    assert_eq!(scene.nodes.len(), lines + 3);
}

#[test]
fn depth_is_configurable_and_bounded() {
    let shallow = tree().with_max_depth(3).unwrap();
    let scene = shallow.sample(FrameIndex(200)).unwrap();
    assert_eq!(scene.leaf_count(), 15 + 3);
    assert!(tree().with_max_depth(MAX_DEPTH_LIMIT + 1).is_err());
}

#[test]
fn children_split_and_shrink() {
    let trunk = Branch {
        start: Point::new(400.0, 600.0),
        length: 180.0,
        angle: 0.0,
        depth: 0,
        width: 12.0,
    };
    let end = trunk.end();
    assert!((end.x - 400.0).abs() < 1e-9 && (end.y - 420.0).abs() < 1e-9);

    let [left, right] = trunk.children(0.05);
    assert_eq!(left.angle, 0.4);
    assert_eq!(right.angle, -0.4);
    assert!((left.length - 126.0).abs() < 1e-9);
    assert_eq!(left.depth, 1);
    assert_eq!(left.start, end);

    let [swayed, _] = left.children(0.05);
    let sway = 0.05 * 0.5f64.sin() * 0.5;
    assert!((swayed.angle - (0.8 + sway)).abs() < 1e-12);
}

#[test]
fn tip_glow_follows_the_trunk() {
    let scene = tree().sample(FrameIndex(200)).unwrap();
    let Some(Node::Circle(tip)) = scene.nodes.iter().rev().nth(1) else {
        panic!("tip glow before the shadow");
    };
    assert!((tip.center.y - 420.0).abs() < 1e-9);
    assert_eq!(tip.radius, 8.0);
    assert_eq!(tip.style.filter.as_deref(), Some("glow"));
}
