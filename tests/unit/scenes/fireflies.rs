use super::*;
use crate::foundation::core::Fps;

const EPS: f64 = 1e-6;

fn short_spec(frames: u64) -> SceneSpec {
    SceneSpec::hd30(ID, frames)
}

fn schedule(frames: u64) -> FireflySchedule {
    FireflySchedule::build(&DigitSequence::PI, &short_spec(frames)).unwrap()
}

#[test]
fn first_firefly_spawns_at_frame_zero() {
    let s = schedule(300);
    let first = &s.spawns()[0];
    assert_eq!((first.id, first.spawn_frame), (0, 0));
    assert_eq!(first.spawn_time, 0.0);
}

#[test]
fn spawn_gaps_follow_the_interval_range() {
    let s = schedule(3600);
    assert!(s.spawns().len() > 10);
    for (i, pair) in s.spawns().windows(2).enumerate() {
        assert_eq!(pair[1].id, i as u64 + 1);
        let gap = pair[1].spawn_time - pair[0].spawn_time;
        assert!((1.0..5.0 + 1.0 / 30.0).contains(&gap), "gap {gap}");
    }
}

#[test]
fn spawn_attributes_are_in_range() {
    for r in schedule(3600).spawns() {
        assert!((3.0..8.0).contains(&r.size));
        assert!((0.4..1.0).contains(&r.base_brightness));
        assert!((10.0..50.0).contains(&r.lifetime));
        assert!((0.3..1.5).contains(&r.turn_speed));
        assert!((0.3..0.8).contains(&r.brightness_modifier));
        let speed = r.velocity.hypot();
        assert!((15.0 - EPS..45.0).contains(&speed), "speed {speed}");
        assert!(r.position.x.is_finite() && r.position.y.is_finite());
    }
}

#[test]
fn schedule_is_reproducible() {
    assert_eq!(schedule(1200).spawns(), schedule(1200).spawns());
}

#[test]
fn expired_fireflies_are_absent() {
    let s = schedule(2400);
    let r = &s.spawns()[0];
    let expiry = (0..)
        .find(|&f| f as f64 / 30.0 - r.spawn_time >= r.lifetime)
        .unwrap();
    let ids = |f: u64| -> Vec<u64> {
        s.alive_at(FrameIndex(f))
            .iter()
            .map(|ff| ff.record.id)
            .collect()
    };
    assert!(ids(expiry - 1).contains(&0));
    assert!(!ids(expiry).contains(&0));
    assert!(!ids(expiry + 1).contains(&0));
}

#[test]
fn nothing_is_alive_before_its_spawn_frame() {
    let s = schedule(900);
    let second = s.spawns()[1].spawn_frame;
    assert!(
        s.alive_at(FrameIndex(second - 1))
            .iter()
            .all(|ff| ff.record.id == 0)
    );
    assert_eq!(s.spawned_by(FrameIndex(second)).len(), 2);
}

#[test]
fn step_clamps_and_turns_inward() {
    let size = (100.0, 50.0);
    let s = FireflyState {
        position: Point::new(95.0, 5.0),
        velocity: Vec2::new(60.0, -60.0),
    }
    .step(0.1, size, 3.0);
    assert_eq!(s.position, Point::new(97.0, 3.0));
    assert_eq!(s.velocity, Vec2::new(-60.0, 60.0));

    // Already moving inward: the sign is kept.
    let s = FireflyState {
        position: Point::new(-20.0, 25.0),
        velocity: Vec2::new(10.0, 0.0),
    }
    .step(0.1, size, 3.0);
    assert_eq!(s.position, Point::new(3.0, 25.0));
    assert_eq!(s.velocity.x, 10.0);
}

#[test]
fn inverted_band_collapses_to_midpoint() {
    let s = FireflyState {
        position: Point::new(1.0, 1.0),
        velocity: Vec2::new(5.0, -5.0),
    }
    .step(1.0 / 30.0, (20.0, 20.0), 15.0);
    assert_eq!(s.position, Point::new(10.0, 10.0));
    assert_eq!(reflect_axis(1.0, 5.0, 1.0 / 30.0, 15.0, 5.0, 40).0, 10.0);
}

#[test]
fn closed_form_matches_sequential_stepping() {
    let dt = 1.0 / 30.0;
    let cases = [
        (100.0, 37.3, 12.5, 1267.5),
        (640.0, -41.7, 20.1, 699.9),
        (-50.0, -22.2, 9.0, 711.0),
        (2000.0, 18.9, 15.0, 1265.0),
        (5.0, 3.3, 7.0, 7.0),
    ];
    for (x0, v0, lo, hi) in cases {
        let (mut x, mut v) = (x0, v0);
        for n in 1..=6000u64 {
            (x, v) = step_axis(x, v, dt, (lo, hi));
            let (cx, cv) = reflect_axis(x0, v0, dt, lo, hi, n);
            assert!((cx - x).abs() < EPS, "x0={x0} n={n}: {cx} vs {x}");
            assert_eq!(cv, v, "x0={x0} n={n}");
        }
    }
    assert_eq!(reflect_axis(3.0, 9.0, dt, 0.0, 10.0, 0), (3.0, 9.0));
    assert_eq!(reflect_axis(3.0, 0.0, dt, 0.0, 10.0, 500), (3.0, 0.0));
}

#[test]
fn scheduled_state_matches_stepping_from_spawn() {
    let s = schedule(1800);
    let frame = FrameIndex(1500);
    let dt = Fps::whole(30).frame_duration_secs();
    for ff in s.alive_at(frame) {
        let r = ff.record;
        let mut state = FireflyState {
            position: r.position,
            velocity: r.velocity,
        };
        for _ in r.spawn_frame..=frame.0 {
            state = state.step(dt, (1280.0, 720.0), r.margin());
        }
        assert!((state.position - ff.state.position).hypot() < EPS);
        assert_eq!(state.velocity, ff.state.velocity);
        let m = r.margin();
        assert!((m..=1280.0 - m).contains(&ff.state.position.x));
        assert!((m..=720.0 - m).contains(&ff.state.position.y));
    }
}

#[test]
fn movement_pick_uses_shifted_digit() {
    let seq = DigitSequence::PI;
    // Digit 0 is 3, digit 1 is 1.
    assert_eq!(MovementType::pick(&seq, 0, 0.0), MovementType::Outward);
    assert_eq!(MovementType::pick(&seq, 0, 10.0), MovementType::RandomTurn);
    assert_eq!(MovementType::Inward.as_str(), "inward");
}

#[test]
fn spawn_frame_scene_has_one_invisible_firefly() {
    let scene = Fireflies::new(short_spec(90), DigitSequence::PI)
        .unwrap()
        .sample(FrameIndex(0))
        .unwrap();
    assert_eq!((scene.width, scene.height), (1280, 720));
    assert!(scene.defs.iter().any(|d| d.id() == "glow-0"));
    assert!(scene.defs.iter().any(|d| d.id() == "blur"));
    assert_eq!(scene.nodes.len(), 3);
    let Node::Group(g) = &scene.nodes[0] else {
        panic!("expected firefly group");
    };
    let Node::Circle(glow) = &g.children[0] else {
        panic!("expected glow circle");
    };
    assert_eq!(glow.style.opacity, 0.0);
    let Node::Text(hud) = &scene.nodes[1] else {
        panic!("expected hud text");
    };
    assert_eq!(hud.content, "萤火虫数量: 1 | 时间: 0.0s");
}

#[test]
fn mid_life_firefly_is_lit() {
    let ff = Fireflies::new(short_spec(900), DigitSequence::PI).unwrap();
    let alive = ff.schedule().alive_at(FrameIndex(300));
    assert!(alive.iter().any(|f| f.opacity > 0.1));
    for f in &alive {
        let bound = f.record.base_brightness * 1.0 + EPS;
        assert!((0.0..=bound).contains(&f.opacity));
    }
    assert_eq!(Fireflies::default_spec().duration_frames, 54_000);
}
