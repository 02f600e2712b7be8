use super::*;

fn unit(frame: f64) -> f64 {
    spring(SpringArgs::unit(frame, 30.0, 30.0))
}

#[test]
fn unit_spring_reference_points() {
    assert_eq!(unit(0.0), 0.0);
    assert_eq!(unit(30.0), 1.0);
    let mid = unit(15.0);
    assert!(mid > 0.0 && mid < 1.0, "mid={mid}");
}

#[test]
fn before_release_yields_from() {
    for frame in [-1000.0, -1.0, -0.5, 0.0, f64::NAN] {
        let args = SpringArgs {
            frame,
            fps: 30.0,
            from: -100.0,
            to: 1180.0,
            duration_in_frames: Some(120.0),
            config: SpringConfig::default(),
        };
        assert_eq!(spring(args), -100.0);
    }
}

#[test]
fn past_completion_is_idempotent() {
    for frame in [30.0, 31.0, 45.5, 1e6] {
        assert_eq!(unit(frame), 1.0);
    }
}

#[test]
fn critically_damped_default_is_monotonic_without_overshoot() {
    assert!((SpringConfig::default().damping_ratio() - 1.0).abs() < 1e-12);
    let mut prev = 0.0;
    for f in 0..=40 {
        let v = unit(f as f64);
        assert!(v >= prev, "frame {f}: {v} < {prev}");
        assert!(v <= 1.0);
        prev = v;
    }
}

#[test]
fn settle_frames_for_default_config_at_30fps() {
    assert_eq!(SpringConfig::default().settle_frames(30.0), 23);
}

#[test]
fn natural_duration_when_unstretched() {
    let args = SpringArgs {
        duration_in_frames: None,
        ..SpringArgs::unit(23.0, 30.0, 0.0)
    };
    assert_eq!(spring(args), 1.0);
    let early = SpringArgs {
        frame: 5.0,
        ..args
    };
    let v = spring(early);
    assert!(v > 0.0 && v < 1.0);
}

#[test]
fn underdamped_overshoots_unless_clamped() {
    let wobbly = SpringConfig {
        damping: 10.0,
        ..SpringConfig::default()
    };
    let sample = |config: SpringConfig, frame: f64| {
        spring(SpringArgs {
            frame,
            fps: 30.0,
            from: 0.0,
            to: 1.0,
            duration_in_frames: None,
            config,
        })
    };
    let peak = (0..40)
        .map(|f| sample(wobbly, f as f64))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.05, "peak={peak}");

    let clamped = SpringConfig {
        overshoot_clamping: true,
        ..wobbly
    };
    assert!((0..40).all(|f| sample(clamped, f as f64) <= 1.0));
}

#[test]
fn overdamped_response_stays_in_unit_interval() {
    let heavy = SpringConfig {
        damping: 40.0,
        ..SpringConfig::default()
    };
    assert!(heavy.damping_ratio() > 1.0);
    for i in 0..200 {
        let x = heavy.response(i as f64 * 0.05);
        assert!((0.0..=1.0).contains(&x), "t={} x={x}", i as f64 * 0.05);
    }
}

#[test]
fn degenerate_duration_and_fps_do_not_produce_nan() {
    let args = SpringArgs::unit(5.0, 0.0, 30.0);
    assert!(spring(args).is_finite());
    let args = SpringArgs::unit(5.0, 30.0, 0.0);
    assert_eq!(spring(args), 1.0);
}

#[test]
fn spring_progress_respects_delay() {
    let fps = Fps::whole(30);
    assert_eq!(spring_progress(FrameIndex(10), 60.0, fps, 30.0), 0.0);
    assert_eq!(spring_progress(FrameIndex(60), 60.0, fps, 30.0), 0.0);
    assert_eq!(spring_progress(FrameIndex(90), 60.0, fps, 30.0), 1.0);
    let v = spring_progress(FrameIndex(70), 60.0, fps, 30.0);
    assert!(v > 0.0 && v < 1.0);
    // Far-past delays render fully settled.
    assert_eq!(spring_progress(FrameIndex(0), -1000.0, fps, 30.0), 1.0);
}
