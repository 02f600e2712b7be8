use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_frame_time_is_exact_for_whole_rates() {
    let fps = Fps::whole(30);
    assert_eq!(fps.frames_to_secs(90), 3.0);
    assert!((Fps::new(30000, 1001).unwrap().frames_to_secs(30000) - 1001.0).abs() < 1e-9);
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn canvas_center_and_validation() {
    assert_eq!(Canvas::HD.center(), Point::new(640.0, 360.0));
    assert!(Canvas::new(0, 720).is_err());
}

#[test]
fn frame_offset_is_signed() {
    assert_eq!(FrameIndex(10).offset_from(25.0), -15.0);
    assert_eq!(FrameIndex(30).offset_from(0.0), 30.0);
}
