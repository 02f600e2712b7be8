use super::*;

#[test]
fn table_partitions_the_frame_axis() {
    assert_eq!(EPOCHS[0].start_frame, 0);
    for pair in EPOCHS.windows(2) {
        assert_eq!(pair[0].end_frame, pair[1].start_frame, "{}", pair[0].name_en);
        assert_eq!(pair[0].end_time, pair[1].start_time, "{}", pair[0].name_en);
        assert!(pair[0].frames() > 0);
    }
}

#[test]
fn epoch_lookup_by_frame() {
    assert_eq!(epoch_at(FrameIndex(0)).name_en, "Planck Epoch");
    assert_eq!(epoch_at(FrameIndex(10)).name_en, "GUT Epoch");
    assert_eq!(epoch_at(FrameIndex(25)).name_en, "Inflation");
    assert_eq!(epoch_at(FrameIndex(25)).name, "暴胀时期");
    assert_eq!(epoch_at(FrameIndex(599)).name_en, "Galaxy Formation");
    assert_eq!(epoch_at(FrameIndex(1000)).name_en, "Galaxy Formation");
}

#[test]
fn epoch_lookup_is_monotonic() {
    let index = |f: u64| {
        EPOCHS
            .iter()
            .position(|e| std::ptr::eq(e, epoch_at(FrameIndex(f))))
            .unwrap()
    };
    let mut prev = 0;
    for f in 0..700 {
        let i = index(f);
        assert!(i >= prev, "frame {f}");
        prev = i;
    }
    assert_eq!(prev, EPOCHS.len() - 1);
}

#[test]
fn physical_time_is_log_interpolated() {
    assert_eq!(physical_time(FrameIndex(0)), 1e-50);
    let at_boundary = physical_time(FrameIndex(10));
    assert!((at_boundary / 1e-43 - 1.0).abs() < 1e-9);
    // Halfway through Inflation: geometric mean of 1e-36 and 1e-32.
    let mid = physical_time(FrameIndex(30));
    assert!((mid / 1e-34 - 1.0).abs() < 1e-9, "{mid}");
}

#[test]
fn physical_time_increases_and_saturates() {
    let mut prev = 0.0;
    for f in 0..600 {
        let t = physical_time(FrameIndex(f));
        assert!(t > prev, "frame {f}");
        prev = t;
    }
    assert_eq!(physical_time(FrameIndex(600)), 13.8e9 * YEAR);
    assert_eq!(physical_time(FrameIndex(5000)), 13.8e9 * YEAR);
}
