use super::*;

#[test]
fn pi_prefix_and_cycle() {
    let pi = DigitSequence::PI;
    assert_eq!(pi.len(), 4823);
    let head: Vec<u8> = (0..8).map(|i| pi.digit_at(i)).collect();
    assert_eq!(head, vec![3, 1, 4, 1, 5, 9, 2, 6]);
    assert_eq!(pi.digit_at(pi.len() as u64), 3);
    assert_eq!(pi.digit_at(pi.len() as u64 * 5 + 2), 4);
    // Zero digits are kept as-is.
    assert_eq!(pi.digit_at(32), 0);
}

#[test]
fn uniform_stays_in_half_open_range() {
    let pi = DigitSequence::PI;
    for i in 0..2000 {
        let v = pi.uniform(i, 3.0, 8.0);
        assert!((3.0..8.0).contains(&v), "i={i} v={v}");
        let t = pi.uniform_timed(i, i as f64 * 33.3, 1.0, 5.0);
        assert!((1.0..5.0).contains(&t), "i={i} t={t}");
    }
    let nine = DigitSequence::new("9").unwrap();
    assert!(nine.uniform(0, 0.0, 1.0) < 1.0);
    let zero = DigitSequence::new("0").unwrap();
    assert!(zero.uniform(0, 0.0, 1.0) > 0.0);
}

#[test]
fn outputs_are_bit_reproducible() {
    let pi = DigitSequence::PI;
    for i in [0u64, 17, 1234, u64::MAX] {
        assert_eq!(pi.digit_at(i), pi.digit_at(i));
        assert_eq!(
            pi.uniform(i, -1.0, 1.0).to_bits(),
            pi.uniform(i, -1.0, 1.0).to_bits()
        );
        assert_eq!(
            pi.uniform_timed(i, 4567.0, 0.0, 360.0).to_bits(),
            pi.uniform_timed(i, 4567.0, 0.0, 360.0).to_bits()
        );
        assert_eq!(
            pi.normal(i, 4567.0, 640.0, 213.0).to_bits(),
            pi.normal(i, 4567.0, 640.0, 213.0).to_bits()
        );
    }
}

#[test]
fn normal_is_finite_and_centered() {
    let pi = DigitSequence::PI;
    let n = 3000;
    let mut sum = 0.0;
    for i in 0..n {
        let v = pi.normal(i, 0.0, 10.0, 2.0);
        assert!(v.is_finite());
        sum += v;
    }
    let mean = sum / n as f64;
    assert!((mean - 10.0).abs() < 1.0, "mean={mean}");
    // Negative time reads from the start of the sequence.
    assert!(pi.normal(3, -5000.0, 0.0, 1.0).is_finite());
}

#[test]
fn choose_wraps_by_item_count() {
    let pi = DigitSequence::PI;
    let items = ["a", "b", "c", "d"];
    // digit 3 -> "d", digit 1 -> "b", digit 4 -> "a"
    assert_eq!(pi.choose(0, &items), Some(&"d"));
    assert_eq!(pi.choose(1, &items), Some(&"b"));
    assert_eq!(pi.choose(2, &items), Some(&"a"));
    assert_eq!(pi.choose::<u8>(0, &[]), None);
}

#[test]
fn custom_sequences_are_validated() {
    assert!(DigitSequence::new("").is_err());
    assert!(DigitSequence::new("12a4").is_err());
    let s = DigitSequence::new("27").unwrap();
    assert_eq!(s.len(), 2);
    assert_eq!(s.digit_at(3), 7);
}
