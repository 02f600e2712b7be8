use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn interpolator_multi_point_envelope() {
    let env = Interpolator::new(
        &[0.0, 0.1, 0.8, 1.0],
        &[0.0, 1.0, 1.0, 0.0],
        Extrapolation::CLAMP_RIGHT,
    )
    .unwrap();
    assert_eq!(env.sample(0.0), 0.0);
    assert!(approx(env.sample(0.05), 0.5));
    assert_eq!(env.sample(0.1), 1.0);
    assert_eq!(env.sample(0.5), 1.0);
    assert!(approx(env.sample(0.9), 0.5));
    assert_eq!(env.sample(1.0), 0.0);
    assert_eq!(env.sample(3.0), 0.0);
    // Left side extends the first segment's slope.
    assert!(approx(env.sample(-0.1), -1.0));
}

#[test]
fn interpolator_extrapolation_modes() {
    let ext = Interpolator::new(&[0.0, 10.0], &[0.0, 1.0], Extrapolation::EXTEND).unwrap();
    assert!(approx(ext.sample(20.0), 2.0));
    assert!(approx(ext.sample(-10.0), -1.0));

    let clamp = Interpolator::new(&[0.0, 10.0], &[0.0, 1.0], Extrapolation::CLAMP).unwrap();
    assert_eq!(clamp.sample(20.0), 1.0);
    assert_eq!(clamp.sample(-10.0), 0.0);

    let ident = Interpolator::new(
        &[0.0, 10.0],
        &[0.0, 1.0],
        Extrapolation {
            left: Extrapolate::Identity,
            right: Extrapolate::Identity,
        },
    )
    .unwrap();
    assert_eq!(ident.sample(20.0), 20.0);
    assert_eq!(ident.sample(-4.0), -4.0);
}

#[test]
fn interpolator_rejects_bad_points() {
    assert!(Interpolator::new(&[0.0], &[0.0], Extrapolation::CLAMP).is_err());
    assert!(Interpolator::new(&[0.0, 1.0], &[0.0], Extrapolation::CLAMP).is_err());
    assert!(Interpolator::new(&[1.0, 1.0], &[0.0, 1.0], Extrapolation::CLAMP).is_err());
    assert!(Interpolator::new(&[2.0, 1.0], &[0.0, 1.0], Extrapolation::CLAMP).is_err());
    assert!(Interpolator::new(&[0.0, f64::INFINITY], &[0.0, 1.0], Extrapolation::CLAMP).is_err());
    assert!(interpolate(0.5, &[0.0, 1.0], &[0.0, 4.0], Extrapolation::CLAMP).is_ok());
}

#[test]
fn interpolator_nan_input_is_total() {
    let m = Interpolator::new(&[0.0, 1.0], &[3.0, 4.0], Extrapolation::EXTEND).unwrap();
    assert_eq!(m.sample(f64::NAN), 3.0);
    assert_eq!(remap(f64::NAN, (0.0, 1.0), (3.0, 4.0), Extrapolation::EXTEND), 3.0);
}

#[test]
fn linear_clamp_before_delay_is_start_of_range() {
    for frame in [0.0, 10.0, 49.0] {
        assert_eq!(linear_clamp(frame, 50.0, 20.0, (0.0, 1.0)), 0.0);
    }
    assert!(approx(linear_clamp(60.0, 50.0, 20.0, (0.0, 1.0)), 0.5));
    assert_eq!(linear_clamp(70.0, 50.0, 20.0, (0.0, 1.0)), 1.0);
    assert_eq!(linear_clamp(7000.0, 50.0, 20.0, (0.0, 1.0)), 1.0);
    assert_eq!(linear_clamp(300.0, 0.0, 300.0, (-0.05, 0.05)), 0.05);
}

#[test]
fn linear_clamp_zero_span_is_a_step() {
    assert_eq!(linear_clamp(9.0, 10.0, 0.0, (0.0, 1.0)), 0.0);
    assert_eq!(linear_clamp(10.0, 10.0, 0.0, (0.0, 1.0)), 1.0);
}

#[test]
fn smoothstep_shape() {
    assert_eq!(smoothstep(20.0, 40.0, 10.0), 0.0);
    assert_eq!(smoothstep(20.0, 40.0, 20.0), 0.0);
    assert!(approx(smoothstep(20.0, 40.0, 30.0), 0.5));
    assert_eq!(smoothstep(20.0, 40.0, 40.0), 1.0);
    assert_eq!(smoothstep(20.0, 40.0, 400.0), 1.0);
    assert_eq!(smoothstep(5.0, 5.0, 4.0), 0.0);
    assert_eq!(smoothstep(5.0, 5.0, 5.0), 1.0);
}
