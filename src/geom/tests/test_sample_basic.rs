use crate::geom::{
    CubicBezier3, Point3, SampleError, sample_curve, sample_curve_into, sample_curve_with_step,
};

fn quarter_turn() -> CubicBezier3 {
    CubicBezier3::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    )
}

#[test]
fn rejects_invalid_spacing() {
    let curve = quarter_turn();
    assert!(matches!(
        sample_curve(&curve, 0.0),
        Err(SampleError::InvalidSpacing)
    ));
    assert!(matches!(
        sample_curve(&curve, -0.1),
        Err(SampleError::InvalidSpacing)
    ));
    assert!(matches!(
        sample_curve(&curve, f64::NAN),
        Err(SampleError::InvalidSpacing)
    ));
}

#[test]
fn rejects_invalid_step() {
    let curve = quarter_turn();
    assert!(matches!(
        sample_curve_with_step(&curve, 0.1, 0.0),
        Err(SampleError::InvalidStep)
    ));
    assert!(matches!(
        sample_curve_with_step(&curve, 0.1, f64::INFINITY),
        Err(SampleError::InvalidStep)
    ));
}

#[test]
fn endpoint_is_always_represented() {
    let curve = quarter_turn();
    let samples = sample_curve(&curve, 0.1).expect("sampling should succeed");
    assert_eq!(samples.last().copied(), Some(curve.p3));
}

#[test]
fn spacing_is_approximately_uniform() {
    let curve = quarter_turn();
    let spacing = 0.1;
    let samples = sample_curve(&curve, spacing).expect("sampling should succeed");
    assert!(samples.len() > 10);

    // The error budget is one marching step's worth of chord: the default
    // step is 0.01 and this curve's parametric speed peaks at 3.
    let budget = 0.04;

    // The first sample sits roughly `spacing` along the curve from p0.
    assert!((curve.p0.distance_to(samples[0]) - spacing).abs() <= budget);

    // Interior spacings, excluding the final forced endpoint.
    for pair in samples[..samples.len() - 1].windows(2) {
        let d = pair[0].distance_to(pair[1]);
        assert!(
            (d - spacing).abs() <= budget,
            "spacing {d} deviates more than {budget} from {spacing}"
        );
    }
}

#[test]
fn sampling_is_deterministic() {
    let curve = quarter_turn();
    let a = sample_curve(&curve, 0.07).expect("sampling should succeed");
    let b = sample_curve(&curve, 0.07).expect("sampling should succeed");
    assert_eq!(a, b);
}

#[test]
fn buffer_reuse_matches_fresh_sampling() {
    let curve = quarter_turn();
    let fresh = sample_curve(&curve, 0.1).expect("sampling should succeed");

    let mut reused = vec![Point3::new(9.0, 9.0, 9.0); 3];
    sample_curve_into(&curve, 0.1, 0.01, &mut reused).expect("sampling should succeed");
    assert_eq!(fresh, reused);
}

#[test]
fn denser_spacing_yields_more_samples() {
    let curve = quarter_turn();
    let coarse = sample_curve(&curve, 0.2).expect("sampling should succeed");
    let fine = sample_curve(&curve, 0.05).expect("sampling should succeed");
    assert!(fine.len() > 2 * coarse.len());
}
