//! Approximate arc-length resampling of a parametric curve.
//!
//! The sampler marches the curve parameter with a small fixed step,
//! accumulating chord length, and emits a point each time the accumulated
//! distance reaches the target spacing. Spacing is only approximately
//! uniform: the error is bounded by one marching step times the local
//! parametric speed, not by an analytic arc-length formula.

use super::bezier::Curve3;
use super::core::Point3;

/// Default parameter step for the arc-length march.
pub const DEFAULT_MARCH_STEP: f64 = 0.01;

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("target spacing must be finite and > 0")]
    InvalidSpacing,
    #[error("marching step must be finite and > 0")]
    InvalidStep,
}

/// Sample `curve` at approximately uniform arc-length spacing.
///
/// The curve's start point is not part of the output; the first emitted
/// sample lies roughly `spacing` along the curve, and the exact curve
/// endpoint is appended so the tail is always represented. Deterministic:
/// identical inputs always produce the identical sequence.
pub fn sample_curve<C: Curve3 + ?Sized>(
    curve: &C,
    spacing: f64,
) -> Result<Vec<Point3>, SampleError> {
    sample_curve_with_step(curve, spacing, DEFAULT_MARCH_STEP)
}

pub fn sample_curve_with_step<C: Curve3 + ?Sized>(
    curve: &C,
    spacing: f64,
    step: f64,
) -> Result<Vec<Point3>, SampleError> {
    let mut samples = Vec::new();
    sample_curve_into(curve, spacing, step, &mut samples)?;
    Ok(samples)
}

/// Like [`sample_curve_with_step`], but overwrites `samples` wholesale so a
/// caller resampling on every edit can reuse one buffer per segment.
pub fn sample_curve_into<C: Curve3 + ?Sized>(
    curve: &C,
    spacing: f64,
    step: f64,
    samples: &mut Vec<Point3>,
) -> Result<(), SampleError> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(SampleError::InvalidSpacing);
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(SampleError::InvalidStep);
    }

    let (start, end) = curve.endpoints();

    samples.clear();
    let mut t = 0.0;
    let mut last = start;
    let mut distance = 0.0;

    while t <= 1.0 {
        t += step;
        let mut p = curve.point_at(t);
        distance += last.distance_to(p);

        if distance >= spacing {
            // Roll the parameter back by the overshoot fraction and
            // re-evaluate; the rollback is strictly smaller than one step,
            // so the march always advances.
            let f = (1.0 - (spacing / distance).clamp(0.0, 1.0)) * step;
            t -= f;
            p = curve.point_at(t);
            distance = 0.0;
            samples.push(p);
        }

        last = p;
    }

    if distance > 0.0 {
        samples.push(end);
    }

    Ok(())
}
