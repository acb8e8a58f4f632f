//! Bézier evaluation.
//!
//! The scalar interpolation functions operate on one axis at a time; the
//! curve types apply them per component. The parameter is deliberately not
//! clamped to [0, 1]: the arc-length marching sampler evaluates slightly
//! outside the domain while correcting an overshoot.

use super::core::{Point3, Vec3};

#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Quadratic Bézier basis on one scalar axis.
#[must_use]
pub fn quadratic(p0: f64, p1: f64, p2: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    p1 + u * u * (p0 - p1) + t * t * (p2 - p1)
}

#[must_use]
pub fn quadratic_derivative(p0: f64, p1: f64, p2: f64, t: f64) -> f64 {
    2.0 * (p1 - p0) * (1.0 - t) + 2.0 * t * (p2 - p1)
}

/// Cubic Bézier on one scalar axis, expressed as a lerp of the two
/// overlapping quadratics.
#[must_use]
pub fn cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let a = quadratic(p0, p1, p2, t);
    let b = quadratic(p1, p2, p3, t);
    lerp(a, b, t)
}

pub trait Curve3 {
    fn point_at(&self, t: f64) -> Point3;

    fn derivative_at(&self, t: f64) -> Vec3;

    /// Returns the unit tangent vector at parameter `t`.
    /// Returns `None` if the derivative is zero or degenerate.
    #[must_use]
    fn tangent_at(&self, t: f64) -> Option<Vec3> {
        self.derivative_at(t).normalized()
    }

    /// Exact start and end points of the curve.
    #[must_use]
    fn endpoints(&self) -> (Point3, Point3);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier3 {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
}

impl QuadraticBezier3 {
    #[must_use]
    pub const fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self { p0, p1, p2 }
    }
}

impl Curve3 for QuadraticBezier3 {
    fn point_at(&self, t: f64) -> Point3 {
        Point3::new(
            quadratic(self.p0.x, self.p1.x, self.p2.x, t),
            quadratic(self.p0.y, self.p1.y, self.p2.y, t),
            quadratic(self.p0.z, self.p1.z, self.p2.z, t),
        )
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        Vec3::new(
            quadratic_derivative(self.p0.x, self.p1.x, self.p2.x, t),
            quadratic_derivative(self.p0.y, self.p1.y, self.p2.y, t),
            quadratic_derivative(self.p0.z, self.p1.z, self.p2.z, t),
        )
    }

    fn endpoints(&self) -> (Point3, Point3) {
        (self.p0, self.p2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier3 {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl CubicBezier3 {
    #[must_use]
    pub const fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }
}

impl Curve3 for CubicBezier3 {
    fn point_at(&self, t: f64) -> Point3 {
        Point3::new(
            cubic(self.p0.x, self.p1.x, self.p2.x, self.p3.x, t),
            cubic(self.p0.y, self.p1.y, self.p2.y, self.p3.y, t),
            cubic(self.p0.z, self.p1.z, self.p2.z, self.p3.z, t),
        )
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        let u = 1.0 - t;
        let a = self.p1.sub_point(self.p0);
        let b = self.p2.sub_point(self.p1);
        let c = self.p3.sub_point(self.p2);
        a.mul_scalar(3.0 * u * u)
            .add(b.mul_scalar(6.0 * u * t))
            .add(c.mul_scalar(3.0 * t * t))
    }

    fn endpoints(&self) -> (Point3, Point3) {
        (self.p0, self.p3)
    }
}
