mod bezier;
mod chain;
mod core;
mod diagnostics;
mod mesh;
mod sample;
mod tube;

pub use bezier::{
    CubicBezier3, Curve3, QuadraticBezier3, cubic, lerp, quadratic, quadratic_derivative,
};
pub use chain::{ChainError, ChainSegment, CurveChain, MoveKind, PendingSegment, PointId};
pub use self::core::{Point3, Tolerance, Vec3};
pub use diagnostics::TubeDiagnostics;
pub use mesh::TubeMesh;
pub use sample::{
    DEFAULT_MARCH_STEP, SampleError, sample_curve, sample_curve_into, sample_curve_with_step,
};
pub use tube::{
    TransportFrame, TubeError, TubeOptions, build_tube, build_tube_with_tolerance,
    transport_frames,
};

#[cfg(test)]
mod tests;
