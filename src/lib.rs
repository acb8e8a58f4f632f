#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Interactive curve sculpting and tube skinning engine.
//!
//! The crate models a chain of cubic Bézier segments whose control points
//! can be dragged live, extended by extrusion, and skinned into a tube mesh
//! with a continuously-oriented cross-section. Scene management, picking,
//! and rendering are the host's concern; the engine exposes sample and mesh
//! buffers and nothing else.

pub mod geom;
pub mod session;

pub use geom::{
    ChainError, ChainSegment, CubicBezier3, Curve3, CurveChain, MoveKind, PendingSegment, Point3,
    PointId, QuadraticBezier3, SampleError, Tolerance, TransportFrame, TubeDiagnostics, TubeError,
    TubeMesh, TubeOptions, Vec3, build_tube, build_tube_with_tolerance, sample_curve,
    sample_curve_with_step, transport_frames,
};
pub use session::{ConfigError, SculptConfig, SculptSession, SessionError};
