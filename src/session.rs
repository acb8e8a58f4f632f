//! Host-facing sculpting session.
//!
//! [`SculptSession`] is the crate boundary for the input and render
//! collaborators: the host feeds it point drags and extrusion targets, and
//! reads back sample sequences and tube mesh buffers. Everything is
//! synchronous and single-writer — an edit fully propagates its continuity
//! constraints and resamples before returning, so a mesh rebuild in the
//! same update cycle never renders a stale shape.

use serde::{Deserialize, Serialize};

use crate::geom::{
    ChainError, CurveChain, MoveKind, Point3, PointId, TubeDiagnostics, TubeError, TubeMesh,
    TubeOptions, build_tube,
};

/// Tunable parameters of a sculpting session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptConfig {
    /// Target arc-length spacing between curve samples.
    pub sample_spacing: f64,
    /// Segments around the tube cross-section.
    pub ring_segments: usize,
    /// Tube radius.
    pub tube_radius: f64,
    /// Length of the frame-axis debug lines.
    pub axis_line_length: f64,
}

impl Default for SculptConfig {
    fn default() -> Self {
        Self {
            sample_spacing: 0.05,
            ring_segments: 16,
            tube_radius: 0.03,
            axis_line_length: 0.04,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("sample spacing must be finite and > 0")]
    InvalidSpacing,
    #[error("ring segment count must be at least 3")]
    NotEnoughRingSegments,
    #[error("tube radius must be finite and > 0")]
    InvalidRadius,
}

impl SculptConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_spacing.is_finite() || self.sample_spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing);
        }
        if self.ring_segments < 3 {
            return Err(ConfigError::NotEnoughRingSegments);
        }
        if !self.tube_radius.is_finite() || self.tube_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// An interactive sculpting session over one curve chain.
#[derive(Debug, Clone)]
pub struct SculptSession {
    chain: CurveChain,
    config: SculptConfig,
}

impl SculptSession {
    /// Start a session from a flat control point list (four per segment).
    ///
    /// The config is validated before the chain is built, so an invalid
    /// spacing never reaches the sampler.
    pub fn new(control_points: &[Point3], config: SculptConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let chain = CurveChain::from_control_points(control_points, config.sample_spacing)?;
        log::debug!(
            "session started: {} segments, spacing {}",
            chain.segment_count(),
            config.sample_spacing
        );
        Ok(Self { chain, config })
    }

    #[must_use]
    pub fn chain(&self) -> &CurveChain {
        &self.chain
    }

    #[must_use]
    pub const fn config(&self) -> &SculptConfig {
        &self.config
    }

    /// Forward a point edit to the chain (see [`CurveChain::move_point`]).
    pub fn move_point(&mut self, point: PointId, position: Point3, kind: MoveKind) {
        self.chain.move_point(point, position, kind);
    }

    /// Rebuild the extrusion preview toward `target` (called every frame
    /// while the extrusion gizmo is dragged).
    pub fn preview_extrusion(&mut self, target: Point3) {
        self.chain.preview_extrusion(target);
    }

    /// Commit the in-flight extrusion; returns the new segment index.
    pub fn commit_extrusion(&mut self) -> Option<usize> {
        self.chain.commit_extrusion()
    }

    /// Drop the in-flight extrusion without committing.
    pub fn cancel_extrusion(&mut self) {
        self.chain.cancel_extrusion();
    }

    /// The flattened sample sequence, pending extrusion included — the
    /// host's line/point debug view of the curve.
    #[must_use]
    pub fn samples(&self) -> Vec<Point3> {
        self.chain.flatten_samples()
    }

    /// Control points in segment order for control-cage rendering.
    #[must_use]
    pub fn control_polygon(&self) -> Vec<Point3> {
        self.chain.control_polygon()
    }

    /// Skin the current samples into a tube mesh using the session config.
    pub fn build_tube(&self) -> Result<(TubeMesh, TubeDiagnostics), TubeError> {
        build_tube(
            &self.chain.flatten_samples(),
            self.config.tube_radius,
            self.tube_options(),
        )
    }

    pub fn set_tube_radius(&mut self, radius: f64) -> Result<(), ConfigError> {
        let candidate = SculptConfig {
            tube_radius: radius,
            ..self.config
        };
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    pub fn set_ring_segments(&mut self, ring_segments: usize) -> Result<(), ConfigError> {
        let candidate = SculptConfig {
            ring_segments,
            ..self.config
        };
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Change the sampling density; the whole chain is resampled.
    pub fn set_sample_spacing(&mut self, spacing: f64) -> Result<(), SessionError> {
        let candidate = SculptConfig {
            sample_spacing: spacing,
            ..self.config
        };
        candidate.validate()?;
        self.chain.set_sample_spacing(spacing)?;
        self.config = candidate;
        Ok(())
    }

    fn tube_options(&self) -> TubeOptions {
        TubeOptions {
            ring_segments: self.config.ring_segments,
            axis_line_length: self.config.axis_line_length,
            ..TubeOptions::default()
        }
    }
}
