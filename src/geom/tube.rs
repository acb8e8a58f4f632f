//! Tube skinning over a sampled space curve.
//!
//! Each sample gets a frame (tangent, bitangent, normal) seeded from a
//! fixed world-up axis. Near inflection points, or wherever the tangent
//! transiently aligns with up, the raw cross products flip sign between
//! adjacent samples; uncorrected, the swept cross-section flips with them
//! and the tube self-intersects. The builder carries the previous frame and
//! negates any axis whose dot with its predecessor is negative.

use super::core::{Point3, Tolerance, Vec3};
use super::diagnostics::TubeDiagnostics;
use super::mesh::TubeMesh;

/// Per-sample sweep frame. Computed transiently during a build; continuity
/// correction depends only on the immediately preceding sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportFrame {
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub normal: Vec3,
}

/// Options for controlling tube mesh generation.
#[derive(Debug, Clone, Copy)]
pub struct TubeOptions {
    /// Number of segments around the circular cross-section.
    pub ring_segments: usize,
    /// World up axis crossed against the tangent to seed each frame.
    pub up: Vec3,
    /// Length of the emitted bitangent/normal debug line segments.
    pub axis_line_length: f64,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            ring_segments: 16,
            up: Vec3::Y,
            axis_line_length: 0.04,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TubeError {
    #[error("tube requires at least 3 ring segments")]
    NotEnoughRingSegments,
    #[error("radius must be finite and > 0")]
    InvalidRadius,
    #[error("samples must have finite coordinates")]
    NonFiniteSamples,
    #[error("up axis must have non-zero length")]
    InvalidUpAxis,
}

/// Skin a tube of the given radius over an ordered sample sequence.
///
/// Each sample becomes a closed ring of `ring_segments + 1` vertices (the
/// seam vertex repeats the first angle so triangulation and UV wrapping
/// never cross the 2π boundary), and adjacent rings are stitched with two
/// triangles per column. No end caps are generated. Fewer than two samples
/// yields an empty mesh.
pub fn build_tube(
    samples: &[Point3],
    radius: f64,
    options: TubeOptions,
) -> Result<(TubeMesh, TubeDiagnostics), TubeError> {
    build_tube_with_tolerance(samples, radius, options, Tolerance::default_geom())
}

pub fn build_tube_with_tolerance(
    samples: &[Point3],
    radius: f64,
    options: TubeOptions,
    tol: Tolerance,
) -> Result<(TubeMesh, TubeDiagnostics), TubeError> {
    if options.ring_segments < 3 {
        return Err(TubeError::NotEnoughRingSegments);
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(TubeError::InvalidRadius);
    }
    if samples.iter().any(|p| !p.is_finite()) {
        return Err(TubeError::NonFiniteSamples);
    }
    if options.up.normalized().is_none() {
        return Err(TubeError::InvalidUpAxis);
    }

    let mut diagnostics = TubeDiagnostics::new();
    if samples.len() < 2 {
        return Ok((TubeMesh::default(), diagnostics));
    }

    let frames = compute_transport_frames(samples, options.up, tol, &mut diagnostics);

    let ring = options.ring_segments;
    let ring_stride = ring + 1;
    let step = 2.0 * std::f64::consts::PI / ring as f64;

    let mut positions: Vec<[f64; 3]> = Vec::with_capacity(samples.len() * ring_stride);
    let mut frame_lines: Vec<[f64; 3]> = Vec::with_capacity(samples.len() * 4);

    for (point, frame) in samples.iter().zip(&frames) {
        for r in 0..=ring {
            let theta = r as f64 * step;
            let vertex = point
                .add_vec(frame.bitangent.mul_scalar(theta.cos() * radius))
                .add_vec(frame.normal.mul_scalar(theta.sin() * radius));
            positions.push(vertex.to_array());
        }

        let scale = options.axis_line_length;
        frame_lines.push(point.to_array());
        frame_lines.push(point.add_vec(frame.bitangent.mul_scalar(scale)).to_array());
        frame_lines.push(point.to_array());
        frame_lines.push(point.add_vec(frame.normal.mul_scalar(scale)).to_array());
    }

    let mut indices: Vec<u32> = Vec::with_capacity((samples.len() - 1) * ring * 6);
    for y in 0..samples.len() - 1 {
        for x in 0..ring {
            let i0 = (y * ring_stride + x) as u32;
            let i1 = i0 + 1;
            let i2 = i0 + ring_stride as u32;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i1, i3, i2]);
        }
    }

    diagnostics.ring_count = samples.len();
    diagnostics.vertex_count = positions.len();
    diagnostics.triangle_count = indices.len() / 3;

    Ok((TubeMesh::new(positions, indices, frame_lines), diagnostics))
}

/// Compute the per-sample frames for a sample sequence.
///
/// Returns the frames plus any fallback warnings. Fewer than two points
/// yields no frames (a single point has no tangent).
#[must_use]
pub fn transport_frames(
    points: &[Point3],
    up: Vec3,
    tol: Tolerance,
) -> (Vec<TransportFrame>, Vec<String>) {
    let mut diagnostics = TubeDiagnostics::new();
    let frames = compute_transport_frames(points, up, tol, &mut diagnostics);
    (frames, diagnostics.warnings)
}

fn compute_transport_frames(
    points: &[Point3],
    up: Vec3,
    tol: Tolerance,
    diagnostics: &mut TubeDiagnostics,
) -> Vec<TransportFrame> {
    if points.len() < 2 {
        if !points.is_empty() {
            diagnostics
                .warnings
                .push("fewer than 2 samples; no frames computed".to_string());
        }
        return Vec::new();
    }

    let mut frames: Vec<TransportFrame> = Vec::with_capacity(points.len());
    let mut prev_bitangent = Vec3::ZERO;
    let mut prev_normal = Vec3::ZERO;

    for i in 0..points.len() {
        // Forward difference toward the next sample, backward at the tail.
        let raw_tangent = if i == points.len() - 1 {
            points[i].sub_point(points[i - 1])
        } else {
            points[i + 1].sub_point(points[i])
        };

        let frame = match raw_tangent.normalized() {
            Some(tangent) => {
                let raw_bitangent = up.cross(tangent);
                if tol.is_zero_vec3(raw_bitangent) {
                    // Tangent momentarily parallel to up; carry the previous
                    // axes through the singularity.
                    diagnostics.degenerate_frame_count += 1;
                    match frames.last() {
                        Some(prev) => TransportFrame { tangent, ..*prev },
                        None => TransportFrame {
                            tangent,
                            ..fallback_frame(up)
                        },
                    }
                } else {
                    let raw_normal = tangent.cross(raw_bitangent);
                    match (raw_bitangent.normalized(), raw_normal.normalized()) {
                        (Some(mut bitangent), Some(mut normal)) => {
                            if bitangent.dot(prev_bitangent) < 0.0 {
                                bitangent = -bitangent;
                                diagnostics.flipped_bitangent_count += 1;
                            }
                            if normal.dot(prev_normal) < 0.0 {
                                normal = -normal;
                                diagnostics.flipped_normal_count += 1;
                            }
                            TransportFrame {
                                tangent,
                                bitangent,
                                normal,
                            }
                        }
                        _ => {
                            diagnostics.degenerate_frame_count += 1;
                            match frames.last() {
                                Some(prev) => TransportFrame { tangent, ..*prev },
                                None => TransportFrame {
                                    tangent,
                                    ..fallback_frame(up)
                                },
                            }
                        }
                    }
                }
            }
            None => {
                // Duplicate consecutive samples leave the tangent undefined;
                // reuse the previous frame wholesale.
                diagnostics.degenerate_tangent_count += 1;
                match frames.last() {
                    Some(prev) => *prev,
                    None => fallback_frame(up),
                }
            }
        };

        prev_bitangent = frame.bitangent;
        prev_normal = frame.normal;
        frames.push(frame);
    }

    if diagnostics.degenerate_tangent_count > 0 {
        let count = diagnostics.degenerate_tangent_count;
        diagnostics
            .warnings
            .push(format!("{count} degenerate tangents; previous frame reused"));
        log::warn!("tube build hit {count} degenerate tangents");
    }
    if diagnostics.degenerate_frame_count > 0 {
        let count = diagnostics.degenerate_frame_count;
        diagnostics.warnings.push(format!(
            "{count} samples with tangent parallel to up; previous axes reused"
        ));
        log::warn!("tube build hit {count} up-aligned tangents");
    }

    frames
}

/// Frame used when the very first sample is already degenerate.
fn fallback_frame(up: Vec3) -> TransportFrame {
    let tangent = if up.cross(Vec3::Z).length_squared() > Tolerance::ZERO_LENGTH.eps_squared() {
        Vec3::Z
    } else {
        Vec3::X
    };
    let bitangent = up.cross(tangent).normalized().unwrap_or(Vec3::X);
    let normal = tangent.cross(bitangent).normalized().unwrap_or(Vec3::Y);
    TransportFrame {
        tangent,
        bitangent,
        normal,
    }
}
