//! The editable curve chain.
//!
//! A chain is an ordered run of cubic Bézier segments with shared joints.
//! Control points live in an arena owned by the chain; segments refer to
//! them by [`PointId`], and joint sharing is expressed as "segment i's end
//! id equals segment i+1's start id". Chain order is the authority for
//! adjacency: neighbor lookups use index ± 1.
//!
//! Edits propagate tangent-continuity constraints (see [`CurveChain::move_point`])
//! and resample every segment whose geometry changed, so readers of
//! [`CurveChain::flatten_samples`] never observe a stale shape within one
//! update cycle.

use super::bezier::CubicBezier3;
use super::core::{Point3, Tolerance};
use super::sample;

/// Identifier for a control point within a chain's point arena.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PointId(pub usize);

impl PointId {
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// How a point edit was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Live drag of an existing point; continuity constraints propagate to
    /// the neighboring handles.
    Drag,
    /// Authoring placement of a point; no propagation.
    Place,
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("control point count must be a positive multiple of 4, got {0}")]
    InvalidControlPointCount(usize),
    #[error("control points must be finite")]
    NonFinitePoints,
    #[error("sample spacing must be finite and > 0")]
    InvalidSpacing,
    #[error("segment {index} does not start where the previous segment ends")]
    DiscontinuousChain { index: usize },
}

/// One committed cubic segment: four arena ids plus its cached samples.
#[derive(Debug, Clone)]
pub struct ChainSegment {
    ids: [PointId; 4],
    samples: Vec<Point3>,
}

impl ChainSegment {
    /// Control point ids in p0, p1, p2, p3 order.
    #[must_use]
    pub const fn ids(&self) -> [PointId; 4] {
        self.ids
    }

    /// The cached arc-length samples, recomputed whenever the segment's
    /// geometry changes.
    #[must_use]
    pub fn samples(&self) -> &[Point3] {
        &self.samples
    }
}

/// The tentative segment shown while an extrusion drag is in flight.
///
/// Its start aliases the chain's current last point; the other three control
/// points stay plain positions until [`CurveChain::commit_extrusion`]
/// promotes them into the arena.
#[derive(Debug, Clone)]
pub struct PendingSegment {
    start: PointId,
    p1: Point3,
    p2: Point3,
    p3: Point3,
    samples: Vec<Point3>,
}

impl PendingSegment {
    #[must_use]
    pub const fn start(&self) -> PointId {
        self.start
    }

    #[must_use]
    pub const fn handles(&self) -> (Point3, Point3) {
        (self.p1, self.p2)
    }

    #[must_use]
    pub const fn end(&self) -> Point3 {
        self.p3
    }

    #[must_use]
    pub fn samples(&self) -> &[Point3] {
        &self.samples
    }
}

/// An open, non-empty run of cubic Bézier segments with shared joints.
#[derive(Debug, Clone)]
pub struct CurveChain {
    points: Vec<Point3>,
    segments: Vec<ChainSegment>,
    pending: Option<PendingSegment>,
    spacing: f64,
}

impl CurveChain {
    /// Build a chain from a flat list of control points, four per segment.
    ///
    /// Adjacent groups must be C0-coincident: each group's first point is
    /// welded onto the previous group's last point, so the joint is a
    /// single arena slot shared by both segments. Every segment is sampled
    /// at `spacing` on construction.
    pub fn from_control_points(
        control_points: &[Point3],
        spacing: f64,
    ) -> Result<Self, ChainError> {
        Self::from_control_points_with_tolerance(control_points, spacing, Tolerance::WELD)
    }

    pub fn from_control_points_with_tolerance(
        control_points: &[Point3],
        spacing: f64,
        tol: Tolerance,
    ) -> Result<Self, ChainError> {
        if control_points.is_empty() || control_points.len() % 4 != 0 {
            return Err(ChainError::InvalidControlPointCount(control_points.len()));
        }
        if control_points.iter().any(|p| !p.is_finite()) {
            return Err(ChainError::NonFinitePoints);
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(ChainError::InvalidSpacing);
        }

        let mut chain = Self {
            points: Vec::with_capacity(control_points.len()),
            segments: Vec::with_capacity(control_points.len() / 4),
            pending: None,
            spacing,
        };

        for (index, group) in control_points.chunks_exact(4).enumerate() {
            let p0 = if index == 0 {
                chain.alloc(group[0])
            } else {
                let prev_end = chain.segments[index - 1].ids[3];
                if !tol.approx_eq_point3(chain.points[prev_end.index()], group[0]) {
                    return Err(ChainError::DiscontinuousChain { index });
                }
                prev_end
            };
            let p1 = chain.alloc(group[1]);
            let p2 = chain.alloc(group[2]);
            let p3 = chain.alloc(group[3]);
            chain.segments.push(ChainSegment {
                ids: [p0, p1, p2, p3],
                samples: Vec::new(),
            });
        }

        for index in 0..chain.segments.len() {
            chain.resample_segment(index);
        }

        log::debug!(
            "built chain: {} segments, {} control points",
            chain.segments.len(),
            chain.points.len()
        );
        Ok(chain)
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn point(&self, id: PointId) -> Option<Point3> {
        self.points.get(id.index()).copied()
    }

    #[must_use]
    pub fn segments(&self) -> &[ChainSegment] {
        &self.segments
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingSegment> {
        self.pending.as_ref()
    }

    #[must_use]
    pub const fn sample_spacing(&self) -> f64 {
        self.spacing
    }

    /// The cubic curve of a committed segment, materialized from the arena.
    #[must_use]
    pub fn segment_curve(&self, index: usize) -> Option<CubicBezier3> {
        let seg = self.segments.get(index)?;
        Some(CubicBezier3::new(
            self.points[seg.ids[0].index()],
            self.points[seg.ids[1].index()],
            self.points[seg.ids[2].index()],
            self.points[seg.ids[3].index()],
        ))
    }

    /// Indices of every committed segment that owns `point` in any of its
    /// four control slots. A joint yields two indices, a handle one, an
    /// unknown id none.
    #[must_use]
    pub fn owning_segments(&self, point: PointId) -> Vec<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, seg)| seg.ids.contains(&point))
            .map(|(index, _)| index)
            .collect()
    }

    /// Move a control point and propagate tangent continuity.
    ///
    /// With [`MoveKind::Drag`]:
    /// - a joint carries both adjacent handles along rigidly (segment i's
    ///   p2 and segment i+1's p1 translate by the same displacement), so
    ///   the tangent direction through the joint is preserved;
    /// - a handle next to a joint mirrors the neighboring segment's handle
    ///   across the joint, keeping the neighbor's own handle length, which
    ///   enforces opposite collinear tangents without changing the
    ///   neighbor's curvature weight.
    ///
    /// [`MoveKind::Place`] updates the position only. A point id not owned
    /// by any segment is a no-op. Every affected segment is resampled
    /// before returning.
    pub fn move_point(&mut self, point: PointId, position: Point3, kind: MoveKind) {
        let Some(current) = self.point(point) else {
            return;
        };
        let owners = self.owning_segments(point);
        if owners.is_empty() {
            return;
        }

        let delta = position.sub_point(current);
        self.points[point.index()] = position;

        let mut touched = owners.clone();
        if kind == MoveKind::Drag {
            if let [index] = owners[..] {
                if let Some(neighbor) = self.mirror_neighbor_handle(index, point, position) {
                    touched.push(neighbor);
                }
            } else if let [first, second] = owners[..] {
                // Joint between two adjacent segments: translate the flanking
                // handles by the joint's displacement.
                if self.segments[first].ids[3] == point && self.segments[second].ids[0] == point {
                    let h0 = self.segments[first].ids[2];
                    let h1 = self.segments[second].ids[1];
                    self.points[h0.index()] = self.points[h0.index()].add_vec(delta);
                    self.points[h1.index()] = self.points[h1.index()].add_vec(delta);
                }
            }
        }

        for index in touched {
            self.resample_segment(index);
        }
    }

    /// C1 propagation for a dragged handle: reposition the neighbor
    /// segment's facing handle on the opposite side of the shared joint.
    /// Returns the neighbor's segment index when a handle moved.
    fn mirror_neighbor_handle(
        &mut self,
        index: usize,
        point: PointId,
        position: Point3,
    ) -> Option<usize> {
        let ids = self.segments[index].ids;

        let (joint, neighbor_index, neighbor_handle) = if ids[1] == point {
            let prev = index.checked_sub(1)?;
            (ids[0], prev, self.segments[prev].ids[2])
        } else if ids[2] == point {
            let next = index + 1;
            if next >= self.segments.len() {
                return None;
            }
            (ids[3], next, self.segments[next].ids[1])
        } else {
            return None;
        };

        let joint_pos = self.points[joint.index()];
        let dir = joint_pos.sub_point(position).normalized()?;
        let dist = self.points[neighbor_handle.index()].distance_to(joint_pos);
        self.points[neighbor_handle.index()] = joint_pos.add_vec(dir.mul_scalar(dist));
        Some(neighbor_index)
    }

    /// Build (or rebuild) the tentative extrusion segment toward `target`.
    ///
    /// The pending segment continues the chain's outgoing tangent: p1 sits
    /// half a chord length along the direction away from the last handle,
    /// and p2 is pulled halfway from the target back toward p1. The segment
    /// is sampled but not attached; at most one pending segment exists.
    pub fn preview_extrusion(&mut self, target: Point3) {
        let Some(last) = self.segments.last() else {
            return;
        };
        let ids = last.ids;
        let start = ids[3];
        let p0 = self.points[start.index()];
        let p3 = target;

        let chord = p3.sub_point(p0);
        let half_chord = 0.5 * chord.length();

        // A degenerate outgoing handle falls back to the chord direction; a
        // zero chord collapses the handles onto the start point.
        let out_dir = p0
            .sub_point(self.points[ids[2].index()])
            .normalized()
            .or_else(|| chord.normalized());

        let (p1, p2) = match out_dir {
            Some(dir) if half_chord > 0.0 => {
                let p1 = p0.add_vec(dir.mul_scalar(half_chord));
                let p2 = p3.lerp(p1, 0.5);
                (p1, p2)
            }
            _ => (p0, p0),
        };

        let curve = CubicBezier3::new(p0, p1, p2, p3);
        let mut samples = match self.pending.take() {
            Some(pending) => pending.samples,
            None => Vec::new(),
        };
        // Spacing is validated before it is stored, so sampling cannot fail.
        if sample::sample_curve_into(&curve, self.spacing, sample::DEFAULT_MARCH_STEP, &mut samples)
            .is_err()
        {
            samples.clear();
        }
        self.pending = Some(PendingSegment {
            start,
            p1,
            p2,
            p3,
            samples,
        });
    }

    /// Promote the pending segment into the committed chain.
    ///
    /// Allocates arena points for p1/p2/p3 (p0 already aliases the chain's
    /// last point) and returns the new segment's index, or `None` when no
    /// extrusion is in flight.
    pub fn commit_extrusion(&mut self) -> Option<usize> {
        let pending = self.pending.take()?;
        let p1 = self.alloc(pending.p1);
        let p2 = self.alloc(pending.p2);
        let p3 = self.alloc(pending.p3);
        let index = self.segments.len();
        self.segments.push(ChainSegment {
            ids: [pending.start, p1, p2, p3],
            samples: pending.samples,
        });
        log::debug!("committed extrusion as segment {index}");
        Some(index)
    }

    /// Drop the pending segment, leaving the committed chain untouched.
    pub fn cancel_extrusion(&mut self) {
        self.pending = None;
    }

    /// The concatenated samples of every committed segment in chain order,
    /// followed by the pending segment's samples while an extrusion
    /// preview is in flight.
    #[must_use]
    pub fn flatten_samples(&self) -> Vec<Point3> {
        let mut out = Vec::with_capacity(self.sample_count());
        for seg in &self.segments {
            out.extend_from_slice(&seg.samples);
        }
        if let Some(pending) = &self.pending {
            out.extend_from_slice(&pending.samples);
        }
        out
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        let committed: usize = self.segments.iter().map(|seg| seg.samples.len()).sum();
        committed + self.pending.as_ref().map_or(0, |p| p.samples.len())
    }

    /// Control points in p0..p3 order per segment, pending segment
    /// included. Feeds the host's control-cage rendering.
    #[must_use]
    pub fn control_polygon(&self) -> Vec<Point3> {
        let groups = self.segments.len() + usize::from(self.pending.is_some());
        let mut out = Vec::with_capacity(4 * groups);
        for seg in &self.segments {
            for id in seg.ids {
                out.push(self.points[id.index()]);
            }
        }
        if let Some(pending) = &self.pending {
            out.push(self.points[pending.start.index()]);
            out.push(pending.p1);
            out.push(pending.p2);
            out.push(pending.p3);
        }
        out
    }

    /// Change the target spacing and resample the whole chain, pending
    /// segment included.
    pub fn set_sample_spacing(&mut self, spacing: f64) -> Result<(), ChainError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(ChainError::InvalidSpacing);
        }
        self.spacing = spacing;
        for index in 0..self.segments.len() {
            self.resample_segment(index);
        }
        if let Some(pending) = &self.pending {
            let target = pending.p3;
            self.preview_extrusion(target);
        }
        Ok(())
    }

    fn alloc(&mut self, position: Point3) -> PointId {
        let id = PointId::new(self.points.len());
        self.points.push(position);
        id
    }

    fn resample_segment(&mut self, index: usize) {
        let Some(curve) = self.segment_curve(index) else {
            return;
        };
        let spacing = self.spacing;
        let seg = &mut self.segments[index];
        // Spacing is validated before it is stored, so sampling cannot fail.
        if sample::sample_curve_into(&curve, spacing, sample::DEFAULT_MARCH_STEP, &mut seg.samples)
            .is_err()
        {
            seg.samples.clear();
        }
    }
}
