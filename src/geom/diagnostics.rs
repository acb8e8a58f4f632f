//! Diagnostics for tube mesh builds.
//!
//! Diagnostics are collected while a tube is skinned over a sample sequence
//! and returned alongside the mesh. They are how degenerate-geometry
//! fallbacks surface to the host: the build never fails on bad frames, it
//! substitutes and counts.

/// Counts and warnings describing one tube build.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TubeDiagnostics {
    /// Number of cross-section rings emitted (one per input sample).
    pub ring_count: usize,

    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the final mesh.
    pub triangle_count: usize,

    /// Samples whose finite-difference tangent was degenerate (duplicate
    /// consecutive samples); the previous frame's axes were reused.
    pub degenerate_tangent_count: usize,

    /// Samples where the raw frame could not be built because the tangent
    /// was parallel to the up axis; the previous frame's axes were reused.
    pub degenerate_frame_count: usize,

    /// Bitangent sign flips applied to keep adjacent rings consistently
    /// oriented.
    pub flipped_bitangent_count: usize,

    /// Normal sign flips applied to keep adjacent rings consistently
    /// oriented.
    pub flipped_normal_count: usize,

    /// Human-readable warnings about fallbacks performed.
    pub warnings: Vec<String>,
}

impl TubeDiagnostics {
    /// Creates a new empty diagnostics struct with all counts at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the build completed without any degenerate-frame
    /// fallback.
    ///
    /// Orientation flips are not counted here: they are the continuity
    /// correction working as intended, not a geometry problem.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.degenerate_tangent_count == 0
            && self.degenerate_frame_count == 0
            && self.warnings.is_empty()
    }
}
