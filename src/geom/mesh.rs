//! Mesh buffers produced by the tube builder.

/// A triangulated tube surface plus its frame-axis debug lines.
///
/// Positions and indices are renderer-ready plain buffers; the engine never
/// computes shading attributes (vertex normals are the render side's
/// concern). `frame_lines` is a line-segment list in start/end pairs, one
/// bitangent and one normal segment per curve sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TubeMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub frame_lines: Vec<[f64; 3]>,
}

impl TubeMesh {
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>, frame_lines: Vec<[f64; 3]>) -> Self {
        Self {
            positions,
            indices,
            frame_lines,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    /// Returns true if indices represent a triangle list.
    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.has_triangle_indices() {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if self.frame_lines.len() % 2 != 0 {
            return Err("frame lines are not in start/end pairs".to_string());
        }
        Ok(())
    }

    /// Returns the position buffer as a flat slice: `[x0, y0, z0, x1, y1, z1, ...]`.
    ///
    /// This is a zero-copy view over `positions`, useful for adapters that
    /// expect packed numeric buffers.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.positions)
    }

    /// Returns the frame-axis line list as a flat slice, two consecutive
    /// points per line segment.
    #[must_use]
    pub fn frame_lines_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.frame_lines)
    }
}

fn flatten_f64_array_slice<const N: usize>(data: &[[f64; N]]) -> &[f64] {
    let count = data.len().checked_mul(N).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f64>();
    // SAFETY: `[[f64; N]]` is stored contiguously, and we compute the element count as `len * N`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}
