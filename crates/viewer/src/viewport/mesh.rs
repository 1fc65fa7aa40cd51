use glam::Vec3;

/// Floats per vertex in the interleaved upload layout:
/// position(3) + normal(3) + color(4)
pub const VERTEX_STRIDE: usize = 10;

/// Renderer-ready welded mesh.
///
/// Positions, normals and colors are parallel arrays addressed by the welded
/// vertex index, so a `u32` handle is all that ever refers to a vertex. Only the
/// alpha channel of `colors` changes after construction (see
/// [`FaceSelection`](crate::state::selection::FaceSelection)).
#[derive(Debug, Clone, PartialEq)]
pub struct WeldedMesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    /// Three per triangle, in source face order
    indices: Vec<u32>,
}

impl WeldedMesh {
    pub(crate) fn from_parts(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        colors: Vec<[f32; 4]>,
        indices: Vec<u32>,
    ) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        debug_assert_eq!(positions.len(), colors.len());
        debug_assert_eq!(indices.len() % 3, 0);
        Self {
            positions,
            normals,
            colors,
            indices,
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Welded vertex indices of a triangle
    pub fn triangle(&self, tri: usize) -> Option<[u32; 3]> {
        let base = tri.checked_mul(3)?;
        let t = self.indices.get(base..base + 3)?;
        Some([t[0], t[1], t[2]])
    }

    /// Corner positions of a triangle
    pub fn triangle_positions(&self, tri: usize) -> Option<[Vec3; 3]> {
        let [a, b, c] = self.triangle(tri)?;
        Some([self.position(a), self.position(b), self.position(c)])
    }

    pub fn position(&self, vertex: u32) -> Vec3 {
        Vec3::from(self.positions[vertex as usize])
    }

    pub fn alpha(&self, vertex: u32) -> f32 {
        self.colors[vertex as usize][3]
    }

    pub(crate) fn set_alpha(&mut self, vertex: u32, alpha: f32) {
        self.colors[vertex as usize][3] = alpha;
    }

    /// Interleaved vertex buffer ([`VERTEX_STRIDE`] floats per vertex) for a
    /// single GPU upload alongside [`indices`](Self::indices).
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count() * VERTEX_STRIDE);
        for ((p, n), c) in self.positions.iter().zip(&self.normals).zip(&self.colors) {
            out.extend_from_slice(p);
            out.extend_from_slice(n);
            out.extend_from_slice(c);
        }
        out
    }
}
