//! Mesh validation utilities.
//!
//! `MeshValidator` checks welded mesh integrity: aligned per-vertex channels,
//! in-range indices, unit-or-zero normals, unique welding keys, AABB dimensions.

use std::collections::HashSet;

use glam::Vec3;

use crate::build::WeldKey;
use crate::viewport::mesh::WeldedMesh;
use crate::viewport::picking::Aabb;

/// Validator for `WeldedMesh` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a WeldedMesh,
}

impl<'a> MeshValidator<'a> {
    /// Create a new validator for the given mesh.
    pub fn new(mesh: &'a WeldedMesh) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Check that positions, normals and colors have one entry per vertex.
    pub fn are_channels_aligned(&self) -> bool {
        let n = self.mesh.positions().len();
        self.mesh.normals().len() == n && self.mesh.colors().len() == n
    }

    /// Check that the index buffer length is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices().len() % 3 == 0
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices().iter().all(|&i| i < max_idx)
    }

    /// Check that every normal is either unit length (within epsilon) or zero.
    pub fn are_normals_unit_or_zero(&self, epsilon: f32) -> bool {
        self.mesh.normals().iter().all(|n| {
            let len = Vec3::from(*n).length();
            len == 0.0 || (len - 1.0).abs() <= epsilon
        })
    }

    /// Check that no two welded vertices share a welding key.
    pub fn are_weld_keys_unique(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.vertex_count());
        self.mesh
            .positions()
            .iter()
            .all(|p| seen.insert(WeldKey::new(Vec3::from(*p))))
    }

    /// Check that every color channel lies in 0..=1.
    pub fn are_colors_normalized(&self) -> bool {
        self.mesh
            .colors()
            .iter()
            .flatten()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Compute the axis-aligned bounding box of the mesh.
    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_mesh(self.mesh)
    }

    /// Compute the dimensions (width, height, depth) of the bounding box.
    pub fn dimensions(&self) -> [f32; 3] {
        self.aabb().map(|b| b.size().to_array()).unwrap_or([0.0; 3])
    }

    /// Check that the AABB dimensions are approximately equal to `expected`.
    pub fn assert_dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = self.dimensions();
        dims.iter()
            .zip(expected)
            .all(|(d, e)| (d - e).abs() < tolerance)
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.are_channels_aligned() {
            errors.push(format!(
                "Channel lengths differ: {} positions, {} normals, {} colors",
                self.mesh.positions().len(),
                self.mesh.normals().len(),
                self.mesh.colors().len()
            ));
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices().len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices()
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (max {}): {:?}",
                max_idx, out_of_range
            ));
        }

        if !self.are_normals_unit_or_zero(1e-4) {
            errors.push("Normals are neither unit length nor zero".to_string());
        }

        if !self.are_weld_keys_unique() {
            errors.push("Two welded vertices share a welding key".to_string());
        }

        if !self.are_colors_normalized() {
            errors.push("Color channel outside 0..=1".to_string());
        }

        errors
    }
}
